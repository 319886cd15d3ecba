use std::hash::Hash;

use crate::hash_table::HashTable;
use crate::size::Size;

/// Membership structure layered over [`HashTable`] with `()` values.
pub struct Set<ElementT, SizeT = usize>
where
    ElementT: Hash + Eq,
    SizeT: Size,
{
    map: HashTable<ElementT, (), SizeT>,
}

impl<ElementT, SizeT> Default for Set<ElementT, SizeT>
where
    ElementT: Hash + Eq,
    SizeT: Size,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<ElementT, SizeT> Set<ElementT, SizeT>
where
    ElementT: Hash + Eq,
    SizeT: Size,
{
    pub fn new() -> Self {
        Set { map: HashTable::new() }
    }

    pub fn with_capacity(capacity: SizeT) -> Self {
        Set { map: HashTable::with_capacity(capacity) }
    }

    pub fn len(&self) -> SizeT {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&mut self, element: &ElementT) -> bool {
        self.map.contains_key(element)
    }

    /// Returns true when the element was newly added.
    pub fn insert(&mut self, element: ElementT) -> bool {
        self.map.insert(element, ()).is_none()
    }

    /// Returns true when the element was present.
    pub fn remove(&mut self, element: &ElementT) -> bool {
        self.map.remove(element).is_some()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Elements in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementT> {
        self.map.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::Set;

    #[test]
    fn insert_reports_newly_added() {
        let mut set: Set<String> = Set::new();

        assert!(set.insert("Djordjije".to_string()));
        assert!(set.insert("Bogdan".to_string()));
        assert!(!set.insert("Djordjije".to_string()));

        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn remove_reports_presence() {
        let mut set: Set<i32> = Set::with_capacity(4);
        set.insert(1);
        set.insert(2);

        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(!set.remove(&3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn contains_tracks_membership() {
        let mut set: Set<i32> = Set::new();
        for i in 0..50 {
            set.insert(i * 2);
        }

        for i in 0..100 {
            assert_eq!(set.contains(&i), i % 2 == 0);
        }
    }

    #[test]
    fn iter_yields_live_elements() {
        let mut set: Set<i32> = Set::new();
        for i in 0..10 {
            set.insert(i);
        }
        set.remove(&3);

        let mut elements: Vec<i32> = set.iter().copied().collect();
        elements.sort_unstable();
        assert_eq!(elements, vec![0, 1, 2, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut set: Set<i32> = Set::new();
        set.insert(1);
        set.insert(2);

        set.clear();

        assert!(set.is_empty());
        assert!(!set.contains(&1));
    }
}
