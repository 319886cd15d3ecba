use std::fmt;
use std::hash::Hash;

use crate::array::Array;
use crate::hash_table::HashTable;
use crate::set::Set;
use crate::size::Size;

/// Binary min-heap over an [`Array`], paired with a position index mapping
/// each element to the set of array slots currently holding it. The index
/// gives O(1) containment and O(log n) removal of arbitrary elements; a set
/// of positions (not a single one) because duplicates may occupy several
/// slots at once.
///
/// The heap owns both halves of that state, and every mutation goes through
/// [`IndexedHeap::swap`] so the array and the index cannot drift apart.
pub struct IndexedHeap<ValueT, SizeT = usize>
where
    ValueT: Ord + Hash + Clone,
    SizeT: Size,
{
    heap: Array<SizeT, ValueT>,
    positions: HashTable<ValueT, Set<SizeT>, SizeT>,
}

impl<ValueT, SizeT> Default for IndexedHeap<ValueT, SizeT>
where
    ValueT: Ord + Hash + Clone,
    SizeT: Size,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<ValueT, SizeT> IndexedHeap<ValueT, SizeT>
where
    ValueT: Ord + Hash + Clone,
    SizeT: Size,
{
    pub fn new() -> Self {
        IndexedHeap { heap: Array::default(), positions: HashTable::new() }
    }

    pub fn with_capacity(capacity: SizeT) -> Self {
        IndexedHeap { heap: Array::with_capacity(capacity), positions: HashTable::new() }
    }

    pub fn len(&self) -> SizeT {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Minimum element, or `None` on an empty heap.
    pub fn peek(&self) -> Option<&ValueT> {
        self.heap.first()
    }

    /// Appends the element and swims it toward the root.
    pub fn push(&mut self, element: ValueT) {
        let index = self.heap.len();
        self.heap.push(element.clone());
        self.index_position(element, index);
        self.swim(index);
    }

    /// Removes and returns the minimum element.
    pub fn poll(&mut self) -> Option<ValueT> {
        if self.is_empty() {
            None
        } else {
            Some(self.remove_at(SizeT::ZERO))
        }
    }

    /// Removes one occurrence of `element`, returning whether it was
    /// present. Among duplicates the occurrence at the numerically largest
    /// recorded position goes; callers must not rely on which instance
    /// that is.
    pub fn remove(&mut self, element: &ValueT) -> bool {
        let position = match self.positions.get_mut(element) {
            Some(set) => set.iter().copied().max(),
            None => None,
        };
        match position {
            Some(position) => {
                self.remove_at(position);
                true
            }
            None => false,
        }
    }

    /// O(1) via the position index.
    pub fn contains(&mut self, element: &ValueT) -> bool {
        self.positions.contains_key(element)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    /// Verification hook: checks the min-heap property for the subtree
    /// rooted at `index`. Not used by normal operation.
    pub fn is_min_heap(&self, index: SizeT) -> bool {
        if index >= self.heap.len() {
            return true;
        }
        let one = SizeT::one();
        let two = one + one;
        let left = index * two + one;
        let right = left + one;
        if left < self.heap.len() && self.heap[index] > self.heap[left] {
            return false;
        }
        if right < self.heap.len() && self.heap[index] > self.heap[right] {
            return false;
        }
        self.is_min_heap(left) && self.is_min_heap(right)
    }

    /// Swaps with the last slot, truncates, then repairs at `index`: sink
    /// first, and when sinking leaves the slot's value in place, swim.
    fn remove_at(&mut self, index: SizeT) -> ValueT {
        let last = self.heap.len() - SizeT::one();
        self.swap(index, last);
        let removed = self.heap.pop().unwrap();
        self.unindex_position(&removed, last);

        if index < last {
            let element = self.heap[index].clone();
            self.sink(index);
            if self.heap[index] == element {
                self.swim(index);
            }
        }
        removed
    }

    fn sink(&mut self, mut index: SizeT) {
        let one = SizeT::one();
        let two = one + one;
        loop {
            let left = index * two + one;
            let right = left + one;
            if left >= self.heap.len() {
                break;
            }
            // ties between equal children resolve toward the right
            let smaller = if right < self.heap.len() && self.heap[right] <= self.heap[left]
            {
                right
            } else {
                left
            };
            if self.heap[smaller] < self.heap[index] {
                self.swap(index, smaller);
                index = smaller;
            } else {
                break;
            }
        }
    }

    fn swim(&mut self, mut index: SizeT) {
        let one = SizeT::one();
        let two = one + one;
        while index > SizeT::ZERO {
            let parent = (index - one) / two;
            if self.heap[parent] > self.heap[index] {
                self.swap(parent, index);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// The sole mutation path that moves elements between slots: swaps the
    /// array entries and mirrors the move in both position sets.
    fn swap(&mut self, p: SizeT, q: SizeT) {
        if p == q {
            return;
        }
        self.heap.swap(p, q);
        if self.heap[p] == self.heap[q] {
            // equal values share one position set already holding p and q
            return;
        }
        self.move_position(p, q);
        self.move_position(q, p);
    }

    /// Records that the element now at `now_at` arrived from `was_at`.
    fn move_position(&mut self, now_at: SizeT, was_at: SizeT) {
        let element = self.heap[now_at].clone();
        let set = self.positions.get_mut(&element).unwrap();
        set.remove(&was_at);
        set.insert(now_at);
    }

    fn index_position(&mut self, element: ValueT, position: SizeT) {
        match self.positions.get_mut(&element) {
            Some(set) => {
                set.insert(position);
            }
            None => {
                let mut set = Set::new();
                set.insert(position);
                self.positions.insert(element, set);
            }
        }
    }

    /// Drops `position` from the element's set, and the set itself once it
    /// empties, so the index never accumulates empty entries.
    fn unindex_position(&mut self, element: &ValueT, position: SizeT) {
        if let Some(set) = self.positions.get_mut(element) {
            set.remove(&position);
            if set.is_empty() {
                self.positions.remove(element);
            }
        }
    }
}

/// Bulk load: append everything, then sift bottom-up from the last parent,
/// giving O(n) construction.
impl<ValueT, SizeT> FromIterator<ValueT> for IndexedHeap<ValueT, SizeT>
where
    ValueT: Ord + Hash + Clone,
    SizeT: Size,
{
    fn from_iter<I: IntoIterator<Item = ValueT>>(iter: I) -> Self {
        let mut heap = IndexedHeap::new();
        for element in iter {
            let index = heap.heap.len();
            heap.heap.push(element.clone());
            heap.index_position(element, index);
        }
        let two = SizeT::one() + SizeT::one();
        let mut index = heap.heap.len() / two;
        while index > SizeT::ZERO {
            index = index - SizeT::one();
            heap.sink(index);
        }
        heap
    }
}

/// Renders the backing array in heap (level) order.
impl<ValueT, SizeT> fmt::Debug for IndexedHeap<ValueT, SizeT>
where
    ValueT: Ord + Hash + Clone + fmt::Debug,
    SizeT: Size,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.heap.iter()).finish()
    }
}
