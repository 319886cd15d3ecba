use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use crate::size::Size;

/// Growable, randomly-indexable sequence with `SizeT`-typed indices.
/// Capacity doubles on overflow via the backing `Vec`; append is amortized
/// O(1), indexed access O(1), mid removal O(n).
#[derive(Clone)]
pub struct Array<SizeT, ValueT>
where
    SizeT: Size,
{
    vec: Vec<ValueT>,
    phantom: PhantomData<SizeT>,
}

impl<SizeT, ValueT> Default for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    fn default() -> Self {
        Array { vec: Vec::default(), phantom: PhantomData }
    }
}

impl<SizeT, ValueT> Array<SizeT, ValueT>
where
    SizeT: Size,
{
    pub fn with_capacity(capacity: SizeT) -> Self {
        Array { vec: Vec::with_capacity(capacity.as_usize()), phantom: PhantomData }
    }

    pub fn capacity(&self) -> SizeT {
        debug_assert!(self.vec.capacity() <= SizeT::MAX.as_usize());
        unsafe { SizeT::from(self.vec.capacity()).unwrap_unchecked() }
    }

    pub fn len(&self) -> SizeT {
        debug_assert!(self.vec.len() <= SizeT::MAX.as_usize());
        unsafe { SizeT::from(self.vec.len()).unwrap_unchecked() }
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn first(&self) -> Option<&ValueT> {
        self.vec.first()
    }

    pub fn iter(&self) -> Iter<ValueT> {
        self.vec.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<ValueT> {
        self.vec.iter_mut()
    }

    pub fn resize_with<F>(&mut self, new_len: SizeT, f: F)
    where
        F: FnMut() -> ValueT,
    {
        self.vec.resize_with(new_len.as_usize(), f);
    }

    pub fn push(&mut self, value: ValueT) {
        self.vec.push(value);
    }

    pub fn pop(&mut self) -> Option<ValueT> {
        self.vec.pop()
    }

    /// Removes the element at `index`, shifting everything after it left.
    /// Panics when `index` is out of `[0, len)`.
    pub fn remove_at(&mut self, index: SizeT) -> ValueT {
        self.vec.remove(index.as_usize())
    }

    pub fn clear(&mut self) {
        self.vec.clear();
    }

    pub fn swap(&mut self, a: SizeT, b: SizeT) {
        self.vec.swap(a.as_usize(), b.as_usize());
    }
}

impl<SizeT, ValueT> Index<SizeT> for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    type Output = ValueT;
    fn index(&self, index: SizeT) -> &Self::Output {
        &self.vec[index.as_usize()]
    }
}

impl<SizeT, ValueT> IndexMut<SizeT> for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    fn index_mut(&mut self, index: SizeT) -> &mut Self::Output {
        &mut self.vec[index.as_usize()]
    }
}

impl<SizeT, ValueT> IntoIterator for Array<SizeT, ValueT>
where
    SizeT: Size,
{
    type Item = ValueT;
    type IntoIter = std::vec::IntoIter<ValueT>;
    fn into_iter(self) -> Self::IntoIter {
        self.vec.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Array;

    #[test]
    fn push_and_index() {
        let mut array: Array<usize, i32> = Array::default();
        assert!(array.is_empty());

        array.push(10);
        array.push(20);
        array.push(30);

        assert_eq!(array.len(), 3);
        assert_eq!(array[0], 10);
        assert_eq!(array[1], 20);
        assert_eq!(array[2], 30);
    }

    #[test]
    fn index_mut_overwrites() {
        let mut array: Array<usize, i32> = Array::default();
        array.push(1);
        array.push(2);

        array[1] = 5;
        assert_eq!(array[1], 5);
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn remove_at_shifts_tail() {
        let mut array: Array<usize, i32> = Array::default();
        for value in [1, 2, 3, 4] {
            array.push(value);
        }

        assert_eq!(array.remove_at(1), 2);
        assert_eq!(array.len(), 3);
        assert_eq!(array[0], 1);
        assert_eq!(array[1], 3);
        assert_eq!(array[2], 4);
    }

    #[test]
    fn swap_and_pop() {
        let mut array: Array<u32, &str> = Array::default();
        array.push("a");
        array.push("b");

        array.swap(0, 1);
        assert_eq!(array[0u32], "b");
        assert_eq!(array.pop(), Some("a"));
        assert_eq!(array.pop(), Some("b"));
        assert_eq!(array.pop(), None);
    }

    #[test]
    fn with_capacity_reserves() {
        let array: Array<usize, i32> = Array::with_capacity(8);

        assert!(array.capacity() >= 8);
        assert!(array.is_empty());
    }

    #[test]
    fn clear_empties() {
        let mut array: Array<usize, i32> = Array::default();
        array.push(7);
        array.clear();

        assert!(array.is_empty());
        assert_eq!(array.len(), 0);
        assert_eq!(array.first(), None);
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let array: Array<usize, i32> = Array::default();
        let _ = array[0];
    }
}
