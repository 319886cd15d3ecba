//! In-memory collections built around two coupled invariants: an
//! open-addressing hash table with tombstone deletion and lazy relocation,
//! and a binary min-heap carrying a hash-based position index that gives
//! O(1) containment checks and O(log n) removal of arbitrary elements.

mod array;
mod hash_table;
mod heap;
mod set;
mod size;

pub use array::Array;
pub use hash_table::HashTable;
pub use heap::IndexedHeap;
pub use set::Set;
pub use size::Size;
