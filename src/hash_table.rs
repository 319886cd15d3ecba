use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::array::Array;
use crate::size::Size;

const DEFAULT_CAPACITY: usize = 25;
const DEFAULT_LOAD_FACTOR: f64 = 0.7;

/// Linear probing step constant. Capacity is kept coprime with it so the
/// probe sequence `offset + LINEAR_CONSTANT * x mod capacity` visits every
/// slot before repeating.
const LINEAR_CONSTANT: usize = 17;

/// A slot is empty (never used), occupied, or tombstoned: logically deleted
/// but still holding its place in probe sequences that pass through it.
enum Bucket<KeyT> {
    Empty,
    Occupied(KeyT),
    Tombstone,
}

/// Open-addressing hash table with linear probing and tombstone deletion.
///
/// Reads take `&mut self`: a lookup that probes past a tombstone relocates
/// the found entry into it, shortening future probe chains for that key.
pub struct HashTable<KeyT, ValueT, SizeT = usize>
where
    KeyT: Hash + Eq,
    SizeT: Size,
{
    buckets: Array<SizeT, Bucket<KeyT>>,
    values: Array<SizeT, Option<ValueT>>,
    // occupied slots, and occupied + tombstoned slots
    key_count: SizeT,
    used_buckets: SizeT,
    threshold: SizeT,
    load_factor: f64,
}

impl<KeyT, ValueT, SizeT> Default for HashTable<KeyT, ValueT, SizeT>
where
    KeyT: Hash + Eq,
    SizeT: Size,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<KeyT, ValueT, SizeT> HashTable<KeyT, ValueT, SizeT>
where
    KeyT: Hash + Eq,
    SizeT: Size,
{
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(
            SizeT::from(DEFAULT_CAPACITY).unwrap(),
            DEFAULT_LOAD_FACTOR,
        )
    }

    pub fn with_capacity(capacity: SizeT) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Panics when `capacity` is zero or `load_factor` is non-positive, NaN
    /// or infinite. The load factor is clamped into `[0.7, 1.0]`; at most
    /// `floor(load_factor * capacity)` buckets are ever in use, so the probe
    /// loop always finds an empty slot before wrapping.
    pub fn with_capacity_and_load_factor(capacity: SizeT, load_factor: f64) -> Self {
        assert!(capacity > SizeT::ZERO, "illegal capacity: 0");
        assert!(
            load_factor > 0.0 && load_factor.is_finite(),
            "illegal load factor: {}",
            load_factor
        );
        let load_factor = load_factor.clamp(DEFAULT_LOAD_FACTOR, 1.0);

        // threshold from the requested capacity, then the coprimality fixup
        let threshold = (load_factor * capacity.as_usize() as f64) as usize;
        let capacity = adjust_capacity(capacity.as_usize());
        assert!(
            capacity <= SizeT::MAX.as_usize(),
            "adjusted capacity {} overflows the size type",
            capacity
        );

        let mut buckets = Array::default();
        buckets.resize_with(SizeT::from(capacity).unwrap(), || Bucket::Empty);
        let mut values = Array::default();
        values.resize_with(SizeT::from(capacity).unwrap(), || None);

        HashTable {
            buckets,
            values,
            key_count: SizeT::ZERO,
            used_buckets: SizeT::ZERO,
            threshold: SizeT::from(threshold).unwrap(),
            load_factor,
        }
    }

    /// Number of keys currently present.
    pub fn len(&self) -> SizeT {
        self.key_count
    }

    pub fn is_empty(&self) -> bool {
        self.key_count == SizeT::ZERO
    }

    pub fn capacity(&self) -> SizeT {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Inserts `key -> value`, returning the previously assigned value when
    /// the key was already present. Resizes first once used buckets
    /// (occupied plus tombstoned) reach the load-factor threshold.
    pub fn insert(&mut self, key: KeyT, value: ValueT) -> Option<ValueT> {
        if self.used_buckets >= self.threshold {
            self.resize();
        }

        let capacity = self.buckets.len().as_usize();
        let offset = self.bucket_offset(&key);
        let mut first_tombstone: Option<SizeT> = None;
        let mut i = offset;
        let mut x = 1;
        loop {
            let slot = SizeT::from(i).unwrap();
            match &self.buckets[slot] {
                Bucket::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(slot);
                    }
                }
                Bucket::Occupied(existing) if existing == &key => {
                    return Some(match first_tombstone {
                        // overwrite in place
                        None => mem::replace(&mut self.values[slot], Some(value))
                            .unwrap(),
                        // compact the bucket: move the entry back into the
                        // tombstone passed earlier on this probe path
                        Some(j) => {
                            self.buckets[slot] = Bucket::Tombstone;
                            let previous = self.values[slot].take().unwrap();
                            self.buckets[j] = Bucket::Occupied(key);
                            self.values[j] = Some(value);
                            previous
                        }
                    });
                }
                Bucket::Occupied(_) => {}
                Bucket::Empty => {
                    let slot = match first_tombstone {
                        // a fresh slot consumes a bucket; a reused tombstone
                        // was already counted as used
                        None => {
                            self.used_buckets = self.used_buckets + SizeT::one();
                            slot
                        }
                        Some(j) => j,
                    };
                    self.key_count = self.key_count + SizeT::one();
                    self.buckets[slot] = Bucket::Occupied(key);
                    self.values[slot] = Some(value);
                    return None;
                }
            }
            i = (offset + probe(x)) % capacity;
            x += 1;
        }
    }

    pub fn get(&mut self, key: &KeyT) -> Option<&ValueT> {
        let slot = self.locate(key)?;
        self.values[slot].as_ref()
    }

    pub fn get_mut(&mut self, key: &KeyT) -> Option<&mut ValueT> {
        let slot = self.locate(key)?;
        self.values[slot].as_mut()
    }

    pub fn contains_key(&mut self, key: &KeyT) -> bool {
        self.locate(key).is_some()
    }

    /// Removes `key`, returning its value. The slot becomes a tombstone and
    /// keeps holding its probe-sequence position until the next resize.
    pub fn remove(&mut self, key: &KeyT) -> Option<ValueT> {
        let capacity = self.buckets.len().as_usize();
        let offset = self.bucket_offset(key);
        let mut i = offset;
        let mut x = 1;
        loop {
            let slot = SizeT::from(i).unwrap();
            match &self.buckets[slot] {
                Bucket::Occupied(existing) if existing == key => {
                    self.key_count = self.key_count - SizeT::one();
                    self.buckets[slot] = Bucket::Tombstone;
                    return self.values[slot].take();
                }
                Bucket::Occupied(_) | Bucket::Tombstone => {}
                Bucket::Empty => return None,
            }
            i = (offset + probe(x)) % capacity;
            x += 1;
        }
    }

    /// Resets every slot to empty, keeping the current capacity.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            *bucket = Bucket::Empty;
        }
        for value in self.values.iter_mut() {
            *value = None;
        }
        self.key_count = SizeT::ZERO;
        self.used_buckets = SizeT::ZERO;
    }

    /// Live entries in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyT, &ValueT)> {
        self.buckets
            .iter()
            .zip(self.values.iter())
            .filter_map(|(bucket, value)| match bucket {
                Bucket::Occupied(key) => value.as_ref().map(|value| (key, value)),
                _ => None,
            })
    }

    pub fn keys(&self) -> impl Iterator<Item = &KeyT> {
        self.iter().map(|(key, _)| key)
    }

    /// Probes for `key` and returns its slot. A hit found past a tombstone
    /// is relocated into that tombstone first (lazy relocation), so the
    /// returned slot is where the entry now lives.
    fn locate(&mut self, key: &KeyT) -> Option<SizeT> {
        let capacity = self.buckets.len().as_usize();
        let offset = self.bucket_offset(key);
        let mut first_tombstone: Option<SizeT> = None;
        let mut i = offset;
        let mut x = 1;
        loop {
            let slot = SizeT::from(i).unwrap();
            match &self.buckets[slot] {
                Bucket::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(slot);
                    }
                }
                Bucket::Occupied(existing) if existing == key => {
                    return Some(match first_tombstone {
                        None => slot,
                        Some(j) => {
                            let bucket =
                                mem::replace(&mut self.buckets[slot], Bucket::Tombstone);
                            let value = self.values[slot].take();
                            self.buckets[j] = bucket;
                            self.values[j] = value;
                            j
                        }
                    });
                }
                Bucket::Occupied(_) => {}
                Bucket::Empty => return None,
            }
            i = (offset + probe(x)) % capacity;
            x += 1;
        }
    }

    /// Grows to `2 * capacity + 1` (then up to the next value coprime with
    /// the probing constant) and rehashes every occupied slot. Tombstones
    /// are dropped rather than carried over. A narrow `SizeT` bounds the
    /// table at `SizeT::MAX` slots; growth past that is a contract
    /// violation reported here rather than a conversion failure.
    fn resize(&mut self) {
        let capacity = adjust_capacity(2 * self.buckets.len().as_usize() + 1);
        assert!(
            capacity <= SizeT::MAX.as_usize(),
            "grown capacity {} overflows the size type",
            capacity
        );
        self.threshold =
            SizeT::from((self.load_factor * capacity as f64) as usize).unwrap();

        let mut buckets = Array::default();
        buckets.resize_with(SizeT::from(capacity).unwrap(), || Bucket::Empty);
        let mut values = Array::default();
        values.resize_with(SizeT::from(capacity).unwrap(), || None);

        let old_buckets = mem::replace(&mut self.buckets, buckets);
        let old_values = mem::replace(&mut self.values, values);
        self.key_count = SizeT::ZERO;
        self.used_buckets = SizeT::ZERO;

        for (bucket, value) in old_buckets.into_iter().zip(old_values) {
            if let (Bucket::Occupied(key), Some(value)) = (bucket, value) {
                self.insert(key, value);
            }
        }
    }

    fn bucket_offset(&self, key: &KeyT) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish() as usize % self.buckets.len().as_usize()
    }
}

fn probe(x: usize) -> usize {
    LINEAR_CONSTANT * x
}

fn adjust_capacity(mut capacity: usize) -> usize {
    while gcd(LINEAR_CONSTANT, capacity) != 1 {
        capacity += 1;
    }
    capacity
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
