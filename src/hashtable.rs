use crate::control::DefaultControl;
use crate::error::Error;
use crate::hash::KeyedHasher;
use crate::table::RawTable;
use crate::traits::Control;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

/// Fixed-capacity hash table with group-wise metadata probing.
///
/// The table never grows. Inserting into a table whose probe sequence has no free slot fails with
/// [`Error::CapacityExceeded`]; keep occupancy below ~87.5% of [`capacity`](Self::capacity) for
/// short probe chains.
///
/// Not synchronized: share it across threads only behind external locking, or read-only after
/// every insert happens-before the readers start.
pub struct SwissTable<K, V, S = KeyedHasher, C: Control = DefaultControl> {
    raw: RawTable<K, V, C>,
    hasher: S,
}

impl<K, V> SwissTable<K, V> {
    /// Creates a table holding at least `capacity` slots, seeded with a fresh random key.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity overflows `usize`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, KeyedHasher::new())
    }
    /// Creates a table with exactly `capacity` slots.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::try_with_capacity_and_hasher(capacity, KeyedHasher::new())
    }
}

impl<K, V, S, C: Control> SwissTable<K, V, S, C> {
    /// `capacity` is rounded up to a power of two, and to at least one group.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity overflows `usize`.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = match capacity.max(C::WIDTH).checked_next_power_of_two() {
            Some(capacity) => capacity,
            None => panic!("capacity overflow"),
        };
        Self::build(capacity, hasher)
    }
    /// `capacity` must be a power of two holding at least one group.
    pub fn try_with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if !capacity.is_power_of_two() {
            return Err(Error::CapacityNotPowerOfTwo(capacity));
        }
        if capacity < C::WIDTH {
            return Err(Error::CapacityTooSmall {
                capacity,
                width: C::WIDTH,
            });
        }
        Ok(Self::build(capacity, hasher))
    }
    fn build(capacity: usize, hasher: S) -> Self {
        let groups = capacity / C::WIDTH;
        tracing::debug!(capacity, groups, width = C::WIDTH, "creating swiss table");
        Self {
            raw: RawTable::new(groups),
            hasher,
        }
    }
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
    pub fn groups(&self) -> usize {
        self.raw.groups()
    }
    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<K, V, S, C> SwissTable<K, V, S, C>
where
    K: Hash + Eq,
    S: BuildHasher,
    C: Control,
{
    /// Inserts `value` under `key`, or overwrites the value already stored for it.
    ///
    /// Returns the previous value on overwrite.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        let hash = self.hasher.hash_one(&key);
        let result = self.raw.insert_with_hash(key, value, hash);
        if let Err(error) = &result {
            tracing::warn!(%error, groups = self.raw.groups(), "swiss table insert rejected");
        }
        result
    }
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        self.raw.get_with_hash(key, hash)
    }
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        self.raw.get_with_hash_mut(key, hash)
    }
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }
}
