use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    mem,
};

/// Bucket-array capacity used when none is requested (or zero is)
const DEFAULT_CAPACITY: usize = 16;

/// Hard ceiling on the bucket-array capacity, so the doubling arithmetic
/// cannot overflow
const MAX_CAPACITY: usize = 1 << 30;

/// Numerator of the 3/4 load-factor threshold
const LOAD_FACTOR_NUM: usize = 3;

/// Denominator of the 3/4 load-factor threshold
const LOAD_FACTOR_DEN: usize = 4;

/// An occupied slot holding a key-value pair
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key; `None` is the single reserved nil key
    key: Option<K>,
    /// The value associated with the key
    value: V,
}

/// Error returned by [`ProbingMap::try_insert`] when the map sits at the
/// capacity ceiling and cannot accept another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExhausted;

impl fmt::Display for CapacityExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("hash map capacity exhausted")
    }
}

impl std::error::Error for CapacityExhausted {}

/// A hash map using open addressing with linear probing.
///
/// All entries live directly in the bucket array; a colliding key walks
/// forward one slot at a time (with wraparound) until it finds its own slot
/// or an empty one. Once the occupied share of the array reaches 3/4, the
/// array doubles (capped at 2^30) and every entry is rehashed into the new
/// array. Linear probing exhibits primary clustering under load; that is a
/// known characteristic of the strategy, not a defect.
///
/// A single reserved *nil* key is supported alongside the ordinary keys via
/// [`ProbingMap::insert_nil`] and [`ProbingMap::get_nil`]; it probes from
/// slot 0 and otherwise behaves like any other key.
///
/// Deletion is deliberately unsupported, so slots are only ever empty or
/// occupied and no tombstone state exists.
///
/// Note: this implementation is not thread-safe; concurrent callers must
/// wrap the map in their own lock.
#[derive(Debug, Clone)]
pub struct ProbingMap<K, V> {
    /// The bucket array; replaced wholesale on growth
    buckets: Vec<Option<Entry<K, V>>>,
    /// Current number of occupied slots
    size: usize,
}

impl<K, V> Default for ProbingMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ProbingMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ProbingMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> ProbingMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty `ProbingMap` with the default capacity of 16 buckets
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `ProbingMap` with the requested bucket-array
    /// capacity. A capacity of zero falls back to the default rather than
    /// being rejected; anything above the 2^30 ceiling is clamped to it.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity.min(MAX_CAPACITY) };
        Self { buckets: Self::empty_buckets(capacity), size: 0 }
    }

    /// Allocates an all-empty bucket array of the given capacity
    fn empty_buckets(capacity: usize) -> Vec<Option<Entry<K, V>>> {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        buckets
    }

    /// Computes the hash for a real (non-nil) key
    fn hash_key<Q: ?Sized + Hash>(key: &Q) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Home slot for a key in an array of `capacity` buckets; the nil key's
    /// home is slot 0 by convention
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    fn home_index<Q: ?Sized + Hash>(key: Option<&Q>, capacity: usize) -> usize {
        match key {
            None => 0,
            Some(key) => (Self::hash_key(key) % capacity as u64) as usize,
        }
    }

    /// Walks the probe sequence for `key`: starting at the home slot and
    /// stepping by one with wraparound, returns the index of the first slot
    /// that is either empty or holds an equal key. The scan is bounded at
    /// one full pass; `None` means every slot is occupied by some other key,
    /// which is only reachable when the table is completely full.
    #[allow(clippy::arithmetic_side_effects)]
    fn probe<Q>(buckets: &[Option<Entry<K, V>>], key: Option<&Q>) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let capacity = buckets.len();
        let mut index = Self::home_index(key, capacity);
        for _ in 0..capacity {
            match buckets.get(index) {
                Some(None) => return Some(index),
                Some(Some(entry)) if entry.key.as_ref().map(Borrow::borrow) == key => {
                    return Some(index);
                }
                _ => {}
            }
            index = index.saturating_add(1) % capacity;
        }
        None
    }

    /// Whether the occupied share of the bucket array has reached the 3/4
    /// load-factor threshold
    fn needs_growth(&self) -> bool {
        self.size.saturating_mul(LOAD_FACTOR_DEN)
            >= self.buckets.len().saturating_mul(LOAD_FACTOR_NUM)
    }

    /// Doubles the bucket array (capped at the ceiling) and migrates every
    /// occupied slot, in ascending index order, to its fresh probe target in
    /// the new array. Returns `false` when the map already sits at the
    /// ceiling and nothing grew.
    fn grow(&mut self) -> bool {
        let old_capacity = self.buckets.len();
        if old_capacity >= MAX_CAPACITY {
            return false;
        }
        let new_capacity = if old_capacity >= MAX_CAPACITY / 2 {
            MAX_CAPACITY
        } else {
            old_capacity.saturating_mul(2)
        };
        let old_buckets = mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        for entry in old_buckets.into_iter().flatten() {
            // No duplicate keys exist, so the probe stops on an empty slot,
            // and doubling guarantees one.
            if let Some(index) = Self::probe(&self.buckets, entry.key.as_ref()) {
                if let Some(slot) = self.buckets.get_mut(index) {
                    *slot = Some(entry);
                }
            }
        }
        true
    }

    /// Shared insert path for real and nil keys. The growth check runs
    /// before the slot is located, so an overwrite past the threshold still
    /// grows the array first.
    fn insert_entry(&mut self, key: Option<K>, value: V) -> Result<Option<V>, CapacityExhausted> {
        let mut at_ceiling = false;
        if self.needs_growth() {
            at_ceiling = !self.grow();
        }
        let Some(index) = Self::probe(&self.buckets, key.as_ref()) else {
            // Completely full table holding only other keys; reachable only
            // once growth has stopped at the ceiling.
            return Err(CapacityExhausted);
        };
        let Some(slot) = self.buckets.get_mut(index) else {
            // The probe never yields an out-of-range index.
            return Err(CapacityExhausted);
        };
        if let Some(entry) = slot {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }
        if at_ceiling {
            // Growth was needed but impossible; refuse fresh keys instead of
            // letting the table fill up and degrade every probe sequence.
            return Err(CapacityExhausted);
        }
        *slot = Some(Entry { key, value });
        self.size = self.size.saturating_add(1);
        Ok(None)
    }

    /// Inserts a key-value pair, returning the previous value when the key
    /// was already present.
    ///
    /// At the 2^30 capacity ceiling a rejected insertion is reported as
    /// `None`; use [`ProbingMap::try_insert`] to tell the two apart. Below
    /// the ceiling insertion always succeeds.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_entry(Some(key), value).ok().flatten()
    }

    /// Inserts a value under the reserved nil key, returning the previous
    /// nil-key value if one was stored
    pub fn insert_nil(&mut self, value: V) -> Option<V> {
        self.insert_entry(None, value).ok().flatten()
    }

    /// Inserts a key-value pair, surfacing the capacity-ceiling case.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExhausted`] when the key is not already present,
    /// the load-factor threshold has been reached, and the bucket array
    /// already sits at the 2^30 ceiling. Overwrites of present keys still
    /// succeed at the ceiling.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityExhausted> {
        self.insert_entry(Some(key), value)
    }

    /// Inserts a value under the reserved nil key, surfacing the
    /// capacity-ceiling case.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ProbingMap::try_insert`].
    pub fn try_insert_nil(&mut self, value: V) -> Result<Option<V>, CapacityExhausted> {
        self.insert_entry(None, value)
    }

    /// Shared lookup path; an empty terminating slot means the key is absent
    fn lookup<Q>(&self, key: Option<&Q>) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = Self::probe(&self.buckets, key)?;
        self.buckets.get(index)?.as_ref().map(|entry| &entry.value)
    }

    /// Retrieves the value stored for a key. Absence is reported as `None`,
    /// never conflated with a stored value.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(Some(key))
    }

    /// Retrieves the value stored under the reserved nil key
    #[must_use]
    pub fn get_nil(&self) -> Option<&V> {
        self.lookup::<K>(None)
    }

    /// Retrieves a mutable reference to the value stored for a key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = Self::probe(&self.buckets, Some(key))?;
        self.buckets.get_mut(index)?.as_mut().map(|entry| &mut entry.value)
    }

    /// Returns the number of keys in the map (the nil key included)
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current bucket-array capacity
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current ratio of occupied slots to capacity
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns an iterator over the occupied slots in bucket order; no
    /// order guarantee is made, and growth reshuffles placement
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: &self.buckets, index: 0 }
    }
}

/// Iterator over the entries of a [`ProbingMap`]. The key side of each item
/// is `None` for the reserved nil key.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// The bucket array being walked
    buckets: &'a [Option<Entry<K, V>>],
    /// Current slot position
    index: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Option<&'a K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.buckets.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Some(entry) = slot {
                return Some((entry.key.as_ref(), &entry.value));
            }
        }
        None
    }
}
