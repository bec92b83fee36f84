//! ChainedHashMap: separately chained table with load-factor resizing.

use crate::chain::{Chain, Entry};
use crate::config::{TableConfig, MIN_CAPACITY};
use crate::error::{Result, TableError};
use crate::iter::{Cursor, Iter, Keys, Values};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use foldhash::fast::FixedState;
use log::{debug, trace, warn};

/// Hash map storing each bucket as a chain of entries.
///
/// The bucket count (`capacity`) is always a power of two, so a key's bucket
/// is `hash & (capacity - 1)`. Insert doubles the bucket count when
/// `len / capacity` exceeds the high load factor; erase halves it (never below
/// [`MIN_CAPACITY`]) when the ratio drops below the low load factor. Lookups
/// never resize.
///
/// Keys are hashed with a fixed-seed `foldhash` state, so bucket placement is
/// deterministic across runs and across clones.
#[derive(Clone)]
pub struct ChainedHashMap<K, V> {
    buckets: Vec<Chain<K, V>>,
    len: usize,
    config: TableConfig,
    hasher: FixedState,
}

fn alloc_buckets<K, V>(count: usize) -> Result<Vec<Chain<K, V>>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(count)
        .map_err(|_| TableError::AllocationFailure { buckets: count })?;
    buckets.resize_with(count, Chain::new);
    Ok(buckets)
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Empty table with bounds 0.25 / 0.75 and 16 buckets.
    pub fn new() -> Self {
        Self {
            buckets: (0..TableConfig::default().initial_capacity)
                .map(|_| Chain::new())
                .collect(),
            len: 0,
            config: TableConfig::default(),
            hasher: FixedState::default(),
        }
    }

    /// Empty table with custom load-factor bounds and the default capacity.
    ///
    /// Fails with [`TableError::InvalidConfiguration`] unless
    /// `0 < low < high < 1`.
    pub fn with_load_factors(low: f64, high: f64) -> Result<Self> {
        Self::with_config(TableConfig::new(low, high))
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buckets: alloc_buckets(config.initial_capacity)?,
            len: 0,
            config,
            hasher: FixedState::default(),
        })
    }

    /// Builds a default table from parallel key and value sequences.
    ///
    /// Pairs are applied in order with assign semantics, so a key repeated
    /// later in `keys` ends up with the later value.
    pub fn from_vecs(keys: Vec<K>, values: Vec<V>) -> Result<Self>
    where
        V: Default,
    {
        if keys.len() != values.len() {
            return Err(TableError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut map = Self::new();
        for (k, v) in keys.into_iter().zip(values) {
            *map.get_or_insert_default(k) = v;
        }
        Ok(map)
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    #[inline]
    fn bucket_index(hash: u64, capacity: usize) -> usize {
        (hash as usize) & (capacity - 1)
    }

    fn find<Q>(&self, q: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let bucket = Self::bucket_index(hash, self.capacity());
        self.buckets[bucket].position(hash, q).map(|slot| (bucket, slot))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Bounds this table was built with. `initial_capacity` reports the
    /// starting bucket count, not the current one.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, slot) = self.find(q).ok_or(TableError::KeyNotFound)?;
        self.buckets[bucket]
            .get(slot)
            .map(|e| (&e.key, &e.value))
            .ok_or(TableError::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, slot) = self.find(q).ok_or(TableError::KeyNotFound)?;
        self.buckets[bucket]
            .get_mut(slot)
            .map(|e| &mut e.value)
            .ok_or(TableError::KeyNotFound)
    }

    /// Inserts `key` if it is absent and returns `true`. A present key is left
    /// untouched (its value is not overwritten) and `false` is returned.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let hash = self.make_hash(&key);
        let bucket = Self::bucket_index(hash, self.capacity());
        if self.buckets[bucket].position(hash, &key).is_some() {
            return false;
        }
        self.push_new(Entry { key, value, hash });
        true
    }

    /// Returns the value for `key`, inserting `V::default()` first if the key
    /// is absent. An existing value is never reset.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let hash = self.make_hash(&key);
        let bucket = Self::bucket_index(hash, self.capacity());
        let (bucket, slot) = match self.buckets[bucket].position(hash, &key) {
            Some(slot) => (bucket, slot),
            None => self.push_new(Entry {
                key,
                value: V::default(),
                hash,
            }),
        };
        &mut self.buckets[bucket][slot].value
    }

    // Counts the entry, grows if the new load factor exceeds the high bound,
    // then links the entry into its bucket under the (possibly new) capacity.
    fn push_new(&mut self, entry: Entry<K, V>) -> (usize, usize) {
        self.len += 1;
        if self.load_factor() > self.config.high_load_factor {
            if let Some(doubled) = self.capacity().checked_mul(2) {
                self.resize(doubled);
            }
        }
        let bucket = Self::bucket_index(entry.hash, self.capacity());
        let slot = self.buckets[bucket].push(entry);
        (bucket, slot)
    }

    /// Removes `key` and returns its value, shrinking the table if the load
    /// factor drops below the low bound.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, slot) = self.find(q)?;
        let entry = self.buckets[bucket].remove(slot);
        self.len -= 1;
        if self.load_factor() < self.config.low_load_factor {
            self.resize(self.capacity() / 2);
        }
        Some(entry.value)
    }

    /// Removes `key`, returning whether an entry was removed.
    pub fn erase<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove(q).is_some()
    }

    /// Length of the chain `key` lives in; [`TableError::KeyNotFound`] if the
    /// key is absent.
    pub fn bucket_size<Q>(&self, q: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, _) = self.find(q).ok_or(TableError::KeyNotFound)?;
        Ok(self.buckets[bucket].len())
    }

    // Rehashes every entry into `new_capacity` fresh chains. Requests below
    // MIN_CAPACITY are ignored; so is a failed allocation, which leaves the
    // table as it was.
    fn resize(&mut self, new_capacity: usize) {
        if new_capacity < MIN_CAPACITY {
            return;
        }
        debug_assert!(new_capacity.is_power_of_two());
        let fresh = match alloc_buckets(new_capacity) {
            Ok(b) => b,
            Err(e) => {
                warn!("keeping {} buckets: {}", self.capacity(), e);
                return;
            }
        };
        debug!(
            "resizing table from {} to {} buckets ({} entries)",
            self.capacity(),
            new_capacity,
            self.len
        );
        let old = core::mem::replace(&mut self.buckets, fresh);
        for chain in old {
            for entry in chain.into_entries() {
                let bucket = Self::bucket_index(entry.hash, new_capacity);
                trace!("rehash {:#018x} -> bucket {}", entry.hash, bucket);
                self.buckets[bucket].push(entry);
            }
        }
    }
}

impl<K, V> ChainedHashMap<K, V> {
    /// Drops every entry. The bucket count and load-factor bounds are kept.
    pub fn clear(&mut self) {
        let capacity = self.buckets.len();
        self.buckets.clear();
        self.buckets.resize_with(capacity, Chain::new);
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buckets, self.len)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Cursor on the first entry (bucket order, then chain order).
    pub fn cursor(&self) -> Cursor<'_, K, V> {
        Cursor::front(&self.buckets)
    }

    /// The terminal cursor every traversal ends on.
    pub fn end_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::end(&self.buckets)
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ChainedHashMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Equal when both tables hold the same number of entries in the same number
/// of buckets and every key maps to an equal value in the other. Two tables
/// with identical contents but different capacities are not equal.
impl<K, V> PartialEq for ChainedHashMap<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() || self.capacity() != other.capacity() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_ok_and(|ov| ov == v))
    }
}

impl<K, V> Eq for ChainedHashMap<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

/// Panics if the key is absent; use [`ChainedHashMap::get`] to handle that
/// case.
impl<K, Q, V> Index<&Q> for ChainedHashMap<K, V>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(v) => v,
            Err(e) => panic!("ChainedHashMap index: {e}"),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a ChainedHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Later pairs overwrite earlier ones with the same key.
impl<K, V> Extend<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
    V: Default,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            *self.get_or_insert_default(k) = v;
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
    V: Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
