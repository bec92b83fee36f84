//! Chain: the per-bucket entry list of `ChainedHashMap`.

use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

/// A stored pair plus its cached hash. Indexing after insertion always uses
/// `hash`, so `K: Hash` is never called again during a rehash.
#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

/// Entries whose hash maps to the same bucket, in insertion order.
#[derive(Clone, Debug)]
pub(crate) struct Chain<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> Chain<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slot of the entry matching `q`. The cached hash is compared first so
    /// `Eq` only runs on likely matches.
    pub(crate) fn position<Q>(&self, hash: u64, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.entries
            .iter()
            .position(|e| e.hash == hash && e.key.borrow() == q)
    }

    #[inline]
    pub(crate) fn get(&self, slot: usize) -> Option<&Entry<K, V>> {
        self.entries.get(slot)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut Entry<K, V>> {
        self.entries.get_mut(slot)
    }

    /// Appends and returns the new entry's slot.
    pub(crate) fn push(&mut self, entry: Entry<K, V>) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Removes the entry at `slot`, keeping the remaining entries in order.
    pub(crate) fn remove(&mut self, slot: usize) -> Entry<K, V> {
        self.entries.remove(slot)
    }

    pub(crate) fn into_entries(self) -> std::vec::IntoIter<Entry<K, V>> {
        self.entries.into_iter()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> core::slice::Iter<'_, Entry<K, V>> {
        self.entries.iter()
    }
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Index<usize> for Chain<K, V> {
    type Output = Entry<K, V>;

    fn index(&self, slot: usize) -> &Entry<K, V> {
        &self.entries[slot]
    }
}

impl<K, V> IndexMut<usize> for Chain<K, V> {
    fn index_mut(&mut self, slot: usize) -> &mut Entry<K, V> {
        &mut self.entries[slot]
    }
}
