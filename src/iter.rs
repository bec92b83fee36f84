//! Cursor and iterators over a `ChainedHashMap`.
//!
//! Traversal visits buckets in index order and, inside a bucket, entries in
//! chain order. Everything here borrows the bucket array immutably, so any
//! insert/erase/clear (all of which may rehash) cannot overlap a live cursor.

use crate::chain::Chain;
use core::fmt;
use core::iter::FusedIterator;

/// A position in the table: `(bucket, slot)`, or the end position once
/// `bucket` reaches the bucket count.
pub struct Cursor<'a, K, V> {
    buckets: &'a [Chain<K, V>],
    bucket: usize,
    slot: usize,
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Cursor on the first stored entry, or at end for an empty table.
    pub(crate) fn front(buckets: &'a [Chain<K, V>]) -> Self {
        let mut c = Self {
            buckets,
            bucket: 0,
            slot: 0,
        };
        c.settle();
        c
    }

    pub(crate) fn end(buckets: &'a [Chain<K, V>]) -> Self {
        Self {
            buckets,
            bucket: buckets.len(),
            slot: 0,
        }
    }

    // Moves forward past empty buckets until `slot` addresses an entry or the
    // cursor hits end.
    fn settle(&mut self) {
        while self.bucket < self.buckets.len() && self.slot >= self.buckets[self.bucket].len() {
            self.bucket += 1;
            self.slot = 0;
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.bucket >= self.buckets.len()
    }

    /// Entry under the cursor; `None` at end.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        let buckets: &'a [Chain<K, V>] = self.buckets;
        buckets
            .get(self.bucket)
            .and_then(|chain| chain.get(self.slot))
            .map(|e| (&e.key, &e.value))
    }

    /// Steps to the next entry. Advancing an end cursor is a no-op.
    pub fn advance(&mut self) {
        if self.is_end() {
            return;
        }
        self.slot += 1;
        self.settle();
    }

    /// `(bucket, slot)` of the current entry; `None` at end.
    pub fn position(&self) -> Option<(usize, usize)> {
        (!self.is_end()).then_some((self.bucket, self.slot))
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

/// Two end cursors are equal; an end cursor never equals a live one;
/// otherwise cursors compare the entries they point at, not positions.
impl<K: PartialEq, V: PartialEq> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self.get(), other.get()) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some((k, v)) => f
                .debug_struct("Cursor")
                .field("bucket", &self.bucket)
                .field("slot", &self.slot)
                .field("key", k)
                .field("value", v)
                .finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}

/// Iterator over `(&K, &V)` pairs. A clone resumes from the same position
/// and advances independently.
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(buckets: &'a [Chain<K, V>], len: usize) -> Self {
        Self {
            cursor: Cursor::front(buckets),
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.cursor.get()?;
        self.cursor.advance();
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over keys.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over values.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Entry;

    // Builds a bucket array by hand so the layout (and its empty buckets) is
    // fixed regardless of the hasher.
    fn layout(shape: &[&[(&'static str, i32)]]) -> Vec<Chain<&'static str, i32>> {
        shape
            .iter()
            .map(|bucket| {
                let mut c = Chain::new();
                for &(key, value) in bucket.iter() {
                    c.push(Entry {
                        key,
                        value,
                        hash: 0,
                    });
                }
                c
            })
            .collect()
    }

    #[test]
    fn front_skips_leading_empty_buckets() {
        let b = layout(&[&[], &[], &[("a", 1)], &[]]);
        let c = Cursor::front(&b);
        assert_eq!(c.position(), Some((2, 0)));
        assert_eq!(c.get(), Some((&"a", &1)));
    }

    #[test]
    fn traversal_is_bucket_then_chain_order() {
        let b = layout(&[&[("a", 1), ("b", 2)], &[], &[], &[("c", 3)], &[("d", 4), ("e", 5)]]);
        let keys: Vec<_> = Iter::new(&b, 5).map(|(k, _)| *k).collect();
        assert_eq!(keys, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn entry_in_last_bucket_terminates_at_end() {
        let b = layout(&[&[], &[], &[], &[("z", 26)]]);
        let mut c = Cursor::front(&b);
        assert_eq!(c.position(), Some((3, 0)));
        c.advance();
        assert!(c.is_end());
        assert_eq!(c.get(), None);
        // Advancing past end stays at end.
        c.advance();
        assert!(c.is_end());
    }

    #[test]
    fn all_empty_buckets_front_is_end() {
        let b = layout(&[&[], &[], &[], &[]]);
        let c = Cursor::front(&b);
        assert!(c.is_end());
        assert_eq!(c, Cursor::end(&b));
        assert_eq!(Iter::new(&b, 0).count(), 0);
    }

    #[test]
    fn cursor_equality_compares_entries_not_positions() {
        // The same pair stored in two different buckets.
        let b = layout(&[&[("x", 1)], &[("y", 2)], &[("x", 1)]]);
        let first = Cursor::front(&b);
        let mut third = first;
        third.advance();
        assert_ne!(first, third);
        third.advance();
        assert_eq!(third.position(), Some((2, 0)));
        assert_eq!(first, third);

        let end = Cursor::end(&b);
        assert_ne!(first, end);
        let mut walked = third;
        walked.advance();
        assert_eq!(walked, end);
    }

    #[test]
    fn iter_is_exact_size_and_fused() {
        let b = layout(&[&[("a", 1)], &[], &[("b", 2), ("c", 3)]]);
        let mut it = Iter::new(&b, 3);
        assert_eq!(it.len(), 3);
        it.next();
        assert_eq!(it.size_hint(), (2, Some(2)));
        let forked = it.clone();
        assert_eq!(it.by_ref().count(), 2);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        assert_eq!(forked.count(), 2);
    }
}
