//! chained-hashmap: a single-threaded hash map built from an array of
//! chains, with load-factor driven resizing, and a phrase-weight spam
//! detector that uses it.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, verifiable separately chained table whose structural
//!   invariants can be checked from the outside (capacity, bucket sizes,
//!   load factor) rather than hidden behind open addressing.
//! - Layers:
//!   - `Chain<K, V>`: one bucket; an insertion-ordered vector of entries,
//!     each carrying its cached `u64` hash.
//!   - `ChainedHashMap<K, V>`: the bucket array, the element count, and
//!     the resize policy; the public API.
//!   - `Cursor` / `Iter`: read-only traversal in bucket-then-chain order.
//!   - `detector`: database loader, message scorer and classifier that use
//!     the map only through insert, lookup and iteration.
//!
//! Constraints
//! - Single-threaded; no interior mutability and no locks.
//! - Capacity is a power of two, never below `MIN_CAPACITY`; the bucket of
//!   a key is `hash & (capacity - 1)`.
//! - Unique keys: `insert` on a present key fails and does not overwrite.
//!   `get_or_insert_default` is the assign-style entry point.
//! - Resizing happens only inside `insert`/`get_or_insert_default` (grow,
//!   doubling) and `remove`/`erase` (shrink, halving). Lookups never move
//!   entries.
//!
//! Hasher and rehashing invariants
//! - Keys are hashed once with a fixed-seed `foldhash` state and the hash is
//!   stored with the entry; a rehash only re-masks stored hashes and never
//!   calls `K: Hash` again.
//! - Because the seed is fixed, bucket placement is reproducible across runs,
//!   clones, and independently built tables.
//!
//! Borrowing
//! - `get`, `get_or_insert_default` and the iterators hand out plain
//!   borrows, so the compiler rejects any mutation (and hence any resize)
//!   while such a reference or cursor is alive.
//!
//! Notes and non-goals
//! - Equality compares capacity as well as contents; equal contents in
//!   differently sized tables are not equal.
//! - No custom hashers, no ordered iteration, no persistence.

mod chain;
pub mod chained_hash_map;
pub mod config;
pub mod detector;
pub mod error;
pub mod iter;
pub mod logger;

// Public surface
pub use chained_hash_map::ChainedHashMap;
pub use config::{TableConfig, MIN_CAPACITY};
pub use error::TableError;
pub use iter::{Cursor, Iter, Keys, Values};
