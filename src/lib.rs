//! chain-table: a string-keyed hash map and a string hash set built on
//! separate chaining, with load-factor driven growth.
//!
//! Internal Design:
//!
//! Summary
//! - Two structurally parallel tables:
//!   - `ChainedHashMap<V>`: `String -> V`, one entry per key; `set`
//!     overwrites in place.
//!   - `ChainedHashSet`: unique `String`s; stored values never change.
//! - Each table owns a bucket array of chain heads and a `slotmap` arena of
//!   singly-linked nodes. A bucket holds the `NodeKey` of its head, a node
//!   the key of its successor.
//!
//! Hashing
//! - Polynomial rolling hash, multiplier 31, reduced modulo the current
//!   capacity at every step. Indices depend on the capacity, so growth
//!   re-indexes every node.
//! - Mutating paths check the computed index against the bucket array and
//!   return `TableError::IndexOutOfRange` rather than panicking.
//!
//! Growth
//! - Checked at the start of each insertion: when `len > capacity *
//!   load_factor` the capacity doubles before the new entry is placed.
//! - Rehash visits old buckets in index order and chains in link order,
//!   appending each node to the tail of its new chain. Nodes are relinked,
//!   not reallocated. Capacity never shrinks.
//!
//! Removal
//! - One pass records the position of the last match in the chain; a
//!   second walks from the head to its predecessor and splices it out.
//!
//! Constraints
//! - Single-threaded; all mutation goes through `&mut self`.
//! - `len` is the arena's length, so it always equals the number of chained
//!   entries (never the number of occupied buckets).
//! - Iteration order is bucket order, then chain order; nothing stronger.
//!
//! ```
//! use chain_table::{ChainedHashMap, ChainedHashSet, Insertion};
//!
//! let mut colors = ChainedHashMap::new();
//! assert_eq!(colors.set("sky", "blue")?, Insertion::Inserted);
//! assert_eq!(colors.set("sky", "grey")?, Insertion::Updated);
//! assert_eq!(colors.get("sky"), Some(&"grey"));
//! assert!(colors.remove("sky")?);
//!
//! let mut words = ChainedHashSet::new();
//! assert!(words.add("sky")?);
//! assert!(!words.add("sky")?);
//! assert_eq!(words.len(), 1);
//! # Ok::<(), chain_table::TableError>(())
//! ```

mod chain;
pub mod config;
mod error;
mod hashing;
pub mod map;
mod map_proptest;
pub mod set;
mod set_proptest;
mod snapshot;

// Public surface
pub use config::TableConfig;
pub use error::{TableError, TableResult};
pub use hashing::rolling_hash;
pub use map::{ChainedHashMap, Insertion};
pub use set::ChainedHashSet;
pub use snapshot::{BucketSummary, TableSnapshot};
