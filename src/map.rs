//! ChainedHashMap: string keys to arbitrary values over separate chaining.

use crate::chain::{self, Arena, Chain, Items, Node, NodeKey};
use crate::config::TableConfig;
use crate::error::TableResult;
use crate::hashing::{check_index, rolling_hash};
use crate::snapshot::TableSnapshot;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub(crate) struct MapEntry<V> {
    key: String,
    value: V,
}

/// Outcome of [`ChainedHashMap::set`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Insertion {
    /// The key was absent; a new entry was chained.
    Inserted,
    /// The key was present; its value was overwritten in place.
    Updated,
}

/// Hash map keyed by strings, one collision chain per bucket.
///
/// Grows by doubling when an insertion finds more entries than
/// `capacity * load_factor`; every entry is then re-indexed. Iteration
/// order is bucket order, then chain order.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    config: TableConfig,
    buckets: Vec<Option<NodeKey>>,
    nodes: Arena<MapEntry<V>>,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(key, value)` pairs in bucket order.
pub struct Iter<'a, V> {
    items: Items<'a, MapEntry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|e| (e.key.as_str(), &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<V> ChainedHashMap<V> {
    /// 16 buckets, load factor 0.75.
    pub fn new() -> Self {
        Self::from_valid_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> TableResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TableConfig) -> Self {
        Self {
            buckets: vec![None; config.initial_capacity],
            nodes: Arena::with_key(),
            config,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.config.load_factor
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn bucket_of(&self, key: &str) -> TableResult<usize> {
        check_index(rolling_hash(key, self.capacity()), self.capacity())
    }

    fn chain(&self, key: &str) -> Chain<'_, MapEntry<V>> {
        let head = self
            .buckets
            .get(rolling_hash(key, self.capacity()))
            .copied()
            .flatten();
        Chain::new(&self.nodes, head)
    }

    fn find(&self, key: &str) -> Option<NodeKey> {
        self.chain(key)
            .find(|(_, e)| e.key == key)
            .map(|(node, _)| node)
    }

    /// Inserts `key -> value`, or overwrites the value if `key` is present.
    ///
    /// May grow the table first; the new entry is placed under the grown
    /// capacity.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> TableResult<Insertion> {
        let key = key.into();
        if self.len() as f64 > self.config.threshold(self.capacity()) {
            self.resize()?;
        }

        let index = self.bucket_of(&key)?;
        let existing = Chain::new(&self.nodes, self.buckets[index])
            .find(|(_, e)| e.key == key)
            .map(|(node, _)| node);
        if let Some(node) = existing {
            self.nodes[node].item.value = value;
            return Ok(Insertion::Updated);
        }

        let node = self.nodes.insert(Node::new(MapEntry { key, value }));
        chain::append(&mut self.nodes, &mut self.buckets, index, node);
        Ok(Insertion::Inserted)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|node| &self.nodes[node].item.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let node = self.find(key)?;
        Some(&mut self.nodes[node].item.value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Unlinks the entry for `key`. Returns `Ok(false)` if it was absent.
    ///
    /// The first pass records the position of the last match in the chain;
    /// the second walks from the head to the node before it and splices.
    pub fn remove(&mut self, key: &str) -> TableResult<bool> {
        let index = self.bucket_of(key)?;
        let head = self.buckets[index];

        let Some((position, target)) = Chain::new(&self.nodes, head)
            .enumerate()
            .filter(|(_, (_, e))| e.key == key)
            .map(|(pos, (node, _))| (pos, node))
            .last()
        else {
            return Ok(false);
        };

        let successor = self.nodes[target].next;
        if position == 0 {
            self.buckets[index] = successor;
        } else {
            let prev = Chain::new(&self.nodes, head)
                .nth(position - 1)
                .map(|(node, _)| node);
            if let Some(prev) = prev {
                self.nodes[prev].next = successor;
            }
        }
        self.nodes.remove(target);
        trace!(bucket = index, position, "unlinked map entry");
        Ok(true)
    }

    /// Drops every entry; capacity is kept.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|b| *b = None);
        self.nodes.clear();
        trace!(capacity = self.capacity(), "cleared map");
    }

    fn resize(&mut self) -> TableResult<()> {
        let old = self.capacity();
        let capacity = old * 2;
        self.buckets = chain::rehash(&mut self.nodes, &self.buckets, capacity, |e| {
            rolling_hash(&e.key, capacity)
        })?;
        debug!(from = old, to = capacity, entries = self.len(), "resized map");
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            items: Items::new(&self.nodes, &self.buckets),
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Bucket-by-bucket view of the keys, for diagnostics.
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(&self.nodes, &self.buckets, |e| e.key.as_str())
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
