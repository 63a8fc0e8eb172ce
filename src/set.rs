//! ChainedHashSet: unique strings over separate chaining.

use crate::chain::{self, Arena, Chain, Items, Node, NodeKey};
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::hashing::{check_index, rolling_hash};
use crate::snapshot::TableSnapshot;
use core::any::{type_name, Any};
use tracing::{debug, trace};

/// Set of strings, one collision chain per bucket.
///
/// Stored values are never mutated. `len` counts every chained value, not
/// occupied buckets.
#[derive(Debug, Clone)]
pub struct ChainedHashSet {
    config: TableConfig,
    buckets: Vec<Option<NodeKey>>,
    nodes: Arena<String>,
}

impl Default for ChainedHashSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the stored values in bucket order.
pub struct Iter<'a> {
    items: Items<'a, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ChainedHashSet {
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

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn bucket_of(&self, value: &str) -> TableResult<usize> {
        check_index(rolling_hash(value, self.capacity()), self.capacity())
    }

    /// Adds `value`. Returns `Ok(false)` if it was already present.
    pub fn add(&mut self, value: impl Into<String>) -> TableResult<bool> {
        let value = value.into();
        if self.len() as f64 > self.config.threshold(self.capacity()) {
            self.resize()?;
        }

        let index = self.bucket_of(&value)?;
        if Chain::new(&self.nodes, self.buckets[index]).any(|(_, v)| *v == value) {
            return Ok(false);
        }
        let node = self.nodes.insert(Node::new(value));
        chain::append(&mut self.nodes, &mut self.buckets, index, node);
        Ok(true)
    }

    /// Adds a dynamically typed value, which must be a `String` or `&'static str`.
    ///
    /// Anything else fails with [`TableError::InvalidType`] and leaves the
    /// set untouched.
    pub fn try_add<T: Any>(&mut self, value: T) -> TableResult<bool> {
        let value: Box<dyn Any> = Box::new(value);
        let value = match value.downcast::<String>() {
            Ok(s) => *s,
            Err(other) => match other.downcast::<&'static str>() {
                Ok(s) => (*s).to_owned(),
                Err(_) => {
                    return Err(TableError::InvalidType {
                        found: type_name::<T>(),
                    })
                }
            },
        };
        self.add(value)
    }

    pub fn contains(&self, value: &str) -> bool {
        let head = self
            .buckets
            .get(rolling_hash(value, self.capacity()))
            .copied()
            .flatten();
        Chain::new(&self.nodes, head).any(|(_, v)| v == value)
    }

    /// Unlinks `value`. Returns `Ok(false)` if it was absent.
    ///
    /// Scans the whole chain for the last match first, then re-walks from
    /// the head to its predecessor to splice it out.
    pub fn remove(&mut self, value: &str) -> TableResult<bool> {
        let index = self.bucket_of(value)?;
        let head = self.buckets[index];

        let mut found = None;
        for (position, (node, v)) in Chain::new(&self.nodes, head).enumerate() {
            if v == value {
                found = Some((position, node));
            }
        }
        let Some((position, target)) = found else {
            return Ok(false);
        };

        let successor = self.nodes[target].next;
        match position.checked_sub(1) {
            None => self.buckets[index] = successor,
            Some(before) => {
                if let Some((prev, _)) = Chain::new(&self.nodes, head).nth(before) {
                    self.nodes[prev].next = successor;
                }
            }
        }
        self.nodes.remove(target);
        trace!(bucket = index, position, "unlinked set value");
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|b| *b = None);
        self.nodes.clear();
        trace!(capacity = self.capacity(), "cleared set");
    }

    fn resize(&mut self) -> TableResult<()> {
        let old = self.capacity();
        let capacity = old * 2;
        self.buckets = chain::rehash(&mut self.nodes, &self.buckets, capacity, |v| {
            rolling_hash(v, capacity)
        })?;
        debug!(from = old, to = capacity, entries = self.len(), "resized set");
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            items: Items::new(&self.nodes, &self.buckets),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        self.iter().collect()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(&self.nodes, &self.buckets, String::as_str)
    }
}

impl<'a> IntoIterator for &'a ChainedHashSet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(capacity: usize) -> ChainedHashSet {
        ChainedHashSet::with_config(TableConfig::default().with_initial_capacity(capacity))
            .unwrap()
    }

    fn colliding(capacity: usize, n: usize) -> Vec<String> {
        (0..)
            .map(|i| format!("v{i}"))
            .filter(|v| rolling_hash(v, capacity) == 0)
            .take(n)
            .collect()
    }

    #[test]
    fn add_is_idempotent() {
        let mut s = ChainedHashSet::new();
        assert!(s.add("sky").unwrap());
        assert!(!s.add("sky").unwrap());
        assert_eq!(s.len(), 1);
        assert!(s.contains("sky"));
        assert!(!s.contains("sea"));
    }

    /// Invariant: len counts chained values, so deep chains are not undercounted.
    #[test]
    fn len_counts_values_not_occupied_buckets() {
        let mut s = small(8);
        for v in colliding(8, 4) {
            assert!(s.add(v).unwrap());
        }
        assert_eq!(s.len(), 4);
        assert_eq!(s.snapshot().occupied_buckets(), 1);
        assert_eq!(s.snapshot().longest_chain(), 4);
    }

    #[test]
    fn try_add_accepts_strings_only() {
        let mut s = small(4);
        assert_eq!(s.try_add("a"), Ok(true));
        assert_eq!(s.try_add(String::from("b")), Ok(true));
        assert_eq!(s.try_add("a"), Ok(false));
        assert_eq!(
            s.try_add(42_i32),
            Err(TableError::InvalidType { found: "i32" })
        );
        assert!(matches!(
            s.try_add(vec!['c']),
            Err(TableError::InvalidType { .. })
        ));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn remove_each_chain_position() {
        for victim in 0..3 {
            let mut s = small(8);
            let values = colliding(8, 3);
            for v in &values {
                s.add(v.as_str()).unwrap();
            }
            assert!(s.remove(&values[victim]).unwrap());
            assert_eq!(s.len(), 2);
            assert!(!s.contains(&values[victim]));
            let mut rest = values.clone();
            rest.remove(victim);
            assert_eq!(s.snapshot().buckets[0].chain, rest);
            assert!(!s.remove(&values[victim]).unwrap());
            assert_eq!(s.len(), 2);
        }
    }

    #[test]
    fn growth_keeps_every_value() {
        let mut s = small(2);
        let words: Vec<String> = (0..50).map(|i| format!("w{i}")).collect();
        for w in &words {
            s.add(w.as_str()).unwrap();
        }
        assert_eq!(s.len(), 50);
        assert_eq!(s.capacity(), 128);
        assert!(words.iter().all(|w| s.contains(w)));
    }

    #[test]
    fn clear_resets_len_but_not_capacity() {
        let mut s = small(2);
        for v in ["a", "b", "c", "d"] {
            s.add(v).unwrap();
        }
        let cap = s.capacity();
        s.clear();
        assert_eq!(s.len(), 0);
        assert_eq!(s.capacity(), cap);
        assert!(!s.contains("a"));
        assert!(s.values().is_empty());
    }

    #[test]
    fn values_follow_bucket_order() {
        let mut s = small(16);
        for v in ["c", "a", "b"] {
            s.add(v).unwrap();
        }
        assert_eq!(s.values(), ["a", "b", "c"]);
        assert_eq!(s.iter().count(), 3);
    }
}
