//! Structured dump of a table's bucket layout.

use crate::chain::{Arena, Chain, NodeKey};
use core::fmt;
use serde::Serialize;

/// One bucket and the strings chained in it, head first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub index: usize,
    pub chain: Vec<String>,
}

/// Every bucket of a table, in index order.
///
/// Empty buckets are included so `buckets[i].index == i`. `Display` renders
/// only the occupied ones, one line each: `3: apple -> grape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub capacity: usize,
    pub len: usize,
    pub buckets: Vec<BucketSummary>,
}

impl TableSnapshot {
    pub(crate) fn capture<T>(
        arena: &Arena<T>,
        heads: &[Option<NodeKey>],
        label: impl Fn(&T) -> &str,
    ) -> Self {
        let buckets = heads
            .iter()
            .enumerate()
            .map(|(index, head)| BucketSummary {
                index,
                chain: Chain::new(arena, *head)
                    .map(|(_, item)| label(item).to_owned())
                    .collect(),
            })
            .collect();
        Self {
            capacity: heads.len(),
            len: arena.len(),
            buckets,
        }
    }

    pub fn occupied_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| !b.chain.is_empty()).count()
    }

    /// Depth of the deepest chain; 0 for an empty table.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(|b| b.chain.len()).max().unwrap_or(0)
    }
}

impl fmt::Display for TableSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in self.buckets.iter().filter(|b| !b.chain.is_empty()) {
            writeln!(f, "{}: {}", bucket.index, bucket.chain.join(" -> "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{append, Node};

    fn sample() -> TableSnapshot {
        let mut arena: Arena<String> = Arena::with_key();
        let mut heads: Vec<Option<NodeKey>> = vec![None; 4];
        for (i, s) in [(1, "kite"), (3, "sun"), (1, "moon")] {
            let k = arena.insert(Node::new(s.to_string()));
            append(&mut arena, &mut heads, i, k);
        }
        TableSnapshot::capture(&arena, &heads, String::as_str)
    }

    #[test]
    fn captures_every_bucket_in_order() {
        let snap = sample();
        assert_eq!(snap.capacity, 4);
        assert_eq!(snap.len, 3);
        assert_eq!(snap.buckets.len(), 4);
        assert_eq!(snap.buckets[1].chain, ["kite", "moon"]);
        assert!(snap.buckets[0].chain.is_empty());
        assert_eq!(snap.occupied_buckets(), 2);
        assert_eq!(snap.longest_chain(), 2);
    }

    #[test]
    fn display_lists_occupied_buckets() {
        assert_eq!(sample().to_string(), "1: kite -> moon\n3: sun\n");
    }

    #[test]
    fn serializes_as_structured_data() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["capacity"], 4);
        assert_eq!(json["buckets"][3]["chain"][0], "sun");
    }
}
