//! Collision chains: singly-linked nodes stored in a generational arena.
//!
//! A bucket holds the `NodeKey` of its chain head; each node holds the key
//! of its successor. Relinking only rewrites handles, so a splice never
//! leaves a dangling predecessor.

use crate::error::TableResult;
use crate::hashing::check_index;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a node in a table's arena.
    pub(crate) struct NodeKey;
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) next: Option<NodeKey>,
}

impl<T> Node<T> {
    pub(crate) fn new(item: T) -> Self {
        Self { item, next: None }
    }
}

pub(crate) type Arena<T> = SlotMap<NodeKey, Node<T>>;

/// Walks one chain from `head` in link order.
pub(crate) struct Chain<'a, T> {
    arena: &'a Arena<T>,
    cursor: Option<NodeKey>,
}

impl<'a, T> Chain<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, head: Option<NodeKey>) -> Self {
        Self {
            arena,
            cursor: head,
        }
    }
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = (NodeKey, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.arena.get(key)?;
        self.cursor = node.next;
        Some((key, &node.item))
    }
}

/// Last node of the chain starting at `head`.
pub(crate) fn tail<T>(arena: &Arena<T>, head: Option<NodeKey>) -> Option<NodeKey> {
    Chain::new(arena, head).last().map(|(k, _)| k)
}

/// Links the detached node `key` after the tail of `heads[index]`'s chain.
pub(crate) fn append<T>(
    arena: &mut Arena<T>,
    heads: &mut [Option<NodeKey>],
    index: usize,
    key: NodeKey,
) {
    match tail(arena, heads[index]) {
        None => heads[index] = Some(key),
        Some(last) => arena[last].next = Some(key),
    }
}

/// Every item in bucket order, then link order within a bucket.
pub(crate) struct Items<'a, T> {
    arena: &'a Arena<T>,
    heads: core::slice::Iter<'a, Option<NodeKey>>,
    chain: Chain<'a, T>,
}

impl<'a, T> Items<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, heads: &'a [Option<NodeKey>]) -> Self {
        Self {
            arena,
            heads: heads.iter(),
            chain: Chain::new(arena, None),
        }
    }
}

impl<'a, T> Iterator for Items<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, item)) = self.chain.next() {
                return Some(item);
            }
            let head = *self.heads.next()?;
            self.chain = Chain::new(self.arena, head);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.arena.len()))
    }
}

/// Moves every node into a fresh head array of `capacity` buckets.
///
/// Old buckets are visited in index order and each chain in link order;
/// each node is appended to the tail of the chain `index_of` picks for it,
/// so nodes that met earlier stay nearer the head. All indices are checked
/// before any node is relinked, so a failure leaves the arena untouched.
pub(crate) fn rehash<T>(
    arena: &mut Arena<T>,
    old_heads: &[Option<NodeKey>],
    capacity: usize,
    index_of: impl Fn(&T) -> usize,
) -> TableResult<Vec<Option<NodeKey>>> {
    let mut placements = Vec::with_capacity(arena.len());
    for head in old_heads {
        for (key, item) in Chain::new(arena, *head) {
            placements.push((key, check_index(index_of(item), capacity)?));
        }
    }

    let mut heads: Vec<Option<NodeKey>> = vec![None; capacity];
    let mut tails: Vec<Option<NodeKey>> = vec![None; capacity];
    for (key, index) in placements {
        arena[key].next = None;
        match tails[index] {
            None => heads[index] = Some(key),
            Some(last) => arena[last].next = Some(key),
        }
        tails[index] = Some(key);
    }
    Ok(heads)
}
