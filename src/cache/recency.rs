//! Recency List Module
//!
//! Arena-backed doubly linked list ordering entries by access time.

use std::collections::HashMap;

use generational_arena::{Arena, Index};

use crate::cache::CacheEntry;

#[derive(Debug)]
struct Node<V> {
    entry: CacheEntry<V>,
    prev: Option<Index>,
    next: Option<Index>,
}

// == Recency List ==
/// Owns the LRU cache's entries in access order.
///
/// Nodes live in an arena; the lookup map and the head/tail markers hold
/// arena indices rather than pointers.
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug)]
pub(crate) struct RecencyList<V> {
    nodes: Arena<Node<V>>,
    lookup: HashMap<String, Index>,
    head: Option<Index>,
    tail: Option<Index>,
}

impl<V> RecencyList<V> {
    // == Constructor ==
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            lookup: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    // Detaches a node from its neighbours; arena and lookup are untouched.
    fn unlink(&mut self, index: Index) {
        let (prev, next) = {
            let node = &self.nodes[index];
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => self.nodes[prev_idx].next = next,
            None => self.head = next,
        }
        match next {
            Some(next_idx) => self.nodes[next_idx].prev = prev,
            None => self.tail = prev,
        }
    }

    // Links a node already in the arena in as the new head.
    fn link_front(&mut self, index: Index) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[index];
            node.prev = None;
            node.next = old_head;
        }
        if let Some(old_head) = old_head {
            self.nodes[old_head].prev = Some(index);
        }
        self.head = Some(index);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
    }

    fn move_to_front(&mut self, index: Index) {
        if self.head != Some(index) {
            self.unlink(index);
            self.link_front(index);
        }
    }

    // == Upsert ==
    /// Inserts or replaces the entry for its key and marks it most recent.
    ///
    /// Returns the previous value when the key was already present.
    pub fn upsert(&mut self, entry: CacheEntry<V>) -> Option<V> {
        let existing = self.lookup.get(&entry.key).copied();
        if let Some(index) = existing {
            let previous = std::mem::replace(&mut self.nodes[index].entry, entry);
            self.move_to_front(index);
            return Some(previous.value);
        }

        let key = entry.key.clone();
        let index = self.nodes.insert(Node {
            entry,
            prev: None,
            next: None,
        });
        self.lookup.insert(key, index);
        self.link_front(index);
        None
    }

    // == Touch ==
    /// Marks a key as recently used and returns its entry.
    pub fn touch(&mut self, key: &str) -> Option<&CacheEntry<V>> {
        let index = *self.lookup.get(key)?;
        self.move_to_front(index);
        Some(&self.nodes[index].entry)
    }

    // == Remove ==
    /// Removes a key, returning its entry if it was present.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let index = self.lookup.remove(key)?;
        self.unlink(index);
        self.nodes.remove(index).map(|node| node.entry)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    pub fn evict_oldest(&mut self) -> Option<CacheEntry<V>> {
        let tail = self.tail?;
        let key = self.nodes[tail].entry.key.clone();
        self.remove(&key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used entry without touching it.
    pub fn peek_oldest(&self) -> Option<&CacheEntry<V>> {
        self.tail.map(|index| &self.nodes[index].entry)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lookup.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len());
        let mut current = self.head;
        while let Some(index) = current {
            let node = &self.nodes[index];
            keys.push(node.entry.key.clone());
            current = node.next;
        }
        keys
    }

    /// Verifies that the links, the arena and the lookup map agree.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        if self.nodes.len() != self.lookup.len() {
            return false;
        }

        let mut forward = 0;
        let mut prev = None;
        let mut current = self.head;
        while let Some(index) = current {
            let Some(node) = self.nodes.get(index) else {
                return false;
            };
            if node.prev != prev || self.lookup.get(&node.entry.key) != Some(&index) {
                return false;
            }
            forward += 1;
            if forward > self.nodes.len() {
                return false;
            }
            prev = Some(index);
            current = node.next;
        }

        prev == self.tail && forward == self.lookup.len()
    }
}
