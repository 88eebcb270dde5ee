//! Indexed binary min-heap with decrease-key.
//!
//! Replaces the naive sort-on-every-update priority queue commonly seen in
//! teaching code. Ties on priority resolve to the entry enqueued first: each
//! entry carries a monotonically increasing sequence number that is compared
//! after the priority, and decrease-key preserves the original number.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    priority: f64,
    seq: u64,
}

/// Min-priority queue keyed by `f64` priority with stable ties and in-place
/// priority decreases.
///
/// Priorities must not be NaN; callers feed it validated edge weights, so
/// every priority is either finite or `∞`.
#[derive(Debug, Clone)]
pub struct MinQueue<K> {
    heap: Vec<Entry<K>>,
    pos: HashMap<K, usize>,
    seq: u64,
}

impl<K: Clone + Eq + Hash> MinQueue<K> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            pos: HashMap::new(),
            seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.pos.contains_key(key)
    }

    /// Insert a new entry. The key must not already be queued; use
    /// [`MinQueue::decrease_key`] to lower an existing entry.
    pub fn push(&mut self, key: K, priority: f64) {
        debug_assert!(!self.pos.contains_key(&key), "key already queued");
        let idx = self.heap.len();
        self.pos.insert(key.clone(), idx);
        self.heap.push(Entry {
            key,
            priority,
            seq: self.seq,
        });
        self.seq += 1;
        self.sift_up(idx);
    }

    /// Remove and return the minimum-priority entry; among equal priorities
    /// the first-enqueued wins.
    pub fn pop(&mut self) -> Option<(K, f64)> {
        let last = self.heap.len().checked_sub(1)?;
        self.heap.swap(0, last);
        let entry = self.heap.pop()?;
        self.pos.remove(&entry.key);
        if let Some(root) = self.heap.first() {
            self.pos.insert(root.key.clone(), 0);
            self.sift_down(0);
        }
        Some((entry.key, entry.priority))
    }

    /// Lower an existing entry's priority in place, keeping its original
    /// insertion rank for tie-breaking. Returns `false` if the key is not
    /// queued or the new priority is not lower.
    pub fn decrease_key(&mut self, key: &K, priority: f64) -> bool {
        let Some(&idx) = self.pos.get(key) else {
            return false;
        };
        if priority >= self.heap[idx].priority {
            return false;
        }
        self.heap[idx].priority = priority;
        self.sift_up(idx);
        true
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (ea, eb) = (&self.heap[a], &self.heap[b]);
        ea.priority < eb.priority || (ea.priority == eb.priority && ea.seq < eb.seq)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos.insert(self.heap[a].key.clone(), a);
        self.pos.insert(self.heap[b].key.clone(), b);
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.less(idx, parent) {
                break;
            }
            self.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == idx {
                return;
            }
            self.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<K: Clone + Eq + Hash> Default for MinQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
