//! Indexed binary min-heap with decrease-key operation
//!
//! This module implements the priority queue consumed by Dijkstra's
//! algorithm. Priorities and values live in two parallel vectors arranged as
//! a complete binary tree; a reverse index maps every tracked value to its
//! current slot so that `decrease_priority` finds its element in O(1).
//!
//! # Invariants
//! - Heap order: `priorities[parent(i)] <= priorities[i]` for every `i > 0`
//! - Index consistency: `index_map[values[i]] == i` for every live slot
//! - Values are unique; the reverse index cannot disambiguate duplicates
//!
//! Every swap updates all three structures inside one call, so the
//! invariants hold between any two public operations.
//!
//! # Complexity
//! - `build`: O(n) bottom-up heapify
//! - `push`, `pop_min`, `decrease_priority`: O(log n)
//! - `peek_min`, `contains`, `priority_of`: O(1)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

/// Heap operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("Heap is empty")]
    Empty,

    #[error("Value {0} not found in the heap")]
    NotFound(String),

    #[error("New priority {requested} of value {value} is greater than current priority {current}")]
    InvalidPriorityUpdate {
        value: String,
        current: String,
        requested: String,
    },

    #[error("Value {0} is already tracked by the heap")]
    DuplicateValue(String),

    #[error("Priorities and values differ in length: {priorities} vs {values}")]
    LengthMismatch { priorities: usize, values: usize },
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right(i: usize) -> usize {
    2 * i + 2
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

/// Min-heap over `P` carrying a unique `V` per entry
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<P, V> {
    priorities: Vec<P>,
    values: Vec<V>,
    /// Reverse lookup from value to its current slot
    index_map: HashMap<V, usize>,
}

impl<P, V> Default for IndexedMinHeap<P, V>
where
    P: Ord + Copy + Debug,
    V: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, V> IndexedMinHeap<P, V>
where
    P: Ord + Copy + Debug,
    V: Copy + Eq + Hash + Debug,
{
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            priorities: Vec::new(),
            values: Vec::new(),
            index_map: HashMap::new(),
        }
    }

    /// Builds a heap from parallel arrays by heapifying every internal node
    /// from the last one up to the root.
    pub fn build(priorities: &[P], values: &[V]) -> Result<Self, HeapError> {
        if priorities.len() != values.len() {
            return Err(HeapError::LengthMismatch {
                priorities: priorities.len(),
                values: values.len(),
            });
        }

        let mut index_map = HashMap::with_capacity(values.len());
        for (index, &value) in values.iter().enumerate() {
            if index_map.insert(value, index).is_some() {
                return Err(HeapError::DuplicateValue(format!("{:?}", value)));
            }
        }

        let mut heap = Self {
            priorities: priorities.to_vec(),
            values: values.to_vec(),
            index_map,
        };

        for index in (0..heap.len() / 2).rev() {
            heap.sift_down(index);
        }

        Ok(heap)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.priorities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty()
    }

    #[inline]
    pub fn contains(&self, value: &V) -> bool {
        self.index_map.contains_key(value)
    }

    /// Current priority of a tracked value.
    pub fn priority_of(&self, value: &V) -> Option<P> {
        self.index_map.get(value).map(|&index| self.priorities[index])
    }

    /// Returns the minimum `(priority, value)` without removing it.
    pub fn peek_min(&self) -> Result<(P, V), HeapError> {
        match (self.priorities.first(), self.values.first()) {
            (Some(&priority), Some(&value)) => Ok((priority, value)),
            _ => Err(HeapError::Empty),
        }
    }

    /// Appends the entry and sifts it up.
    pub fn push(&mut self, priority: P, value: V) -> Result<(), HeapError> {
        if self.contains(&value) {
            return Err(HeapError::DuplicateValue(format!("{:?}", value)));
        }

        let index = self.len();
        self.priorities.push(priority);
        self.values.push(value);
        self.index_map.insert(value, index);
        self.sift_up(index);

        Ok(())
    }

    /// Removes and returns the minimum `(priority, value)`.
    pub fn pop_min(&mut self) -> Result<(P, V), HeapError> {
        if self.is_empty() {
            return Err(HeapError::Empty);
        }

        let last = self.len() - 1;
        self.swap(0, last);

        let (priority, value) = match (self.priorities.pop(), self.values.pop()) {
            (Some(priority), Some(value)) => (priority, value),
            _ => return Err(HeapError::Empty),
        };
        self.index_map.remove(&value);

        if !self.is_empty() {
            self.sift_down(0);
        }

        Ok((priority, value))
    }

    /// Lowers the priority of `value` and restores heap order. An equal
    /// priority is accepted and leaves the heap unchanged.
    pub fn decrease_priority(&mut self, value: V, new_priority: P) -> Result<(), HeapError> {
        let index = *self
            .index_map
            .get(&value)
            .ok_or_else(|| HeapError::NotFound(format!("{:?}", value)))?;

        let current = self.priorities[index];
        if new_priority > current {
            return Err(HeapError::InvalidPriorityUpdate {
                value: format!("{:?}", value),
                current: format!("{:?}", current),
                requested: format!("{:?}", new_priority),
            });
        }

        self.priorities[index] = new_priority;
        self.sift_up(index);

        Ok(())
    }

    /// Checks heap order and index consistency.
    pub fn is_valid(&self) -> bool {
        if self.priorities.len() != self.values.len() || self.index_map.len() != self.values.len() {
            return false;
        }

        let ordered = (1..self.len()).all(|i| self.priorities[parent(i)] <= self.priorities[i]);
        let indexed = self
            .values
            .iter()
            .enumerate()
            .all(|(i, value)| self.index_map.get(value) == Some(&i));

        ordered && indexed
    }

    /// Swaps two slots, keeping the reverse index in step with both arrays.
    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.priorities.swap(i, j);
        self.values.swap(i, j);
        self.index_map.insert(self.values[i], i);
        self.index_map.insert(self.values[j], j);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 && self.priorities[index] < self.priorities[parent(index)] {
            self.swap(index, parent(index));
            index = parent(index);
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let mut smallest = index;
            let (l, r) = (left(index), right(index));

            if l < self.len() && self.priorities[l] < self.priorities[smallest] {
                smallest = l;
            }
            if r < self.len() && self.priorities[r] < self.priorities[smallest] {
                smallest = r;
            }
            if smallest == index {
                return;
            }

            self.swap(index, smallest);
            index = smallest;
        }
    }
}
