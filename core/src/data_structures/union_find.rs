//! Disjoint-set forest with path compression and union by size
//!
//! Achieves nearly constant amortized time per operation, O(α(n)) where α is
//! the inverse Ackermann function.
//!
//! Elements are `0..len()`. Two interchangeable root lookups are offered:
//! `find` compresses recursively, `find_iterative` walks the path twice (once
//! to locate the root, once to repoint every visited element at it) and needs
//! no call stack.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::trace;

/// Root lookup variant used by consumers of the forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FindStrategy {
    Recursive,
    #[default]
    Iterative,
}

/// Union-Find data structure
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// Parent pointers; roots point at themselves
    parent: Vec<usize>,
    /// Element count per root, meaningful only at roots
    size: Vec<usize>,
    /// Number of disjoint sets
    set_count: usize,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            set_count: n,
        }
    }

    /// Appends a fresh singleton and returns its element index.
    pub fn new_set(&mut self) -> usize {
        let element = self.parent.len();
        self.parent.push(element);
        self.size.push(1);
        self.set_count += 1;
        element
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    #[inline]
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Root of the set containing `k`, compressing the path recursively.
    ///
    /// # Panics
    /// If `k >= len()`.
    pub fn find(&mut self, k: usize) -> usize {
        if self.parent[k] != k {
            self.parent[k] = self.find(self.parent[k]);
        }
        self.parent[k]
    }

    /// Root of the set containing `k`, compressing the path in a second pass.
    ///
    /// # Panics
    /// If `k >= len()`.
    pub fn find_iterative(&mut self, mut k: usize) -> usize {
        let mut root = k;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while k != root {
            let next = self.parent[k];
            self.parent[k] = root;
            k = next;
        }

        root
    }

    /// Dispatches to the lookup selected by `strategy`.
    pub fn find_with(&mut self, k: usize, strategy: FindStrategy) -> usize {
        match strategy {
            FindStrategy::Recursive => self.find(k),
            FindStrategy::Iterative => self.find_iterative(k),
        }
    }

    /// Merges the sets of `k` and `l`. The larger set's root becomes the
    /// parent; ties keep the root of `k`. Returns `false` if they were
    /// already joined.
    pub fn union(&mut self, k: usize, l: usize) -> bool {
        let root_k = self.find(k);
        let root_l = self.find(l);

        if root_k == root_l {
            return false;
        }

        let (root, child) = if self.size[root_k] >= self.size[root_l] {
            (root_k, root_l)
        } else {
            (root_l, root_k)
        };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        self.set_count -= 1;
        trace!("Union {} <- {} (size {})", root, child, self.size[root]);

        true
    }

    /// Whether `k` and `l` belong to the same set.
    pub fn connected(&mut self, k: usize, l: usize) -> bool {
        self.find(k) == self.find(l)
    }

    /// Number of elements in the set containing `k`.
    pub fn set_size(&mut self, k: usize) -> usize {
        let root = self.find(k);
        self.size[root]
    }
}
