//! Indexed binary min-heap with decrease-key
//!
//! Members are ids in `0..capacity`. Alongside the heap-ordered array the
//! heap keeps `pos`, the inverse mapping id -> array index, so a member's key
//! can be lowered in O(log n) without a search.

use crate::error::HeapError;

/// Position recorded for ids that are not currently members
const NOT_IN_HEAP: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapNode<K> {
    pub id: usize,
    pub key: K,
}

#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K> {
    array: Vec<HeapNode<K>>,
    pos: Vec<usize>,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

impl<K: Ord + Copy> IndexedMinHeap<K> {
    /// Empty heap accepting ids in `0..capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            array: Vec::with_capacity(capacity),
            pos: vec![NOT_IN_HEAP; capacity],
        }
    }

    /// Heap holding every id `0..keys.len()` with the given keys,
    /// ordered bottom-up in O(n)
    pub fn from_keys(keys: Vec<K>) -> Self {
        let capacity = keys.len();
        let array: Vec<HeapNode<K>> = keys
            .into_iter()
            .enumerate()
            .map(|(id, key)| HeapNode { id, key })
            .collect();
        let pos = (0..capacity).collect();
        let mut heap = Self { array, pos };
        for i in (0..capacity / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn capacity(&self) -> usize {
        self.pos.len()
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Membership: an id is in the heap iff its position is below the size
    pub fn contains(&self, id: usize) -> bool {
        self.pos.get(id).is_some_and(|&p| p < self.array.len())
    }

    /// Current array index of `id`, if it is a member
    pub fn position(&self, id: usize) -> Option<usize> {
        self.contains(id).then(|| self.pos[id])
    }

    pub fn key_of(&self, id: usize) -> Option<K> {
        self.position(id).map(|p| self.array[p].key)
    }

    pub fn peek(&self) -> Option<HeapNode<K>> {
        self.array.first().copied()
    }

    pub fn insert(&mut self, id: usize, key: K) -> Result<(), HeapError> {
        if id >= self.capacity() {
            return Err(HeapError::OutOfRange {
                id,
                capacity: self.capacity(),
            });
        }
        if self.contains(id) {
            return Err(HeapError::AlreadyPresent(id));
        }
        let idx = self.array.len();
        self.array.push(HeapNode { id, key });
        self.pos[id] = idx;
        self.sift_up(idx);
        Ok(())
    }

    /// Remove and return the member with the smallest key
    pub fn extract_min(&mut self) -> Option<HeapNode<K>> {
        if self.array.is_empty() {
            return None;
        }
        let root = self.array.swap_remove(0);
        self.pos[root.id] = NOT_IN_HEAP;
        if let Some(moved) = self.array.first() {
            self.pos[moved.id] = 0;
            self.sift_down(0);
        }
        Some(root)
    }

    /// Lower the key of member `id` and restore order by sifting up
    pub fn decrease_key(&mut self, id: usize, key: K) -> Result<(), HeapError> {
        let idx = self.position(id).ok_or(HeapError::NotInHeap(id))?;
        if key > self.array[idx].key {
            return Err(HeapError::KeyIncrease(id));
        }
        self.array[idx].key = key;
        self.sift_up(idx);
        Ok(())
    }

    fn swap_nodes(&mut self, a: usize, b: usize) {
        self.array.swap(a, b);
        self.pos[self.array[a].id] = a;
        self.pos[self.array[b].id] = b;
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 && self.array[parent(idx)].key > self.array[idx].key {
            self.swap_nodes(idx, parent(idx));
            idx = parent(idx);
        }
    }

    // Ties go to the left child.
    fn sift_down(&mut self, mut idx: usize) {
        let size = self.array.len();
        loop {
            let mut smallest = idx;
            if left(idx) < size && self.array[left(idx)].key < self.array[smallest].key {
                smallest = left(idx);
            }
            if right(idx) < size && self.array[right(idx)].key < self.array[smallest].key {
                smallest = right(idx);
            }
            if smallest == idx {
                return;
            }
            self.swap_nodes(idx, smallest);
            idx = smallest;
        }
    }

    /// Check heap order and the `pos` inverse mapping
    pub fn is_consistent(&self) -> bool {
        let size = self.array.len();
        let ordered = (0..size).all(|i| {
            (left(i) >= size || self.array[i].key <= self.array[left(i)].key)
                && (right(i) >= size || self.array[i].key <= self.array[right(i)].key)
        });
        let indexed = self
            .array
            .iter()
            .enumerate()
            .all(|(i, node)| self.pos[node.id] == i);
        let members = (0..self.capacity()).filter(|&id| self.contains(id)).count();
        ordered && indexed && members == size
    }
}
