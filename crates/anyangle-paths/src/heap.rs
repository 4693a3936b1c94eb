//! Indirect binary min-heap over a fixed vertex universe.
//!
//! Keys live by heap position; `inn[vertex]` gives a vertex's position and
//! `out[position]` the vertex at it. Every vertex always has a position:
//! those at `len()` or beyond are outside the heap. Storage is reused across
//! queries with the same epoch stamping as [`Arena`](crate::Arena), the
//! defaults being `key = +inf`, `inn[i] = i`, `out[i] = i`.

use crate::error::SearchError;

#[derive(Clone, Copy)]
struct HeapSlot {
    key: f32,
    inn: usize,
    out: usize,
    epoch: u32,
}

/// Reusable indirect min-heap with `decrease_key` and `pop_min`.
pub struct IndirectHeap {
    slots: Vec<HeapSlot>,
    epoch: u32,
    size: usize,
}

impl Default for IndirectHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl IndirectHeap {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            epoch: 0,
            size: 0,
        }
    }

    /// Empty the heap and size it for `size` vertices.
    pub fn initialise(&mut self, size: usize) {
        if self.slots.len() != size {
            self.slots.clear();
            self.slots.resize(
                size,
                HeapSlot {
                    key: f32::INFINITY,
                    inn: 0,
                    out: 0,
                    epoch: 0,
                },
            );
            self.epoch = 0;
        }
        if self.epoch == u32::MAX {
            for s in &mut self.slots {
                s.epoch = 0;
            }
            self.epoch = 0;
        }
        self.epoch += 1;
        self.size = 0;
    }

    /// Number of vertices in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    fn slot(&self, i: usize) -> HeapSlot {
        let s = self.slots[i];
        if s.epoch == self.epoch {
            s
        } else {
            HeapSlot {
                key: f32::INFINITY,
                inn: i,
                out: i,
                epoch: self.epoch,
            }
        }
    }

    #[inline]
    fn slot_mut(&mut self, i: usize) -> &mut HeapSlot {
        if self.slots[i].epoch != self.epoch {
            self.slots[i] = HeapSlot {
                key: f32::INFINITY,
                inn: i,
                out: i,
                epoch: self.epoch,
            };
        }
        &mut self.slots[i]
    }

    #[inline]
    fn key(&self, pos: usize) -> f32 {
        self.slot(pos).key
    }

    #[inline]
    fn position(&self, vertex: usize) -> usize {
        self.slot(vertex).inn
    }

    #[inline]
    fn vertex_at(&self, pos: usize) -> usize {
        self.slot(pos).out
    }

    /// Current key of `vertex`, `+inf` if it is not in the heap.
    pub fn key_of(&self, vertex: usize) -> f32 {
        let pos = self.position(vertex);
        if pos < self.size {
            self.key(pos)
        } else {
            f32::INFINITY
        }
    }

    /// Smallest key in the heap, `None` if empty.
    pub fn min_key(&self) -> Option<f32> {
        (!self.is_empty()).then(|| self.key(0))
    }

    /// Insert `vertex` with `key`, or lower its key if already present.
    ///
    /// The key must not exceed the vertex's current key.
    pub fn decrease_key(&mut self, vertex: usize, key: f32) {
        let mut pos = self.position(vertex);
        if pos >= self.size {
            // First insert: move the vertex to the first free leaf.
            let leaf = self.size;
            self.swap(pos, leaf);
            self.slot_mut(leaf).key = f32::INFINITY;
            self.size += 1;
            pos = leaf;
        }
        debug_assert!(
            key <= self.key(pos),
            "decrease_key raised vertex {vertex} from {} to {key}",
            self.key(pos)
        );
        self.slot_mut(pos).key = key;
        self.bubble_up(pos);
    }

    /// Remove and return the vertex with the smallest key.
    pub fn pop_min(&mut self) -> Result<usize, SearchError> {
        if self.size == 0 {
            return Err(SearchError::HeapUnderflow);
        }
        let min = self.vertex_at(0);
        let last = self.size - 1;
        self.swap(0, last);
        self.size = last;
        self.slot_mut(last).key = f32::INFINITY;
        self.bubble_down(0);
        Ok(min)
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (si, sj) = (self.slot(i), self.slot(j));
        let (vi, vj) = (si.out, sj.out);
        {
            let a = self.slot_mut(i);
            a.key = sj.key;
            a.out = vj;
        }
        {
            let b = self.slot_mut(j);
            b.key = si.key;
            b.out = vi;
        }
        self.slot_mut(vj).inn = i;
        self.slot_mut(vi).inn = j;
    }

    fn bubble_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.key(pos) < self.key(parent) {
                self.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn bubble_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            if left >= self.size {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < self.size && self.key(right) < self.key(left) {
                smallest = right;
            }
            if self.key(smallest) < self.key(pos) {
                self.swap(pos, smallest);
                pos = smallest;
            } else {
                break;
            }
        }
    }
}
