//! Per-vertex scratch memory reused across queries.
//!
//! Every slot carries the epoch of its last write. A slot stamped with an
//! older epoch reads as the defaults of the current query, so starting a
//! query costs O(1) instead of clearing the whole array.

use std::fmt;

/// Parent link of a vertex.
///
/// `Pending` marks a parent accepted with a buffer penalty that still has
/// to be removed when the vertex is popped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Parent {
    /// No parent: the vertex is the start, or has not been reached.
    #[default]
    Root,
    /// Final link to the vertex at this index.
    Settled(usize),
    /// Link to the vertex at this index whose distance still carries the
    /// buffer penalty.
    Pending(usize),
}

impl Parent {
    /// The parent vertex, ignoring the tag.
    #[inline]
    pub fn vertex(self) -> Option<usize> {
        match self {
            Parent::Root => None,
            Parent::Settled(v) | Parent::Pending(v) => Some(v),
        }
    }

    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, Parent::Pending(_))
    }
}

/// Values every slot reads as until it is written in the current query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotDefaults {
    pub distance: f32,
    pub parent: Parent,
    pub visited: bool,
}

impl Default for SlotDefaults {
    fn default() -> Self {
        Self {
            distance: f32::INFINITY,
            parent: Parent::Root,
            visited: false,
        }
    }
}

/// Identifies one query against an [`Arena`]. Never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryToken(u64);

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy)]
struct Slot {
    distance: f32,
    parent: Parent,
    visited: bool,
    epoch: u32,
}

const STALE: Slot = Slot {
    distance: f32::INFINITY,
    parent: Parent::Root,
    visited: false,
    epoch: 0,
};

/// Epoch-stamped `distance`/`parent`/`visited` storage for every vertex.
///
/// Reads of slots not yet written in the current query return the
/// [`SlotDefaults`] given to [`initialise`](Self::initialise). Writing one
/// field of such a slot resets the other two to their defaults.
pub struct Arena {
    slots: Vec<Slot>,
    epoch: u32,
    queries: u64,
    defaults: SlotDefaults,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// Create an empty arena. No memory is allocated until the first query.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            epoch: 0,
            queries: 0,
            defaults: SlotDefaults::default(),
        }
    }

    /// Start a new query over `size` vertices.
    ///
    /// The same size reuses the backing storage and only bumps the epoch; a
    /// different size reallocates.
    pub fn initialise(&mut self, size: usize, defaults: SlotDefaults) -> QueryToken {
        if self.slots.len() != size {
            self.slots.clear();
            self.slots.resize(size, STALE);
            self.epoch = 0;
        }
        if self.epoch == u32::MAX {
            // Wrapping would make slots from long ago look current again.
            self.slots.fill(STALE);
            self.epoch = 0;
        }
        self.epoch += 1;
        self.queries += 1;
        self.defaults = defaults;
        QueryToken(self.queries)
    }

    /// Token of the query currently owning the arena.
    #[inline]
    pub fn current_token(&self) -> QueryToken {
        QueryToken(self.queries)
    }

    /// Whether `token` still owns the arena.
    #[inline]
    pub fn is_current(&self, token: QueryToken) -> bool {
        token.0 == self.queries
    }

    /// Number of vertices of the current query.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    fn live(&self, i: usize) -> Option<&Slot> {
        let s = &self.slots[i];
        (s.epoch == self.epoch).then_some(s)
    }

    #[inline]
    fn claim(&mut self, i: usize) -> &mut Slot {
        let (epoch, d) = (self.epoch, self.defaults);
        let s = &mut self.slots[i];
        if s.epoch != epoch {
            *s = Slot {
                distance: d.distance,
                parent: d.parent,
                visited: d.visited,
                epoch,
            };
        }
        s
    }

    #[inline]
    pub fn distance(&self, i: usize) -> f32 {
        self.live(i).map_or(self.defaults.distance, |s| s.distance)
    }

    #[inline]
    pub fn parent(&self, i: usize) -> Parent {
        self.live(i).map_or(self.defaults.parent, |s| s.parent)
    }

    #[inline]
    pub fn visited(&self, i: usize) -> bool {
        self.live(i).map_or(self.defaults.visited, |s| s.visited)
    }

    #[inline]
    pub fn set_distance(&mut self, i: usize, distance: f32) {
        self.claim(i).distance = distance;
    }

    #[inline]
    pub fn set_parent(&mut self, i: usize, parent: Parent) {
        self.claim(i).parent = parent;
    }

    #[inline]
    pub fn set_visited(&mut self, i: usize, visited: bool) {
        self.claim(i).visited = visited;
    }

    #[cfg(test)]
    pub(crate) fn force_epoch(&mut self, epoch: u32) {
        self.epoch = epoch;
    }
}
