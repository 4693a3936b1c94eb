//! Search snapshots for visualisation.
//!
//! A [`Recorder`] is handed the scratch memory after every pop and keeps a
//! [`Snapshot`] of it: one edge per reached vertex, from its parent, with the
//! edges on the popped vertex's parent chain highlighted, plus the visited
//! vertices.

use std::collections::HashSet;

use anyangle_core::{GridGraph, Point};

use crate::arena::{Arena, QueryToken};
use crate::error::SearchError;

/// A parent link drawn as a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotEdge {
    pub from: Point,
    pub to: Point,
    /// On the parent chain of the vertex popped when the snapshot was taken.
    pub highlight: bool,
}

/// State of the search after one pop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub edges: Vec<SnapshotEdge>,
    pub visited: Vec<Point>,
}

/// Append-only log of snapshots.
#[derive(Debug, Default)]
pub struct Recorder {
    snapshots: Vec<Snapshot>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }

    /// Record the arena as seen by query `token`, highlighting the chain
    /// from `current`.
    ///
    /// Fails if another query has taken over the arena.
    pub fn capture(
        &mut self,
        graph: &GridGraph,
        arena: &Arena,
        token: QueryToken,
        current: Point,
    ) -> Result<(), SearchError> {
        if !arena.is_current(token) {
            return Err(SearchError::EpochMismatch {
                expected: token,
                current: arena.current_token(),
            });
        }

        let mut chain = HashSet::new();
        let mut ci = graph.index(current);
        while let Some(p) = arena.parent(ci).vertex() {
            if !chain.insert(ci) {
                return Err(SearchError::CorruptParentChain(graph.point(ci)));
            }
            ci = p;
        }

        let mut snapshot = Snapshot::default();
        for i in 0..arena.len() {
            if let Some(p) = arena.parent(i).vertex() {
                snapshot.edges.push(SnapshotEdge {
                    from: graph.point(p),
                    to: graph.point(i),
                    highlight: chain.contains(&i),
                });
            }
            if arena.visited(i) {
                snapshot.visited.push(graph.point(i));
            }
        }
        self.snapshots.push(snapshot);
        Ok(())
    }
}
