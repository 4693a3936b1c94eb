//! The shared expand-and-relax loop.
//!
//! [`SearchDriver`] owns the scratch memory of one search at a time and runs
//! the best-first loop over grid vertices; the rule deciding how a popped
//! vertex updates its neighbours is a [`Relaxation`] strategy.

use anyangle_core::{GridGraph, Point};

use crate::arena::{Arena, Parent, QueryToken, SlotDefaults};
use crate::cost::{edge_cost, physical_distance};
use crate::error::SearchError;
use crate::heap::IndirectHeap;
use crate::neighbors::Neighbors;
use crate::recording::{Recorder, Snapshot};
use crate::smoothing::PathSmoother;
use crate::strategy::Relaxation;

/// Length reported for a goal that cannot be reached.
pub const UNREACHABLE_LENGTH: f32 = -1.0;

/// Lifecycle of a query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// No query has run yet.
    #[default]
    Ready,
    Expanding,
    /// The goal was popped.
    Found,
    /// The heap ran dry, or only unreachable vertices were left.
    Exhausted,
}

/// Counters of the last query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Vertices popped from the heap.
    pub expanded: usize,
    /// Successful relaxations.
    pub relaxed: usize,
}

// ---------------------------------------------------------------------------
// SearchContext
// ---------------------------------------------------------------------------

/// What a strategy sees of a running search: the graph, and the scratch
/// memory addressed by vertex coordinates.
pub struct SearchContext<'a> {
    graph: &'a GridGraph,
    arena: &'a mut Arena,
}

impl<'a> SearchContext<'a> {
    pub fn new(graph: &'a GridGraph, arena: &'a mut Arena) -> Self {
        Self { graph, arena }
    }

    #[inline]
    pub fn graph(&self) -> &'a GridGraph {
        self.graph
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        self.arena
    }

    #[inline]
    pub fn distance(&self, v: Point) -> f32 {
        self.arena.distance(self.graph.index(v))
    }

    #[inline]
    pub fn set_distance(&mut self, v: Point, distance: f32) {
        self.arena.set_distance(self.graph.index(v), distance);
    }

    #[inline]
    pub fn visited(&self, v: Point) -> bool {
        self.arena.visited(self.graph.index(v))
    }

    /// Tagged parent link of `v`.
    #[inline]
    pub fn parent(&self, v: Point) -> Parent {
        self.arena.parent(self.graph.index(v))
    }

    /// Parent vertex of `v`, pending or not.
    #[inline]
    pub fn parent_point(&self, v: Point) -> Option<Point> {
        self.parent(v).vertex().map(|i| self.graph.point(i))
    }

    #[inline]
    pub fn set_parent(&mut self, v: Point, parent: Parent) {
        self.arena.set_parent(self.graph.index(v), parent);
    }

    /// Parent link pointing at `p`, tagged pending if `pending`.
    #[inline]
    pub fn link(&self, p: Point, pending: bool) -> Parent {
        let i = self.graph.index(p);
        if pending {
            Parent::Pending(i)
        } else {
            Parent::Settled(i)
        }
    }

    #[inline]
    pub fn line_of_sight(&self, a: Point, b: Point) -> bool {
        self.graph.line_of_sight(a, b)
    }

    /// Physical cost of the straight move `a -> b`.
    #[inline]
    pub fn cost(&self, a: Point, b: Point) -> f32 {
        physical_distance(self.graph, a, b)
    }

    /// Cost of a unit move between adjacent vertices.
    #[inline]
    pub fn edge_cost(&self, a: Point, b: Point) -> f32 {
        edge_cost(self.graph, a, b)
    }

    /// Whether the path `v -> u -> parent(u)` is taut. True if `u` has no
    /// parent.
    pub fn is_taut_at(&self, v: Point, u: Point) -> bool {
        match self.parent_point(u) {
            Some(p) => self.graph.is_taut(v, u, p),
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchDriver
// ---------------------------------------------------------------------------

/// Runs searches over a [`GridGraph`], reusing its memory between them.
///
/// One driver serves one query at a time. Parallel queries need one driver
/// each; the graph itself can be shared.
pub struct SearchDriver {
    arena: Arena,
    heap: IndirectHeap,
    nbuf: Neighbors,
    heuristic_weight: f32,
    state: SearchState,
    stats: SearchStats,
    token: Option<QueryToken>,
    goal: Point,
    recorder: Option<Recorder>,
    snapshots: Vec<Snapshot>,
}

impl Default for SearchDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchDriver {
    /// Create a driver with heuristic weight 1 (plain A* ordering).
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            heap: IndirectHeap::new(),
            nbuf: Neighbors::new(),
            heuristic_weight: 1.0,
            state: SearchState::Ready,
            stats: SearchStats::default(),
            token: None,
            goal: Point::ZERO,
            recorder: None,
            snapshots: Vec::new(),
        }
    }

    /// Weight of the straight-line distance to the goal in heap keys.
    /// Zero gives Dijkstra ordering.
    pub fn set_heuristic_weight(&mut self, weight: f32) {
        self.heuristic_weight = weight;
    }

    #[inline]
    pub fn heuristic_weight(&self) -> f32 {
        self.heuristic_weight
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Scratch memory of the last query.
    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Token of the last query, if any ran.
    #[inline]
    pub fn token(&self) -> Option<QueryToken> {
        self.token
    }

    fn heuristic(&self, graph: &GridGraph, v: Point, goal: Point) -> f32 {
        if self.heuristic_weight == 0.0 {
            return 0.0;
        }
        self.heuristic_weight * graph.distance(v, goal)
    }

    /// Search from `start` to `goal` with `strategy`.
    ///
    /// Returns [`SearchState::Found`] or [`SearchState::Exhausted`]. An
    /// unreachable goal is not an error. Out-of-range endpoints exhaust
    /// immediately.
    pub fn run<S: Relaxation + ?Sized>(
        &mut self,
        graph: &GridGraph,
        strategy: &S,
        start: Point,
        goal: Point,
    ) -> Result<SearchState, SearchError> {
        let size = graph.vertex_count();
        let token = self.arena.initialise(size, SlotDefaults::default());
        self.heap.initialise(size);
        self.token = Some(token);
        self.goal = goal;
        self.stats = SearchStats::default();
        self.state = SearchState::Expanding;
        if let Some(rec) = self.recorder.as_mut() {
            rec.clear();
        }

        if !graph.is_valid_coordinate(start) || !graph.is_valid_coordinate(goal) {
            self.state = SearchState::Exhausted;
            return Ok(self.state);
        }

        let s = graph.index(start);
        self.arena.set_distance(s, 0.0);
        self.heap.decrease_key(s, self.heuristic(graph, start, goal));

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let outcome = self.expand(graph, strategy, token, &mut nbuf);
        self.nbuf = nbuf;

        self.state = outcome?;
        log::debug!(
            "search {start} -> {goal}: {:?}, {} expanded, {} relaxed",
            self.state,
            self.stats.expanded,
            self.stats.relaxed
        );
        Ok(self.state)
    }

    fn expand<S: Relaxation + ?Sized>(
        &mut self,
        graph: &GridGraph,
        strategy: &S,
        token: QueryToken,
        nbuf: &mut Neighbors,
    ) -> Result<SearchState, SearchError> {
        let goal = self.goal;
        let goal_idx = graph.index(goal);

        while !self.heap.is_empty() {
            let ci = self.heap.pop_min()?;
            let current = graph.point(ci);
            self.stats.expanded += 1;

            strategy.on_pop(&mut SearchContext::new(graph, &mut self.arena), current);

            if let Some(rec) = self.recorder.as_mut() {
                rec.capture(graph, &self.arena, token, current)?;
            }

            let d = self.arena.distance(ci);
            if ci == goal_idx {
                return Ok(if d == f32::INFINITY {
                    SearchState::Exhausted
                } else {
                    SearchState::Found
                });
            }
            if d == f32::INFINITY {
                return Ok(SearchState::Exhausted);
            }
            self.arena.set_visited(ci, true);

            let arena = &self.arena;
            let candidates = nbuf.all(current, |n| {
                graph.is_valid_coordinate(n)
                    && !arena.visited(graph.index(n))
                    && graph.neighbour_line_of_sight(current, n)
            });
            for &n in candidates {
                let mut ctx = SearchContext::new(graph, &mut self.arena);
                if strategy.relax(&mut ctx, current, n) {
                    let ni = graph.index(n);
                    let key = self.arena.distance(ni) + self.heuristic(graph, n, goal);
                    self.heap.decrease_key(ni, key);
                    self.stats.relaxed += 1;
                }
            }
        }
        Ok(SearchState::Exhausted)
    }

    /// Post-smooth the path of the last query. Returns the number of passes
    /// that changed it; zero unless the last query found the goal.
    pub fn smooth(&mut self, graph: &GridGraph, smoother: &PathSmoother) -> Result<usize, SearchError> {
        if self.state != SearchState::Found {
            return Ok(0);
        }
        let passes = smoother.smooth(&mut SearchContext::new(graph, &mut self.arena), self.goal)?;
        if passes > 0 {
            if let (Some(rec), Some(token)) = (self.recorder.as_mut(), self.token) {
                rec.capture(graph, &self.arena, token, self.goal)?;
            }
        }
        Ok(passes)
    }

    /// Vertices from start to goal of the last query; empty unless found.
    pub fn path(&self, graph: &GridGraph) -> Result<Vec<Point>, SearchError> {
        if self.state != SearchState::Found {
            return Ok(Vec::new());
        }
        let mut path = parent_chain(graph, &self.arena, graph.index(self.goal))?;
        path.reverse();
        Ok(path)
    }

    /// Physical length of the last query's path, or [`UNREACHABLE_LENGTH`].
    pub fn path_length(&self, graph: &GridGraph) -> Result<f32, SearchError> {
        if self.state != SearchState::Found {
            return Ok(UNREACHABLE_LENGTH);
        }
        let chain = parent_chain(graph, &self.arena, graph.index(self.goal))?;
        Ok(chain
            .windows(2)
            .map(|w| physical_distance(graph, w[0], w[1]))
            .sum())
    }

    // -----------------------------------------------------------------------
    // Recording
    // -----------------------------------------------------------------------

    /// Capture a snapshot after every pop of the following queries.
    ///
    /// Discards snapshots of earlier recordings.
    pub fn start_recording(&mut self) {
        self.snapshots.clear();
        self.recorder = Some(Recorder::new());
    }

    /// Stop capturing. Snapshots taken so far stay available.
    pub fn stop_recording(&mut self) {
        if let Some(rec) = self.recorder.take() {
            self.snapshots = rec.into_snapshots();
        }
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Snapshots of the last recorded query.
    pub fn snapshots(&self) -> &[Snapshot] {
        match &self.recorder {
            Some(rec) => rec.snapshots(),
            None => &self.snapshots,
        }
    }

    /// Stop recording and hand over the snapshots.
    pub fn take_snapshots(&mut self) -> Vec<Snapshot> {
        self.stop_recording();
        std::mem::take(&mut self.snapshots)
    }
}

/// Vertices from `from` back to the root of its parent chain.
pub(crate) fn parent_chain(graph: &GridGraph, arena: &Arena, from: usize) -> Result<Vec<Point>, SearchError> {
    let mut chain = Vec::new();
    let mut ci = from;
    loop {
        chain.push(graph.point(ci));
        if chain.len() > arena.len() {
            return Err(SearchError::CorruptParentChain(graph.point(ci)));
        }
        match arena.parent(ci).vertex() {
            Some(p) => ci = p,
            None => break,
        }
    }
    Ok(chain)
}
