//! Random grid generation.
//!
//! Provides two generators for benchmark and test grids:
//! - **Random blocked**: a boolean grid where each cell is blocked with a
//!   fixed probability.
//! - **Random weighted**: the same blocking, plus a random terrain cost on
//!   half of the open cells.

use crate::geom::Point;
use crate::graph::{BLOCKED, GridGraph};
use rand::Rng;

/// Grid generator driven by a caller-supplied random source.
///
/// Seed it with a `SeedableRng` to get reproducible grids.
pub struct GridGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> GridGen<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a boolean grid where each cell is blocked with probability
    /// `fill` (clamped to 0.0–1.0).
    pub fn random_blocked(&mut self, size_x: i32, size_y: i32, fill: f64) -> GridGraph {
        let fill = fill.clamp(0.0, 1.0);
        GridGraph::from_fn(size_x, size_y, |_| self.rng.random_bool(fill))
    }

    /// Generate a weighted grid where each cell is blocked with probability
    /// `fill`.
    ///
    /// Open cells weigh 1, or with even odds `1 + r` where `r` is uniform in
    /// `[0.5, 2.0)` rounded to two decimals.
    pub fn random_weighted(&mut self, size_x: i32, size_y: i32, fill: f64) -> GridGraph {
        let fill = fill.clamp(0.0, 1.0);
        GridGraph::weighted_from_fn(size_x, size_y, |_| {
            if self.rng.random_bool(fill) {
                return BLOCKED;
            }
            if self.rng.random_bool(0.5) {
                let r: f32 = self.rng.random_range(0.5..2.0);
                1.0 + (r * 100.0).round() / 100.0
            } else {
                1.0
            }
        })
    }

    /// Pick a uniformly random vertex that touches at least one open cell.
    ///
    /// Returns `None` when every cell is blocked.
    pub fn random_open_vertex(&mut self, graph: &GridGraph) -> Option<Point> {
        if graph.num_blocked() == graph.size_x() as usize * graph.size_y() as usize {
            return None;
        }
        loop {
            let v = Point::new(
                self.rng.random_range(0..=graph.size_x()),
                self.rng.random_range(0..=graph.size_y()),
            );
            if graph.is_unblocked_coordinate(v) {
                return Some(v);
            }
        }
    }
}
