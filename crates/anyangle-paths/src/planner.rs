//! One-call query surface over the driver.

use anyangle_core::{GridGraph, Point};

use crate::config::SearchConfig;
use crate::driver::{SearchDriver, SearchState, SearchStats, UNREACHABLE_LENGTH};
use crate::error::SearchError;
use crate::recording::Snapshot;
use crate::smoothing::PathSmoother;
use crate::strategy::Strategy;

/// Answer of a path query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Vertices from start to goal; empty when the goal is unreachable.
    pub path: Vec<Point>,
    /// Physical length of `path`, or [`UNREACHABLE_LENGTH`].
    pub length: f32,
}

impl PathResult {
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            length: UNREACHABLE_LENGTH,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Runs queries with a fixed configuration, reusing its scratch memory.
///
/// ```
/// use anyangle_core::{GridGraph, Point};
/// use anyangle_paths::{Algorithm, Planner, SearchConfig};
///
/// let mut grid = GridGraph::new(5, 5);
/// grid.set_blocked(Point::new(2, 2), true);
/// let mut planner = Planner::new(SearchConfig::new(Algorithm::ThetaStar));
/// let res = planner.find_path(&grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
/// assert!(res.is_found());
/// assert_eq!(res.path.len(), 3);
/// ```
pub struct Planner {
    config: SearchConfig,
    strategy: Strategy,
    smoother: PathSmoother,
    driver: SearchDriver,
}

impl Planner {
    pub fn new(config: SearchConfig) -> Self {
        let mut driver = SearchDriver::new();
        driver.set_heuristic_weight(config.effective_heuristic_weight());
        Self {
            config,
            strategy: config.strategy(),
            smoother: PathSmoother::new(config.smoothing),
            driver,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Switch configuration, keeping the scratch memory.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
        self.strategy = config.strategy();
        self.smoother = PathSmoother::new(config.smoothing);
        self.driver.set_heuristic_weight(config.effective_heuristic_weight());
    }

    /// Find a path from `start` to `goal` on `graph`.
    ///
    /// An unreachable goal, or an endpoint off the graph, gives
    /// [`PathResult::unreachable`].
    pub fn find_path(&mut self, graph: &GridGraph, start: Point, goal: Point) -> Result<PathResult, SearchError> {
        let state = self.driver.run(graph, &self.strategy, start, goal)?;
        if state != SearchState::Found {
            log::debug!("{}: {start} -> {goal} unreachable", self.config.algorithm);
            return Ok(PathResult::unreachable());
        }
        let passes = self.driver.smooth(graph, &self.smoother)?;
        let path = self.driver.path(graph)?;
        let length = self.driver.path_length(graph)?;
        log::debug!(
            "{}: {start} -> {goal} length {length}, {} vertices, {passes} smoothing passes",
            self.config.algorithm,
            path.len()
        );
        Ok(PathResult { path, length })
    }

    /// Counters of the last query.
    pub fn stats(&self) -> SearchStats {
        self.driver.stats()
    }

    pub fn driver(&self) -> &SearchDriver {
        &self.driver
    }

    pub fn start_recording(&mut self) {
        self.driver.start_recording();
    }

    pub fn stop_recording(&mut self) {
        self.driver.stop_recording();
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        self.driver.snapshots()
    }

    pub fn take_snapshots(&mut self) -> Vec<Snapshot> {
        self.driver.take_snapshots()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_result_json() {
        let r = PathResult {
            path: vec![Point::new(0, 0), Point::new(3, 1)],
            length: 10f32.sqrt(),
        };
        let s = serde_json::to_string(&r).unwrap();
        assert_eq!(serde_json::from_str::<PathResult>(&s).unwrap(), r);
    }
}
