//! **anyangle-paths**: Theta* family any-angle search on grid vertices.
//!
//! A [`SearchDriver`] runs the best-first loop over the corners of an
//! [`anyangle_core::GridGraph`], delegating neighbour updates to a
//! [`Relaxation`] strategy: plain A*, Theta*, Lazy Theta*, Strict Theta* or
//! Recursive Strict Theta*, each with a weighted variant. Scratch memory is
//! epoch-stamped and reused across queries. A [`PathSmoother`] can
//! string-pull the result afterwards.
//!
//! Most callers only need [`Planner`]:
//!
//! ```
//! use anyangle_core::{GridGraph, Point};
//! use anyangle_paths::{Algorithm, Planner, SearchConfig};
//!
//! let grid = GridGraph::from_ascii("....\n.##.\n....").unwrap();
//! let mut planner = Planner::new(SearchConfig::new(Algorithm::LazyThetaStar));
//! let res = planner.find_path(&grid, Point::new(0, 0), Point::new(4, 3)).unwrap();
//! assert_eq!(res.path.first(), Some(&Point::new(0, 0)));
//! assert_eq!(res.path.last(), Some(&Point::new(4, 3)));
//! ```

pub mod arena;
pub mod config;
pub mod cost;
pub mod driver;
pub mod error;
pub mod heap;
pub mod line;
pub mod neighbors;
pub mod planner;
pub mod recording;
pub mod smoothing;
pub mod strategy;

pub use arena::{Arena, Parent, QueryToken, SlotDefaults};
pub use config::{Algorithm, SearchConfig};
pub use cost::{edge_cost, physical_distance};
pub use driver::{SearchContext, SearchDriver, SearchState, SearchStats, UNREACHABLE_LENGTH};
pub use error::SearchError;
pub use heap::IndirectHeap;
pub use line::{LineWalk, Orientation, Part, Partitioning, partition};
pub use neighbors::Neighbors;
pub use planner::{PathResult, Planner};
pub use recording::{Recorder, Snapshot, SnapshotEdge};
pub use smoothing::{PathSmoother, Smoothing};
pub use strategy::{
    AStar, DEFAULT_BUFFER, LazyThetaStar, RecursiveStrictThetaStar, Relaxation, Strategy, StrictThetaStar,
    ThetaStar,
};
