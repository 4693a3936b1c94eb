//! **anyangle-core**: Grid graph for any-angle path planning.
//!
//! This crate provides the read-only world the planners search: geometry
//! primitives, a grid of blocked or weighted cells whose corners are the
//! search vertices, line-of-sight and taut-path predicates, text layouts and
//! random grid generation.

pub mod geom;
pub mod graph;
pub mod layout;
pub mod mapgen;

pub use geom::Point;
pub use graph::{BLOCKED, GridGraph};
pub use layout::LayoutError;
pub use mapgen::GridGen;
