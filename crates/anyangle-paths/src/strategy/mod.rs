//! Relaxation rules plugged into the [`SearchDriver`](crate::SearchDriver).
//!
//! | Strategy | Parent of a relaxed neighbour |
//! |---|---|
//! | [`AStar`] | the popped vertex |
//! | [`ThetaStar`] | the popped vertex's parent when visible, else the popped vertex |
//! | [`LazyThetaStar`] | the popped vertex's parent, verified when the neighbour is popped |
//! | [`StrictThetaStar`] | as Theta*, with a buffer penalty on non-taut parents |
//! | [`RecursiveStrictThetaStar`] | the furthest visible ancestor keeping the path taut |
//!
//! Each strategy has a `weighted` flag. Weighted rules never skip a
//! neighbour sharing the popped vertex's parent (the triangle inequality
//! behind that shortcut does not hold under cell weights), and the Theta*
//! rules only take the parent's straight line when it is actually cheaper.

mod astar;
mod lazy;
mod recursive;
mod strict;
mod theta;

pub use astar::AStar;
pub use lazy::LazyThetaStar;
pub use recursive::RecursiveStrictThetaStar;
pub use strict::StrictThetaStar;
pub use theta::ThetaStar;

use anyangle_core::Point;

use crate::arena::Parent;
use crate::driver::SearchContext;

/// Penalty added to a non-taut parent by the strict rules.
pub const DEFAULT_BUFFER: f32 = 0.42;

/// How a popped vertex updates one of its neighbours.
pub trait Relaxation {
    /// Try to improve `neighbour` through `current`. Return `true` if its
    /// distance went down, so the driver re-keys it.
    ///
    /// `neighbour` is an unvisited vertex adjacent to `current` with
    /// neighbour line of sight.
    fn relax(&self, ctx: &mut SearchContext<'_>, current: Point, neighbour: Point) -> bool;

    /// Called when `current` is popped, before the goal check and before
    /// any of its neighbours is relaxed.
    fn on_pop(&self, _ctx: &mut SearchContext<'_>, _current: Point) {}
}

/// Whether `neighbour` can be skipped because it already hangs off the
/// same parent as `current`.
pub(crate) fn shares_parent(ctx: &SearchContext<'_>, current: Point, neighbour: Point) -> bool {
    match ctx.parent(current) {
        Parent::Settled(p) => ctx.parent(neighbour) == Parent::Settled(p),
        _ => false,
    }
}

/// Set `v`'s distance and parent if `distance` beats the current one.
pub(crate) fn relax_to(ctx: &mut SearchContext<'_>, v: Point, parent: Parent, distance: f32) -> bool {
    if distance < ctx.distance(v) {
        ctx.set_distance(v, distance);
        ctx.set_parent(v, parent);
        true
    } else {
        false
    }
}

/// Strict rules: strip the buffer of a vertex popped with a pending parent.
pub(crate) fn settle_pending(ctx: &mut SearchContext<'_>, current: Point) {
    if let Parent::Pending(i) = ctx.parent(current) {
        let p = ctx.graph().point(i);
        let d = ctx.distance(p) + ctx.cost(p, current);
        log::trace!("settle {current}: parent {p}, {} -> {d}", ctx.distance(current));
        ctx.set_parent(current, Parent::Settled(i));
        ctx.set_distance(current, d);
    }
}

/// Any of the five strategies, selected at run time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Strategy {
    AStar(AStar),
    Theta(ThetaStar),
    Lazy(LazyThetaStar),
    Strict(StrictThetaStar),
    Recursive(RecursiveStrictThetaStar),
}

impl Relaxation for Strategy {
    fn relax(&self, ctx: &mut SearchContext<'_>, current: Point, neighbour: Point) -> bool {
        match self {
            Strategy::AStar(s) => s.relax(ctx, current, neighbour),
            Strategy::Theta(s) => s.relax(ctx, current, neighbour),
            Strategy::Lazy(s) => s.relax(ctx, current, neighbour),
            Strategy::Strict(s) => s.relax(ctx, current, neighbour),
            Strategy::Recursive(s) => s.relax(ctx, current, neighbour),
        }
    }

    fn on_pop(&self, ctx: &mut SearchContext<'_>, current: Point) {
        match self {
            Strategy::AStar(s) => s.on_pop(ctx, current),
            Strategy::Theta(s) => s.on_pop(ctx, current),
            Strategy::Lazy(s) => s.on_pop(ctx, current),
            Strategy::Strict(s) => s.on_pop(ctx, current),
            Strategy::Recursive(s) => s.on_pop(ctx, current),
        }
    }
}
