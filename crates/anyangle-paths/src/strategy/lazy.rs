use anyangle_core::Point;

use super::{Relaxation, relax_to, shares_parent};
use crate::driver::SearchContext;

/// Lazy Theta*: assume the popped vertex's parent sees the neighbour, and
/// only check when the neighbour is popped.
///
/// A vertex whose parent turns out to be hidden is re-attached to its
/// cheapest visited neighbour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LazyThetaStar {
    /// Weighted rule: no shared-parent shortcut.
    pub weighted: bool,
}

impl LazyThetaStar {
    pub fn new(weighted: bool) -> Self {
        Self { weighted }
    }
}

impl Relaxation for LazyThetaStar {
    fn relax(&self, ctx: &mut SearchContext<'_>, current: Point, neighbour: Point) -> bool {
        if !self.weighted && shares_parent(ctx, current, neighbour) {
            return false;
        }
        if let Some(par) = ctx.parent_point(current) {
            let via_parent = ctx.distance(par) + ctx.cost(par, neighbour);
            // A weighted line through a blocked cell is infinite: nothing to assume.
            if via_parent.is_finite() {
                let link = ctx.link(par, false);
                return relax_to(ctx, neighbour, link, via_parent);
            }
        }
        let d = ctx.distance(current) + ctx.cost(current, neighbour);
        let link = ctx.link(current, false);
        relax_to(ctx, neighbour, link, d)
    }

    fn on_pop(&self, ctx: &mut SearchContext<'_>, current: Point) {
        let Some(par) = ctx.parent_point(current) else {
            return;
        };
        if ctx.line_of_sight(current, par) {
            return;
        }
        let graph = ctx.graph();
        ctx.set_distance(current, f32::INFINITY);
        for n in current.neighbors_8() {
            if !graph.is_valid_coordinate(n)
                || !ctx.visited(n)
                || !graph.neighbour_line_of_sight(current, n)
            {
                continue;
            }
            let d = ctx.distance(n) + ctx.edge_cost(n, current);
            if d < ctx.distance(current) {
                ctx.set_distance(current, d);
                let link = ctx.link(n, false);
                ctx.set_parent(current, link);
            }
        }
        log::trace!(
            "lazy repair {current}: {par} hidden, now {:?} at {}",
            ctx.parent_point(current),
            ctx.distance(current)
        );
    }
}
