use anyangle_core::Point;

use super::{Relaxation, relax_to};
use crate::driver::SearchContext;

/// Plain edge relaxation over the 8-connected vertex graph.
///
/// With heuristic weight 0 this is Dijkstra. Edge costs come from the
/// graph, so the same rule serves boolean and weighted grids.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AStar;

impl Relaxation for AStar {
    fn relax(&self, ctx: &mut SearchContext<'_>, current: Point, neighbour: Point) -> bool {
        let d = ctx.distance(current) + ctx.edge_cost(current, neighbour);
        let link = ctx.link(current, false);
        relax_to(ctx, neighbour, link, d)
    }
}
