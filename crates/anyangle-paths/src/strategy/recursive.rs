use anyangle_core::{GridGraph, Point};

use super::{DEFAULT_BUFFER, Relaxation, settle_pending, shares_parent};
use crate::arena::Parent;
use crate::driver::SearchContext;

/// Recursive Strict Theta*.
///
/// When the bend at the popped vertex is not taut, walks up its parent
/// chain for the furthest ancestor that still sees the neighbour, instead
/// of buffering right away. Collinear parents are merged unless they sit
/// on an outer corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RecursiveStrictThetaStar {
    /// Weighted rule: no shared-parent shortcut.
    pub weighted: bool,
    pub buffer: f32,
    /// Ancestors to climb before settling; `None` climbs to the start.
    pub depth_limit: Option<usize>,
}

impl Default for RecursiveStrictThetaStar {
    fn default() -> Self {
        Self {
            weighted: false,
            buffer: DEFAULT_BUFFER,
            depth_limit: None,
        }
    }
}

impl RecursiveStrictThetaStar {
    pub fn new(weighted: bool, buffer: f32, depth_limit: Option<usize>) -> Self {
        Self {
            weighted,
            buffer,
            depth_limit,
        }
    }

    fn try_relax_vertex(&self, ctx: &mut SearchContext<'_>, u: Point, v: Point, buffered: bool) -> bool {
        let mut distance = ctx.distance(u) + ctx.cost(u, v);
        if buffered {
            distance += self.buffer;
        }
        if distance >= ctx.distance(v) {
            return false;
        }
        let mut link = ctx.link(u, buffered);
        if is_mergeable(ctx, u, v) {
            if let Some(pu) = ctx.parent(u).vertex() {
                link = if buffered {
                    Parent::Pending(pu)
                } else {
                    Parent::Settled(pu)
                };
            }
        }
        ctx.set_distance(v, distance);
        ctx.set_parent(v, link);
        true
    }
}

/// Whether `parent(u), u, v` are collinear with `u` not on an outer corner,
/// so `v` can hang off `parent(u)` directly.
fn is_mergeable(ctx: &SearchContext<'_>, u: Point, v: Point) -> bool {
    let Some(p) = ctx.parent_point(u) else {
        return false;
    };
    !ctx.graph().is_outer_corner(u) && GridGraph::is_collinear(p, u, v)
}

impl Relaxation for RecursiveStrictThetaStar {
    fn relax(&self, ctx: &mut SearchContext<'_>, current: Point, neighbour: Point) -> bool {
        if !self.weighted && shares_parent(ctx, current, neighbour) {
            return false;
        }
        let mut u = current;
        let mut depth = self.depth_limit;
        loop {
            if ctx.is_taut_at(neighbour, u) {
                return self.try_relax_vertex(ctx, u, neighbour, false);
            }
            let Some(par) = ctx.parent_point(u) else {
                return self.try_relax_vertex(ctx, u, neighbour, false);
            };
            if !ctx.line_of_sight(par, neighbour) {
                return self.try_relax_vertex(ctx, u, neighbour, true);
            }
            match depth {
                Some(0) => {
                    let buffered = !ctx.is_taut_at(neighbour, par);
                    return self.try_relax_vertex(ctx, par, neighbour, buffered);
                }
                Some(d) => depth = Some(d - 1),
                None => {}
            }
            u = par;
        }
    }

    fn on_pop(&self, ctx: &mut SearchContext<'_>, current: Point) {
        settle_pending(ctx, current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Arena, SlotDefaults};
    use crate::strategy::testing::{assert_visible, close, p, solve};

    const SQRT_2: f32 = std::f32::consts::SQRT_2;

    #[test]
    fn open_grid_is_a_straight_line() {
        let g = GridGraph::new(7, 3);
        let (path, len) = solve(&g, &RecursiveStrictThetaStar::default(), p(0, 0), p(7, 3));
        assert_eq!(path, vec![p(0, 0), p(7, 3)]);
        assert!(close(len, 58f32.sqrt()));
    }

    #[test]
    fn depth_limits_find_the_same_detour() {
        let g = GridGraph::from_ascii(
            "\
.......
...#...
...#...
...#...
.......",
        )
        .unwrap();
        for depth_limit in [None, Some(0), Some(1), Some(4)] {
            let algo = RecursiveStrictThetaStar::new(false, DEFAULT_BUFFER, depth_limit);
            let (path, len) = solve(&g, &algo, p(0, 2), p(7, 2));
            assert_visible(&g, &path);
            // over the top of the wall: (0,2) -> (3,1) -> (4,1) -> (7,2)
            let best = 2.0 * 10f32.sqrt() + 1.0;
            assert!(len >= best - 1e-4, "{depth_limit:?}: length {len}");
            assert!(len < best + 1.0, "{depth_limit:?}: length {len}");
        }
    }

    #[test]
    fn collinear_parent_is_merged() {
        let g = GridGraph::new(6, 6);
        let algo = RecursiveStrictThetaStar::default();
        let mut arena = Arena::new();
        arena.initialise(g.vertex_count(), SlotDefaults::default());
        arena.set_distance(g.index(p(0, 0)), 0.0);
        arena.set_distance(g.index(p(1, 1)), SQRT_2);
        arena.set_parent(g.index(p(1, 1)), Parent::Settled(g.index(p(0, 0))));
        let mut ctx = SearchContext::new(&g, &mut arena);

        // (0,0), (1,1), (2,2) are collinear and (1,1) is no corner
        assert!(algo.relax(&mut ctx, p(1, 1), p(2, 2)));
        assert_eq!(ctx.parent_point(p(2, 2)), Some(p(0, 0)));
        assert!(close(ctx.distance(p(2, 2)), 2.0 * SQRT_2));
    }

    #[test]
    fn outer_corner_is_kept() {
        let mut g = GridGraph::new(6, 6);
        g.set_blocked(p(0, 1), true);
        let algo = RecursiveStrictThetaStar::default();
        let mut arena = Arena::new();
        arena.initialise(g.vertex_count(), SlotDefaults::default());
        arena.set_distance(g.index(p(0, 0)), 0.0);
        arena.set_distance(g.index(p(1, 1)), SQRT_2);
        arena.set_parent(g.index(p(1, 1)), Parent::Settled(g.index(p(0, 0))));
        let mut ctx = SearchContext::new(&g, &mut arena);

        assert!(g.is_outer_corner(p(1, 1)));
        assert!(algo.relax(&mut ctx, p(1, 1), p(2, 2)));
        assert_eq!(ctx.parent_point(p(2, 2)), Some(p(1, 1)));
    }

    #[test]
    fn weighted_rule_on_weighted_grids() {
        crate::strategy::testing::check_weighted_grids(&RecursiveStrictThetaStar::new(true, DEFAULT_BUFFER, None));
    }

    #[test]
    fn weighted_rule_with_depth_limit_on_weighted_grids() {
        crate::strategy::testing::check_weighted_grids(&RecursiveStrictThetaStar::new(true, DEFAULT_BUFFER, Some(1)));
    }
}
