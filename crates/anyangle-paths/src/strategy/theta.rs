use anyangle_core::Point;

use super::{Relaxation, relax_to, shares_parent};
use crate::driver::SearchContext;

/// Basic Theta*: relax against the popped vertex's parent whenever it can
/// see the neighbour, producing any-angle shortcuts during the search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ThetaStar {
    /// Weighted rule: the parent's line is only taken when it is cheaper
    /// than going through the popped vertex.
    pub weighted: bool,
}

impl ThetaStar {
    pub fn new(weighted: bool) -> Self {
        Self { weighted }
    }
}

impl Relaxation for ThetaStar {
    fn relax(&self, ctx: &mut SearchContext<'_>, current: Point, neighbour: Point) -> bool {
        if !self.weighted && shares_parent(ctx, current, neighbour) {
            return false;
        }
        if let Some(par) = ctx.parent_point(current) {
            if ctx.line_of_sight(par, neighbour) {
                let via_parent = ctx.distance(par) + ctx.cost(par, neighbour);
                let link = ctx.link(par, false);
                if !self.weighted {
                    return relax_to(ctx, neighbour, link, via_parent);
                }
                let direct = ctx.distance(current) + ctx.cost(current, neighbour);
                if direct > via_parent && relax_to(ctx, neighbour, link, via_parent) {
                    return true;
                }
            }
        }
        let d = ctx.distance(current) + ctx.cost(current, neighbour);
        let link = ctx.link(current, false);
        relax_to(ctx, neighbour, link, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::{assert_visible, close, p, solve};
    use anyangle_core::GridGraph;

    const SQRT_2: f32 = std::f32::consts::SQRT_2;

    #[test]
    fn open_grid_is_a_straight_line() {
        let g = GridGraph::new(5, 5);
        let (path, len) = solve(&g, &ThetaStar::default(), p(0, 0), p(4, 4));
        assert_eq!(path, vec![p(0, 0), p(4, 4)]);
        assert!(close(len, 4.0 * SQRT_2));

        let (path, len) = solve(&g, &ThetaStar::default(), p(0, 0), p(5, 2));
        assert_eq!(path, vec![p(0, 0), p(5, 2)]);
        assert!(close(len, 29f32.sqrt()));
    }

    #[test]
    fn cuts_the_corner_of_a_blocked_cell() {
        let mut g = GridGraph::new(5, 5);
        g.set_blocked(p(2, 2), true);
        assert!(!g.line_of_sight(p(0, 0), p(4, 4)));
        let (path, len) = solve(&g, &ThetaStar::default(), p(0, 0), p(4, 4));
        assert_visible(&g, &path);
        assert!(len > 4.0 * SQRT_2, "length {len}");
        assert!(len < 3.0 * SQRT_2 + 2.0, "length {len}");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn weighted_rule_avoids_heavy_cells() {
        let g = GridGraph::from_ascii("....\n.99.\n.99.\n....").unwrap();
        let (path, len) = solve(&g, &ThetaStar::new(true), p(0, 0), p(4, 4));
        assert_visible(&g, &path);
        // the straight diagonal crosses the heavy block at 5x the cost
        assert!(len < 8.0, "length {len}");
        assert!(len >= 4.0 * SQRT_2);
    }
}
