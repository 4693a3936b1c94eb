//! String-pulling over a finished parent chain.

use anyangle_core::Point;

use crate::arena::Parent;
use crate::driver::{SearchContext, parent_chain};
use crate::error::SearchError;

/// Slack allowed when comparing a shortcut with the chain it replaces.
const EPSILON: f32 = 1e-4;

/// How many smoothing passes to run after a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Smoothing {
    #[default]
    Off,
    /// At most this many passes, stopping early once a pass changes nothing.
    Bounded(usize),
    /// Passes until one changes nothing.
    UntilFixpoint,
}

impl Smoothing {
    /// Pass cap of the plain post-smoothing mode.
    pub const DEFAULT_PASSES: usize = 50;

    /// Bounded smoothing with [`DEFAULT_PASSES`](Self::DEFAULT_PASSES).
    pub fn default_bounded() -> Self {
        Smoothing::Bounded(Self::DEFAULT_PASSES)
    }
}

/// Shortens a parent chain by splicing each vertex to the furthest
/// ancestor it can see, as long as the straight line is no longer than the
/// stretch of chain it replaces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PathSmoother {
    mode: Smoothing,
}

impl PathSmoother {
    pub fn new(mode: Smoothing) -> Self {
        Self { mode }
    }

    #[inline]
    pub fn mode(&self) -> Smoothing {
        self.mode
    }

    /// Smooth the chain ending at `goal`. Returns the number of passes that
    /// changed it.
    pub fn smooth(&self, ctx: &mut SearchContext<'_>, goal: Point) -> Result<usize, SearchError> {
        let cap = match self.mode {
            Smoothing::Off | Smoothing::Bounded(0) => return Ok(0),
            Smoothing::Bounded(n) => n,
            Smoothing::UntilFixpoint => usize::MAX,
        };
        let mut changed = 0;
        while changed < cap {
            if !pass(ctx, goal)? {
                return Ok(changed);
            }
            changed += 1;
        }
        log::warn!("smoothing stopped at its cap of {cap} passes while the path was still changing");
        Ok(changed)
    }
}

/// One pass from the goal to the start. Returns whether anything changed.
fn pass(ctx: &mut SearchContext<'_>, goal: Point) -> Result<bool, SearchError> {
    // Splicing only ever drops chain vertices, so a chain that terminates
    // now terminates through the whole pass.
    parent_chain(ctx.graph(), ctx.arena(), ctx.graph().index(goal))?;

    let mut did_something = false;
    let mut current = goal;
    while let Some(next) = ctx.parent_point(current) {
        let mut jagged = ctx.cost(current, next);
        let mut prev = next;
        while let Some(candidate) = ctx.parent_point(prev) {
            jagged += ctx.cost(prev, candidate);
            if !ctx.line_of_sight(current, candidate) {
                break;
            }
            let direct = ctx.cost(current, candidate);
            if direct > jagged + EPSILON {
                break;
            }
            let i = ctx.graph().index(candidate);
            ctx.set_parent(current, Parent::Settled(i));
            did_something = true;
            jagged = direct;
            prev = candidate;
        }
        current = prev;
    }
    Ok(did_something)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::SearchDriver;
    use crate::strategy::AStar;
    use anyangle_core::GridGraph;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn smoothed(g: &GridGraph, mode: Smoothing, start: Point, goal: Point) -> (SearchDriver, usize) {
        let mut d = SearchDriver::new();
        d.run(g, &AStar, start, goal).unwrap();
        let passes = d.smooth(g, &PathSmoother::new(mode)).unwrap();
        (d, passes)
    }

    #[test]
    fn off_changes_nothing() {
        let g = GridGraph::new(5, 3);
        let (d, passes) = smoothed(&g, Smoothing::Off, p(0, 0), p(5, 2));
        assert_eq!(passes, 0);
        assert_eq!(d.path(&g).unwrap().len(), 6);
    }

    #[test]
    fn open_grid_becomes_a_straight_line() {
        let g = GridGraph::new(5, 3);
        let (d, passes) = smoothed(&g, Smoothing::UntilFixpoint, p(0, 0), p(5, 2));
        assert!(passes >= 1);
        assert_eq!(d.path(&g).unwrap(), vec![p(0, 0), p(5, 2)]);
        assert!((d.path_length(&g).unwrap() - 29f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn smoothing_never_lengthens_or_hides() {
        let g = GridGraph::from_ascii(
            "\
........
..##....
..##.#..
.....#..
........",
        )
        .unwrap();
        let mut d = SearchDriver::new();
        d.run(&g, &AStar, p(0, 0), p(8, 5)).unwrap();
        let before = d.path_length(&g).unwrap();
        d.smooth(&g, &PathSmoother::new(Smoothing::default_bounded())).unwrap();
        let after = d.path_length(&g).unwrap();
        assert!(after <= before + 1e-4);
        let path = d.path(&g).unwrap();
        for w in path.windows(2) {
            assert!(g.line_of_sight(w[0], w[1]));
        }
    }

    #[test]
    fn fixpoint_is_idempotent() {
        let g = GridGraph::from_ascii("......\n.#..#.\n...#..\n......").unwrap();
        let mut d = SearchDriver::new();
        d.run(&g, &AStar, p(0, 0), p(6, 4)).unwrap();
        let smoother = PathSmoother::new(Smoothing::UntilFixpoint);
        d.smooth(&g, &smoother).unwrap();
        let once = d.path(&g).unwrap();
        assert_eq!(d.smooth(&g, &smoother).unwrap(), 0);
        assert_eq!(d.path(&g).unwrap(), once);
    }

    #[test]
    fn zero_pass_cap_changes_nothing() {
        let g = GridGraph::new(5, 3);
        let (d, passes) = smoothed(&g, Smoothing::Bounded(0), p(0, 0), p(5, 2));
        assert_eq!(passes, 0);
        assert_eq!(d.path(&g).unwrap().len(), 6);
    }

    #[test]
    fn bounded_single_pass() {
        let g = GridGraph::new(6, 6);
        let (_, passes) = smoothed(&g, Smoothing::Bounded(1), p(0, 0), p(6, 1));
        assert_eq!(passes, 1);
        assert_eq!(Smoothing::default_bounded(), Smoothing::Bounded(50));
    }
}
