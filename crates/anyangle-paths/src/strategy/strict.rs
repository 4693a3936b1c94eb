use anyangle_core::Point;

use super::{DEFAULT_BUFFER, Relaxation, settle_pending, shares_parent};
use crate::driver::SearchContext;

/// Strict Theta*: Theta* that keeps parent chains taut.
///
/// A parent that would make `neighbour -> parent -> grandparent` non-taut
/// is still accepted, but with `buffer` added to the distance and the link
/// tagged pending. The buffer comes off when the neighbour is popped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrictThetaStar {
    /// Weighted rule: no shared-parent shortcut, and the parent's line only
    /// when cheaper than going through the popped vertex.
    pub weighted: bool,
    pub buffer: f32,
}

impl Default for StrictThetaStar {
    fn default() -> Self {
        Self {
            weighted: false,
            buffer: DEFAULT_BUFFER,
        }
    }
}

impl StrictThetaStar {
    pub fn new(weighted: bool, buffer: f32) -> Self {
        Self { weighted, buffer }
    }

    fn relax_target(&self, ctx: &mut SearchContext<'_>, v: Point, parent: Point, distance: f32) -> bool {
        let taut = ctx.is_taut_at(v, parent);
        let distance = if taut { distance } else { distance + self.buffer };
        if distance < ctx.distance(v) {
            let link = ctx.link(parent, !taut);
            ctx.set_distance(v, distance);
            ctx.set_parent(v, link);
            true
        } else {
            false
        }
    }
}

impl Relaxation for StrictThetaStar {
    fn relax(&self, ctx: &mut SearchContext<'_>, current: Point, neighbour: Point) -> bool {
        if !self.weighted && shares_parent(ctx, current, neighbour) {
            return false;
        }
        let direct = ctx.distance(current) + ctx.cost(current, neighbour);
        if let Some(par) = ctx.parent_point(current) {
            if ctx.line_of_sight(par, neighbour) {
                let via_parent = ctx.distance(par) + ctx.cost(par, neighbour);
                if !self.weighted {
                    return self.relax_target(ctx, neighbour, par, via_parent);
                }
                if direct > via_parent && self.relax_target(ctx, neighbour, par, via_parent) {
                    return true;
                }
            }
        }
        self.relax_target(ctx, neighbour, current, direct)
    }

    fn on_pop(&self, ctx: &mut SearchContext<'_>, current: Point) {
        settle_pending(ctx, current);
    }
}
