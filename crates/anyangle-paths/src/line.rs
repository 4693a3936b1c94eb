//! Cell partitioning of straight segments.
//!
//! [`LineWalk`] steps a segment between two vertices through the cells it
//! crosses, yielding the share of the segment's length inside each one. The
//! walk is an incremental DDA on integer crossing counters: the next vertical
//! grid line is reached at `t = ix / dx`, the next horizontal one at
//! `t = iy / dy`, and the two are compared as `ix * dy` vs `iy * dx` so that
//! exact lattice crossings are detected without rounding. A crossing through
//! a lattice point advances both axes at once; the cells merely touched at
//! that point get no entry.
//!
//! Axis-aligned segments run along a grid line rather than through cells.
//! They yield one entry per unit step, each with share `1 / n`, naming the
//! cell on the `+y` side (horizontal) or `+x` side (vertical) of the line,
//! offset by one when stepping in the negative direction.

use anyangle_core::Point;

/// Share of a segment inside one cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Part {
    pub cell: Point,
    pub fraction: f32,
}

/// Direction class of a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Both endpoints coincide.
    Degenerate,
    Horizontal,
    Vertical,
    Oblique,
}

/// A segment's full cell partition.
#[derive(Clone, Debug, PartialEq)]
pub struct Partitioning {
    pub orientation: Orientation,
    pub parts: Vec<Part>,
}

/// Iterator over the cells crossed by the segment `a -> b`.
#[derive(Clone, Debug)]
pub struct LineWalk {
    cell: Point,
    step: Point,
    dx: i32,
    dy: i32,
    ix: i32,
    iy: i32,
    prev: f32,
}

impl LineWalk {
    pub fn new(a: Point, b: Point) -> Self {
        let sx = if b.x < a.x { -1 } else { 1 };
        let sy = if b.y < a.y { -1 } else { 1 };
        Self {
            cell: Point::new(
                if sx < 0 { a.x - 1 } else { a.x },
                if sy < 0 { a.y - 1 } else { a.y },
            ),
            step: Point::new(sx, sy),
            dx: (b.x - a.x).abs(),
            dy: (b.y - a.y).abs(),
            ix: 1,
            iy: 1,
            prev: 0.0,
        }
    }

    fn done(&self) -> bool {
        (self.dx == 0 && self.dy == 0)
            || (self.dx > 0 && self.ix > self.dx)
            || (self.dy > 0 && self.iy > self.dy)
    }
}

impl Iterator for LineWalk {
    type Item = Part;

    fn next(&mut self) -> Option<Part> {
        if self.done() {
            return None;
        }
        let cross_x = self.ix * self.dy;
        let cross_y = self.iy * self.dx;
        let cell = self.cell;
        let t = if cross_x < cross_y {
            let t = self.ix as f32 / self.dx as f32;
            self.cell.x += self.step.x;
            self.ix += 1;
            t
        } else if cross_x > cross_y {
            let t = self.iy as f32 / self.dy as f32;
            self.cell.y += self.step.y;
            self.iy += 1;
            t
        } else {
            let t = self.ix as f32 / self.dx as f32;
            self.cell = self.cell + self.step;
            self.ix += 1;
            self.iy += 1;
            t
        };
        let fraction = t - self.prev;
        self.prev = t;
        Some(Part { cell, fraction })
    }
}

/// Partition the segment `a -> b` into per-cell shares.
///
/// For distinct endpoints the fractions sum to 1.
pub fn partition(a: Point, b: Point) -> Partitioning {
    let orientation = if a == b {
        Orientation::Degenerate
    } else if a.y == b.y {
        Orientation::Horizontal
    } else if a.x == b.x {
        Orientation::Vertical
    } else {
        Orientation::Oblique
    };
    Partitioning {
        orientation,
        parts: LineWalk::new(a, b).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn cells(a: Point, b: Point) -> Vec<Point> {
        LineWalk::new(a, b).map(|part| part.cell).collect()
    }

    #[test]
    fn diagonal_takes_one_cell_per_step() {
        let parts: Vec<Part> = LineWalk::new(p(0, 0), p(3, 3)).collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].cell, p(0, 0));
        assert_eq!(parts[2].cell, p(2, 2));
        for part in parts {
            assert!((part.fraction - 1.0 / 3.0).abs() < 1e-6);
        }
        assert_eq!(cells(p(3, 3), p(0, 0)), vec![p(2, 2), p(1, 1), p(0, 0)]);
    }

    #[test]
    fn shallow_segment() {
        // (0,0) -> (2,1) crosses x=1 halfway and never crosses a horizontal line
        let parts: Vec<Part> = LineWalk::new(p(0, 0), p(2, 1)).collect();
        assert_eq!(cells(p(0, 0), p(2, 1)), vec![p(0, 0), p(1, 0)]);
        assert!((parts[0].fraction - 0.5).abs() < 1e-6);

        // (0,0) -> (3,1) crosses x=1, x=2 inside row 0
        assert_eq!(cells(p(0, 0), p(3, 1)), vec![p(0, 0), p(1, 0), p(2, 0)]);

        // (0,0) -> (3,2) crosses x=1 (t=1/3), y=1 (t=1/2), x=2 (t=2/3)
        let parts: Vec<Part> = LineWalk::new(p(0, 0), p(3, 2)).collect();
        assert_eq!(
            parts.iter().map(|q| q.cell).collect::<Vec<_>>(),
            vec![p(0, 0), p(1, 0), p(1, 1), p(2, 1)]
        );
        assert!((parts[1].fraction - (0.5 - 1.0 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn lattice_crossing_skips_touched_cells() {
        // (0,0) -> (4,2) passes through the lattice point (2,1)
        assert_eq!(
            cells(p(0, 0), p(4, 2)),
            vec![p(0, 0), p(1, 0), p(2, 1), p(3, 1)]
        );
    }

    #[test]
    fn negative_directions_offset_cells() {
        assert_eq!(cells(p(2, 0), p(0, 2)), vec![p(1, 0), p(0, 1)]);
        assert_eq!(cells(p(0, 2), p(2, 0)), vec![p(0, 1), p(1, 0)]);
    }

    #[test]
    fn axis_segments_split_evenly() {
        let h = partition(p(1, 2), p(5, 2));
        assert_eq!(h.orientation, Orientation::Horizontal);
        assert_eq!(h.parts.len(), 4);
        assert_eq!(h.parts[0].cell, p(1, 2));
        assert!(h.parts.iter().all(|q| (q.fraction - 0.25).abs() < 1e-6));

        let v = partition(p(3, 4), p(3, 2));
        assert_eq!(v.orientation, Orientation::Vertical);
        assert_eq!(
            v.parts.iter().map(|q| q.cell).collect::<Vec<_>>(),
            vec![p(3, 3), p(3, 2)]
        );
    }

    #[test]
    fn degenerate_is_empty() {
        let d = partition(p(1, 1), p(1, 1));
        assert_eq!(d.orientation, Orientation::Degenerate);
        assert!(d.parts.is_empty());
    }

    proptest! {
        #[test]
        fn partition_fractions_sum_to_one(
            ax in -20i32..20, ay in -20i32..20, bx in -20i32..20, by in -20i32..20
        ) {
            prop_assume!((ax, ay) != (bx, by));
            let parts = partition(p(ax, ay), p(bx, by)).parts;
            let sum: f32 = parts.iter().map(|q| q.fraction).sum();
            prop_assert!((sum - 1.0).abs() < 1e-4, "sum {}", sum);
            prop_assert!(parts.iter().all(|q| q.fraction > 0.0));
        }
    }
}
