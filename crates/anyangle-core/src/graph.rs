//! The grid graph searched by the planners.
//!
//! A [`GridGraph`] is a `size_x × size_y` block of cells. Searches run over
//! the `(size_x + 1) × (size_y + 1)` *vertices* (cell corners), so every
//! geometric query here takes vertex coordinates and inspects the cells
//! around them.
//!
//! Cells are either all boolean (blocked / open) or all weighted (a cost
//! multiplier `>= 1`, or [`BLOCKED`]). The two kinds never mix in one graph.

use crate::geom::Point;

/// Weight sentinel for a blocked cell in a weighted grid.
pub const BLOCKED: f32 = -1.0;

const SQRT_2: f32 = std::f32::consts::SQRT_2;
const SQRT_2_MINUS_1: f32 = std::f32::consts::SQRT_2 - 1.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Cells {
    Blocked(Vec<bool>),
    Weighted(Vec<f32>),
}

/// Immutable-topology grid of blocked or weighted cells.
///
/// Out-of-range cells always read as blocked, which closes the grid
/// boundary without any special casing in the searches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGraph {
    size_x: i32,
    size_y: i32,
    cells: Cells,
}

impl GridGraph {
    /// Create a boolean grid with every cell open.
    pub fn new(size_x: i32, size_y: i32) -> Self {
        let (size_x, size_y) = (size_x.max(0), size_y.max(0));
        Self {
            size_x,
            size_y,
            cells: Cells::Blocked(vec![false; size_x as usize * size_y as usize]),
        }
    }

    /// Create a weighted grid with every cell at weight 1.
    pub fn weighted(size_x: i32, size_y: i32) -> Self {
        let (size_x, size_y) = (size_x.max(0), size_y.max(0));
        Self {
            size_x,
            size_y,
            cells: Cells::Weighted(vec![1.0; size_x as usize * size_y as usize]),
        }
    }

    /// Build a boolean grid by asking `blocked` about every cell.
    pub fn from_fn(size_x: i32, size_y: i32, mut blocked: impl FnMut(Point) -> bool) -> Self {
        let mut g = Self::new(size_x, size_y);
        for y in 0..g.size_y {
            for x in 0..g.size_x {
                let p = Point::new(x, y);
                g.set_blocked(p, blocked(p));
            }
        }
        g
    }

    /// Build a weighted grid by asking `weight` about every cell.
    ///
    /// Negative weights mark the cell blocked; see [`set_weight`](Self::set_weight).
    pub fn weighted_from_fn(size_x: i32, size_y: i32, mut weight: impl FnMut(Point) -> f32) -> Self {
        let mut g = Self::weighted(size_x, size_y);
        for y in 0..g.size_y {
            for x in 0..g.size_x {
                let p = Point::new(x, y);
                g.set_weight(p, weight(p));
            }
        }
        g
    }

    /// Number of cell columns.
    #[inline]
    pub fn size_x(&self) -> i32 {
        self.size_x
    }

    /// Number of cell rows.
    #[inline]
    pub fn size_y(&self) -> i32 {
        self.size_y
    }

    /// Number of search vertices, `(size_x + 1) * (size_y + 1)`.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        (self.size_x as usize + 1) * (self.size_y as usize + 1)
    }

    /// Whether this grid carries weights rather than blocked flags.
    #[inline]
    pub fn is_weighted(&self) -> bool {
        matches!(self.cells, Cells::Weighted(_))
    }

    // -----------------------------------------------------------------------
    // Cell access
    // -----------------------------------------------------------------------

    #[inline]
    fn cell_idx(&self, c: Point) -> usize {
        c.y as usize * self.size_x as usize + c.x as usize
    }

    /// Whether `c` names a cell inside the grid.
    #[inline]
    pub fn is_valid_cell(&self, c: Point) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.size_x && c.y < self.size_y
    }

    /// Mark a cell blocked or open. Out-of-range cells are ignored.
    ///
    /// On a weighted grid opening a cell gives it weight 1.
    pub fn set_blocked(&mut self, c: Point, blocked: bool) {
        if !self.is_valid_cell(c) {
            return;
        }
        let i = self.cell_idx(c);
        match &mut self.cells {
            Cells::Blocked(b) => b[i] = blocked,
            Cells::Weighted(w) => w[i] = if blocked { BLOCKED } else { 1.0 },
        }
    }

    /// Set the traversal cost multiplier of a cell.
    ///
    /// A negative (or NaN) weight blocks the cell and weights below 1 are
    /// raised to 1. On a boolean grid only the blocked/open distinction is
    /// kept. Out-of-range cells are ignored.
    pub fn set_weight(&mut self, c: Point, weight: f32) {
        if !self.is_valid_cell(c) {
            return;
        }
        let blocked = weight.is_nan() || weight < 0.0;
        let i = self.cell_idx(c);
        match &mut self.cells {
            Cells::Blocked(b) => b[i] = blocked,
            Cells::Weighted(w) => w[i] = if blocked { BLOCKED } else { weight.max(1.0) },
        }
    }

    /// Whether the cell is blocked. Out-of-range cells are blocked.
    #[inline]
    pub fn is_blocked(&self, c: Point) -> bool {
        self.blocked(c.x, c.y)
    }

    #[inline]
    fn blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.size_x || y >= self.size_y {
            return true;
        }
        let i = y as usize * self.size_x as usize + x as usize;
        match &self.cells {
            Cells::Blocked(b) => b[i],
            Cells::Weighted(w) => w[i] < 0.0,
        }
    }

    /// Cost multiplier of a cell, or `None` if it is blocked.
    ///
    /// Open cells of a boolean grid weigh 1.
    #[inline]
    pub fn weight(&self, c: Point) -> Option<f32> {
        if !self.is_valid_cell(c) {
            return None;
        }
        let i = self.cell_idx(c);
        match &self.cells {
            Cells::Blocked(b) => (!b[i]).then_some(1.0),
            Cells::Weighted(w) => (w[i] >= 0.0).then_some(w[i]),
        }
    }

    /// Weight interpolated for a unit move between adjacent vertices.
    ///
    /// A diagonal move crosses exactly one cell and takes its weight. An
    /// axis move runs along the edge shared by two cells and takes their
    /// mean, or the weight of the open one if the other is blocked. Returns
    /// `None` when no cell along the move is open.
    pub fn edge_weight(&self, a: Point, b: Point) -> Option<f32> {
        let (first, second) = if a.x == b.x {
            let y = a.y.min(b.y);
            (self.weight(Point::new(a.x, y)), self.weight(Point::new(a.x - 1, y)))
        } else if a.y == b.y {
            let x = a.x.min(b.x);
            (self.weight(Point::new(x, a.y)), self.weight(Point::new(x, a.y - 1)))
        } else {
            return self.weight(Point::new(a.x.min(b.x), a.y.min(b.y)));
        };
        match (first, second) {
            (Some(w1), Some(w2)) => Some((w1 + w2) / 2.0),
            (Some(w), None) | (None, Some(w)) => Some(w),
            (None, None) => None,
        }
    }

    /// Number of blocked cells in the grid.
    pub fn num_blocked(&self) -> usize {
        match &self.cells {
            Cells::Blocked(b) => b.iter().filter(|&&v| v).count(),
            Cells::Weighted(w) => w.iter().filter(|&&v| v < 0.0).count(),
        }
    }

    /// Fraction of cells that are blocked, in `[0, 1]`.
    pub fn percentage_blocked(&self) -> f32 {
        let total = self.size_x as f32 * self.size_y as f32;
        if total == 0.0 {
            return 0.0;
        }
        self.num_blocked() as f32 / total
    }

    // -----------------------------------------------------------------------
    // Vertices
    // -----------------------------------------------------------------------

    /// Whether `v` names a vertex of the grid (corners included).
    #[inline]
    pub fn is_valid_coordinate(&self, v: Point) -> bool {
        v.x >= 0 && v.y >= 0 && v.x <= self.size_x && v.y <= self.size_y
    }

    /// Flat index of a vertex, `y * (size_x + 1) + x`.
    #[inline]
    pub fn index(&self, v: Point) -> usize {
        v.y as usize * (self.size_x as usize + 1) + v.x as usize
    }

    /// Vertex at a flat index.
    #[inline]
    pub fn point(&self, index: usize) -> Point {
        let w = self.size_x as usize + 1;
        Point::new((index % w) as i32, (index / w) as i32)
    }

    /// Whether at least one of the four cells around the vertex is open.
    pub fn is_unblocked_coordinate(&self, v: Point) -> bool {
        !self.up_left(v) || !self.up_right(v) || !self.down_left(v) || !self.down_right(v)
    }

    #[inline]
    fn up_left(&self, v: Point) -> bool {
        self.blocked(v.x - 1, v.y - 1)
    }

    #[inline]
    fn up_right(&self, v: Point) -> bool {
        self.blocked(v.x, v.y - 1)
    }

    #[inline]
    fn down_left(&self, v: Point) -> bool {
        self.blocked(v.x - 1, v.y)
    }

    #[inline]
    fn down_right(&self, v: Point) -> bool {
        self.blocked(v.x, v.y)
    }

    // -----------------------------------------------------------------------
    // Metrics
    // -----------------------------------------------------------------------

    /// Euclidean distance between two vertices.
    ///
    /// Axis-aligned and 45° segments are answered without a square root.
    pub fn distance(&self, a: Point, b: Point) -> f32 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        if dy == 0 {
            return dx.abs() as f32;
        }
        if dx == 0 {
            return dy.abs() as f32;
        }
        if dx == dy || dx == -dy {
            return SQRT_2 * dx.abs() as f32;
        }
        ((dx * dx + dy * dy) as f32).sqrt()
    }

    /// Octile distance, `min * (√2 - 1) + max`.
    ///
    /// Never exceeds the 8-connected path length between the vertices.
    pub fn octile_distance(&self, a: Point, b: Point) -> f32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
        min as f32 * SQRT_2_MINUS_1 + max as f32
    }

    // -----------------------------------------------------------------------
    // Line of sight
    // -----------------------------------------------------------------------

    /// Line of sight between two of the eight immediate neighbours.
    ///
    /// Axis moves need one of the two cells sharing the edge open; diagonal
    /// moves need the single crossed cell open.
    pub fn neighbour_line_of_sight(&self, a: Point, b: Point) -> bool {
        debug_assert!(a.is_adjacent(b), "{a} and {b} are not neighbours");
        if a.x == b.x {
            let y = a.y.min(b.y);
            !self.blocked(a.x, y) || !self.blocked(a.x - 1, y)
        } else if a.y == b.y {
            let x = a.x.min(b.x);
            !self.blocked(x, a.y) || !self.blocked(x, a.y - 1)
        } else {
            !self.blocked(a.x.min(b.x), a.y.min(b.y))
        }
    }

    /// Line of sight between two arbitrary vertices.
    ///
    /// Walks the supercover of the segment. A segment running exactly along
    /// a grid line is blocked only when the cells on both sides are. One
    /// passing exactly through a lattice point only tests the cells it
    /// enters, so it is visible between two blocked cells that meet at that
    /// point, just as the two unit moves through that vertex are.
    pub fn line_of_sight(&self, from: Point, to: Point) -> bool {
        let (mut x, mut y) = (from.x, from.y);
        let mut dx = to.x - from.x;
        let mut dy = to.y - from.y;

        let (mut sign_x, mut sign_y) = (1, 1);
        let (mut off_x, mut off_y) = (0, 0);
        if dy < 0 {
            dy = -dy;
            sign_y = -1;
            off_y = -1;
        }
        if dx < 0 {
            dx = -dx;
            sign_x = -1;
            off_x = -1;
        }

        let mut f = 0;
        if dx >= dy {
            while x != to.x {
                f += dy;
                if f >= dx {
                    if self.blocked(x + off_x, y + off_y) {
                        return false;
                    }
                    y += sign_y;
                    f -= dx;
                }
                if f != 0 && self.blocked(x + off_x, y + off_y) {
                    return false;
                }
                if dy == 0 && self.blocked(x + off_x, y) && self.blocked(x + off_x, y - 1) {
                    return false;
                }
                x += sign_x;
            }
        } else {
            while y != to.y {
                f += dx;
                if f >= dy {
                    if self.blocked(x + off_x, y + off_y) {
                        return false;
                    }
                    x += sign_x;
                    f -= dy;
                }
                if f != 0 && self.blocked(x + off_x, y + off_y) {
                    return false;
                }
                if dx == 0 && self.blocked(x, y + off_y) && self.blocked(x - 1, y + off_y) {
                    return false;
                }
                y += sign_y;
            }
        }
        true
    }

    // -----------------------------------------------------------------------
    // Corners and tautness
    // -----------------------------------------------------------------------

    /// Whether the vertex sits on the convex corner of an obstacle.
    ///
    /// True when some cell touches the vertex and a diagonal pair of the
    /// surrounding cells is open.
    pub fn is_outer_corner(&self, v: Point) -> bool {
        let a = self.up_left(v);
        let b = self.up_right(v);
        let c = self.down_right(v);
        let d = self.down_left(v);
        ((!a && !c) || (!d && !b)) && (a || b || c || d)
    }

    /// Whether `a`, `b`, `c` lie on one line.
    #[inline]
    pub fn is_collinear(a: Point, b: Point, c: Point) -> bool {
        (b.y - a.y) * (c.x - b.x) == (c.y - b.y) * (b.x - a.x)
    }

    /// Whether the path `a -> b -> c` is taut, i.e. `b` cannot be dropped.
    ///
    /// The path bends at `b`; it is taut when it turns away from `a`'s
    /// direction and the cell on the inside of the bend is blocked. A
    /// straight path is always taut, as is a degenerate one with `a == b`.
    pub fn is_taut(&self, a: Point, b: Point, c: Point) -> bool {
        // Cross product of (b - a) and (c - b), sign flipped for y-down.
        let turn = (b.y - a.y) * (c.x - b.x) - (c.y - b.y) * (b.x - a.x);
        match ((b.x - a.x).signum(), (b.y - a.y).signum()) {
            (0, 0) => true,
            (1, 1) => {
                if c.x < b.x || c.y < b.y {
                    return false;
                }
                match turn.signum() {
                    -1 => self.down_left(b),
                    1 => self.up_right(b),
                    _ => true,
                }
            }
            (1, -1) => {
                if c.x < b.x || c.y > b.y {
                    return false;
                }
                match turn.signum() {
                    -1 => self.down_right(b),
                    1 => self.up_left(b),
                    _ => true,
                }
            }
            (1, _) => {
                if c.x < b.x {
                    return false;
                }
                match (c.y - b.y).signum() {
                    -1 => self.up_left(b),
                    1 => self.down_left(b),
                    _ => true,
                }
            }
            (-1, 1) => {
                if c.x > b.x || c.y < b.y {
                    return false;
                }
                match turn.signum() {
                    -1 => self.up_left(b),
                    1 => self.down_right(b),
                    _ => true,
                }
            }
            (-1, -1) => {
                if c.x > b.x || c.y > b.y {
                    return false;
                }
                match turn.signum() {
                    -1 => self.up_right(b),
                    1 => self.down_left(b),
                    _ => true,
                }
            }
            (-1, _) => {
                if c.x > b.x {
                    return false;
                }
                match (c.y - b.y).signum() {
                    -1 => self.up_right(b),
                    1 => self.down_right(b),
                    _ => true,
                }
            }
            (_, 1) => {
                if c.y < b.y {
                    return false;
                }
                match (c.x - b.x).signum() {
                    -1 => self.up_left(b),
                    1 => self.up_right(b),
                    _ => true,
                }
            }
            _ => {
                if c.y > b.y {
                    return false;
                }
                match (c.x - b.x).signum() {
                    -1 => self.down_left(b),
                    1 => self.down_right(b),
                    _ => true,
                }
            }
        }
    }
}
