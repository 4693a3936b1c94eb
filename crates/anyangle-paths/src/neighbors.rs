use anyangle_core::Point;

/// Cached neighbour computation helper.
///
/// Enumerates the eight neighbours of a vertex in expansion order, filtered
/// by a predicate, into a reused buffer.
#[derive(Debug)]
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the 8-directional neighbours of `p`, keeping only those for
    /// which `keep` returns `true`.
    pub fn all(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        self.buf.extend(p.neighbors_8().into_iter().filter(|&n| keep(n)));
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_and_keeps_order() {
        let mut nb = Neighbors::new();
        let got = nb.all(Point::new(0, 0), |n| n.x >= 0 && n.y >= 0).to_vec();
        assert_eq!(got, vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]);
        assert_eq!(nb.all(Point::new(3, 3), |_| true).len(), 8);
    }
}
