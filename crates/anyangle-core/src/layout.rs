//! Grids built from text.
//!
//! Each line of the text is one row of cells, top row first. Lines must
//! all have the same width. Leading/trailing whitespace is trimmed from the
//! whole string but not from individual lines.
//!
//! | Rune | Cell |
//! |---|---|
//! | `#` | blocked |
//! | `.` | open, weight 1 |
//! | `1`–`9` | open with that weight |
//!
//! Any digit makes the whole grid weighted; otherwise it is boolean.

use crate::geom::Point;
use crate::graph::GridGraph;
use std::fmt;

/// Error from parsing a grid layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The text holds no cells.
    #[error("layout: no cells")]
    Empty,
    /// Lines have inconsistent widths.
    #[error("layout: line {line} is {found} cells wide, expected {expected}")]
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the layout alphabet was found.
    #[error("layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")]
    InvalidRune { ch: char, pos: Point },
}

impl GridGraph {
    /// Parse a grid from its text layout.
    ///
    /// ```
    /// use anyangle_core::{GridGraph, Point};
    ///
    /// let g = GridGraph::from_ascii("..#\n...").unwrap();
    /// assert_eq!((g.size_x(), g.size_y()), (3, 2));
    /// assert!(g.is_blocked(Point::new(2, 0)));
    /// ```
    pub fn from_ascii(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LayoutError::Empty);
        }

        let rows: Vec<&str> = s.lines().collect();
        let width = rows[0].chars().count();
        let mut weighted = false;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::InconsistentSize {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '#' | '.' => {}
                    '1'..='9' => weighted = true,
                    _ => {
                        return Err(LayoutError::InvalidRune {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                }
            }
        }

        let (w, h) = (width as i32, rows.len() as i32);
        let mut g = if weighted {
            GridGraph::weighted(w, h)
        } else {
            GridGraph::new(w, h)
        };
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    '#' => g.set_blocked(p, true),
                    '1'..='9' => g.set_weight(p, ch as u8 as f32 - b'0' as f32),
                    _ => {}
                }
            }
        }
        if g.num_blocked() == (w * h) as usize {
            log::warn!("layout: every one of the {w}x{h} cells is blocked");
        }
        Ok(g)
    }

    /// Render the grid in the layout format accepted by [`from_ascii`](Self::from_ascii).
    ///
    /// Weighted cells are rounded to the nearest digit and clamped to `1..=9`,
    /// with weight 1 printed as `.`.
    pub fn to_ascii(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GridGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size_y() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.size_x() {
                let ch = match self.weight(Point::new(x, y)) {
                    None => '#',
                    Some(w) => {
                        let d = w.round().clamp(1.0, 9.0) as u8;
                        if d == 1 { '.' } else { (b'0' + d) as char }
                    }
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
.....
.....
..#..
.....
.....";

    #[test]
    fn parse_boolean() {
        let g = GridGraph::from_ascii(ROOM).unwrap();
        assert_eq!((g.size_x(), g.size_y()), (5, 5));
        assert!(!g.is_weighted());
        assert!(g.is_blocked(Point::new(2, 2)));
        assert_eq!(g.num_blocked(), 1);
    }

    #[test]
    fn parse_weighted() {
        let g = GridGraph::from_ascii("...\n.3.\n..#").unwrap();
        assert!(g.is_weighted());
        assert_eq!(g.weight(Point::new(1, 1)), Some(3.0));
        assert_eq!(g.weight(Point::new(0, 0)), Some(1.0));
        assert_eq!(g.weight(Point::new(2, 2)), None);
    }

    #[test]
    fn round_trip_text() {
        let s = "..#\n.3.\n9..";
        assert_eq!(GridGraph::from_ascii(s).unwrap().to_ascii(), s);
        assert_eq!(GridGraph::from_ascii(ROOM).unwrap().to_string(), ROOM);
    }

    #[test]
    fn errors() {
        assert_eq!(GridGraph::from_ascii("  \n "), Err(LayoutError::Empty));
        assert_eq!(
            GridGraph::from_ascii("...\n..\n..."),
            Err(LayoutError::InconsistentSize {
                line: 1,
                expected: 3,
                found: 2
            })
        );
        let err = GridGraph::from_ascii("..\n.x").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }
}
