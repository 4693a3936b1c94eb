//! Physical cost of straight moves.
//!
//! On a boolean grid a move costs its Euclidean length. On a weighted grid
//! the length is scaled by the weights of the cells it passes: axis moves
//! step along grid edges and pay [`GridGraph::edge_weight`] per unit, oblique
//! moves pay each crossed cell's weight in proportion to the share of the
//! segment inside it. Moves through blocked cells cost `+inf`.

use anyangle_core::{GridGraph, Point};

use crate::line::LineWalk;

/// Physical length of the straight move `a -> b`.
pub fn physical_distance(graph: &GridGraph, a: Point, b: Point) -> f32 {
    if !graph.is_weighted() {
        return graph.distance(a, b);
    }
    if a == b {
        return 0.0;
    }
    if a.x == b.x || a.y == b.y {
        let step = Point::new((b.x - a.x).signum(), (b.y - a.y).signum());
        let mut total = 0.0;
        let mut p = a;
        while p != b {
            let next = p + step;
            total += graph.edge_weight(p, next).unwrap_or(f32::INFINITY);
            p = next;
        }
        return total;
    }
    let weighted: f32 = LineWalk::new(a, b)
        .map(|part| part.fraction * graph.weight(part.cell).unwrap_or(f32::INFINITY))
        .sum();
    graph.distance(a, b) * weighted
}

/// Cost of a unit move between adjacent vertices.
///
/// Agrees with [`physical_distance`] on every unit move.
pub fn edge_cost(graph: &GridGraph, a: Point, b: Point) -> f32 {
    debug_assert!(a.is_adjacent(b));
    let d = graph.distance(a, b);
    if !graph.is_weighted() {
        return d;
    }
    d * graph.edge_weight(a, b).unwrap_or(f32::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn boolean_grid_is_euclidean() {
        let g = GridGraph::new(6, 6);
        assert!(close(physical_distance(&g, p(0, 0), p(3, 4)), 5.0));
        assert!(close(edge_cost(&g, p(1, 1), p(2, 2)), std::f32::consts::SQRT_2));
    }

    #[test]
    fn uniform_weights_match_euclidean() {
        let g = GridGraph::weighted(6, 6);
        assert!(close(physical_distance(&g, p(0, 0), p(3, 4)), 5.0));
        assert!(close(physical_distance(&g, p(0, 2), p(5, 2)), 5.0));
        assert!(close(physical_distance(&g, p(4, 0), p(4, 6)), 6.0));
    }

    #[test]
    fn weighted_cells_scale_cost() {
        let g = GridGraph::from_ascii("...\n.3.\n...").unwrap();
        // diagonal straight through the heavy cell: one third of the way at weight 3
        let expected = 18f32.sqrt() * (1.0 + 3.0 + 1.0) / 3.0;
        assert!(close(physical_distance(&g, p(0, 0), p(3, 3)), expected));
        // along the edge shared with the heavy cell: mean of 1 and 3
        assert!(close(physical_distance(&g, p(0, 1), p(3, 1)), 1.0 + 2.0 + 1.0));
        assert!(close(edge_cost(&g, p(1, 1), p(2, 2)), 3.0 * std::f32::consts::SQRT_2));
    }

    #[test]
    fn unit_moves_agree() {
        let g = GridGraph::from_ascii("2.#\n.3.\n#.4").unwrap();
        for y in 0..=3 {
            for x in 0..=3 {
                let a = p(x, y);
                for b in a.neighbors_8() {
                    if !g.is_valid_coordinate(b) {
                        continue;
                    }
                    let (c1, c2) = (edge_cost(&g, a, b), physical_distance(&g, a, b));
                    assert!(c1 == c2 || close(c1, c2), "{a} -> {b}: {c1} vs {c2}");
                }
            }
        }
    }

    #[test]
    fn blocked_cells_are_impassable() {
        let g = GridGraph::from_ascii("2#\n..").unwrap();
        assert_eq!(physical_distance(&g, p(1, 0), p(2, 1)), f32::INFINITY);
        assert_eq!(edge_cost(&g, p(2, 0), p(2, 1)), f32::INFINITY);
    }
}
