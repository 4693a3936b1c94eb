//! Query configuration.

use std::fmt;

use crate::smoothing::Smoothing;
use crate::strategy::{
    AStar, DEFAULT_BUFFER, LazyThetaStar, RecursiveStrictThetaStar, StrictThetaStar, Strategy, ThetaStar,
};

/// Search algorithm of a [`Planner`](crate::Planner).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    AStar,
    /// A* with the heuristic switched off.
    Dijkstra,
    ThetaStar,
    LazyThetaStar,
    StrictThetaStar,
    RecursiveStrictThetaStar,
    WeightedAStar,
    WeightedDijkstra,
    WeightedThetaStar,
    WeightedLazyThetaStar,
    WeightedStrictThetaStar,
    WeightedRecursiveStrictThetaStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 12] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::ThetaStar,
        Algorithm::LazyThetaStar,
        Algorithm::StrictThetaStar,
        Algorithm::RecursiveStrictThetaStar,
        Algorithm::WeightedAStar,
        Algorithm::WeightedDijkstra,
        Algorithm::WeightedThetaStar,
        Algorithm::WeightedLazyThetaStar,
        Algorithm::WeightedStrictThetaStar,
        Algorithm::WeightedRecursiveStrictThetaStar,
    ];

    /// Whether this is one of the weighted rules.
    pub fn is_weighted(self) -> bool {
        matches!(
            self,
            Algorithm::WeightedAStar
                | Algorithm::WeightedDijkstra
                | Algorithm::WeightedThetaStar
                | Algorithm::WeightedLazyThetaStar
                | Algorithm::WeightedStrictThetaStar
                | Algorithm::WeightedRecursiveStrictThetaStar
        )
    }

    /// Whether the search ignores the heuristic.
    pub fn is_dijkstra(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::WeightedDijkstra)
    }

    /// Whether paths may run at any angle rather than along grid moves.
    pub fn is_any_angle(self) -> bool {
        !matches!(
            self,
            Algorithm::AStar | Algorithm::Dijkstra | Algorithm::WeightedAStar | Algorithm::WeightedDijkstra
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::AStar => "A*",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::ThetaStar => "Theta*",
            Algorithm::LazyThetaStar => "Lazy Theta*",
            Algorithm::StrictThetaStar => "Strict Theta*",
            Algorithm::RecursiveStrictThetaStar => "Recursive Strict Theta*",
            Algorithm::WeightedAStar => "Weighted A*",
            Algorithm::WeightedDijkstra => "Weighted Dijkstra",
            Algorithm::WeightedThetaStar => "Weighted Theta*",
            Algorithm::WeightedLazyThetaStar => "Weighted Lazy Theta*",
            Algorithm::WeightedStrictThetaStar => "Weighted Strict Theta*",
            Algorithm::WeightedRecursiveStrictThetaStar => "Weighted Recursive Strict Theta*",
        };
        f.write_str(name)
    }
}

/// Everything a query needs besides the graph and its endpoints.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Weight of the straight-line distance to the goal. Ignored by the
    /// Dijkstra algorithms.
    pub heuristic_weight: f32,
    /// Penalty of the strict rules on non-taut parents.
    pub buffer: f32,
    /// Ancestor climb limit of the recursive rule; `None` is unlimited.
    pub depth_limit: Option<usize>,
    pub smoothing: Smoothing,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AStar,
            heuristic_weight: 1.0,
            buffer: DEFAULT_BUFFER,
            depth_limit: None,
            smoothing: Smoothing::Off,
        }
    }
}

impl SearchConfig {
    /// Default settings for `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Unguided search over grid moves.
    pub fn dijkstra() -> Self {
        Self::new(Algorithm::Dijkstra).heuristic_weight(0.0)
    }

    /// `algorithm` followed by bounded post-smoothing.
    pub fn post_smooth(algorithm: Algorithm) -> Self {
        Self::new(algorithm).smoothing(Smoothing::default_bounded())
    }

    /// `algorithm` followed by post-smoothing until nothing changes.
    pub fn repeated_post_smooth(algorithm: Algorithm) -> Self {
        Self::new(algorithm).smoothing(Smoothing::UntilFixpoint)
    }

    /// `algorithm` with the heuristic switched off.
    pub fn no_heuristic(algorithm: Algorithm) -> Self {
        Self::new(algorithm).heuristic_weight(0.0)
    }

    /// `algorithm` with a custom strict buffer.
    pub fn with_buffer(algorithm: Algorithm, buffer: f32) -> Self {
        Self::new(algorithm).buffer(buffer)
    }

    /// `algorithm` with a recursion depth limit.
    pub fn with_depth_limit(algorithm: Algorithm, depth_limit: usize) -> Self {
        Self::new(algorithm).depth_limit(Some(depth_limit))
    }

    pub fn heuristic_weight(mut self, weight: f32) -> Self {
        self.heuristic_weight = weight;
        self
    }

    pub fn buffer(mut self, buffer: f32) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn depth_limit(mut self, depth_limit: Option<usize>) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Heuristic weight the driver should use.
    pub fn effective_heuristic_weight(&self) -> f32 {
        if self.algorithm.is_dijkstra() {
            0.0
        } else {
            self.heuristic_weight
        }
    }

    /// Relaxation rule of the configured algorithm.
    pub fn strategy(&self) -> Strategy {
        let weighted = self.algorithm.is_weighted();
        match self.algorithm {
            Algorithm::AStar | Algorithm::Dijkstra | Algorithm::WeightedAStar | Algorithm::WeightedDijkstra => {
                Strategy::AStar(AStar)
            }
            Algorithm::ThetaStar | Algorithm::WeightedThetaStar => Strategy::Theta(ThetaStar::new(weighted)),
            Algorithm::LazyThetaStar | Algorithm::WeightedLazyThetaStar => {
                Strategy::Lazy(LazyThetaStar::new(weighted))
            }
            Algorithm::StrictThetaStar | Algorithm::WeightedStrictThetaStar => {
                Strategy::Strict(StrictThetaStar::new(weighted, self.buffer))
            }
            Algorithm::RecursiveStrictThetaStar | Algorithm::WeightedRecursiveStrictThetaStar => {
                Strategy::Recursive(RecursiveStrictThetaStar::new(weighted, self.buffer, self.depth_limit))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constructors() {
        let d = SearchConfig::dijkstra();
        assert_eq!(d.algorithm, Algorithm::Dijkstra);
        assert_eq!(d.effective_heuristic_weight(), 0.0);

        let s = SearchConfig::post_smooth(Algorithm::ThetaStar);
        assert_eq!(s.smoothing, Smoothing::Bounded(50));
        assert_eq!(
            SearchConfig::repeated_post_smooth(Algorithm::AStar).smoothing,
            Smoothing::UntilFixpoint
        );
        assert_eq!(SearchConfig::no_heuristic(Algorithm::LazyThetaStar).heuristic_weight, 0.0);
        assert_eq!(SearchConfig::with_buffer(Algorithm::StrictThetaStar, 0.1).buffer, 0.1);
        assert_eq!(
            SearchConfig::with_depth_limit(Algorithm::RecursiveStrictThetaStar, 3).depth_limit,
            Some(3)
        );
    }

    #[test]
    fn dijkstra_ignores_heuristic_weight() {
        let c = SearchConfig::new(Algorithm::WeightedDijkstra).heuristic_weight(2.0);
        assert_eq!(c.effective_heuristic_weight(), 0.0);
        let c = SearchConfig::new(Algorithm::ThetaStar).heuristic_weight(2.0);
        assert_eq!(c.effective_heuristic_weight(), 2.0);
    }

    #[test]
    fn strategy_selection() {
        let c = SearchConfig::with_buffer(Algorithm::WeightedStrictThetaStar, 0.3);
        assert_eq!(c.strategy(), Strategy::Strict(StrictThetaStar::new(true, 0.3)));
        let c = SearchConfig::with_depth_limit(Algorithm::RecursiveStrictThetaStar, 2);
        assert_eq!(
            c.strategy(),
            Strategy::Recursive(RecursiveStrictThetaStar::new(false, DEFAULT_BUFFER, Some(2)))
        );
        assert_eq!(SearchConfig::dijkstra().strategy(), Strategy::AStar(AStar));
        assert_eq!(Algorithm::ALL.iter().filter(|a| a.is_weighted()).count(), 6);
        assert_eq!(Algorithm::ALL.iter().filter(|a| a.is_any_angle()).count(), 8);
    }

    #[test]
    fn display_names() {
        assert_eq!(Algorithm::LazyThetaStar.to_string(), "Lazy Theta*");
        assert_eq!(Algorithm::WeightedDijkstra.to_string(), "Weighted Dijkstra");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_json() {
        let c = SearchConfig::with_depth_limit(Algorithm::WeightedRecursiveStrictThetaStar, 4)
            .smoothing(Smoothing::Bounded(3));
        let s = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<SearchConfig>(&s).unwrap(), c);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: SearchConfig = serde_json::from_str(r#"{"algorithm":"LazyThetaStar"}"#).unwrap();
        assert_eq!(c, SearchConfig::new(Algorithm::LazyThetaStar));
    }
}
