use anyangle_core::Point;

use crate::arena::QueryToken;

/// Internal-consistency failure of a search.
///
/// None of these happen in correct operation. An unreachable goal is a
/// normal outcome and is reported through the search state and
/// [`PathResult`](crate::PathResult), never through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// `pop_min` was called on an empty heap.
    #[error("heap underflow: pop_min on an empty heap")]
    HeapUnderflow,
    /// Scratch memory was re-initialised by another query while this one
    /// was still reading it.
    #[error("query {expected} is no longer current, scratch memory belongs to query {current}")]
    EpochMismatch {
        expected: QueryToken,
        current: QueryToken,
    },
    /// The parent chain from the goal loops instead of reaching the start.
    #[error("parent chain does not terminate, cycle through {0}")]
    CorruptParentChain(Point),
}
