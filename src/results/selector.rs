//! First-wins candidate selection

use crate::places::PlaceCandidate;

/// Outcome of picking a candidate
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionResult {
    Selected(PlaceCandidate),
    Empty,
}

/// Pick the first candidate; the search service's ranking is trusted as-is
pub fn select(candidates: &[PlaceCandidate]) -> SelectionResult {
    match candidates.first() {
        Some(first) => SelectionResult::Selected(first.clone()),
        None => SelectionResult::Empty,
    }
}
