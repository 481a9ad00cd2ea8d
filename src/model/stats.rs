//! Result DTOs returned by the ranking and analytics queries.

use serde::{Deserialize, Serialize};
use super::BookId;

/// An id paired with the score it was ranked by.
///
/// For similar borrowers the score is the similarity weight; for popular
/// books it is the number of distinct borrowers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranked<T> {
    pub id: T,
    pub score: u64,
}

impl<T> Ranked<T> {
    pub fn new(id: T, score: u64) -> Self {
        Self { id, score }
    }
}

impl<T> From<(T, u64)> for Ranked<T> {
    fn from((id, score): (T, u64)) -> Self {
        Self { id, score }
    }
}

/// Whole-graph statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphStats {
    pub borrower_count: usize,
    pub book_count: usize,
    /// Distinct borrower–book edges.
    pub total_loan_edges: usize,
    /// Distinct unordered borrower pairs with a similarity weight.
    pub total_similarity_edges: usize,
    pub avg_books_per_borrower: f64,
    pub avg_borrowers_per_book: f64,
}

/// Two-hop neighbourhood of a borrower.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndirectRelations {
    pub direct_book_count: usize,
    pub indirect_book_count: usize,
    pub related_borrower_count: usize,
    /// Sorted ascending.
    pub indirect_book_ids: Vec<BookId>,
}
