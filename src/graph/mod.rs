//! # Loan Graph State
//!
//! The two graphs the engine maintains, and the single mutation that
//! keeps them in step.
//!
//! ```text
//! register_loan(b, k)
//!   1. bipartite:  b ── k
//!   2. similarity: for every o ∈ borrowers_of(k), o ≠ b:  w(b,o) += 1, w(o,b) += 1
//! ```
//!
//! The similarity graph is updated eagerly on every write so that reads
//! are a row lookup plus a sort.

pub mod bipartite;
pub mod similarity;

pub use bipartite::BipartiteGraph;
pub use similarity::SimilarityGraph;

use crate::config::DuplicatePolicy;
use crate::model::{BookId, BorrowerId, LoanOutcome};

/// Bipartite loan graph plus the borrower similarity graph derived from it.
#[derive(Debug, Clone, Default)]
pub struct LoanNetwork {
    bipartite: BipartiteGraph,
    similarity: SimilarityGraph,
}

impl LoanNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(bipartite: BipartiteGraph, similarity: SimilarityGraph) -> Self {
        Self { bipartite, similarity }
    }

    /// Record one loan event.
    ///
    /// Under [`DuplicatePolicy::CountEvents`] the similarity step runs even
    /// when the pair was already linked, so a repeat registration still bumps
    /// the weight to every co-borrower of the book.
    pub fn register_loan(
        &mut self,
        borrower: &BorrowerId,
        book: BookId,
        policy: DuplicatePolicy,
    ) -> LoanOutcome {
        let new_edge = self.bipartite.register_edge(borrower, book);
        if !new_edge && policy == DuplicatePolicy::DistinctBooks {
            return LoanOutcome { new_edge, similarity_bumps: 0 };
        }

        let Self { bipartite, similarity } = self;
        let mut bumps = 0;
        if let Some(co_borrowers) = bipartite.borrowers_of(book) {
            for other in co_borrowers.iter().filter(|o| *o != borrower) {
                similarity.bump(borrower, other);
                bumps += 1;
            }
        }

        LoanOutcome { new_edge, similarity_bumps: bumps }
    }

    pub fn bipartite(&self) -> &BipartiteGraph {
        &self.bipartite
    }

    pub fn similarity(&self) -> &SimilarityGraph {
        &self.similarity
    }
}
