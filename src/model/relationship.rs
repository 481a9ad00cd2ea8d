//! Loan events, the single write input of the engine.

use serde::{Deserialize, Serialize};
use super::{BookId, BorrowerId};

/// One registration of a borrower having access to a book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanEvent {
    pub borrower: BorrowerId,
    pub book: BookId,
}

impl LoanEvent {
    pub fn new(borrower: impl Into<BorrowerId>, book: BookId) -> Self {
        Self {
            borrower: borrower.into(),
            book,
        }
    }
}

impl<B: Into<BorrowerId>> From<(B, BookId)> for LoanEvent {
    fn from((borrower, book): (B, BookId)) -> Self {
        Self::new(borrower, book)
    }
}

/// What a single registration changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoanOutcome {
    /// The borrower–book edge did not exist before.
    pub new_edge: bool,
    /// Number of co-borrowers whose similarity weight was incremented.
    pub similarity_bumps: usize,
}
