//! # Loan Store Trait
//!
//! This is the contract between the query layer and whatever owns the
//! graph state. Queries are pure functions over a borrowed
//! [`LoanNetwork`]; a store only decides how that borrow is obtained and
//! how writes are serialized.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | Single `RwLock` around the whole network |

pub mod memory;

use crate::config::DuplicatePolicy;
use crate::graph::LoanNetwork;
use crate::model::{BookId, BorrowerId, LoanEvent, LoanOutcome};

pub use memory::MemoryStore;

/// Owner of a [`LoanNetwork`].
///
/// `write` must be exclusive against every other `read` and `write`, so
/// that a loan registration updates both graphs atomically from the
/// point of view of readers.
pub trait LoanStore: Send + Sync + 'static {
    /// Run `f` against a consistent view of the network.
    fn read<R>(&self, f: impl FnOnce(&LoanNetwork) -> R) -> R;

    /// Run `f` with exclusive access to the network.
    fn write<R>(&self, f: impl FnOnce(&mut LoanNetwork) -> R) -> R;

    /// Record one loan event.
    fn register_loan(
        &self,
        borrower: &BorrowerId,
        book: BookId,
        policy: DuplicatePolicy,
    ) -> LoanOutcome {
        self.write(|net| net.register_loan(borrower, book, policy))
    }

    /// Record many loan events under one exclusive section.
    ///
    /// Returns the number of events applied.
    fn register_batch<I>(&self, events: I, policy: DuplicatePolicy) -> usize
    where
        I: IntoIterator<Item = LoanEvent>,
    {
        self.write(|net| {
            events
                .into_iter()
                .map(|ev| net.register_loan(&ev.borrower, ev.book, policy))
                .count()
        })
    }

    /// Swap in a whole network, e.g. one rebuilt from a snapshot.
    fn replace(&self, network: LoanNetwork) {
        self.write(|net| *net = network);
    }
}
