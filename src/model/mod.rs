//! # Loan Graph Model
//!
//! Plain DTOs shared by the graph structures, the store, and the queries.
//!
//! Design rule: no locks, no I/O, no graph state here.
//! This module is pure data.

pub mod node;
pub mod relationship;
pub mod book;
pub mod stats;

pub use node::{BorrowerId, BorrowerKey, BookId, NodeKey};
pub use relationship::{LoanEvent, LoanOutcome};
pub use book::{BookRecord, Catalog, CatalogEntry};
pub use stats::{GraphStats, IndirectRelations, Ranked};
