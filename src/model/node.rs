//! Node identifiers of the loan graph.
//!
//! Borrowers and books live in disjoint identifier spaces. `NodeKey` is the
//! tagged form used wherever either kind may appear.

use std::fmt;
use std::hash::Hash;

use hashbrown::Equivalent;
use serde::{Deserialize, Serialize};

/// Opaque borrower identifier (a member identification number).
///
/// The engine never validates the contents. Catalog-side ids are
/// conventionally [`BorrowerId::CONVENTIONAL_LEN`] characters long, but any
/// string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowerId(String);

impl BorrowerId {
    /// Length of identification numbers issued by the member registry.
    pub const CONVENTIONAL_LEN: usize = 10;

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_conventional_len(&self) -> bool {
        self.0.chars().count() == Self::CONVENTIONAL_LEN
    }
}

impl fmt::Display for BorrowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BorrowerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BorrowerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for BorrowerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for BorrowerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Anything that can look up a borrower in a map keyed by [`BorrowerId`],
/// e.g. `str` or `BorrowerId` itself.
pub trait BorrowerKey: Hash + Equivalent<BorrowerId> {}

impl<Q: ?Sized + Hash + Equivalent<BorrowerId>> BorrowerKey for Q {}

/// Catalog key of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A node of the bipartite graph, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeKey {
    Borrower(BorrowerId),
    Book(BookId),
}

impl NodeKey {
    pub fn borrower(id: impl Into<BorrowerId>) -> Self {
        Self::Borrower(id.into())
    }

    pub fn book(id: BookId) -> Self {
        Self::Book(id)
    }

    pub fn is_borrower(&self) -> bool {
        matches!(self, Self::Borrower(_))
    }

    pub fn is_book(&self) -> bool {
        matches!(self, Self::Book(_))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrower(id) => write!(f, "borrower_{id}"),
            Self::Book(id) => write!(f, "book_{id}"),
        }
    }
}
