//! Snapshot and restore of the loan graph state.
//!
//! The engine does no persistence of its own. A persistence collaborator
//! takes a [`Snapshot`], stores it however it likes, and hands it back to
//! [`crate::LoanEngine::restore`] on the next start.
//!
//! ```text
//! LoanEngine → snapshot() → Snapshot → export_json() → bytes
//! bytes → import_json() → Snapshot → restore() → LoanEngine
//! ```
//!
//! Similarity weights are stored explicitly. Under
//! [`crate::config::DuplicatePolicy::CountEvents`] they count registration
//! events, which cannot be recovered from the edge set alone.

use std::io::{Read, Write};

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::graph::{BipartiteGraph, LoanNetwork, SimilarityGraph};
use crate::model::{BookId, BorrowerId, LoanEvent};
use crate::{Error, Result};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Sorted by borrower; each book list sorted ascending.
    pub loans: Vec<BorrowerLoans>,
    /// Each unordered pair once with `a < b`, sorted.
    pub similarity: Vec<SimilarityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowerLoans {
    pub borrower: BorrowerId,
    pub books: Vec<BookId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityEntry {
    pub a: BorrowerId,
    pub b: BorrowerId,
    pub weight: u64,
}

impl Snapshot {
    /// Capture a network in a deterministic order.
    pub fn capture(net: &LoanNetwork) -> Self {
        let mut loans: Vec<BorrowerLoans> = net
            .bipartite()
            .borrowers()
            .map(|(borrower, books)| {
                let mut books: Vec<BookId> = books.iter().copied().collect();
                books.sort_unstable();
                BorrowerLoans { borrower: borrower.clone(), books }
            })
            .collect();
        loans.sort_unstable_by(|x, y| x.borrower.cmp(&y.borrower));

        let mut similarity: Vec<SimilarityEntry> = net
            .similarity()
            .pairs()
            .map(|(a, b, weight)| SimilarityEntry { a: a.clone(), b: b.clone(), weight })
            .collect();
        similarity.sort_unstable_by(|x, y| (&x.a, &x.b).cmp(&(&y.a, &y.b)));

        Self { version: SNAPSHOT_VERSION, loans, similarity }
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty() && self.similarity.is_empty()
    }

    /// Every borrower–book edge as a loan event, in snapshot order.
    pub fn loan_events(&self) -> impl Iterator<Item = LoanEvent> + '_ {
        self.loans.iter().flat_map(|entry| {
            entry.books.iter().map(|book| LoanEvent {
                borrower: entry.borrower.clone(),
                book: *book,
            })
        })
    }

    /// Rebuild the network, rejecting states the engine could never produce.
    ///
    /// Every pair of co-borrowers must carry a similarity entry, every entry
    /// must name two borrowers who share a book, and its weight can never be
    /// below the number of books they share.
    pub fn into_network(self) -> Result<LoanNetwork> {
        if self.version != SNAPSHOT_VERSION {
            return Err(Error::UnsupportedSnapshotVersion(self.version));
        }

        let mut bipartite = BipartiteGraph::new();
        for entry in &self.loans {
            for book in &entry.books {
                bipartite.register_edge(&entry.borrower, *book);
            }
        }

        // unordered co-borrower pair (lower id first) -> books they share
        let mut shared: HashMap<(&BorrowerId, &BorrowerId), u64> = HashMap::new();
        for (_, readers) in bipartite.books() {
            let mut readers: Vec<&BorrowerId> = readers.iter().collect();
            readers.sort_unstable();
            for (i, a) in readers.iter().enumerate() {
                for b in &readers[i + 1..] {
                    *shared.entry((*a, *b)).or_default() += 1;
                }
            }
        }

        let mut similarity = SimilarityGraph::new();
        let mut seen: HashSet<(&BorrowerId, &BorrowerId)> = HashSet::new();
        for SimilarityEntry { a, b, weight } in &self.similarity {
            if a == b {
                return Err(Error::InvalidSnapshot(format!("self-similarity for borrower {a}")));
            }
            if *weight == 0 {
                return Err(Error::InvalidSnapshot(format!("zero weight between {a} and {b}")));
            }
            let key = if a < b { (a, b) } else { (b, a) };
            if !seen.insert(key) {
                return Err(Error::InvalidSnapshot(format!("pair {a}/{b} listed twice")));
            }
            for who in [a, b] {
                if bipartite.books_of(who).is_none() {
                    return Err(Error::InvalidSnapshot(format!(
                        "similarity references borrower {who} with no loans"
                    )));
                }
            }
            let together = shared.get(&key).copied().unwrap_or(0);
            if together == 0 {
                return Err(Error::InvalidSnapshot(format!("borrowers {a} and {b} share no book")));
            }
            if *weight < together {
                return Err(Error::InvalidSnapshot(format!(
                    "weight {weight} between {a} and {b} is below their {together} shared books"
                )));
            }
            similarity.add(a, b, *weight);
        }

        if let Some((a, b)) = shared.keys().find(|pair| !seen.contains(*pair)) {
            return Err(Error::InvalidSnapshot(format!(
                "borrowers {a} and {b} share a book but have no similarity entry"
            )));
        }
        drop(shared);

        Ok(LoanNetwork::from_parts(bipartite, similarity))
    }
}

/// Write a snapshot as pretty-printed JSON.
pub fn export_json(snapshot: &Snapshot, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, snapshot)?;
    writeln!(writer)?;
    Ok(())
}

/// Read a snapshot previously written by [`export_json`].
pub fn import_json<R: Read>(reader: R) -> Result<Snapshot> {
    Ok(serde_json::from_reader(reader)?)
}
