//! Whole-graph statistics and two-hop relationship discovery.

use hashbrown::HashSet;

use crate::graph::LoanNetwork;
use crate::model::{BookId, BorrowerId, BorrowerKey, GraphStats, IndirectRelations};

pub fn graph_stats(net: &LoanNetwork) -> GraphStats {
    let bipartite = net.bipartite();
    let borrower_count = bipartite.borrower_count();
    let book_count = bipartite.book_count();
    let total_loan_edges = bipartite.edge_count();

    GraphStats {
        borrower_count,
        book_count,
        total_loan_edges,
        total_similarity_edges: net.similarity().edge_count(),
        avg_books_per_borrower: ratio(total_loan_edges, borrower_count),
        avg_borrowers_per_book: ratio(total_loan_edges, book_count),
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Books reachable through exactly one co-borrower that the borrower has
/// not borrowed directly.
///
/// ```text
/// borrower ── direct book ── related borrower ── indirect book
/// ```
pub fn indirect_relations<Q>(net: &LoanNetwork, borrower: &Q) -> IndirectRelations
where
    Q: ?Sized + BorrowerKey,
{
    let bipartite = net.bipartite();
    let Some(direct) = bipartite.books_of(borrower) else {
        return IndirectRelations::default();
    };

    let related: HashSet<&BorrowerId> = direct
        .iter()
        .filter_map(|book| bipartite.borrowers_of(*book))
        .flatten()
        .filter(|other| !borrower.equivalent(*other))
        .collect();

    let mut indirect: Vec<BookId> = related
        .iter()
        .filter_map(|other| bipartite.books_of(*other))
        .flatten()
        .filter(|book| !direct.contains(*book))
        .copied()
        .collect::<HashSet<BookId>>()
        .into_iter()
        .collect();
    indirect.sort_unstable();

    IndirectRelations {
        direct_book_count: direct.len(),
        indirect_book_count: indirect.len(),
        related_borrower_count: related.len(),
        indirect_book_ids: indirect,
    }
}
