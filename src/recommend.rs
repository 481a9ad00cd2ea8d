//! Book recommendation strategies.
//!
//! Both strategies return catalog records, never raw ids, and never a
//! book the target borrower already has. Ids the catalog cannot resolve
//! are skipped and do not use up a slot.

use hashbrown::{HashMap, HashSet};

use crate::graph::LoanNetwork;
use crate::model::{BookId, BorrowerKey, Catalog};
use crate::ranking::{popular_books, similar_borrowers, top_k};

/// Popular books the borrower has not taken yet.
///
/// Over-fetches `limit * headroom` entries from the popularity ranking so
/// that already-borrowed books can be skipped. A borrower with no history
/// simply receives the most popular books.
pub fn by_history<'c, Q, C>(
    net: &LoanNetwork,
    borrower: &Q,
    catalog: &'c C,
    limit: usize,
    headroom: usize,
) -> Vec<&'c C::Record>
where
    Q: ?Sized + BorrowerKey,
    C: Catalog + ?Sized,
{
    let borrowed = net.bipartite().books_of(borrower);
    let unborrowed = |id: &BookId| borrowed.map_or(true, |set| !set.contains(id));

    popular_books(net, limit.saturating_mul(headroom))
        .into_iter()
        .map(|ranked| ranked.id)
        .filter(unborrowed)
        .filter_map(|id| catalog.resolve(id))
        .take(limit)
        .collect()
}

/// "Borrowers like you also read...".
///
/// Each of the top `fanout` similar borrowers votes for every book of
/// theirs the target has not borrowed, with a vote worth their similarity
/// weight. Books are ranked by total vote.
pub fn by_similar_users<'c, Q, C>(
    net: &LoanNetwork,
    borrower: &Q,
    catalog: &'c C,
    limit: usize,
    fanout: usize,
) -> Vec<&'c C::Record>
where
    Q: ?Sized + BorrowerKey,
    C: Catalog + ?Sized,
{
    let bipartite = net.bipartite();
    let borrowed = bipartite.books_of(borrower);
    let empty = HashSet::new();
    let borrowed = borrowed.unwrap_or(&empty);

    let mut scores: HashMap<BookId, u64> = HashMap::new();
    for similar in similar_borrowers(net, borrower, fanout) {
        let Some(their_books) = bipartite.books_of(&similar.id) else {
            continue;
        };
        for book in their_books.difference(borrowed) {
            *scores.entry(*book).or_default() += similar.score;
        }
    }

    top_k(scores, usize::MAX)
        .into_iter()
        .filter_map(|(id, _)| catalog.resolve(id))
        .take(limit)
        .collect()
}
