//! Popularity and similarity rankings.
//!
//! Every ranking sorts by score descending and breaks ties by id
//! ascending, so equal scores always come out in the same order.

use crate::graph::LoanNetwork;
use crate::model::{BookId, BorrowerId, BorrowerKey, Ranked};

/// Borrowers that shared books with `borrower`, strongest first.
///
/// Empty when the borrower has no similarity edges.
pub fn similar_borrowers<Q>(net: &LoanNetwork, borrower: &Q, limit: usize) -> Vec<Ranked<BorrowerId>>
where
    Q: ?Sized + BorrowerKey,
{
    let Some(row) = net.similarity().row(borrower) else {
        return Vec::new();
    };
    top_k(row.iter().map(|(id, w)| (id, *w)), limit)
        .into_iter()
        .map(|(id, w)| Ranked::new(id.clone(), w))
        .collect()
}

/// Books ranked by number of distinct borrowers.
pub fn popular_books(net: &LoanNetwork, limit: usize) -> Vec<Ranked<BookId>> {
    top_k(
        net.bipartite().books().map(|(id, readers)| (id, readers.len() as u64)),
        limit,
    )
    .into_iter()
    .map(Ranked::from)
    .collect()
}

/// Sort by score descending, then id ascending, and keep the first `limit`.
pub(crate) fn top_k<T: Ord>(items: impl IntoIterator<Item = (T, u64)>, limit: usize) -> Vec<(T, u64)> {
    if limit == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(T, u64)> = items.into_iter().collect();
    ranked.sort_unstable_by(|(a_id, a), (b_id, b)| b.cmp(a).then_with(|| a_id.cmp(b_id)));
    ranked.truncate(limit);
    ranked
}
