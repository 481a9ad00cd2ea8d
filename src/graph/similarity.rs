//! Weighted borrower–borrower graph.
//!
//! Both directions of every pair are stored and kept equal by
//! construction: the only mutators write `(a, b)` and `(b, a)` together.
//! Self-pairs are never stored.

use hashbrown::HashMap;

use crate::model::{BorrowerId, BorrowerKey};

#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    rows: HashMap<BorrowerId, HashMap<BorrowerId, u64>>,
}

impl SimilarityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the weight of `{a, b}` by one. Ignores `a == b`.
    pub fn bump(&mut self, a: &BorrowerId, b: &BorrowerId) {
        self.add(a, b, 1);
    }

    pub(crate) fn add(&mut self, a: &BorrowerId, b: &BorrowerId, by: u64) {
        if a == b || by == 0 {
            return;
        }
        *self.cell(a, b) += by;
        *self.cell(b, a) += by;
    }

    fn cell(&mut self, from: &BorrowerId, to: &BorrowerId) -> &mut u64 {
        self.rows
            .entry_ref(from.as_str())
            .or_default()
            .entry_ref(to.as_str())
            .or_default()
    }

    /// Weight of `{a, b}`; 0 when the pair never shared a book.
    pub fn weight<A, B>(&self, a: &A, b: &B) -> u64
    where
        A: ?Sized + BorrowerKey,
        B: ?Sized + BorrowerKey,
    {
        self.rows
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0)
    }

    pub fn row<Q: ?Sized + BorrowerKey>(&self, borrower: &Q) -> Option<&HashMap<BorrowerId, u64>> {
        self.rows.get(borrower)
    }

    /// Unordered pairs with a weight. Each pair is stored twice, so this
    /// is half the total row length.
    pub fn edge_count(&self) -> usize {
        self.rows.values().map(HashMap::len).sum::<usize>() / 2
    }

    /// Every unordered pair once, as `(lower, higher, weight)`.
    pub fn pairs(&self) -> impl Iterator<Item = (&BorrowerId, &BorrowerId, u64)> {
        self.rows.iter().flat_map(|(a, row)| {
            row.iter()
                .filter(move |(b, _)| a < *b)
                .map(move |(b, w)| (a, b, *w))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
