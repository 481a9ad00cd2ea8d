//! Borrower–book bipartite adjacency.
//!
//! Each side keeps its own adjacency map, so the node kind is carried by
//! the map rather than by a string prefix on the key. The two maps are
//! mirror images of each other: `k ∈ books[b]` iff `b ∈ borrowers[k]`.

use hashbrown::{HashMap, HashSet};

use crate::model::{BookId, BorrowerId, BorrowerKey, NodeKey};

/// Undirected borrower–book graph. Grows monotonically.
#[derive(Debug, Clone, Default)]
pub struct BipartiteGraph {
    /// borrower → books it has been linked to
    by_borrower: HashMap<BorrowerId, HashSet<BookId>>,
    /// book → borrowers linked to it
    by_book: HashMap<BookId, HashSet<BorrowerId>>,
}

impl BipartiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a borrower and a book in both directions.
    ///
    /// Returns `true` if the pair was not linked before. Repeating a pair
    /// leaves the graph unchanged.
    pub fn register_edge(&mut self, borrower: &BorrowerId, book: BookId) -> bool {
        let inserted = self.books_entry(borrower).insert(book);
        if inserted {
            self.borrowers_entry(book).insert(borrower.clone());
        }
        inserted
    }

    // Insert-if-absent accessors. Reads never create entries.

    fn books_entry(&mut self, borrower: &BorrowerId) -> &mut HashSet<BookId> {
        self.by_borrower.entry_ref(borrower.as_str()).or_default()
    }

    fn borrowers_entry(&mut self, book: BookId) -> &mut HashSet<BorrowerId> {
        self.by_book.entry(book).or_default()
    }

    pub fn books_of<Q: ?Sized + BorrowerKey>(&self, borrower: &Q) -> Option<&HashSet<BookId>> {
        self.by_borrower.get(borrower)
    }

    pub fn borrowers_of(&self, book: BookId) -> Option<&HashSet<BorrowerId>> {
        self.by_book.get(&book)
    }

    pub fn contains(&self, node: &NodeKey) -> bool {
        match node {
            NodeKey::Borrower(id) => self.by_borrower.contains_key(id),
            NodeKey::Book(id) => self.by_book.contains_key(id),
        }
    }

    /// Neighbour count of a node; 0 for unknown nodes.
    pub fn degree(&self, node: &NodeKey) -> usize {
        match node {
            NodeKey::Borrower(id) => self.by_borrower.get(id).map_or(0, HashSet::len),
            NodeKey::Book(id) => self.by_book.get(id).map_or(0, HashSet::len),
        }
    }

    pub fn borrower_count(&self) -> usize {
        self.by_borrower.len()
    }

    pub fn book_count(&self) -> usize {
        self.by_book.len()
    }

    /// Number of borrower–book edges, counted from the borrower side.
    pub fn edge_count(&self) -> usize {
        self.by_borrower.values().map(HashSet::len).sum()
    }

    pub fn borrowers(&self) -> impl Iterator<Item = (&BorrowerId, &HashSet<BookId>)> {
        self.by_borrower.iter()
    }

    pub fn books(&self) -> impl Iterator<Item = (BookId, &HashSet<BorrowerId>)> {
        self.by_book.iter().map(|(id, set)| (*id, set))
    }

    pub fn is_empty(&self) -> bool {
        self.by_borrower.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(id: &str) -> BorrowerId {
        BorrowerId::from(id)
    }

    #[test]
    fn test_register_edge_is_symmetric() {
        let mut g = BipartiteGraph::new();
        g.register_edge(&b("1234567890"), BookId(1));
        g.register_edge(&b("1234567890"), BookId(2));
        g.register_edge(&b("0987654321"), BookId(1));
        g.register_edge(&b("0987654321"), BookId(3));

        let books = g.books_of(&b("1234567890")).unwrap();
        assert_eq!(books.len(), 2);
        assert!(books.contains(&BookId(1)) && books.contains(&BookId(2)));

        let readers = g.borrowers_of(BookId(1)).unwrap();
        assert_eq!(readers.len(), 2);
        assert!(readers.contains(&b("1234567890")));
        assert!(readers.contains(&b("0987654321")));

        assert_eq!(g.borrowers_of(BookId(2)).unwrap().len(), 1);
    }

    #[test]
    fn test_repeated_pair_is_single_edge() {
        let mut g = BipartiteGraph::new();
        assert!(g.register_edge(&b("A111111111"), BookId(7)));
        assert!(!g.register_edge(&b("A111111111"), BookId(7)));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(&NodeKey::book(BookId(7))), 1);
    }

    #[test]
    fn test_unknown_nodes_read_as_empty() {
        let g = BipartiteGraph::new();
        assert!(g.books_of(&b("nobody")).is_none());
        assert!(g.borrowers_of(BookId(42)).is_none());
        assert_eq!(g.degree(&NodeKey::borrower("nobody")), 0);
        assert!(!g.contains(&NodeKey::book(BookId(42))));
        // reads must not create entries
        assert!(g.is_empty());
        assert_eq!(g.book_count(), 0);
    }

    #[test]
    fn test_counts() {
        let mut g = BipartiteGraph::new();
        g.register_edge(&b("x"), BookId(1));
        g.register_edge(&b("x"), BookId(2));
        g.register_edge(&b("y"), BookId(2));
        assert_eq!(g.borrower_count(), 2);
        assert_eq!(g.book_count(), 2);
        assert_eq!(g.edge_count(), 3);
        assert!(g.contains(&NodeKey::borrower("y")));
    }
}
