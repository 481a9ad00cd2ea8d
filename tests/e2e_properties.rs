//! Property tests: structural invariants hold for arbitrary loan histories.

use std::collections::BTreeSet;

use loan_graph::{BookId, BookRecord, DuplicatePolicy, EngineConfig, LoanEngine};
use proptest::prelude::*;

fn history() -> impl Strategy<Value = Vec<(u8, u8)>> {
    // small id spaces so that borrowers actually share books
    prop::collection::vec((0u8..8, 0u8..12), 0..60)
}

fn borrower(n: u8) -> String {
    format!("{:010}", n)
}

fn build(events: &[(u8, u8)], policy: DuplicatePolicy) -> LoanEngine {
    let engine = LoanEngine::in_memory_with(EngineConfig::default().with_duplicate_policy(policy)).unwrap();
    for (who, book) in events {
        engine.register_loan(borrower(*who), BookId(u64::from(*book)));
    }
    engine
}

fn catalog() -> Vec<BookRecord> {
    (0..12u64)
        .map(|n| BookRecord::new(BookId(n), format!("Book {n}"), "Anon"))
        .collect()
}

proptest! {
    #[test]
    fn bipartite_edges_are_symmetric(events in history()) {
        let engine = build(&events, DuplicatePolicy::CountEvents);
        for who in 0u8..8 {
            let id = borrower(who);
            for book in engine.books_of(id.as_str()) {
                prop_assert!(engine.borrowers_of(book).iter().any(|b| b.as_str() == id));
            }
        }
        let distinct: BTreeSet<_> = events.iter().collect();
        prop_assert_eq!(engine.graph_stats().total_loan_edges, distinct.len());
    }

    #[test]
    fn similarity_is_symmetric_and_irreflexive(events in history()) {
        let engine = build(&events, DuplicatePolicy::CountEvents);
        for a in 0u8..8 {
            let x = borrower(a);
            prop_assert_eq!(engine.similarity_weight(x.as_str(), x.as_str()), 0);
            for b in 0u8..8 {
                let y = borrower(b);
                prop_assert_eq!(
                    engine.similarity_weight(x.as_str(), y.as_str()),
                    engine.similarity_weight(y.as_str(), x.as_str())
                );
            }
        }
    }

    #[test]
    fn distinct_books_weight_counts_shared_books(events in history()) {
        let engine = build(&events, DuplicatePolicy::DistinctBooks);
        for a in 0u8..8 {
            for b in (a + 1)..8 {
                let (x, y) = (borrower(a), borrower(b));
                let shared = engine.books_of(x.as_str()).intersection(&engine.books_of(y.as_str())).count();
                prop_assert_eq!(engine.similarity_weight(x.as_str(), y.as_str()), shared as u64);
            }
        }
    }

    #[test]
    fn similarity_edge_count_matches_linked_pairs(events in history()) {
        let engine = build(&events, DuplicatePolicy::CountEvents);
        let mut linked = 0;
        for a in 0u8..8 {
            for b in (a + 1)..8 {
                if engine.similarity_weight(borrower(a).as_str(), borrower(b).as_str()) > 0 {
                    linked += 1;
                }
            }
        }
        prop_assert_eq!(engine.graph_stats().total_similarity_edges, linked);
    }

    #[test]
    fn rankings_are_sorted_and_bounded(events in history(), limit in 0usize..6) {
        let engine = build(&events, DuplicatePolicy::CountEvents);

        let popular = engine.popular_books(limit);
        prop_assert!(popular.len() <= limit);
        for pair in popular.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].id < pair[1].id)
            );
        }
        for r in &popular {
            prop_assert_eq!(r.score as usize, engine.borrowers_of(r.id).len());
        }

        let id = borrower(0);
        let similar = engine.similar_borrowers(id.as_str(), limit);
        prop_assert!(similar.len() <= limit);
        prop_assert!(similar.iter().all(|r| r.id.as_str() != id && r.score > 0));
        for pair in similar.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].id < pair[1].id)
            );
        }
    }

    #[test]
    fn recommendations_skip_borrowed_books(events in history(), limit in 0usize..6) {
        let engine = build(&events, DuplicatePolicy::CountEvents);
        let books = catalog();
        for who in 0u8..8 {
            let id = borrower(who);
            let borrowed = engine.books_of(id.as_str());

            let by_history = engine.recommend_by_history(id.as_str(), &books, limit);
            let by_peers = engine.recommend_by_similar_users(id.as_str(), &books, limit);
            for recs in [&by_history, &by_peers] {
                prop_assert!(recs.len() <= limit);
                prop_assert!(recs.iter().all(|b| !borrowed.contains(&b.id)));
                let unique: BTreeSet<_> = recs.iter().map(|b| b.id).collect();
                prop_assert_eq!(unique.len(), recs.len());
            }
        }
    }

    #[test]
    fn indirect_books_are_sorted_and_not_direct(events in history()) {
        let engine = build(&events, DuplicatePolicy::CountEvents);
        for who in 0u8..8 {
            let id = borrower(who);
            let rel = engine.indirect_relations(id.as_str());
            let direct = engine.books_of(id.as_str());
            prop_assert_eq!(rel.direct_book_count, direct.len());
            prop_assert_eq!(rel.indirect_book_count, rel.indirect_book_ids.len());
            prop_assert!(rel.indirect_book_ids.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(rel.indirect_book_ids.iter().all(|b| !direct.contains(b)));
        }
    }

    #[test]
    fn snapshot_restore_is_lossless(events in history()) {
        let engine = build(&events, DuplicatePolicy::CountEvents);
        let snap = engine.snapshot();
        let restored = LoanEngine::in_memory();
        prop_assert!(restored.restore(snap.clone()).is_ok());
        prop_assert_eq!(restored.snapshot(), snap);
    }
}
