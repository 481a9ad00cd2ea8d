//! End-to-end tests for the two recommendation strategies.

use std::collections::HashMap;

use loan_graph::{BookId, BookRecord, EngineConfig, LoanEngine};
use pretty_assertions::assert_eq;

fn catalog() -> Vec<BookRecord> {
    vec![
        BookRecord::new(BookId(1), "Cien años de soledad", "Gabriel García Márquez").with_quantity(5),
        BookRecord::new(BookId(2), "1984", "George Orwell").with_quantity(4),
        BookRecord::new(BookId(3), "Don Quijote", "Miguel de Cervantes").with_quantity(3),
        BookRecord::new(BookId(4), "El Aleph", "Jorge Luis Borges").with_quantity(2),
        BookRecord::new(BookId(5), "Rayuela", "Julio Cortázar").with_quantity(1),
    ]
}

fn titles(books: &[&BookRecord]) -> Vec<String> {
    books.iter().map(|b| b.title.clone()).collect()
}

fn engine_with(loans: &[(&str, u64)]) -> LoanEngine {
    let engine = LoanEngine::in_memory();
    for (who, book) in loans {
        engine.register_loan(*who, BookId(*book));
    }
    engine
}

// ============================================================================
// By history
// ============================================================================

#[test]
fn test_history_recommends_unborrowed_popular_books() {
    let engine = engine_with(&[
        ("1111111111", 1), ("1111111111", 2),
        ("2222222222", 3), ("3333333333", 3), ("4444444444", 3),
        ("2222222222", 4), ("3333333333", 4),
    ]);
    let books = catalog();

    let recs = engine.recommend_by_history("1111111111", &books, 3);
    assert_eq!(titles(&recs), vec!["Don Quijote", "El Aleph"]);

    let borrowed = engine.books_of("1111111111");
    assert!(recs.iter().all(|b| !borrowed.contains(&b.id)));
}

#[test]
fn test_history_respects_limit() {
    let engine = engine_with(&[
        ("a", 1), ("b", 1), ("c", 1),
        ("a", 2), ("b", 2),
        ("a", 3),
        ("z", 5),
    ]);
    let books = catalog();
    let recs = engine.recommend_by_history("z", &books, 2);
    assert_eq!(titles(&recs), vec!["Cien años de soledad", "1984"]);
}

#[test]
fn test_history_everything_borrowed() {
    let engine = engine_with(&[("me", 1), ("me", 2), ("you", 2)]);
    let books = catalog();
    assert!(engine.recommend_by_history("me", &books, 5).is_empty());
}

#[test]
fn test_history_with_map_catalog() {
    let engine = engine_with(&[("a", 1), ("b", 1), ("b", 3)]);
    let books: HashMap<BookId, BookRecord> = catalog().into_iter().map(|b| (b.id, b)).collect();
    let recs = engine.recommend_by_history("a", &books, 5);
    assert_eq!(titles(&recs), vec!["Don Quijote"]);
}

#[test]
fn test_history_headroom_limits_lookahead() {
    // three popular books the borrower already has, then the unborrowed ones
    let engine = engine_with(&[
        ("me", 1), ("me", 2), ("me", 3),
        ("p", 1), ("q", 1), ("r", 1),
        ("p", 2), ("q", 2), ("r", 2),
        ("p", 3), ("q", 3), ("r", 3),
        ("p", 4), ("q", 4),
        ("p", 5),
    ]);
    let books = catalog();

    // limit 1 × headroom 2 only looks at books 1 and 2
    assert!(engine.recommend_by_history("me", &books, 1).is_empty());

    let wide = LoanEngine::in_memory_with(EngineConfig { history_headroom: 4, ..EngineConfig::default() }).unwrap();
    wide.replay(engine.snapshot().loan_events());
    assert_eq!(titles(&wide.recommend_by_history("me", &books, 1)), vec!["El Aleph"]);
}

// ============================================================================
// By similar users
// ============================================================================

#[test]
fn test_similar_users_prefers_heavier_peers() {
    let engine = engine_with(&[
        ("TARGET_USER", 1), ("TARGET_USER", 2),
        ("SIMILAR_1", 1), ("SIMILAR_1", 2), ("SIMILAR_1", 3),
        ("SIMILAR_2", 1), ("SIMILAR_2", 4),
    ]);
    let books = catalog();

    let recs = engine.recommend_by_similar_users("TARGET_USER", &books, 5);
    assert_eq!(titles(&recs), vec!["Don Quijote", "El Aleph"]);

    let borrowed = engine.books_of("TARGET_USER");
    assert!(recs.iter().all(|b| !borrowed.contains(&b.id)));
}

#[test]
fn test_similar_users_limit_and_missing_catalog_entries() {
    let engine = engine_with(&[
        ("t", 1),
        ("s", 1), ("s", 77), ("s", 4),
        ("u", 1), ("u", 77),
    ]);
    let books = catalog();
    // 77 ranks first but is not in the catalog; it is skipped without consuming a slot
    let recs = engine.recommend_by_similar_users("t", &books, 1);
    assert_eq!(titles(&recs), vec!["El Aleph"]);
}

#[test]
fn test_similar_users_fanout_limits_peers() {
    let engine = LoanEngine::in_memory_with(EngineConfig { similar_user_fanout: 1, ..EngineConfig::default() }).unwrap();
    for (who, book) in [("t", 1), ("t", 2), ("near", 1), ("near", 2), ("near", 3), ("far", 1), ("far", 4)] {
        engine.register_loan(who, BookId(book));
    }
    let books = catalog();
    let recs = engine.recommend_by_similar_users("t", &books, 5);
    assert_eq!(titles(&recs), vec!["Don Quijote"]);
}

#[test]
fn test_similar_users_none_similar() {
    let engine = engine_with(&[("loner", 1), ("other", 2)]);
    let books = catalog();
    assert!(engine.recommend_by_similar_users("loner", &books, 5).is_empty());
    assert!(engine.recommend_by_similar_users("unknown", &books, 5).is_empty());
}
