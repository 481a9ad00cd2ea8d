//! # loan-graph — Loan Graph & Recommendation Engine
//!
//! Models which borrower borrowed which book as a bipartite graph, derives
//! a weighted borrower-similarity graph from shared loans, and answers
//! ranking, recommendation and analytics queries over both.
//!
//! ## Design Principles
//!
//! 1. **One write**: `register_loan` is the only mutation. Everything else is a read.
//! 2. **Eager similarity**: weights are bumped on every loan, so queries never recompute.
//! 3. **Trait-first storage**: `LoanStore` is the contract between queries and state.
//! 4. **Absence is empty**: unknown ids and empty graphs yield empty results, not errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use loan_graph::{LoanEngine, BookId, BookRecord};
//!
//! let engine = LoanEngine::in_memory();
//! engine.register_loan("1111111111", BookId(1));
//! engine.register_loan("1111111111", BookId(2));
//! engine.register_loan("2222222222", BookId(1));
//! engine.register_loan("2222222222", BookId(3));
//!
//! let similar = engine.similar_borrowers("1111111111", 5);
//! assert_eq!(similar[0].id.as_str(), "2222222222");
//!
//! let catalog = vec![
//!     BookRecord::new(BookId(1), "Cien años de soledad", "Gabriel García Márquez"),
//!     BookRecord::new(BookId(2), "1984", "George Orwell"),
//!     BookRecord::new(BookId(3), "Don Quijote", "Miguel de Cervantes"),
//! ];
//! let recs = engine.recommend_by_similar_users("1111111111", &catalog, 5);
//! assert_eq!(recs[0].title, "Don Quijote");
//! ```
//!
//! ## Duplicate registrations
//!
//! By default a repeated `(borrower, book)` registration leaves the
//! bipartite graph unchanged but still bumps similarity weights to every
//! co-borrower of the book. Set [`DuplicatePolicy::DistinctBooks`] to make
//! repeats a no-op instead.

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod storage;
pub mod config;
pub mod ranking;
pub mod recommend;
pub mod analytics;
pub mod snapshot;

use std::collections::BTreeSet;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    BorrowerId, BorrowerKey, BookId, NodeKey,
    LoanEvent, LoanOutcome,
    BookRecord, Catalog, CatalogEntry,
    GraphStats, IndirectRelations, Ranked,
};

pub use graph::{BipartiteGraph, LoanNetwork, SimilarityGraph};
pub use storage::{LoanStore, MemoryStore};
pub use config::{
    DuplicatePolicy, EngineConfig,
    DEFAULT_POPULAR_LIMIT, DEFAULT_RECOMMEND_LIMIT, DEFAULT_SIMILAR_LIMIT,
};
pub use snapshot::Snapshot;

// ============================================================================
// Top-level engine handle
// ============================================================================

/// The primary entry point. A `LoanEngine` wraps a store and exposes the
/// loan registration and every query over it.
pub struct LoanEngine<S: LoanStore = MemoryStore> {
    store: S,
    config: EngineConfig,
}

impl<S: LoanStore> LoanEngine<S> {
    /// Create an engine over the given store.
    ///
    /// Fails with [`Error::Config`] if `config` does not validate.
    pub fn with_store(store: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Access the underlying store (for advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Record that `borrower` took `book`.
    ///
    /// Accepts any identifiers; validating them against the member registry
    /// and the catalog is the caller's job.
    pub fn register_loan(&self, borrower: impl Into<BorrowerId>, book: BookId) -> LoanOutcome {
        let borrower = borrower.into();
        if !borrower.has_conventional_len() {
            tracing::debug!(%borrower, "borrower id has unconventional length");
        }
        let outcome = self.store.register_loan(&borrower, book, self.config.duplicate_policy);
        tracing::debug!(
            %borrower,
            %book,
            new_edge = outcome.new_edge,
            similarity_bumps = outcome.similarity_bumps,
            "loan registered"
        );
        outcome
    }

    /// Replay historical loans, e.g. at startup before the engine is shared.
    ///
    /// All events are applied under one exclusive section. Returns the
    /// number of events applied.
    pub fn replay<I>(&self, events: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<LoanEvent>,
    {
        let applied = self.store.register_batch(
            events.into_iter().map(Into::into),
            self.config.duplicate_policy,
        );
        let (borrowers, books) = self
            .store
            .read(|net| (net.bipartite().borrower_count(), net.bipartite().book_count()));
        tracing::info!(applied, borrowers, books, "loan history replayed");
        applied
    }

    // ========================================================================
    // Bipartite lookups
    // ========================================================================

    /// Books linked to a borrower; empty for unknown borrowers.
    pub fn books_of<Q: ?Sized + BorrowerKey>(&self, borrower: &Q) -> BTreeSet<BookId> {
        self.store.read(|net| {
            net.bipartite()
                .books_of(borrower)
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default()
        })
    }

    /// Borrowers linked to a book; empty for unknown books.
    pub fn borrowers_of(&self, book: BookId) -> BTreeSet<BorrowerId> {
        self.store.read(|net| {
            net.bipartite()
                .borrowers_of(book)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default()
        })
    }

    pub fn contains(&self, node: &NodeKey) -> bool {
        self.store.read(|net| net.bipartite().contains(node))
    }

    pub fn degree(&self, node: &NodeKey) -> usize {
        self.store.read(|net| net.bipartite().degree(node))
    }

    /// Similarity weight between two borrowers; 0 if they never shared a book.
    pub fn similarity_weight<A, B>(&self, a: &A, b: &B) -> u64
    where
        A: ?Sized + BorrowerKey,
        B: ?Sized + BorrowerKey,
    {
        self.store.read(|net| net.similarity().weight(a, b))
    }

    // ========================================================================
    // Ranking & recommendation
    // ========================================================================

    pub fn similar_borrowers<Q: ?Sized + BorrowerKey>(&self, borrower: &Q, limit: usize) -> Vec<Ranked<BorrowerId>> {
        tracing::trace!(limit, "similar_borrowers");
        self.store.read(|net| ranking::similar_borrowers(net, borrower, limit))
    }

    pub fn popular_books(&self, limit: usize) -> Vec<Ranked<BookId>> {
        tracing::trace!(limit, "popular_books");
        self.store.read(|net| ranking::popular_books(net, limit))
    }

    /// Popular books the borrower has not borrowed, resolved against `catalog`.
    pub fn recommend_by_history<'c, Q, C>(&self, borrower: &Q, catalog: &'c C, limit: usize) -> Vec<&'c C::Record>
    where
        Q: ?Sized + BorrowerKey,
        C: Catalog + ?Sized,
    {
        tracing::trace!(limit, "recommend_by_history");
        let headroom = self.config.history_headroom;
        self.store
            .read(|net| recommend::by_history(net, borrower, catalog, limit, headroom))
    }

    /// Books favoured by the borrower's most similar peers, resolved against `catalog`.
    pub fn recommend_by_similar_users<'c, Q, C>(&self, borrower: &Q, catalog: &'c C, limit: usize) -> Vec<&'c C::Record>
    where
        Q: ?Sized + BorrowerKey,
        C: Catalog + ?Sized,
    {
        tracing::trace!(limit, "recommend_by_similar_users");
        let fanout = self.config.similar_user_fanout;
        self.store
            .read(|net| recommend::by_similar_users(net, borrower, catalog, limit, fanout))
    }

    // ========================================================================
    // Analytics
    // ========================================================================

    pub fn graph_stats(&self) -> GraphStats {
        self.store.read(analytics::graph_stats)
    }

    pub fn indirect_relations<Q: ?Sized + BorrowerKey>(&self, borrower: &Q) -> IndirectRelations {
        self.store.read(|net| analytics::indirect_relations(net, borrower))
    }

    // ========================================================================
    // Snapshot / restore
    // ========================================================================

    pub fn snapshot(&self) -> Snapshot {
        self.store.read(Snapshot::capture)
    }

    /// Replace the whole state with a snapshot.
    ///
    /// On error the current state is left untouched.
    pub fn restore(&self, snapshot: Snapshot) -> Result<()> {
        let network = snapshot.into_network().map_err(|e| {
            tracing::warn!(error = %e, "snapshot rejected");
            e
        })?;
        let borrowers = network.bipartite().borrower_count();
        let books = network.bipartite().book_count();
        let similarity_edges = network.similarity().edge_count();
        self.store.replace(network);
        tracing::info!(borrowers, books, similarity_edges, "snapshot restored");
        Ok(())
    }
}

/// In-memory engine for embedding and tests.
impl LoanEngine<MemoryStore> {
    pub fn in_memory() -> Self {
        Self {
            store: MemoryStore::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn in_memory_with(config: EngineConfig) -> Result<Self> {
        Self::with_store(MemoryStore::new(), config)
    }
}

impl Default for LoanEngine<MemoryStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors from the ambient surfaces: configuration and snapshots.
///
/// Loan registration and every query are infallible.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Unsupported snapshot version {0} (expected {expected})", expected = snapshot::SNAPSHOT_VERSION)]
    UnsupportedSnapshotVersion(u32),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
