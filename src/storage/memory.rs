//! In-memory loan store.
//!
//! The reference implementation of `LoanStore`: the whole network sits
//! behind one `parking_lot::RwLock`.
//!
//! ## Limitations
//!
//! - **No persistence**: state lives as long as the last clone of the
//!   store. Use [`crate::snapshot`] to carry it across restarts.
//! - **Coarse locking**: a registration blocks every reader for its
//!   duration. Loan events are rare relative to queries, and each one
//!   touches only the co-borrowers of a single book.

use std::sync::Arc;
use parking_lot::RwLock;

use crate::graph::LoanNetwork;
use super::LoanStore;

/// In-memory store. Clones share the same network.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<LoanNetwork>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_network(network: LoanNetwork) -> Self {
        Self {
            inner: Arc::new(RwLock::new(network)),
        }
    }
}

impl LoanStore for MemoryStore {
    fn read<R>(&self, f: impl FnOnce(&LoanNetwork) -> R) -> R {
        f(&*self.inner.read())
    }

    fn write<R>(&self, f: impl FnOnce(&mut LoanNetwork) -> R) -> R {
        f(&mut *self.inner.write())
    }
}

// ============================================================================
// Tests
// ============================================================================
