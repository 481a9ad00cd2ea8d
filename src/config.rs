//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of similar borrowers returned when the caller has no preference.
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;
/// Default length of a popularity ranking.
pub const DEFAULT_POPULAR_LIMIT: usize = 10;
/// Default number of recommended books.
pub const DEFAULT_RECOMMEND_LIMIT: usize = 5;

/// How a repeated `(borrower, book)` registration affects similarity weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Every registration bumps the weight to each co-borrower of the book,
    /// even when the pair was already linked. Weights count registration
    /// events that found two borrowers sharing a book.
    #[default]
    CountEvents,
    /// A repeated pair is a no-op. Weights count distinct shared books.
    DistinctBooks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Similar borrowers consulted by the similar-users recommender.
    pub similar_user_fanout: usize,
    /// Popularity over-fetch multiplier for the history recommender, so
    /// that already-borrowed books can be skipped.
    pub history_headroom: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::CountEvents,
            similar_user_fanout: 10,
            history_headroom: 2,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.similar_user_fanout == 0 {
            return Err(Error::Config("similar_user_fanout must be at least 1".into()));
        }
        if self.history_headroom == 0 {
            return Err(Error::Config("history_headroom must be at least 1".into()));
        }
        Ok(())
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
