//! Facade crate for the Pulse article importance engine.
//!
//! This crate re-exports the core domain types and exposes the importance
//! scorer and the SQLite article store behind feature flags.

#![forbid(unsafe_code)]

pub use pulse_core::{
    Article, ArticleError, ArticleRecord, ArticleStore, DEFAULT_LANGUAGE, PriorityTag, SCORE_CAP,
    ScoreBreakdown, Scorer,
};

#[cfg(feature = "store-sqlite")]
pub use pulse_core::{SqliteArticleStore, SqliteArticleStoreError};

#[cfg(feature = "scorer")]
pub use pulse_scorer::{
    ImportanceScorer, RankedArticle, RankingError, RescoreError, RescoreOptions, RescoreReport,
    ScoringConfig, ScoringConfigError, TopQuery, rescore_all, top_articles,
};
