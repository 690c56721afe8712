//! Core domain types for the Pulse scoring engine.
//!
//! This crate defines the article model fed to scorers, the breakdown they
//! produce, and the storage seam used by batch rescoring and ranking.
//! Articles are validated once, when an [`ArticleRecord`] becomes an
//! [`Article`]; everything downstream treats them as well-formed.

pub mod article;
pub mod breakdown;
pub mod priority;
pub mod scorer;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use article::{Article, ArticleError, ArticleRecord, DEFAULT_LANGUAGE};
pub use breakdown::ScoreBreakdown;
pub use priority::PriorityTag;
pub use scorer::{SCORE_CAP, Scorer};
pub use store::ArticleStore;
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteArticleStore, SqliteArticleStoreError};
