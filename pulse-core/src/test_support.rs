//! Test-only, in-memory `ArticleStore` implementations and a trivial
//! `Scorer` used by unit and behaviour tests.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{Article, ArticleStore, ScoreBreakdown, Scorer};

/// Errors raised by the in-memory stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// No article has the requested identifier.
    #[error("article {id} does not exist")]
    UnknownArticle {
        /// Requested identifier.
        id: String,
    },
    /// The store was configured to reject writes for this article.
    #[error("write rejected for article {id}")]
    Rejected {
        /// Rejected identifier.
        id: String,
    },
}

/// In-memory `ArticleStore` implementation used in tests.
///
/// Lookups perform a linear scan and are intended only for small datasets.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    articles: Vec<Article>,
}

impl MemoryStore {
    /// Create a store from a collection of articles.
    pub fn with_articles<I>(articles: I) -> Self
    where
        I: IntoIterator<Item = Article>,
    {
        Self {
            articles: articles.into_iter().collect(),
        }
    }

    /// Return the article with identifier `id`, if present.
    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }
}

impl ArticleStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load_articles(&self) -> Result<Vec<Article>, Self::Error> {
        Ok(self.articles.clone())
    }

    fn update_score(&mut self, id: &str, total: f64) -> Result<(), Self::Error> {
        let article = self
            .articles
            .iter_mut()
            .find(|article| article.id == id)
            .ok_or_else(|| MemoryStoreError::UnknownArticle { id: id.to_owned() })?;
        article.importance_score = Some(total);
        Ok(())
    }
}

/// Store wrapper whose score updates fail for a fixed set of identifiers.
#[derive(Debug, Clone)]
pub struct FailingStore {
    inner: MemoryStore,
    rejected: BTreeSet<String>,
}

impl FailingStore {
    /// Wrap `inner`, rejecting updates for every id in `rejected`.
    pub fn new<I, S>(inner: MemoryStore, rejected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner,
            rejected: rejected.into_iter().map(Into::into).collect(),
        }
    }

    /// Borrow the wrapped store.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl ArticleStore for FailingStore {
    type Error = MemoryStoreError;

    fn load_articles(&self) -> Result<Vec<Article>, Self::Error> {
        self.inner.load_articles()
    }

    fn update_score(&mut self, id: &str, total: f64) -> Result<(), Self::Error> {
        if self.rejected.contains(id) {
            return Err(MemoryStoreError::Rejected { id: id.to_owned() });
        }
        self.inner.update_score(id, total)
    }
}

/// Test `Scorer` that assigns the same sanitised total to every article.
#[derive(Debug, Copy, Clone, Default)]
pub struct ConstantScorer(pub f64);

impl Scorer for ConstantScorer {
    fn score_at(&self, _article: &Article, _now: DateTime<Utc>) -> ScoreBreakdown {
        ScoreBreakdown {
            total: Self::sanitise(self.0),
            ..ScoreBreakdown::default()
        }
    }
}
