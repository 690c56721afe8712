//! Data access traits for stored articles.
//!
//! The `ArticleStore` trait loads articles for scoring and persists the
//! denormalised importance score back onto each record.

use crate::Article;

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteArticleStore, SqliteArticleStoreError};

/// Read access to stored articles plus score write-back.
///
/// Each `update_score` call stands alone: a failure for one article says
/// nothing about its siblings, so batch callers may carry on after an error.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use pulse_core::{Article, ArticleStore};
///
/// struct VecStore(Vec<Article>);
///
/// #[derive(Debug)]
/// struct NotFound;
///
/// impl std::fmt::Display for NotFound {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("article not found")
///     }
/// }
///
/// impl std::error::Error for NotFound {}
///
/// impl ArticleStore for VecStore {
///     type Error = NotFound;
///
///     fn load_articles(&self) -> Result<Vec<Article>, Self::Error> {
///         Ok(self.0.clone())
///     }
///
///     fn update_score(&mut self, id: &str, total: f64) -> Result<(), Self::Error> {
///         let article = self.0.iter_mut().find(|a| a.id == id).ok_or(NotFound)?;
///         article.importance_score = Some(total);
///         Ok(())
///     }
/// }
///
/// let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let mut store = VecStore(vec![Article::new("a-1", "Title", published)]);
/// store.update_score("a-1", 12.0).unwrap();
/// assert_eq!(store.load_partition("en").unwrap()[0].importance_score, Some(12.0));
/// ```
pub trait ArticleStore {
    /// Error raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every stored article.
    fn load_articles(&self) -> Result<Vec<Article>, Self::Error>;

    /// Return the articles of one language partition.
    ///
    /// The default implementation filters [`ArticleStore::load_articles`].
    fn load_partition(&self, language: &str) -> Result<Vec<Article>, Self::Error> {
        let mut articles = self.load_articles()?;
        articles.retain(|article| article.language == language);
        Ok(articles)
    }

    /// Persist `total` as the importance score of article `id`.
    ///
    /// Unknown identifiers are an error.
    fn update_score(&mut self, id: &str, total: f64) -> Result<(), Self::Error>;
}
