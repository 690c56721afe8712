//! Store-wide rescoring.
#![forbid(unsafe_code)]

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use pulse_core::{ArticleStore, Scorer};
use serde::Serialize;

use crate::RescoreError;

/// Articles processed between optional pauses.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Tuning knobs for [`rescore_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescoreOptions {
    /// Articles per batch. Zero is treated as one.
    pub batch_size: usize,
    /// Pause between consecutive batches.
    pub delay: Option<Duration>,
}

impl Default for RescoreOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            delay: None,
        }
    }
}

/// A score update that did not persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RescoreFailure {
    /// Identifier of the article.
    pub id: String,
    /// Rendered store error.
    pub reason: String,
}

/// Outcome of a rescoring run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RescoreReport {
    /// Articles whose score was persisted.
    pub succeeded: usize,
    /// Articles whose update failed.
    pub failed: usize,
    /// Details for each failed update, in processing order.
    pub failures: Vec<RescoreFailure>,
}

impl RescoreReport {
    /// Number of articles processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.succeeded.saturating_add(self.failed)
    }

    /// Report whether every update persisted.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn record_success(&mut self) {
        self.succeeded = self.succeeded.saturating_add(1);
    }

    fn record_failure(&mut self, id: &str, reason: String) {
        self.failed = self.failed.saturating_add(1);
        self.failures.push(RescoreFailure {
            id: id.to_owned(),
            reason,
        });
    }
}

/// Recompute and persist the score of every stored article.
///
/// Articles are scored at `now` and written back one at a time. A failed
/// write is logged and recorded in the report; the remaining articles are
/// still processed.
///
/// # Errors
/// Returns [`RescoreError::Load`] when the articles cannot be loaded.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use pulse_core::{Article, ArticleStore};
/// use pulse_core::test_support::MemoryStore;
/// use pulse_scorer::{ImportanceScorer, RescoreOptions, rescore_all};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let mut store = MemoryStore::with_articles([Article::new("a-1", "LLM guide", now)]);
/// let scorer = ImportanceScorer::default();
/// let report = rescore_all(&mut store, &scorer, now, RescoreOptions::default())
///     .expect("articles load");
/// assert_eq!(report.succeeded, 1);
/// assert!(store.get("a-1").and_then(|a| a.importance_score).is_some());
/// ```
pub fn rescore_all<S, C>(
    store: &mut S,
    scorer: &C,
    now: DateTime<Utc>,
    options: RescoreOptions,
) -> Result<RescoreReport, RescoreError>
where
    S: ArticleStore + ?Sized,
    C: Scorer + ?Sized,
{
    let articles = store.load_articles().map_err(|source| RescoreError::Load {
        source: Box::new(source),
    })?;
    let batch_size = options.batch_size.max(1);
    info!(
        "rescoring {} articles in batches of {batch_size}",
        articles.len()
    );

    let mut report = RescoreReport::default();
    for (index, batch) in articles.chunks(batch_size).enumerate() {
        if index > 0 {
            if let Some(delay) = options.delay {
                thread::sleep(delay);
            }
        }
        debug!("rescoring batch {index} ({} articles)", batch.len());
        for article in batch {
            let total = scorer.score_at(article, now).total;
            match store.update_score(&article.id, total) {
                Ok(()) => report.record_success(),
                Err(err) => {
                    warn!("failed to update score for article {}: {err}", article.id);
                    report.record_failure(&article.id, err.to_string());
                }
            }
        }
    }

    info!(
        "rescored {} articles: {} updated, {} failed",
        report.total(),
        report.succeeded,
        report.failed
    );
    Ok(report)
}
