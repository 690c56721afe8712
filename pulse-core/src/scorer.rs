//! Score articles for ranking.
//!
//! The `Scorer` trait turns an [`Article`](crate::Article) into a
//! [`ScoreBreakdown`](crate::ScoreBreakdown) at a given instant.

use chrono::{DateTime, Utc};

use crate::{Article, ScoreBreakdown};

/// Upper bound of [`ScoreBreakdown::total`].
pub const SCORE_CAP: f64 = 100.0;

/// Calculate an importance score for an article.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so batches can be
/// scored across threads. Scoring is infallible and pure: the same article at
/// the same instant yields the same breakdown, and missing optional fields
/// contribute nothing.
///
/// Implementations must:
/// - Produce finite totals.
/// - Return non-negative values.
/// - Cap totals at [`SCORE_CAP`].
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use chrono::{DateTime, TimeZone, Utc};
/// use pulse_core::{Article, ScoreBreakdown, Scorer};
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn score_at(&self, _article: &Article, _now: DateTime<Utc>) -> ScoreBreakdown {
///         ScoreBreakdown { total: Self::sanitise(250.0), ..ScoreBreakdown::default() }
///     }
/// }
///
/// let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let article = Article::new("a-1", "Title", published);
/// assert_eq!(FlatScorer.score_at(&article, published).total, 100.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Score `article` as if evaluated at `now`.
    fn score_at(&self, article: &Article, now: DateTime<Utc>) -> ScoreBreakdown;

    /// Score `article` against the current wall-clock time.
    fn score(&self, article: &Article) -> ScoreBreakdown {
        self.score_at(article, Utc::now())
    }

    /// Clamp and validate a raw total.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=SCORE_CAP`.
    /// Negative zero comes back as positive zero.
    fn sanitise(total: f64) -> f64
    where
        Self: Sized,
    {
        if !total.is_finite() {
            return 0.0;
        }
        // `-0.0 + 0.0` is `+0.0`.
        total.clamp(0.0, SCORE_CAP) + 0.0
    }
}
