//! Scoring output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Components of an importance score.
///
/// `total` is the only value used for ranking; the remaining fields explain
/// how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ScoreBreakdown {
    /// Capped keyword relevance over the title and summary together.
    pub keyword_score: f64,
    /// Keyword relevance of the title alone.
    pub title_score: f64,
    /// Keyword relevance of the summary alone.
    pub summary_score: f64,
    /// Source base weight multiplied by the priority multiplier.
    pub source_weight: f64,
    /// Recency multiplier for the article's age tier.
    pub time_decay: f64,
    /// Final score in `0.0..=SCORE_CAP`.
    pub total: f64,
}
