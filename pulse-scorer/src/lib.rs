//! Importance scoring for Pulse news articles.
//!
//! The crate provides three capabilities built on the seams defined by
//! `pulse-core`:
//! - **Per-article scoring.** [`ImportanceScorer`] combines keyword
//!   relevance, a per-source and per-priority weight, and a recency decay
//!   into a [`ScoreBreakdown`](pulse_core::ScoreBreakdown). It implements the
//!   [`Scorer`](pulse_core::Scorer) trait.
//! - **Batch rescoring.** [`rescore_all`] recomputes every stored score and
//!   writes it back through an [`ArticleStore`](pulse_core::ArticleStore),
//!   tolerating individual write failures.
//! - **Ranking.** [`top_articles`] returns the highest scoring articles of a
//!   language partition, optionally restricted to a publication window.
//!
//! Scoring tables default to built-in values and may be replaced from a
//! JSON [`ScoringConfig`].
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use pulse_core::{Article, PriorityTag, Scorer};
//! use pulse_scorer::ImportanceScorer;
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let article = Article::new("a-1", "Enterprise LLM deployment guide", now - TimeDelta::hours(3))
//!     .with_source("TechCrunch")
//!     .with_category(PriorityTag::Business);
//! let breakdown = ImportanceScorer::default().score_at(&article, now);
//! assert!(breakdown.total > 0.0);
//! assert_eq!(breakdown.time_decay, 1.2);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use pulse_core::{Article, SCORE_CAP, ScoreBreakdown, Scorer};

mod batch;
mod config;
mod decay;
mod error;
mod keywords;
mod ranking;
mod sources;

pub use batch::{DEFAULT_BATCH_SIZE, RescoreFailure, RescoreOptions, RescoreReport, rescore_all};
pub use config::{
    DecayTierConfig, KeywordGroupConfig, ScoringConfig, SourceWeightConfig, load_scoring_config,
};
pub use decay::{DEFAULT_DECAY_FLOOR, DecayTier, TimeDecay};
pub use error::{RankingError, RescoreError, ScoringConfigError};
pub use keywords::{KEYWORD_SCORE_CAP, KeywordGroup, KeywordScores, KeywordTable};
pub use ranking::{DEFAULT_TOP_LIMIT, RankedArticle, TopQuery, rank, top_articles};
pub use sources::{NEUTRAL_BASE_WEIGHT, NEUTRAL_PRIORITY_WEIGHT, SourceWeight, SourceWeights};

/// Factor mapping the unit-scale product onto `0.0..=SCORE_CAP`.
pub const SCORE_SCALE: f64 = SCORE_CAP;

/// Scores articles from keyword relevance, source weight and recency.
///
/// The scorer is immutable once built and can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceScorer {
    keywords: KeywordTable,
    sources: SourceWeights,
    decay: TimeDecay,
}

impl ImportanceScorer {
    /// Assemble a scorer from already validated tables.
    #[must_use]
    pub const fn new(keywords: KeywordTable, sources: SourceWeights, decay: TimeDecay) -> Self {
        Self {
            keywords,
            sources,
            decay,
        }
    }

    /// Validate `config` and build a scorer from it.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when any table fails validation.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, ScoringConfigError> {
        Ok(Self::new(
            config.keyword_table()?,
            config.source_weights()?,
            config.time_decay()?,
        ))
    }

    /// Load a JSON [`ScoringConfig`] from `path` and build a scorer from it.
    ///
    /// # Errors
    /// Propagates read, parse and validation failures as
    /// [`ScoringConfigError`].
    pub fn from_path(path: &Utf8Path) -> Result<Self, ScoringConfigError> {
        let config = load_scoring_config(path)?;
        Self::from_config(&config)
    }

    /// Keyword groups in use.
    #[must_use]
    pub const fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Source weights in use.
    #[must_use]
    pub const fn sources(&self) -> &SourceWeights {
        &self.sources
    }

    /// Decay schedule in use.
    #[must_use]
    pub const fn decay(&self) -> &TimeDecay {
        &self.decay
    }
}

impl Default for ImportanceScorer {
    fn default() -> Self {
        Self::new(
            KeywordTable::default(),
            SourceWeights::from_static_table(),
            TimeDecay::default(),
        )
    }
}

impl Scorer for ImportanceScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "the total is the product of the unit-scale components"
    )]
    fn score_at(&self, article: &Article, now: DateTime<Utc>) -> ScoreBreakdown {
        let keyword_scores = self
            .keywords
            .score(&article.title, article.summary.as_deref());
        let source_weight = self
            .sources
            .weight_for(article.source.as_deref(), &article.categories);
        let time_decay = self.decay.multiplier(article.age_at(now));
        let raw = keyword_scores.combined * source_weight * time_decay * SCORE_SCALE;

        ScoreBreakdown {
            keyword_score: keyword_scores.combined,
            title_score: keyword_scores.title,
            summary_score: keyword_scores.summary,
            source_weight,
            time_decay,
            total: Self::sanitise(raw),
        }
    }
}
