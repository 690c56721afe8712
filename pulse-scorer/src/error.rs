//! Error types raised while building scorers and running store-backed jobs.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use pulse_core::PriorityTag;
use thiserror::Error;

/// Errors raised while validating or loading a [`ScoringConfig`](crate::ScoringConfig).
#[derive(Debug, Error)]
pub enum ScoringConfigError {
    /// A keyword group was declared without a name.
    #[error("keyword group names must not be blank")]
    EmptyGroupName,
    /// A keyword group maximum was negative or not finite.
    #[error("keyword group {group} has invalid maximum {value}")]
    InvalidGroupMax {
        /// Name of the offending group.
        group: String,
        /// Rejected maximum.
        value: f64,
    },
    /// A source base weight was negative or not finite.
    #[error("source {source_name} has invalid base weight {value}")]
    InvalidSourceWeight {
        /// Source whose weight was rejected.
        source_name: String,
        /// Rejected weight.
        value: f64,
    },
    /// A per-priority multiplier was negative or not finite.
    #[error("source {source_name} has invalid {tag} multiplier {value}")]
    InvalidPriorityWeight {
        /// Source whose multiplier was rejected.
        source_name: String,
        /// Priority the multiplier applies to.
        tag: PriorityTag,
        /// Rejected multiplier.
        value: f64,
    },
    /// A priority key in the sources table did not name a known tag.
    #[error("source {source_name} lists unknown priority '{tag}'")]
    UnknownPriorityTag {
        /// Source containing the key.
        source_name: String,
        /// Raw key as written.
        tag: String,
    },
    /// Decay tier bounds must strictly increase.
    #[error("decay tier {index} bound of {max_age_hours}h does not exceed the previous tier")]
    TierBoundNotIncreasing {
        /// Zero-based position of the tier.
        index: usize,
        /// Offending bound in hours.
        max_age_hours: u32,
    },
    /// A decay multiplier was negative or not finite.
    #[error("decay tier {index} has invalid multiplier {value}")]
    InvalidDecayMultiplier {
        /// Zero-based position of the tier.
        index: usize,
        /// Rejected multiplier.
        value: f64,
    },
    /// Decay multipliers must not rise for older tiers.
    #[error("decay tier {index} multiplier {value} exceeds the previous tier's {previous}")]
    DecayNotMonotonic {
        /// Zero-based position of the tier.
        index: usize,
        /// Multiplier of the preceding tier.
        previous: f64,
        /// Offending multiplier.
        value: f64,
    },
    /// The decay floor was not finite or exceeded the last tier multiplier.
    #[error("decay floor {value} is outside 0..={ceiling}")]
    InvalidDecayFloor {
        /// Rejected floor.
        value: f64,
        /// Largest permitted floor.
        ceiling: f64,
    },
    /// Reading the configuration file failed.
    #[error("failed to read scoring config at {path}")]
    ReadFile {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Parsing the configuration file failed.
    #[error("failed to parse scoring config at {path}")]
    ParseFile {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by [`rescore_all`](crate::rescore_all).
///
/// Individual update failures are reported in the
/// [`RescoreReport`](crate::RescoreReport) instead.
#[derive(Debug, Error)]
pub enum RescoreError {
    /// Loading articles from the store failed.
    #[error("failed to load articles for rescoring")]
    Load {
        /// Store error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors returned by [`top_articles`](crate::top_articles).
#[derive(Debug, Error)]
pub enum RankingError {
    /// Loading the language partition failed.
    #[error("failed to load articles for language {language}")]
    Load {
        /// Requested partition.
        language: String,
        /// Store error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
