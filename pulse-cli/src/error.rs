//! Error types emitted by the Pulse CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use pulse_core::{ArticleError, SqliteArticleStoreError};
use pulse_scorer::{RankingError, RescoreError, ScoringConfigError};
use thiserror::Error;

/// Errors emitted by the Pulse CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A timestamp option was not valid RFC 3339.
    #[error("{field} value {raw:?} is not an RFC 3339 timestamp: {source}")]
    InvalidTimestamp {
        field: &'static str,
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Opening the article file failed.
    #[error("failed to open article at {path:?}: {source}")]
    OpenArticle {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Article JSON could not be decoded.
    #[error("failed to parse article JSON at {path:?}: {source}")]
    ParseArticle {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The article payload failed validation.
    #[error("article in {path:?} failed validation: {source}")]
    InvalidArticle {
        path: Utf8PathBuf,
        #[source]
        source: ArticleError,
    },
    /// Loading or validating the scoring tables failed.
    #[error(transparent)]
    LoadWeights(#[from] ScoringConfigError),
    /// Opening the article store failed.
    #[error(transparent)]
    OpenStore(#[from] SqliteArticleStoreError),
    /// Rescoring could not start.
    #[error(transparent)]
    Rescore(#[from] RescoreError),
    /// Ranking could not load its partition.
    #[error(transparent)]
    Rank(#[from] RankingError),
    /// Some score updates failed during rescoring.
    #[error("{failed} of {total} score updates failed")]
    RescoreIncomplete { failed: usize, total: usize },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
