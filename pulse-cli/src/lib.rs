//! Command-line interface for scoring and ranking Pulse articles.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use pulse_scorer::ImportanceScorer;
use serde::Serialize;

mod error;
mod fs;
mod rescore;
mod score;
mod top;

pub use error::CliError;

use rescore::{RescoreArgs, run_rescore};
use score::{ScoreArgs, run_score};
use top::{TopArgs, run_top};

pub(crate) const ARG_ARTICLE: &str = "article";
pub(crate) const ARG_WEIGHTS: &str = "weights";
pub(crate) const ARG_NOW: &str = "now";
pub(crate) const ARG_DB: &str = "db";
pub(crate) const ARG_BATCH_SIZE: &str = "batch-size";
pub(crate) const ARG_DELAY_MS: &str = "delay-ms";
pub(crate) const ARG_LANGUAGE: &str = "language";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_SINCE: &str = "since";
pub(crate) const ENV_SCORE_ARTICLE: &str = "PULSE_CMDS_SCORE_ARTICLE_PATH";
pub(crate) const ENV_RESCORE_DB: &str = "PULSE_CMDS_RESCORE_DB";
pub(crate) const ENV_TOP_DB: &str = "PULSE_CMDS_TOP_DB";

/// Run the Pulse CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid, inputs cannot be read,
/// or a rescore run leaves failed updates behind.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Rescore(args) => run_rescore(args),
        Command::Top(args) => run_top(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pulse",
    about = "Score, rescore and rank news articles by importance",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a single article from a JSON file.
    Score(ScoreArgs),
    /// Recompute and persist every score in an article database.
    Rescore(RescoreArgs),
    /// Print the top articles of a language partition.
    Top(TopArgs),
}

/// Parse an RFC 3339 option value into UTC.
pub(crate) fn parse_timestamp(raw: &str, field: &'static str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| CliError::InvalidTimestamp {
            field,
            raw: raw.to_owned(),
            source,
        })
}

/// Serialise `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Build the scorer from an optional weights file.
pub(crate) fn build_scorer(weights: Option<&Utf8Path>) -> Result<ImportanceScorer, CliError> {
    match weights {
        Some(path) => Ok(ImportanceScorer::from_path(path)?),
        None => Ok(ImportanceScorer::default()),
    }
}

#[cfg(test)]
mod tests;
