//! Score command implementation for the Pulse CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pulse_core::{Article, ArticleRecord, ScoreBreakdown, Scorer};
use serde::{Deserialize, Serialize};

use crate::fs::{open_utf8_file, require_existing};
use crate::{
    ARG_ARTICLE, ARG_NOW, ARG_WEIGHTS, CliError, ENV_SCORE_ARTICLE, build_scorer,
    parse_timestamp, write_json,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "score",
    long_about = "Validate a JSON article record and print its importance \
                 breakdown. Scoring tables default to the built-in values \
                 and can be replaced with a JSON weights file.",
    about = "Score a single article"
)]
#[ortho_config(prefix = "PULSE")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file containing an article record.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) article_path: Option<Utf8PathBuf>,
    /// Path to a JSON scoring config replacing the built-in tables.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Evaluate the score at this RFC 3339 instant instead of now.
    #[arg(long = ARG_NOW, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) now: Option<String>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreConfig {
    /// Path to the JSON article record.
    pub(crate) article_path: Utf8PathBuf,
    /// Optional scoring config.
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Evaluation instant.
    pub(crate) now: DateTime<Utc>,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.article_path, ARG_ARTICLE)?;
        if let Some(weights) = &self.weights {
            require_existing(weights, ARG_WEIGHTS)?;
        }
        Ok(())
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let article_path = args.article_path.ok_or(CliError::MissingArgument {
            field: ARG_ARTICLE,
            env: ENV_SCORE_ARTICLE,
        })?;
        let now = match args.now.as_deref() {
            Some(raw) => parse_timestamp(raw, ARG_NOW)?,
            None => Utc::now(),
        };
        Ok(Self {
            article_path,
            weights: args.weights,
            now,
        })
    }
}

pub(super) fn run_score(args: ScoreArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_score_with(args, &mut stdout)
}

pub(super) fn run_score_with(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let breakdown = execute_score(&config)?;
    write_json(writer, &breakdown)
}

pub(super) fn execute_score(config: &ScoreConfig) -> Result<ScoreBreakdown, CliError> {
    config.validate_sources()?;
    let article = load_article(&config.article_path)?;
    let scorer = build_scorer(config.weights.as_deref())?;
    debug!("scoring article {} at {}", article.id, config.now);
    Ok(scorer.score_at(&article, config.now))
}

/// Identifier given to id-less records whose path has no file stem.
const DEFAULT_ARTICLE_ID: &str = "article";

/// Loads and validates a JSON-encoded [`ArticleRecord`] from disk.
///
/// Records without an id are named after the file stem.
pub(super) fn load_article(path: &Utf8Path) -> Result<Article, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenArticle {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let record: ArticleRecord =
        serde_json::from_reader(reader).map_err(|source| CliError::ParseArticle {
            path: path.to_path_buf(),
            source,
        })?;
    let fallback_id = path.file_stem().unwrap_or(DEFAULT_ARTICLE_ID);
    Article::try_from(record.with_fallback_id(fallback_id)).map_err(|source| {
        CliError::InvalidArticle {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
