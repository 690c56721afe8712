//! Top command implementation for the Pulse CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pulse_core::{DEFAULT_LANGUAGE, SqliteArticleStore};
use pulse_scorer::{DEFAULT_TOP_LIMIT, RankedArticle, TopQuery, top_articles};
use serde::{Deserialize, Serialize};

use crate::fs::require_existing;
use crate::{
    ARG_DB, ARG_LANGUAGE, ARG_LIMIT, ARG_SINCE, ARG_WEIGHTS, CliError, ENV_TOP_DB, build_scorer,
    parse_timestamp, write_json,
};

/// CLI arguments for the `top` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "top",
    long_about = "Score one language partition of a SQLite article database \
                 and print the highest ranked articles with their score \
                 breakdowns.",
    about = "Print the top articles of a partition"
)]
#[ortho_config(prefix = "PULSE")]
pub(crate) struct TopArgs {
    /// Path to the SQLite article database.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// Language partition to rank.
    #[arg(long = ARG_LANGUAGE, value_name = "code")]
    #[serde(default)]
    pub(crate) language: Option<String>,
    /// Maximum number of articles printed.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Only rank articles published at or after this RFC 3339 instant.
    #[arg(long = ARG_SINCE, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) since: Option<String>,
    /// Path to a JSON scoring config replacing the built-in tables.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl TopArgs {
    pub(crate) fn into_config(self) -> Result<TopConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TopConfig::try_from(merged)
    }
}

/// Resolved `top` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TopConfig {
    /// Path to the article database.
    pub(crate) db: Utf8PathBuf,
    /// Ranking query.
    pub(crate) query: TopQuery,
    /// Optional scoring config.
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl TopConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.db, ARG_DB)?;
        if let Some(weights) = &self.weights {
            require_existing(weights, ARG_WEIGHTS)?;
        }
        Ok(())
    }
}

impl TryFrom<TopArgs> for TopConfig {
    type Error = CliError;

    fn try_from(args: TopArgs) -> Result<Self, Self::Error> {
        let db = args.db.ok_or(CliError::MissingArgument {
            field: ARG_DB,
            env: ENV_TOP_DB,
        })?;
        let language = args.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
        let mut query = TopQuery::new(language).with_limit(args.limit.unwrap_or(DEFAULT_TOP_LIMIT));
        if let Some(raw) = args.since.as_deref() {
            query = query.with_since(parse_timestamp(raw, ARG_SINCE)?);
        }
        Ok(Self {
            db,
            query,
            weights: args.weights,
        })
    }
}

pub(super) fn run_top(args: TopArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_top_with(args, &mut stdout)
}

pub(super) fn run_top_with(args: TopArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let ranked = execute_top(&config, Utc::now())?;
    write_json(writer, &ranked)
}

pub(super) fn execute_top(
    config: &TopConfig,
    now: DateTime<Utc>,
) -> Result<Vec<RankedArticle>, CliError> {
    config.validate_sources()?;
    let scorer = build_scorer(config.weights.as_deref())?;
    let store = SqliteArticleStore::open(config.db.as_std_path())?;
    Ok(top_articles(&store, &scorer, &config.query, now)?)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<TopConfig, CliError> {
    let merged = TopArgs::merge_from_layers(layers).map_err(CliError::from)?;
    TopConfig::try_from(merged)
}
