//! Rescore command implementation for the Pulse CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use log::warn;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pulse_core::SqliteArticleStore;
use pulse_scorer::{DEFAULT_BATCH_SIZE, RescoreOptions, RescoreReport, rescore_all};
use serde::{Deserialize, Serialize};

use crate::fs::require_existing;
use crate::{
    ARG_BATCH_SIZE, ARG_DB, ARG_DELAY_MS, ARG_WEIGHTS, CliError, ENV_RESCORE_DB, build_scorer,
    write_json,
};

/// CLI arguments for the `rescore` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rescore",
    long_about = "Recompute the importance score of every article in a \
                 SQLite article database and write it back. Updates that \
                 fail are reported and make the command exit non-zero.",
    about = "Rescore every stored article"
)]
#[ortho_config(prefix = "PULSE")]
pub(crate) struct RescoreArgs {
    /// Path to the SQLite article database.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// Path to a JSON scoring config replacing the built-in tables.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Articles processed per batch.
    #[arg(long = ARG_BATCH_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) batch_size: Option<usize>,
    /// Pause between batches in milliseconds.
    #[arg(long = ARG_DELAY_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) delay_ms: Option<u64>,
}

impl RescoreArgs {
    pub(crate) fn into_config(self) -> Result<RescoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RescoreConfig::try_from(merged)
    }
}

/// Resolved `rescore` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RescoreConfig {
    /// Path to the article database.
    pub(crate) db: Utf8PathBuf,
    /// Optional scoring config.
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Batching behaviour.
    pub(crate) options: RescoreOptions,
}

impl RescoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.db, ARG_DB)?;
        if let Some(weights) = &self.weights {
            require_existing(weights, ARG_WEIGHTS)?;
        }
        Ok(())
    }
}

impl TryFrom<RescoreArgs> for RescoreConfig {
    type Error = CliError;

    fn try_from(args: RescoreArgs) -> Result<Self, Self::Error> {
        let db = args.db.ok_or(CliError::MissingArgument {
            field: ARG_DB,
            env: ENV_RESCORE_DB,
        })?;
        let options = RescoreOptions {
            batch_size: args.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            delay: args.delay_ms.map(Duration::from_millis),
        };
        Ok(Self {
            db,
            weights: args.weights,
            options,
        })
    }
}

pub(super) fn run_rescore(args: RescoreArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rescore_with(args, &mut stdout)
}

pub(super) fn run_rescore_with(args: RescoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_rescore(&config, Utc::now())?;
    write_json(writer, &report)?;
    ensure_clean(&report)
}

pub(super) fn execute_rescore(
    config: &RescoreConfig,
    now: DateTime<Utc>,
) -> Result<RescoreReport, CliError> {
    config.validate_sources()?;
    let scorer = build_scorer(config.weights.as_deref())?;
    let mut store = SqliteArticleStore::open(config.db.as_std_path())?;
    Ok(rescore_all(&mut store, &scorer, now, config.options)?)
}

pub(super) fn ensure_clean(report: &RescoreReport) -> Result<(), CliError> {
    if report.is_clean() {
        return Ok(());
    }
    warn!("{} of {} score updates failed", report.failed, report.total());
    Err(CliError::RescoreIncomplete {
        failed: report.failed,
        total: report.total(),
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RescoreConfig, CliError> {
    let merged = RescoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RescoreConfig::try_from(merged)
}
