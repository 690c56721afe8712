//! Serialisable scoring tables.
//!
//! [`ScoringConfig`] mirrors the keyword, source and decay tables as plain
//! data so operators can tune them from a JSON file. Every field falls back
//! to the built-in defaults when omitted. Validation happens when the config
//! is turned into an [`ImportanceScorer`](crate::ImportanceScorer).
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fs;
use std::str::FromStr;

use camino::Utf8Path;
use log::debug;
use pulse_core::PriorityTag;
use serde::{Deserialize, Serialize};

use crate::decay::{DEFAULT_DECAY_FLOOR, DEFAULT_DECAY_TIERS, DecayTier, TimeDecay};
use crate::keywords::{DEFAULT_GROUPS, KeywordGroup, KeywordTable};
use crate::sources::{DEFAULT_SOURCES, SourceWeight, SourceWeights};
use crate::ScoringConfigError;

/// One keyword group as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGroupConfig {
    /// Group name used in diagnostics.
    pub name: String,
    /// Largest contribution of the group.
    pub max: f64,
    /// Keywords matched case-insensitively.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Weighting for one source as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceWeightConfig {
    /// Base weight of the source.
    pub base: f64,
    /// Multipliers keyed by priority tag name.
    #[serde(default)]
    pub priorities: BTreeMap<String, f64>,
}

/// One decay tier as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayTierConfig {
    /// Inclusive upper bound of the tier in hours.
    pub max_age_hours: u32,
    /// Multiplier applied within the tier.
    pub multiplier: f64,
}

/// Complete set of scoring tables.
///
/// # Examples
/// ```
/// use pulse_scorer::ScoringConfig;
///
/// let config: ScoringConfig =
///     serde_json::from_str(r#"{ "decayFloor": 0.05 }"#).expect("valid config");
/// assert_eq!(config.decay_floor, 0.05);
/// assert_eq!(config.keyword_groups, ScoringConfig::default().keyword_groups);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Keyword groups in evaluation order.
    pub keyword_groups: Vec<KeywordGroupConfig>,
    /// Source weights keyed by source name.
    pub sources: BTreeMap<String, SourceWeightConfig>,
    /// Decay tiers, youngest first.
    pub decay_tiers: Vec<DecayTierConfig>,
    /// Multiplier for articles older than every tier.
    pub decay_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let keyword_groups = DEFAULT_GROUPS
            .iter()
            .map(|&(name, max, keywords)| KeywordGroupConfig {
                name: name.to_owned(),
                max,
                keywords: keywords.iter().map(|keyword| (*keyword).to_owned()).collect(),
            })
            .collect();
        let sources = DEFAULT_SOURCES
            .iter()
            .map(|&(name, base, multipliers)| {
                let priorities = PriorityTag::ALL
                    .into_iter()
                    .zip(multipliers)
                    .map(|(tag, multiplier)| (tag.as_str().to_owned(), multiplier))
                    .collect();
                (name.to_owned(), SourceWeightConfig { base, priorities })
            })
            .collect();
        let decay_tiers = DEFAULT_DECAY_TIERS
            .iter()
            .map(|&(max_age_hours, multiplier)| DecayTierConfig {
                max_age_hours,
                multiplier,
            })
            .collect();
        Self {
            keyword_groups,
            sources,
            decay_tiers,
            decay_floor: DEFAULT_DECAY_FLOOR,
        }
    }
}

impl ScoringConfig {
    pub(crate) fn keyword_table(&self) -> Result<KeywordTable, ScoringConfigError> {
        let groups = self
            .keyword_groups
            .iter()
            .map(|group| KeywordGroup::new(&group.name, &group.keywords, group.max))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(KeywordTable::new(groups))
    }

    pub(crate) fn source_weights(&self) -> Result<SourceWeights, ScoringConfigError> {
        let mut weights = SourceWeights::new();
        for (name, config) in &self.sources {
            let mut weight = SourceWeight::new(name, config.base)?;
            for (raw_tag, multiplier) in &config.priorities {
                let tag = PriorityTag::from_str(raw_tag).map_err(|_| {
                    ScoringConfigError::UnknownPriorityTag {
                        source_name: name.clone(),
                        tag: raw_tag.clone(),
                    }
                })?;
                weight = weight.with_priority(name, tag, *multiplier)?;
            }
            weights.insert(name, weight);
        }
        Ok(weights)
    }

    pub(crate) fn time_decay(&self) -> Result<TimeDecay, ScoringConfigError> {
        let tiers = self
            .decay_tiers
            .iter()
            .map(|tier| DecayTier::new(tier.max_age_hours, tier.multiplier))
            .collect();
        TimeDecay::new(tiers, self.decay_floor)
    }
}

/// Read a [`ScoringConfig`] from a JSON file.
///
/// # Errors
/// Returns [`ScoringConfigError::ReadFile`] when the file cannot be read and
/// [`ScoringConfigError::ParseFile`] when it is not a valid config document.
pub fn load_scoring_config(path: &Utf8Path) -> Result<ScoringConfig, ScoringConfigError> {
    let raw = fs::read_to_string(path.as_std_path()).map_err(|source| {
        ScoringConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let config = serde_json::from_str(&raw).map_err(|source| ScoringConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded scoring config from {path}");
    Ok(config)
}
