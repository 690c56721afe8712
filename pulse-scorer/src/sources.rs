//! Per-source weighting with per-priority multipliers.
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use pulse_core::PriorityTag;

use crate::ScoringConfigError;

/// Base weight applied to sources missing from the table.
pub const NEUTRAL_BASE_WEIGHT: f64 = 0.5;

/// Priority multiplier used when no per-tag multiplier is configured.
pub const NEUTRAL_PRIORITY_WEIGHT: f64 = 0.5;

/// Multipliers are listed in `PriorityTag::ALL` order: business, industry,
/// implementation, general.
pub(crate) const DEFAULT_SOURCES: &[(&str, f64, [f64; 4])] = &[
    ("techcrunch", 0.8, [1.0, 0.9, 0.7, 0.5]),
    ("venturebeat", 0.8, [0.9, 1.0, 0.8, 0.5]),
    ("mit technology review", 0.9, [0.8, 0.9, 0.9, 0.6]),
    ("harvard business review", 0.9, [1.0, 0.7, 0.8, 0.5]),
    ("wired", 0.7, [0.7, 0.8, 0.6, 0.5]),
    ("the verge", 0.6, [0.6, 0.8, 0.5, 0.5]),
];

/// Weighting for a single publisher.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceWeight {
    base: f64,
    priorities: BTreeMap<PriorityTag, f64>,
}

impl SourceWeight {
    /// Create a weight with no per-priority multipliers.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::InvalidSourceWeight`] when `base` is
    /// negative or not finite.
    pub fn new(source: &str, base: f64) -> Result<Self, ScoringConfigError> {
        if !is_valid_weight(base) {
            return Err(ScoringConfigError::InvalidSourceWeight {
                source_name: source.to_owned(),
                value: base,
            });
        }
        Ok(Self {
            base,
            priorities: BTreeMap::new(),
        })
    }

    /// Add a multiplier for `tag`, consuming `self` for chaining.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::InvalidPriorityWeight`] when the
    /// multiplier is negative or not finite.
    pub fn with_priority(
        mut self,
        source: &str,
        tag: PriorityTag,
        multiplier: f64,
    ) -> Result<Self, ScoringConfigError> {
        if !is_valid_weight(multiplier) {
            return Err(ScoringConfigError::InvalidPriorityWeight {
                source_name: source.to_owned(),
                tag,
                value: multiplier,
            });
        }
        self.priorities.insert(tag, multiplier);
        Ok(self)
    }

    /// Base weight of the source.
    #[must_use]
    pub const fn base(&self) -> f64 {
        self.base
    }

    /// Multiplier for `tag`, falling back to [`NEUTRAL_PRIORITY_WEIGHT`].
    #[must_use]
    pub fn priority(&self, tag: PriorityTag) -> f64 {
        self.priorities
            .get(&tag)
            .copied()
            .unwrap_or(NEUTRAL_PRIORITY_WEIGHT)
    }

    /// Strongest multiplier among `tags`. Untagged articles count as general.
    fn strongest_priority(&self, tags: &BTreeSet<PriorityTag>) -> f64 {
        if tags.is_empty() {
            return self.priority(PriorityTag::General);
        }
        tags.iter()
            .map(|tag| self.priority(*tag))
            .fold(0.0_f64, f64::max)
    }
}

/// Lookup table from normalised source name to [`SourceWeight`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceWeights {
    sources: BTreeMap<String, SourceWeight>,
}

impl SourceWeights {
    /// Create an empty table; every source is then neutral.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the weight for `source`.
    ///
    /// Names are matched case-insensitively after trimming.
    pub fn insert(&mut self, source: &str, weight: SourceWeight) {
        self.sources.insert(normalise_source(source), weight);
    }

    /// Add a source while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_source(mut self, source: &str, weight: SourceWeight) -> Self {
        self.insert(source, weight);
        self
    }

    /// Weight configured for `source`, if any.
    #[must_use]
    pub fn get(&self, source: &str) -> Option<&SourceWeight> {
        self.sources.get(&normalise_source(source))
    }

    /// Number of configured sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Report whether no sources are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Combined `base × priority` weight for an article.
    ///
    /// Unknown or missing sources yield
    /// `NEUTRAL_BASE_WEIGHT × NEUTRAL_PRIORITY_WEIGHT`.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeSet;
    /// use pulse_scorer::SourceWeights;
    ///
    /// let weights = SourceWeights::default();
    /// assert_eq!(weights.weight_for(Some("Unknown Blog"), &BTreeSet::new()), 0.25);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "the source weight is the product of base and priority multipliers"
    )]
    #[must_use]
    pub fn weight_for(&self, source: Option<&str>, tags: &BTreeSet<PriorityTag>) -> f64 {
        match source.and_then(|name| self.get(name)) {
            Some(weight) => weight.base * weight.strongest_priority(tags),
            None => NEUTRAL_BASE_WEIGHT * NEUTRAL_PRIORITY_WEIGHT,
        }
    }

    pub(crate) fn from_static_table() -> Self {
        let sources = DEFAULT_SOURCES
            .iter()
            .map(|&(name, base, multipliers)| {
                let priorities = PriorityTag::ALL.into_iter().zip(multipliers).collect();
                (normalise_source(name), SourceWeight { base, priorities })
            })
            .collect();
        Self { sources }
    }
}

pub(crate) fn normalise_source(source: &str) -> String {
    source.trim().to_lowercase()
}

const fn is_valid_weight(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
