//! Grouped keyword tables and relevance matching.
#![forbid(unsafe_code)]

use crate::ScoringConfigError;

/// Ceiling applied to each keyword score after summing group contributions.
pub const KEYWORD_SCORE_CAP: f64 = 1.0;

pub(crate) const DEFAULT_GROUPS: &[(&str, f64, &[&str])] = &[
    (
        "ai",
        0.4,
        &[
            "ai",
            "artificial intelligence",
            "machine learning",
            "llm",
            "generative",
            "gpt",
            "neural network",
            "automation",
        ],
    ),
    (
        "business",
        0.3,
        &[
            "revenue",
            "roi",
            "enterprise",
            "strategy",
            "investment",
            "market",
            "productivity",
            "cost",
        ],
    ),
    (
        "implementation",
        0.3,
        &[
            "how to",
            "guide",
            "case study",
            "deploy",
            "integration",
            "best practice",
            "framework",
            "tutorial",
        ],
    ),
];

/// A named set of keywords contributing up to `max` to the keyword score.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordGroup {
    name: String,
    keywords: Vec<String>,
    max: f64,
}

impl KeywordGroup {
    /// Build a group, lowercasing and de-duplicating its keywords.
    ///
    /// Blank keywords are discarded.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::InvalidGroupMax`] when `max` is negative
    /// or not finite, and [`ScoringConfigError::EmptyGroupName`] when the name
    /// is blank.
    pub fn new<I, S>(name: &str, keywords: I, max: f64) -> Result<Self, ScoringConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trimmed_name = name.trim();
        if trimmed_name.is_empty() {
            return Err(ScoringConfigError::EmptyGroupName);
        }
        if !max.is_finite() || max < 0.0 {
            return Err(ScoringConfigError::InvalidGroupMax {
                group: trimmed_name.to_owned(),
                value: max,
            });
        }
        Ok(Self::from_parts(trimmed_name, keywords, max))
    }

    fn from_parts<I, S>(name: &str, keywords: I, max: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalised: Vec<String> = Vec::new();
        for keyword in keywords {
            let lowered = keyword.as_ref().trim().to_lowercase();
            if !lowered.is_empty() && !normalised.contains(&lowered) {
                normalised.push(lowered);
            }
        }
        Self {
            name: name.to_owned(),
            keywords: normalised,
            max,
        }
    }

    /// Group name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase keywords in insertion order.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Largest contribution this group can make.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Number of this group's keywords occurring in `haystack`.
    ///
    /// `haystack` must already be lowercase.
    fn matches(&self, haystack: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| haystack.contains(keyword.as_str()))
            .count()
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "contribution is the matched fraction of a small keyword list"
    )]
    fn contribution(&self, haystack: &str) -> f64 {
        if self.keywords.is_empty() || haystack.is_empty() {
            return 0.0;
        }
        let matched = self.matches(haystack) as f64;
        let available = self.keywords.len() as f64;
        self.max * matched / available
    }
}

/// Keyword relevance of one article, split by field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeywordScores {
    /// Relevance of the title alone.
    pub title: f64,
    /// Relevance of the summary alone.
    pub summary: f64,
    /// Relevance of the title and summary together.
    pub combined: f64,
}

/// Ordered collection of keyword groups.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTable {
    groups: Vec<KeywordGroup>,
}

impl KeywordTable {
    /// Build a table from validated groups.
    #[must_use]
    pub const fn new(groups: Vec<KeywordGroup>) -> Self {
        Self { groups }
    }

    /// Groups in evaluation order.
    #[must_use]
    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }

    /// Score `title` and `summary` against every group.
    ///
    /// Matching is a case-insensitive substring search. Each of the three
    /// scores is capped at [`KEYWORD_SCORE_CAP`].
    ///
    /// # Examples
    /// ```
    /// use pulse_scorer::KeywordTable;
    ///
    /// let table = KeywordTable::default();
    /// let scores = table.score("A cooking column", None);
    /// assert_eq!(scores.combined, 0.0);
    /// ```
    #[must_use]
    pub fn score(&self, title: &str, summary: Option<&str>) -> KeywordScores {
        let title_text = title.to_lowercase();
        let summary_text = summary.unwrap_or_default().to_lowercase();
        let combined_text = if summary_text.is_empty() {
            title_text.clone()
        } else {
            format!("{title_text} {summary_text}")
        };

        KeywordScores {
            title: self.capped_sum(&title_text),
            summary: self.capped_sum(&summary_text),
            combined: self.capped_sum(&combined_text),
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "adding positive zero normalises the sign of an empty sum"
    )]
    fn capped_sum(&self, haystack: &str) -> f64 {
        let raw: f64 = self
            .groups
            .iter()
            .map(|group| group.contribution(haystack))
            .sum();
        if raw.is_finite() {
            raw.clamp(0.0, KEYWORD_SCORE_CAP) + 0.0
        } else {
            0.0
        }
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_GROUPS
                .iter()
                .map(|&(name, max, keywords)| {
                    KeywordGroup::from_parts(name, keywords.iter().copied(), max)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for keyword matching.

    use rstest::rstest;

    use super::{KEYWORD_SCORE_CAP, KeywordGroup, KeywordTable, ScoringConfigError};

    fn single_group(keywords: &[&str], max: f64) -> KeywordTable {
        let group = KeywordGroup::new("test", keywords.iter().copied(), max).expect("valid group");
        KeywordTable::new(vec![group])
    }

    #[rstest]
    fn contribution_is_proportional_to_matches() {
        let table = single_group(&["alpha", "beta", "gamma", "delta"], 0.4);
        let scores = table.score("Alpha and BETA", None);
        assert_eq!(scores.title, 0.2);
        assert_eq!(scores.combined, 0.2);
        assert_eq!(scores.summary, 0.0);
    }

    #[rstest]
    fn title_and_summary_are_tracked_separately() {
        let table = single_group(&["alpha", "beta"], 0.5);
        let scores = table.score("alpha", Some("beta"));
        assert_eq!(scores.title, 0.25);
        assert_eq!(scores.summary, 0.25);
        assert_eq!(scores.combined, 0.5);
    }

    #[rstest]
    fn keyword_in_both_fields_counts_once() {
        let table = single_group(&["alpha", "beta"], 0.5);
        let scores = table.score("alpha", Some("alpha again"));
        assert_eq!(scores.combined, 0.25);
    }

    #[rstest]
    fn sums_are_capped() {
        let first = KeywordGroup::new("first", ["alpha"], 0.8).expect("valid group");
        let second = KeywordGroup::new("second", ["beta"], 0.8).expect("valid group");
        let table = KeywordTable::new(vec![first, second]);
        let scores = table.score("alpha beta", None);
        assert_eq!(scores.combined, KEYWORD_SCORE_CAP);
    }

    #[rstest]
    fn keywords_are_normalised_and_deduplicated() {
        let group =
            KeywordGroup::new(" mixed ", ["  LLM", "llm", "", "Agents"], 0.3).expect("valid");
        assert_eq!(group.name(), "mixed");
        assert_eq!(group.keywords(), ["llm", "agents"]);
    }

    #[rstest]
    fn empty_group_contributes_nothing() {
        let table = single_group(&[], 0.3);
        assert_eq!(table.score("anything at all", None).combined, 0.0);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn invalid_max_is_rejected(#[case] max: f64) {
        let err = KeywordGroup::new("broken", ["x"], max).expect_err("invalid max");
        assert!(matches!(err, ScoringConfigError::InvalidGroupMax { .. }));
    }

    #[rstest]
    fn blank_group_name_is_rejected() {
        let err = KeywordGroup::new("  ", ["x"], 0.1).expect_err("blank name");
        assert!(matches!(err, ScoringConfigError::EmptyGroupName));
    }

    #[rstest]
    fn default_table_recognises_ai_business_and_howto_terms() {
        let table = KeywordTable::default();
        let scores = table.score(
            "How to deploy generative AI",
            Some("An enterprise strategy guide"),
        );
        assert!(scores.title > 0.0);
        assert!(scores.summary > 0.0);
        assert!(scores.combined >= scores.title.max(scores.summary));
    }
}
