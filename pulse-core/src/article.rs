//! News articles as seen by the scorer.
//!
//! External payloads arrive as an [`ArticleRecord`] with every field
//! optional. Converting into an [`Article`] is the one place where input is
//! validated; once an `Article` exists the scorer can rely on its title and
//! publication date being present.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::PriorityTag;

/// Partition assigned to articles that do not declare a language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A validated news article.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pulse_core::{Article, PriorityTag};
///
/// let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let article = Article::new("a-1", "LLM adoption in the enterprise", published)
///     .with_source("TechCrunch")
///     .with_category(PriorityTag::Business);
/// assert_eq!(article.language, "en");
/// assert!(article.categories.contains(&PriorityTag::Business));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", try_from = "ArticleRecord")
)]
pub struct Article {
    /// Identifier, unique within a store.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Optional teaser or abstract.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub summary: Option<String>,
    /// Publication instant.
    pub published_date: DateTime<Utc>,
    /// Publisher name as scraped.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub source: Option<String>,
    /// Priority tags attached by the ingestion pipeline.
    pub categories: BTreeSet<PriorityTag>,
    /// Lowercase language code used as the ranking partition.
    pub language: String,
    /// Last persisted importance score. Derived data, never authoritative.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub importance_score: Option<f64>,
}

impl Article {
    /// Construct an article with the required fields and neutral defaults.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        published_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: None,
            published_date,
            source: None,
            categories: BTreeSet::new(),
            language: DEFAULT_LANGUAGE.to_owned(),
            importance_score: None,
        }
    }

    /// Attach a summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attach a source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a priority tag.
    #[must_use]
    pub fn with_category(mut self, tag: PriorityTag) -> Self {
        self.categories.insert(tag);
        self
    }

    /// Move the article into another language partition.
    #[must_use]
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = normalise_language(language);
        self
    }

    /// Age of the article at `now`. Future-dated articles have zero age.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeDelta, TimeZone, Utc};
    /// use pulse_core::Article;
    ///
    /// let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let article = Article::new("a-1", "Title", published);
    /// let now = published + TimeDelta::hours(3);
    /// assert_eq!(article.age_at(now), TimeDelta::hours(3));
    /// assert_eq!(article.age_at(published - TimeDelta::hours(1)), TimeDelta::zero());
    /// ```
    pub fn age_at(&self, now: DateTime<Utc>) -> TimeDelta {
        now.signed_duration_since(self.published_date)
            .max(TimeDelta::zero())
    }
}

/// Unvalidated article payload as produced by scrapers and HTTP callers.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ArticleRecord {
    /// Identifier.
    pub id: Option<String>,
    /// Headline.
    pub title: Option<String>,
    /// Teaser or abstract.
    pub summary: Option<String>,
    /// RFC 3339 publication timestamp.
    pub published_date: Option<String>,
    /// Publisher name.
    pub source: Option<String>,
    /// Raw priority tags. Accepts a single string or a list.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "contentPriority", deserialize_with = "one_or_many")
    )]
    pub categories: Vec<String>,
    /// Language code.
    pub language: Option<String>,
    /// Previously persisted score.
    pub importance_score: Option<f64>,
}

impl ArticleRecord {
    /// Use `id` when the record carries no usable identifier.
    ///
    /// Scoring a standalone payload needs only a title and a publication
    /// date. Stores still go through the strict conversion.
    ///
    /// # Examples
    /// ```
    /// use pulse_core::{Article, ArticleRecord};
    ///
    /// let record = ArticleRecord {
    ///     title: Some("Generative AI guide".into()),
    ///     published_date: Some("2023-12-31T13:00:00Z".into()),
    ///     ..ArticleRecord::default()
    /// };
    /// let article = Article::try_from(record.with_fallback_id("draft")).unwrap();
    /// assert_eq!(article.id, "draft");
    /// ```
    #[must_use]
    pub fn with_fallback_id(mut self, id: &str) -> Self {
        self.id = non_blank(self.id.take()).or_else(|| Some(id.to_owned()));
        self
    }
}

/// Errors returned when an [`ArticleRecord`] cannot become an [`Article`].
#[derive(Debug, Error, PartialEq)]
pub enum ArticleError {
    /// The record had no usable identifier.
    #[error("article record is missing an id")]
    MissingId,
    /// The record had no usable title.
    #[error("article {id} is missing a title")]
    MissingTitle {
        /// Identifier of the offending record.
        id: String,
    },
    /// The record had no publication timestamp.
    #[error("article {id} is missing a publication date")]
    MissingPublishedDate {
        /// Identifier of the offending record.
        id: String,
    },
    /// The publication timestamp was not RFC 3339.
    #[error("article {id} has an invalid publication date {raw:?}")]
    InvalidPublishedDate {
        /// Identifier of the offending record.
        id: String,
        /// Timestamp as received.
        raw: String,
        /// Parser failure.
        #[source]
        source: chrono::ParseError,
    },
}

impl TryFrom<ArticleRecord> for Article {
    type Error = ArticleError;

    fn try_from(record: ArticleRecord) -> Result<Self, Self::Error> {
        let id = non_blank(record.id).ok_or(ArticleError::MissingId)?;
        let Some(title) = non_blank(record.title) else {
            return Err(ArticleError::MissingTitle { id });
        };
        let Some(raw_date) = non_blank(record.published_date) else {
            return Err(ArticleError::MissingPublishedDate { id });
        };
        let published_date = match DateTime::parse_from_rfc3339(&raw_date) {
            Ok(parsed) => parsed.with_timezone(&Utc),
            Err(source) => {
                return Err(ArticleError::InvalidPublishedDate {
                    id,
                    raw: raw_date,
                    source,
                });
            }
        };
        let categories = parse_categories(&id, &record.categories);
        let language = record
            .language
            .as_deref()
            .map_or_else(|| DEFAULT_LANGUAGE.to_owned(), normalise_language);

        Ok(Self {
            id,
            title,
            summary: non_blank(record.summary),
            published_date,
            source: non_blank(record.source),
            categories,
            language,
            importance_score: record.importance_score.filter(|score| score.is_finite()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn normalise_language(language: &str) -> String {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        DEFAULT_LANGUAGE.to_owned()
    } else {
        trimmed.to_lowercase()
    }
}

fn parse_categories(id: &str, raw: &[String]) -> BTreeSet<PriorityTag> {
    raw.iter()
        .filter_map(|tag| match PriorityTag::from_str(tag) {
            Ok(parsed) => Some(parsed),
            Err(reason) => {
                warn!("dropping category on article {id}: {reason}");
                None
            }
        })
        .collect()
}

#[cfg(feature = "serde")]
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Missing(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(tag) => vec![tag],
        OneOrMany::Many(tags) => tags,
        OneOrMany::Missing(()) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn record() -> ArticleRecord {
        ArticleRecord {
            id: Some("a-1".into()),
            title: Some("  Enterprise AI strategy  ".into()),
            summary: Some("A guide to deploying LLMs".into()),
            published_date: Some("2023-12-31T13:00:00Z".into()),
            source: Some("TechCrunch".into()),
            categories: vec!["business".into(), "Implementation".into()],
            language: Some("EN".into()),
            importance_score: None,
        }
    }

    #[rstest]
    fn converts_complete_record(record: ArticleRecord) {
        let article = Article::try_from(record).expect("valid record");
        assert_eq!(article.title, "Enterprise AI strategy");
        assert_eq!(
            article.published_date,
            Utc.with_ymd_and_hms(2023, 12, 31, 13, 0, 0).unwrap()
        );
        assert_eq!(article.language, "en");
        assert_eq!(
            article.categories,
            BTreeSet::from([PriorityTag::Business, PriorityTag::Implementation])
        );
    }

    #[rstest]
    fn blank_title_is_rejected(mut record: ArticleRecord) {
        record.title = Some("   ".into());
        let err = Article::try_from(record).expect_err("blank title");
        assert_eq!(err, ArticleError::MissingTitle { id: "a-1".into() });
    }

    #[rstest]
    fn missing_id_is_rejected(mut record: ArticleRecord) {
        record.id = None;
        assert_eq!(Article::try_from(record), Err(ArticleError::MissingId));
    }

    #[rstest]
    #[case(None, "fallback")]
    #[case(Some("  "), "fallback")]
    #[case(Some("a-7"), "a-7")]
    fn fallback_id_fills_only_missing_ids(
        mut record: ArticleRecord,
        #[case] id: Option<&str>,
        #[case] expected: &str,
    ) {
        record.id = id.map(str::to_owned);
        let article = Article::try_from(record.with_fallback_id("fallback")).expect("valid record");
        assert_eq!(article.id, expected);
    }

    #[rstest]
    fn missing_date_is_rejected(mut record: ArticleRecord) {
        record.published_date = None;
        let err = Article::try_from(record).expect_err("missing date");
        assert!(matches!(err, ArticleError::MissingPublishedDate { .. }));
    }

    #[rstest]
    fn malformed_date_is_rejected(mut record: ArticleRecord) {
        record.published_date = Some("yesterday".into());
        let err = Article::try_from(record).expect_err("bad date");
        assert!(matches!(
            err,
            ArticleError::InvalidPublishedDate { ref raw, .. } if raw == "yesterday"
        ));
    }

    #[rstest]
    fn unknown_categories_are_dropped(mut record: ArticleRecord) {
        record.categories = vec!["gossip".into(), "industry".into()];
        let article = Article::try_from(record).expect("valid record");
        assert_eq!(article.categories, BTreeSet::from([PriorityTag::Industry]));
    }

    #[rstest]
    fn optional_fields_default(mut record: ArticleRecord) {
        record.summary = Some(String::new());
        record.source = None;
        record.language = None;
        record.categories = Vec::new();
        let article = Article::try_from(record).expect("valid record");
        assert!(article.summary.is_none());
        assert!(article.source.is_none());
        assert!(article.categories.is_empty());
        assert_eq!(article.language, DEFAULT_LANGUAGE);
    }

    #[rstest]
    fn non_finite_persisted_score_is_discarded(mut record: ArticleRecord) {
        record.importance_score = Some(f64::NAN);
        let article = Article::try_from(record).expect("valid record");
        assert!(article.importance_score.is_none());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(r#""contentPriority":"business""#)]
    #[case(r#""categories":["business"]"#)]
    fn deserialises_wire_shape(#[case] categories: &str) {
        let json = format!(
            r#"{{"id":"a-9","title":"AI","publishedDate":"2024-01-01T00:00:00Z",{categories}}}"#
        );
        let article: Article = serde_json::from_str(&json).expect("wire payload");
        assert_eq!(article.id, "a-9");
        assert_eq!(article.categories, BTreeSet::from([PriorityTag::Business]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialising_invalid_payload_fails() {
        let json = r#"{"id":"a-9","publishedDate":"2024-01-01T00:00:00Z"}"#;
        let result: Result<Article, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
