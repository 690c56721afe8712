//! Top-N ranking within a language partition.
#![forbid(unsafe_code)]

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use log::debug;
use pulse_core::{Article, ArticleStore, DEFAULT_LANGUAGE, ScoreBreakdown, Scorer};
use serde::Serialize;

use crate::RankingError;

/// Entries returned when a query does not set a limit.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Parameters of a top-N query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopQuery {
    /// Language partition to rank.
    pub language: String,
    /// Maximum number of entries returned.
    pub limit: usize,
    /// Only consider articles published at or after this instant.
    pub since: Option<DateTime<Utc>>,
}

impl TopQuery {
    /// Query the `language` partition with the default limit and no window.
    #[must_use]
    pub fn new(language: &str) -> Self {
        Self {
            language: language.trim().to_lowercase(),
            limit: DEFAULT_TOP_LIMIT,
            since: None,
        }
    }

    /// Set the maximum number of entries.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Restrict to articles published at or after `since`.
    #[must_use]
    pub const fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }
}

impl Default for TopQuery {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

/// An article paired with the breakdown it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedArticle {
    /// The ranked article.
    pub article: Article,
    /// Score computed for this query.
    pub breakdown: ScoreBreakdown,
}

fn ranking_order(left: &RankedArticle, right: &RankedArticle) -> Ordering {
    right
        .breakdown
        .total
        .total_cmp(&left.breakdown.total)
        .then_with(|| right.article.published_date.cmp(&left.article.published_date))
        .then_with(|| left.article.id.cmp(&right.article.id))
}

/// Order `scored` by descending total and keep at most `limit` entries.
///
/// Ties are broken by newer publication date, then by ascending id.
#[must_use]
pub fn rank(mut scored: Vec<RankedArticle>, limit: usize) -> Vec<RankedArticle> {
    scored.sort_by(ranking_order);
    scored.truncate(limit);
    scored
}

/// Score the requested partition at `now` and return its top entries.
///
/// # Errors
/// Returns [`RankingError::Load`] when the partition cannot be loaded.
pub fn top_articles<S, C>(
    store: &S,
    scorer: &C,
    query: &TopQuery,
    now: DateTime<Utc>,
) -> Result<Vec<RankedArticle>, RankingError>
where
    S: ArticleStore + ?Sized,
    C: Scorer + ?Sized,
{
    let articles = store
        .load_partition(&query.language)
        .map_err(|source| RankingError::Load {
            language: query.language.clone(),
            source: Box::new(source),
        })?;
    let candidates = articles.len();
    let scored: Vec<RankedArticle> = articles
        .into_iter()
        .filter(|article| query.since.is_none_or(|since| article.published_date >= since))
        .map(|article| {
            let breakdown = scorer.score_at(&article, now);
            RankedArticle { article, breakdown }
        })
        .collect();
    debug!(
        "ranking {} of {candidates} articles in partition {}",
        scored.len(),
        query.language
    );
    Ok(rank(scored, query.limit))
}

#[cfg(test)]
mod tests {
    //! Unit coverage for ranking order and query filters.

    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use pulse_core::test_support::{ConstantScorer, MemoryStore};
    use pulse_core::{Article, ScoreBreakdown};
    use rstest::{fixture, rstest};

    use super::{RankedArticle, TopQuery, rank, top_articles};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn ranked(id: &str, total: f64, published: DateTime<Utc>) -> RankedArticle {
        RankedArticle {
            article: Article::new(id, "Title", published),
            breakdown: ScoreBreakdown {
                total,
                ..ScoreBreakdown::default()
            },
        }
    }

    fn ids(entries: &[RankedArticle]) -> Vec<&str> {
        entries.iter().map(|entry| entry.article.id.as_str()).collect()
    }

    #[rstest]
    fn orders_by_total_then_date_then_id(now: DateTime<Utc>) {
        let earlier = now - TimeDelta::hours(5);
        let entries = vec![
            ranked("c", 10.0, earlier),
            ranked("b", 10.0, now),
            ranked("a", 10.0, earlier),
            ranked("d", 40.0, earlier),
        ];
        assert_eq!(ids(&rank(entries, 10)), vec!["d", "b", "a", "c"]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(10, 3)]
    fn limit_truncates(now: DateTime<Utc>, #[case] limit: usize, #[case] expected: usize) {
        let entries = vec![
            ranked("a", 1.0, now),
            ranked("b", 2.0, now),
            ranked("c", 3.0, now),
        ];
        assert_eq!(rank(entries, limit).len(), expected);
    }

    #[rstest]
    fn query_is_restricted_to_partition_and_window(now: DateTime<Utc>) {
        let store = MemoryStore::with_articles([
            Article::new("fresh", "Title", now - TimeDelta::hours(1)),
            Article::new("stale", "Title", now - TimeDelta::days(3)),
            Article::new("german", "Titel", now).with_language("de"),
        ]);
        let query = TopQuery::new(" EN ").with_since(now - TimeDelta::days(1));
        let top = top_articles(&store, &ConstantScorer(5.0), &query, now).expect("ranking");
        assert_eq!(ids(&top), vec!["fresh"]);
    }

    #[rstest]
    fn window_bound_is_inclusive(now: DateTime<Utc>) {
        let since = now - TimeDelta::days(1);
        let store = MemoryStore::with_articles([Article::new("edge", "Title", since)]);
        let query = TopQuery::default().with_since(since);
        let top = top_articles(&store, &ConstantScorer(5.0), &query, now).expect("ranking");
        assert_eq!(ids(&top), vec!["edge"]);
    }

    #[rstest]
    fn empty_partition_returns_nothing(now: DateTime<Utc>) {
        let store = MemoryStore::default();
        let top = top_articles(&store, &ConstantScorer(5.0), &TopQuery::new("fr"), now)
            .expect("ranking");
        assert!(top.is_empty());
    }
}
