//! Property-based tests for the importance scorer.
//!
//! # Invariants tested
//!
//! - **Bounded totals:** every total lies in `0.0..=SCORE_CAP`.
//! - **Determinism:** scoring the same article at the same instant twice
//!   yields identical breakdowns.
//! - **Monotonic decay:** an older article never receives a larger decay
//!   multiplier than a younger one.
//! - **Ranking order:** ranked output is sorted and never exceeds the limit.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use pulse_core::{Article, PriorityTag, SCORE_CAP, ScoreBreakdown, Scorer};
use pulse_scorer::{ImportanceScorer, RankedArticle, TimeDecay, rank};

const SOURCES: [&str; 4] = ["TechCrunch", "Wired", "Unknown Blog", "the verge"];
const WORDS: [&str; 10] = [
    "ai",
    "strategy",
    "guide",
    "weather",
    "LLM",
    "cost",
    "football",
    "deploy",
    "Neural Network",
    "recipe",
];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("valid evaluation instant"))
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS.to_vec()), 0..8)
        .prop_map(|words| words.join(" "))
}

fn article_strategy() -> impl Strategy<Value = Article> {
    (
        text_strategy(),
        prop::option::of(text_strategy()),
        prop::option::of(prop::sample::select(SOURCES.to_vec())),
        prop::collection::btree_set(prop::sample::select(PriorityTag::ALL.to_vec()), 0..4),
        -48_i64..24 * 60,
    )
        .prop_map(|(title, summary, source, categories, age_hours)| {
            let published = now() - TimeDelta::hours(age_hours);
            let mut article = Article::new("prop", title, published);
            article.summary = summary;
            article.source = source.map(str::to_owned);
            article.categories = categories;
            article
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: totals stay within the score range.
    #[test]
    fn totals_are_bounded(article in article_strategy()) {
        let breakdown = ImportanceScorer::default().score_at(&article, now());
        prop_assert!(breakdown.total.is_finite());
        prop_assert!((0.0..=SCORE_CAP).contains(&breakdown.total));
        prop_assert!((0.0..=1.0).contains(&breakdown.keyword_score));
    }

    /// Property: scoring is a pure function of the article and instant.
    #[test]
    fn scoring_is_deterministic(article in article_strategy()) {
        let scorer = ImportanceScorer::default();
        prop_assert_eq!(scorer.score_at(&article, now()), scorer.score_at(&article, now()));
    }

    /// Property: decay never increases with age.
    #[test]
    fn decay_is_monotonic(first in 0_i64..24 * 60, second in 0_i64..24 * 60) {
        let decay = TimeDecay::default();
        let (younger, older) = if first <= second { (first, second) } else { (second, first) };
        prop_assert!(
            decay.multiplier(TimeDelta::hours(younger)) >= decay.multiplier(TimeDelta::hours(older))
        );
    }

    /// Property: ranking respects the limit and sorts by total.
    #[test]
    fn ranking_is_sorted(
        totals in prop::collection::vec(0.0_f64..=SCORE_CAP, 0..20),
        limit in 0_usize..25,
    ) {
        let entries: Vec<RankedArticle> = totals
            .iter()
            .enumerate()
            .map(|(index, total)| RankedArticle {
                article: Article::new(format!("r-{index}"), "Title", now()),
                breakdown: ScoreBreakdown { total: *total, ..ScoreBreakdown::default() },
            })
            .collect();
        let ranked = rank(entries, limit);
        prop_assert!(ranked.len() <= limit);
        prop_assert!(ranked.len() <= totals.len());
        for pair in ranked.windows(2) {
            if let [first, second] = pair {
                prop_assert!(first.breakdown.total >= second.breakdown.total);
            }
        }
    }
}
