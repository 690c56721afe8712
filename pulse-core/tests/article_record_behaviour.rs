//! Behavioural coverage for validating scraped article records.

use std::cell::RefCell;
use std::collections::BTreeSet;

use pulse_core::{Article, ArticleError, ArticleRecord, PriorityTag};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Record under test.
#[fixture]
pub fn record() -> RefCell<ArticleRecord> {
    RefCell::new(ArticleRecord::default())
}

/// Outcome of validation.
#[fixture]
pub fn outcome() -> RefCell<Option<Result<Article, ArticleError>>> {
    RefCell::new(None)
}

fn populated() -> ArticleRecord {
    ArticleRecord {
        id: Some("rss-17".into()),
        title: Some("How to deploy generative AI".into()),
        summary: Some("A case study in enterprise automation".into()),
        published_date: Some("2023-12-30T12:00:00+00:00".into()),
        source: Some("VentureBeat".into()),
        categories: vec!["implementation".into(), "business".into()],
        language: Some("en".into()),
        importance_score: Some(12.5),
    }
}

#[given("a scraped record with every field populated")]
fn complete_record(record: &RefCell<ArticleRecord>) {
    *record.borrow_mut() = populated();
}

#[given("a scraped record tagged with an unknown category")]
fn unknown_category(record: &RefCell<ArticleRecord>) {
    let mut value = populated();
    value.categories = vec!["celebrity".into(), "industry".into()];
    *record.borrow_mut() = value;
}

#[given("a scraped record without a publication date")]
fn missing_date(record: &RefCell<ArticleRecord>) {
    let mut value = populated();
    value.published_date = None;
    *record.borrow_mut() = value;
}

#[when("I validate the record")]
fn validate(
    record: &RefCell<ArticleRecord>,
    outcome: &RefCell<Option<Result<Article, ArticleError>>>,
) {
    let value = record.borrow().clone();
    *outcome.borrow_mut() = Some(Article::try_from(value));
}

fn produced(outcome: &RefCell<Option<Result<Article, ArticleError>>>) -> Article {
    match outcome.borrow().as_ref() {
        Some(Ok(article)) => article.clone(),
        Some(Err(err)) => panic!("validation should succeed, got {err}"),
        None => panic!("validation outcome must be recorded"),
    }
}

#[then("an article is produced with its categories parsed")]
fn categories_parsed(outcome: &RefCell<Option<Result<Article, ArticleError>>>) {
    let article = produced(outcome);
    assert_eq!(
        article.categories,
        BTreeSet::from([PriorityTag::Business, PriorityTag::Implementation])
    );
    assert_eq!(article.source.as_deref(), Some("VentureBeat"));
    assert_eq!(article.importance_score, Some(12.5));
}

#[then("an article is produced without the unknown category")]
fn unknown_dropped(outcome: &RefCell<Option<Result<Article, ArticleError>>>) {
    let article = produced(outcome);
    assert_eq!(article.categories, BTreeSet::from([PriorityTag::Industry]));
}

#[then("validation fails because the publication date is missing")]
fn date_missing(outcome: &RefCell<Option<Result<Article, ArticleError>>>) {
    match outcome.borrow().as_ref() {
        Some(Err(ArticleError::MissingPublishedDate { id })) => assert_eq!(id, "rss-17"),
        Some(Err(other)) => panic!("unexpected error: {other}"),
        Some(Ok(_)) => panic!("expected validation to fail"),
        None => panic!("validation outcome must be recorded"),
    }
}

#[scenario(path = "tests/features/article_record.feature", index = 0)]
fn complete_record_scenario(
    record: RefCell<ArticleRecord>,
    outcome: RefCell<Option<Result<Article, ArticleError>>>,
) {
    let _ = (record, outcome);
}

#[scenario(path = "tests/features/article_record.feature", index = 1)]
fn unknown_category_scenario(
    record: RefCell<ArticleRecord>,
    outcome: RefCell<Option<Result<Article, ArticleError>>>,
) {
    let _ = (record, outcome);
}

#[scenario(path = "tests/features/article_record.feature", index = 2)]
fn missing_date_scenario(
    record: RefCell<ArticleRecord>,
    outcome: RefCell<Option<Result<Article, ArticleError>>>,
) {
    let _ = (record, outcome);
}
