//! SQLite-backed article store.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Row, Transaction};
use thiserror::Error;

use crate::{Article, PriorityTag};

use super::ArticleStore;

const CREATE_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    summary TEXT,
    published_date TEXT NOT NULL,
    source TEXT,
    categories TEXT NOT NULL,
    language TEXT NOT NULL,
    importance_score REAL
)";

const SELECT_COLUMNS: &str = "SELECT id, title, summary, published_date, source, categories, \
     language, importance_score FROM articles";

/// Error raised when reading or writing the article database.
#[derive(Debug, Error)]
pub enum SqliteArticleStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the `articles` table failed.
    #[error("failed to create articles table: {source}")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Writing an article row failed.
    #[error("failed to persist article {id}: {source}")]
    PersistRow {
        /// Identifier of the article being persisted.
        id: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Serialising an article's categories failed.
    #[error("failed to serialise categories for article {id}: {source}")]
    SerializeCategories {
        /// Identifier of the article.
        id: String,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A stored category payload was not a JSON array of known tags.
    #[error("failed to parse categories for article {id}: {source}")]
    InvalidCategories {
        /// Identifier of the article whose categories failed to parse.
        id: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A stored publication date was not RFC 3339.
    #[error("failed to parse publication date {raw:?} for article {id}: {source}")]
    InvalidPublishedDate {
        /// Identifier of the affected article.
        id: String,
        /// Raw column value.
        raw: String,
        /// Parser failure.
        #[source]
        source: chrono::ParseError,
    },
    /// A score update targeted an identifier that is not stored.
    #[error("article {id} does not exist")]
    UnknownArticle {
        /// Requested identifier.
        id: String,
    },
    /// Generic SQLite error when reading rows or managing transactions.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Article store persisted in a single SQLite table.
pub struct SqliteArticleStore {
    connection: Connection,
    path: Option<PathBuf>,
}

impl fmt::Debug for SqliteArticleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteArticleStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteArticleStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open<P>(path: P) -> Result<Self, SqliteArticleStoreError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteArticleStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_connection(connection, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, SqliteArticleStoreError> {
        let connection = Connection::open_in_memory().map_err(|source| {
            SqliteArticleStoreError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            }
        })?;
        Self::from_connection(connection, None)
    }

    fn from_connection(
        connection: Connection,
        path: Option<PathBuf>,
    ) -> Result<Self, SqliteArticleStoreError> {
        connection
            .execute(CREATE_SCHEMA_SQL, [])
            .map_err(|source| SqliteArticleStoreError::CreateSchema { source })?;
        Ok(Self { connection, path })
    }

    /// Insert or replace `articles` in a single transaction.
    pub fn insert_articles(&mut self, articles: &[Article]) -> Result<(), SqliteArticleStoreError> {
        let transaction = self.connection.transaction()?;
        persist_rows(&transaction, articles)?;
        transaction.commit()?;
        Ok(())
    }

    fn query_articles(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Article>, SqliteArticleStoreError> {
        let mut statement = self.connection.prepare(sql)?;
        let mut rows = statement.query(params)?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(article_from_row(row)?);
        }
        Ok(articles)
    }
}

impl ArticleStore for SqliteArticleStore {
    type Error = SqliteArticleStoreError;

    fn load_articles(&self) -> Result<Vec<Article>, Self::Error> {
        self.query_articles(&format!("{SELECT_COLUMNS} ORDER BY id"), [])
    }

    fn load_partition(&self, language: &str) -> Result<Vec<Article>, Self::Error> {
        self.query_articles(
            &format!("{SELECT_COLUMNS} WHERE language = ?1 ORDER BY id"),
            [language],
        )
    }

    fn update_score(&mut self, id: &str, total: f64) -> Result<(), Self::Error> {
        let changed = self
            .connection
            .execute(
                "UPDATE articles SET importance_score = ?1 WHERE id = ?2",
                (total, id),
            )
            .map_err(|source| SqliteArticleStoreError::PersistRow {
                id: id.to_owned(),
                source,
            })?;
        if changed == 0 {
            return Err(SqliteArticleStoreError::UnknownArticle { id: id.to_owned() });
        }
        Ok(())
    }
}

fn persist_rows(
    transaction: &Transaction<'_>,
    articles: &[Article],
) -> Result<(), SqliteArticleStoreError> {
    if articles.is_empty() {
        return Ok(());
    }

    let mut statement = transaction.prepare(
        "INSERT OR REPLACE INTO articles
            (id, title, summary, published_date, source, categories, language, importance_score)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    for article in articles {
        let categories = serde_json::to_string(&article.categories).map_err(|source| {
            SqliteArticleStoreError::SerializeCategories {
                id: article.id.clone(),
                source,
            }
        })?;
        statement
            .execute((
                article.id.as_str(),
                article.title.as_str(),
                article.summary.as_deref(),
                format_timestamp(article.published_date),
                article.source.as_deref(),
                categories,
                article.language.as_str(),
                article.importance_score,
            ))
            .map_err(|source| SqliteArticleStoreError::PersistRow {
                id: article.id.clone(),
                source,
            })?;
    }

    Ok(())
}

fn article_from_row(row: &Row<'_>) -> Result<Article, SqliteArticleStoreError> {
    let id: String = row.get(0)?;
    let raw_date: String = row.get(3)?;
    let raw_categories: String = row.get(5)?;

    let published_date = match DateTime::parse_from_rfc3339(&raw_date) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(source) => {
            return Err(SqliteArticleStoreError::InvalidPublishedDate {
                id,
                raw: raw_date,
                source,
            });
        }
    };
    let categories: BTreeSet<PriorityTag> = match serde_json::from_str(&raw_categories) {
        Ok(parsed) => parsed,
        Err(source) => return Err(SqliteArticleStoreError::InvalidCategories { id, source }),
    };

    Ok(Article {
        title: row.get(1)?,
        summary: row.get(2)?,
        published_date,
        source: row.get(4)?,
        categories,
        language: row.get(6)?,
        importance_score: row.get(7)?,
        id,
    })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
