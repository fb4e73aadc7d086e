//! PostgreSQL-backed answer store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::{AnswerStore, DenormalizedAnswer, Result, StoreError};

/// PostgreSQL answer store implementation.
#[derive(Clone)]
pub struct PostgresAnswerStore {
    pool: PgPool,
}

impl PostgresAnswerStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the given server and database.
    pub async fn connect(connection_string: &str, database: &str) -> Result<Self> {
        let url = format!("{}/{}", connection_string.trim_end_matches('/'), database);
        let pool = PgPool::connect(&url).await?;
        Ok(Self { pool })
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the answers table DDL.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::raw_sql(include_str!("../../../migrations/001_create_answers_table.sql"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_answer(row: &PgRow) -> std::result::Result<DenormalizedAnswer, sqlx::Error> {
        Ok(DenormalizedAnswer {
            id: row.try_get("id")?,
            content: row.try_get("content")?,
            author: row.try_get("author")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            discussion: row.try_get("discussion")?,
        })
    }
}

#[async_trait]
impl AnswerStore for PostgresAnswerStore {
    #[tracing::instrument(skip(self, answer), fields(id = %answer.id))]
    async fn insert(&self, answer: DenormalizedAnswer) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO answers (id, content, author, created_at, discussion)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&answer.id)
        .bind(&answer.content)
        .bind(&answer.author)
        .bind(answer.created_at)
        .bind(&answer.discussion)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                metrics::counter!("read_store_answers_inserted").increment(1);
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateKey(answer.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<DenormalizedAnswer>> {
        let row = sqlx::query(
            "SELECT id, content, author, created_at, discussion FROM answers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_answer).transpose().map_err(Into::into)
    }

    async fn list(&self, limit: usize) -> Result<Vec<DenormalizedAnswer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, author, created_at, discussion
            FROM answers
            ORDER BY seq
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(Self::row_to_answer)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}
