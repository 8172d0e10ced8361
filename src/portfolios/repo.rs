use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Portfolio {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub intro: String,
    pub tech_stack: String,
    pub category: String,
    pub filter: String,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
}

const PORTFOLIO_COLUMNS: &str =
    "id, user_id, title, intro, tech_stack, category, filter, image_url, created_at";

impl Portfolio {
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: i64,
    ) -> Result<Option<Portfolio>, sqlx::Error> {
        sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Cursor window for slice pagination: rows below the cursor, newest
    /// first, `size + 1` rows so the caller can detect a following page.
    pub async fn list_before(
        db: impl PgExecutor<'_>,
        cursor: i64,
        size: i64,
        category: Option<&str>,
        filter: Option<&str>,
    ) -> Result<Vec<Portfolio>, sqlx::Error> {
        sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios \
             WHERE id < $1 \
               AND ($3::text IS NULL OR category = $3) \
               AND ($4::text IS NULL OR filter = $4) \
             ORDER BY id DESC \
             LIMIT $2"
        ))
        .bind(cursor)
        .bind(size + 1)
        .bind(category)
        .bind(filter)
        .fetch_all(db)
        .await
    }

    pub async fn search(
        db: impl PgExecutor<'_>,
        keyword: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Portfolio>, sqlx::Error> {
        sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios \
             WHERE title ILIKE '%' || $1 || '%' OR intro ILIKE '%' || $1 || '%' \
             ORDER BY id DESC \
             LIMIT $2 OFFSET $3"
        ))
        .bind(keyword)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    pub async fn count_search(
        db: impl PgExecutor<'_>,
        keyword: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM portfolios \
             WHERE title ILIKE '%' || $1 || '%' OR intro ILIKE '%' || $1 || '%'",
        )
        .bind(keyword)
        .fetch_one(db)
        .await
    }

    pub async fn list_by_user(
        db: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Vec<Portfolio>, sqlx::Error> {
        sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios \
             WHERE user_id = $1 \
             ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Highest id among matching portfolios, or None when there are none.
    pub async fn last_id(
        db: impl PgExecutor<'_>,
        category: Option<&str>,
        filter: Option<&str>,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(id) FROM portfolios \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::text IS NULL OR filter = $2)",
        )
        .bind(category)
        .bind(filter)
        .fetch_one(db)
        .await
    }
}
