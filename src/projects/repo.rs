use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub term: String,
    pub people: String,
    pub position: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub created_at: OffsetDateTime,
}

// "position" is quoted: it is a SQL keyword.
const PROJECT_COLUMNS: &str =
    "id, user_id, title, term, people, \"position\", description, image_urls, created_at";

impl Project {
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: i64,
    ) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_by_user(
        db: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE user_id = $1 \
             ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}
