use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub kakao_id: Option<i64>,
    pub naver_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, email, password_hash, nickname, profile_image, \
                            kakao_id, naver_id, is_deleted, created_at";

impl User {
    pub async fn find_by_email(
        db: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_nickname(
        db: impl PgExecutor<'_>,
        nickname: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE nickname = $1"
        ))
        .bind(nickname)
        .fetch_optional(db)
        .await
    }

    // Existence checks deliberately do not filter on is_deleted: a
    // soft-deleted account keeps its email and nickname reserved until it
    // is hard-deleted.
    pub async fn exists_by_email(
        db: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(db)
            .await
    }

    pub async fn exists_by_nickname(
        db: impl PgExecutor<'_>,
        nickname: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE nickname = $1)")
            .bind(nickname)
            .fetch_one(db)
            .await
    }

    pub async fn create(
        db: impl PgExecutor<'_>,
        email: &str,
        password_hash: &str,
        nickname: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, nickname) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(nickname)
        .fetch_one(db)
        .await
    }

    pub async fn update_profile(
        db: impl PgExecutor<'_>,
        id: Uuid,
        nickname: &str,
        profile_image: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET nickname = $2, profile_image = $3 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(nickname)
        .bind(profile_image)
        .fetch_one(db)
        .await
    }

    pub async fn update_password(
        db: impl PgExecutor<'_>,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn mark_deleted(db: impl PgExecutor<'_>, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete_by_id(db: impl PgExecutor<'_>, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Server-side refresh-token record, one per user.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl RefreshToken {
    /// Insert or replace the user's refresh token. Login always issues a
    /// fresh pair, so any previous token is superseded.
    pub async fn upsert(
        db: impl PgExecutor<'_>,
        user_id: Uuid,
        token: &str,
        expires_at: OffsetDateTime,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO refresh_tokens (user_id, token, expires_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE \
             SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at, created_at = now()",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find_by_user(
        db: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Option<RefreshToken>, sqlx::Error> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT user_id, token, expires_at, created_at \
             FROM refresh_tokens WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn delete_by_user(db: impl PgExecutor<'_>, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            password_hash: "$argon2id$secret".into(),
            nickname: "nick1".into(),
            profile_image: None,
            kakao_id: None,
            naver_id: None,
            is_deleted: false,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("a@b.com"));
    }
}
