use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::User;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Editable profile fields; the image travels as a separate multipart part.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub nickname: String,
}

/// Request body for a password change.
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub check_new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckEmailParams {
    pub email: String,
}

/// Public part of the user returned to clients.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub kakao_id: Option<i64>,
    pub naver_id: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            profile_image: user.profile_image,
            kakao_id: user.kakao_id,
            naver_id: user.naver_id,
        }
    }
}

/// Freshly issued access + refresh pair, attached to response headers.
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn user_dto_drops_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            password_hash: "hash".into(),
            nickname: "nick1".into(),
            profile_image: Some("https://cdn.example.com/p.png".into()),
            kakao_id: Some(7),
            naver_id: None,
            is_deleted: false,
            created_at: OffsetDateTime::now_utc(),
        };
        let dto = UserDto::from(user);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["nickname"], "nick1");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("is_deleted").is_none());
    }
}
