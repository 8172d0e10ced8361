use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ResponseDto;

/// Application error taxonomy.
///
/// Every variant is an expected, caller-recoverable condition with a fixed
/// status code, except `Database`/`Internal` which render as a generic 500
/// with details going to the log only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("email does not match the required format")]
    EmailFormat,
    #[error("password must be alphanumeric, at least 6 characters, with a letter and a digit")]
    PasswordFormat,
    #[error("nickname must be 1-10 letters, digits or Korean syllables")]
    NicknameFormat,
    #[error("email is already in use")]
    DuplicateEmail,
    #[error("nickname is already in use")]
    DuplicateNickname,
    #[error("user not found")]
    UserNotFound,
    #[error("portfolio not found")]
    PortfolioNotFound,
    #[error("project not found")]
    ProjectNotFound,
    #[error("account has been deleted")]
    UserDeleted,
    #[error("wrong password")]
    BadPassword,
    #[error("current password does not match")]
    WrongOldPassword,
    #[error("new password and confirmation do not match")]
    PasswordMismatch,
    #[error("unauthorized")]
    Unauthorized,
    #[error("expired or invalid token")]
    ExpiredOrInvalidToken,
    #[error("file storage failure")]
    StorageFailure(#[source] anyhow::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use ApiError::*;
        match self {
            EmailFormat | PasswordFormat | NicknameFormat | BadPassword | WrongOldPassword
            | PasswordMismatch => StatusCode::BAD_REQUEST,
            Unauthorized | ExpiredOrInvalidToken => StatusCode::UNAUTHORIZED,
            UserDeleted => StatusCode::FORBIDDEN,
            UserNotFound | PortfolioNotFound | ProjectNotFound => StatusCode::NOT_FOUND,
            DuplicateEmail | DuplicateNickname => StatusCode::CONFLICT,
            StorageFailure(_) => StatusCode::BAD_GATEWAY,
            Database(_) | Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database error");
                "internal server error".to_string()
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                "internal server error".to_string()
            }
            ApiError::StorageFailure(e) => {
                tracing::error!(error = %e, "storage error");
                self.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ResponseDto::<()>::error(status, message))).into_response()
    }
}

/// Maps a unique-index violation from the users table onto the duplicate
/// error it stands for. The read-then-write uniqueness checks race under
/// concurrency; the index is the backstop and its violation surfaces here
/// instead of being retried.
pub fn unique_violation(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db) = &e {
        match db.constraint() {
            Some("users_email_key") => return ApiError::DuplicateEmail,
            Some("users_nickname_key") => return ApiError::DuplicateNickname,
            _ => {}
        }
    }
    ApiError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_request() {
        assert_eq!(ApiError::EmailFormat.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::PasswordFormat.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NicknameFormat.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::PasswordMismatch.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicates_are_conflict() {
        assert_eq!(ApiError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::DuplicateNickname.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::ExpiredOrInvalidToken.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::UserDeleted.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::Internal(anyhow::anyhow!("connection pool exhausted"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_database_errors_pass_through_unique_mapping() {
        let err = unique_violation(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::Database(_)));
    }
}
