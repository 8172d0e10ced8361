use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::{JwtKeys, TokenKind};
use crate::error::ApiError;

/// Authenticated caller identity, taken from a Bearer access token.
/// Handlers pass it explicitly into the service layer; nothing else reads
/// ambient request context.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::ExpiredOrInvalidToken
        })?;

        if claims.kind != TokenKind::Access {
            return Err(ApiError::ExpiredOrInvalidToken);
        }

        Ok(AuthUser(claims.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn rejects_missing_authorization_header() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(None);
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn rejects_non_bearer_scheme() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Basic dXNlcjpwdw=="));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn accepts_valid_access_token() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let user_id = Uuid::new_v4();
        let token = keys.sign_access("a@b.com", user_id).expect("sign");
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("extract");
        assert_eq!(extracted, user_id);
    }

    #[tokio::test]
    async fn rejects_refresh_token_where_access_is_required() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys
            .sign_refresh("a@b.com", Uuid::new_v4())
            .expect("sign");
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ExpiredOrInvalidToken));
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Bearer not.a.jwt"));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ExpiredOrInvalidToken));
    }
}
