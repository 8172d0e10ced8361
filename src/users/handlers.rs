use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, HeaderValue},
    routing::{delete, get, post, put},
    Json, Router,
};
use bytes::Bytes;
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    CheckEmailParams, LoginRequest, SignupRequest, UpdatePasswordRequest, UpdateUserRequest,
    UserDto,
};
use super::extractors::AuthUser;
use super::jwt::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use super::service;
use crate::error::ApiError;
use crate::response::ResponseDto;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
        .route("/users/reissue", post(reissue))
        .route("/users/logout", post(logout))
        .route("/users/email-check", get(check_email))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(soft_delete_user),
        )
        .route("/users/:id/password", put(update_password))
        .route("/users/:id/hard", delete(hard_delete_user))
}

#[instrument(skip(state, payload))]
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<ResponseDto<()>>, ApiError> {
    service::signup(&state, payload).await?;
    Ok(Json(ResponseDto::ok_empty("signup success")))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<ResponseDto<()>>), ApiError> {
    let pair = service::login(&state, payload).await?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_TOKEN_HEADER.clone(), header_value(&pair.access_token)?);
    headers.insert(
        REFRESH_TOKEN_HEADER.clone(),
        header_value(&pair.refresh_token)?,
    );
    Ok((headers, Json(ResponseDto::ok_empty("login success"))))
}

/// Accepts the refresh token in the `REFRESHTOKEN` request header and
/// returns a new access token header only; the refresh token is not
/// rotated.
#[instrument(skip(state, headers))]
async fn reissue(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<ResponseDto<()>>), ApiError> {
    let refresh_token = headers
        .get(&REFRESH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::ExpiredOrInvalidToken)?;

    let access_token = service::reissue_token(&state, refresh_token).await?;

    let mut out = HeaderMap::new();
    out.insert(ACCESS_TOKEN_HEADER.clone(), header_value(&access_token)?);
    Ok((out, Json(ResponseDto::ok_empty("token reissued"))))
}

#[instrument(skip(state))]
async fn logout(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ResponseDto<()>>, ApiError> {
    service::logout(&state, caller).await?;
    Ok(Json(ResponseDto::ok_empty("logout success")))
}

#[instrument(skip(state))]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResponseDto<UserDto>>, ApiError> {
    let user = service::get_user(&state, id).await?;
    Ok(Json(ResponseDto::ok("user found", user)))
}

/// Multipart update: a `nickname` text part plus an optional `image` file
/// part. A missing image keeps the stored URL unchanged.
#[instrument(skip(state, multipart))]
async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ResponseDto<()>>, ApiError> {
    let mut nickname = String::new();
    let mut image: Option<(Bytes, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("nickname") => {
                nickname = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
            }
            Some("image") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let body = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
                image = Some((body, content_type));
            }
            _ => {}
        }
    }

    service::update_user(&state, id, caller, UpdateUserRequest { nickname }, image).await?;
    Ok(Json(ResponseDto::ok_empty("profile update success")))
}

#[instrument(skip(state, payload))]
async fn update_password(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<ResponseDto<()>>, ApiError> {
    service::update_password(&state, id, caller, payload).await?;
    Ok(Json(ResponseDto::ok_empty("password change success")))
}

#[instrument(skip(state))]
async fn soft_delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResponseDto<()>>, ApiError> {
    service::soft_delete_user(&state, id, caller).await?;
    Ok(Json(ResponseDto::ok_empty("account deleted")))
}

#[instrument(skip(state))]
async fn hard_delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResponseDto<()>>, ApiError> {
    service::hard_delete_user(&state, id, caller).await?;
    Ok(Json(ResponseDto::ok_empty("account permanently deleted")))
}

#[instrument(skip(state))]
async fn check_email(
    State(state): State<AppState>,
    Query(params): Query<CheckEmailParams>,
) -> Result<Json<ResponseDto<bool>>, ApiError> {
    service::check_email(&state, &params.email).await?;
    Ok(Json(ResponseDto::ok("email is available", true)))
}

fn header_value(token: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(token)
        .map_err(|_| ApiError::Internal(anyhow::anyhow!("token is not a valid header value")))
}
