use axum::extract::FromRef;
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{
    LoginRequest, SignupRequest, TokenPair, UpdatePasswordRequest, UpdateUserRequest, UserDto,
};
use super::jwt::JwtKeys;
use super::password::{hash_password, verify_password};
use super::repo::{RefreshToken, User};
use super::validate::{validate_email, validate_nickname, validate_password};
use crate::error::{unique_violation, ApiError};
use crate::state::AppState;
use crate::storage::object_key;

/// Creates a new active account. No token is issued; the caller logs in
/// separately. Email is intentionally only backstopped by the unique index
/// here, mirroring the nickname-only duplicate check of the update path.
pub async fn signup(state: &AppState, req: SignupRequest) -> Result<(), ApiError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_nickname(&req.nickname)?;

    if User::find_by_nickname(&state.db, &req.nickname)
        .await?
        .is_some()
    {
        return Err(ApiError::DuplicateNickname);
    }

    let password_hash = hash_password(&req.password)?;

    let mut tx = state.db.begin().await?;
    let user = User::create(&mut *tx, &req.email, &password_hash, &req.nickname)
        .await
        .map_err(unique_violation)?;
    tx.commit().await?;

    info!(user_id = %user.id, "user signed up");
    Ok(())
}

pub async fn login(state: &AppState, req: LoginRequest) -> Result<TokenPair, ApiError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if user.is_deleted {
        return Err(ApiError::UserDeleted);
    }
    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::BadPassword);
    }

    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(&user.email, user.id)?;
    let refresh_token = keys.sign_refresh(&user.email, user.id)?;

    let mut tx = state.db.begin().await?;
    RefreshToken::upsert(&mut *tx, user.id, &refresh_token, keys.refresh_expires_at()).await?;
    tx.commit().await?;

    info!(user_id = %user.id, "user logged in");
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

pub async fn get_user(state: &AppState, id: Uuid) -> Result<UserDto, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    Ok(UserDto::from(user))
}

/// Self-service profile update. `caller` must match `target`; there is no
/// admin override. A replaced profile image is uploaded first, and the
/// superseded object is removed best-effort afterwards.
pub async fn update_user(
    state: &AppState,
    target: Uuid,
    caller: Uuid,
    req: UpdateUserRequest,
    image: Option<(Bytes, String)>,
) -> Result<(), ApiError> {
    if caller != target {
        return Err(ApiError::Unauthorized);
    }

    let user = User::find_by_id(&state.db, target)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if req.nickname != user.nickname
        && User::exists_by_nickname(&state.db, &req.nickname).await?
    {
        return Err(ApiError::DuplicateNickname);
    }
    validate_nickname(&req.nickname)?;

    let profile_image = match image {
        None => user.profile_image.clone(),
        Some((body, content_type)) => {
            let key = format!("profiles/{}/{}", user.id, Uuid::new_v4());
            let url = state
                .storage
                .upload_file(&key, body, &content_type)
                .await
                .map_err(ApiError::StorageFailure)?;

            if let Some(old_url) = &user.profile_image {
                if let Some(old_key) = object_key(old_url, &state.config.s3.public_url) {
                    if let Err(e) = state.storage.delete_object(&old_key).await {
                        warn!(error = %e, key = %old_key, "could not delete replaced profile image");
                    }
                }
            }
            Some(url)
        }
    };

    let mut tx = state.db.begin().await?;
    User::update_profile(&mut *tx, target, &req.nickname, profile_image.as_deref())
        .await
        .map_err(unique_violation)?;
    tx.commit().await?;

    info!(user_id = %target, "profile updated");
    Ok(())
}

/// Changes the password and revokes the outstanding refresh token, so a
/// leaked refresh credential dies with the old password.
pub async fn update_password(
    state: &AppState,
    target: Uuid,
    caller: Uuid,
    req: UpdatePasswordRequest,
) -> Result<(), ApiError> {
    if caller != target {
        return Err(ApiError::Unauthorized);
    }

    let user = User::find_by_id(&state.db, target)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if !verify_password(&req.old_password, &user.password_hash)? {
        return Err(ApiError::WrongOldPassword);
    }
    if req.new_password != req.check_new_password {
        return Err(ApiError::PasswordMismatch);
    }
    validate_password(&req.new_password)?;

    let password_hash = hash_password(&req.new_password)?;

    let mut tx = state.db.begin().await?;
    User::update_password(&mut *tx, target, &password_hash).await?;
    RefreshToken::delete_by_user(&mut *tx, target).await?;
    tx.commit().await?;

    info!(user_id = %target, "password changed, refresh token revoked");
    Ok(())
}

/// Soft delete: flags the account and revokes its refresh token. The row
/// stays queryable by id and keeps its email/nickname reserved.
pub async fn soft_delete_user(state: &AppState, target: Uuid, caller: Uuid) -> Result<(), ApiError> {
    if caller != target {
        return Err(ApiError::Unauthorized);
    }

    User::find_by_id(&state.db, target)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let mut tx = state.db.begin().await?;
    User::mark_deleted(&mut *tx, target).await?;
    RefreshToken::delete_by_user(&mut *tx, target).await?;
    tx.commit().await?;

    info!(user_id = %target, "user soft-deleted");
    Ok(())
}

/// Hard delete: irreversible removal. The refresh-token row goes with the
/// user via FK cascade; portfolios and projects are left to their own
/// services.
pub async fn hard_delete_user(state: &AppState, target: Uuid, caller: Uuid) -> Result<(), ApiError> {
    if caller != target {
        return Err(ApiError::Unauthorized);
    }

    let mut tx = state.db.begin().await?;
    User::delete_by_id(&mut *tx, target).await?;
    tx.commit().await?;

    info!(user_id = %target, "user hard-deleted");
    Ok(())
}

/// Explicit logout revokes the caller's refresh token; outstanding access
/// tokens stay valid until they expire on their own.
pub async fn logout(state: &AppState, caller: Uuid) -> Result<(), ApiError> {
    RefreshToken::delete_by_user(&state.db, caller).await?;
    info!(user_id = %caller, "user logged out");
    Ok(())
}

pub async fn check_email(state: &AppState, email: &str) -> Result<(), ApiError> {
    validate_email(email)?;
    if User::exists_by_email(&state.db, email).await? {
        return Err(ApiError::DuplicateEmail);
    }
    Ok(())
}

/// Mints a new access token from a presented refresh token. The refresh
/// token must carry a valid signature, not be expired, and match the row
/// persisted for its user; it is not rotated.
pub async fn reissue_token(state: &AppState, refresh_token: &str) -> Result<String, ApiError> {
    let keys = JwtKeys::from_ref(state);
    let claims = keys
        .verify_refresh(refresh_token)
        .map_err(|_| ApiError::ExpiredOrInvalidToken)?;

    let user = User::find_by_email(&state.db, &claims.sub)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let stored = RefreshToken::find_by_user(&state.db, user.id).await?;
    let valid = matches!(
        &stored,
        Some(row) if row.token == refresh_token && row.expires_at > OffsetDateTime::now_utc()
    );
    if !valid {
        return Err(ApiError::ExpiredOrInvalidToken);
    }

    let access_token = keys.sign_access(&user.email, user.id)?;
    info!(user_id = %user.id, "access token reissued");
    Ok(access_token)
}
