use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::repo::Project;
use crate::error::ApiError;
use crate::response::ResponseDto;
use crate::state::AppState;
use crate::users::extractors::AuthUser;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects/my", get(my_projects))
        .route("/projects/:id", get(get_project))
}

#[instrument(skip(state))]
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResponseDto<Project>>, ApiError> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::ProjectNotFound)?;
    Ok(Json(ResponseDto::ok("project found", project)))
}

#[instrument(skip(state))]
async fn my_projects(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ResponseDto<Vec<Project>>>, ApiError> {
    let rows = Project::list_by_user(&state.db, user_id).await?;
    Ok(Json(ResponseDto::ok("my projects found", rows)))
}
