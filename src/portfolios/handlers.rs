use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{CategoryParams, Page, SearchParams, Slice, SliceParams};
use super::repo::Portfolio;
use crate::error::ApiError;
use crate::response::ResponseDto;
use crate::state::AppState;
use crate::users::extractors::AuthUser;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/portfolios", get(list_portfolios))
        .route("/portfolios/search", get(search_portfolios))
        .route("/portfolios/my", get(my_portfolios))
        .route("/portfolios/id", get(next_portfolio_id))
        .route("/portfolios/:id", get(get_portfolio))
}

#[instrument(skip(state))]
async fn get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResponseDto<Portfolio>>, ApiError> {
    let portfolio = Portfolio::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::PortfolioNotFound)?;
    Ok(Json(ResponseDto::ok("portfolio found", portfolio)))
}

/// Slice pagination: newest-first window below the cursor, plus a
/// has-more flag. No total count is computed.
#[instrument(skip(state))]
async fn list_portfolios(
    State(state): State<AppState>,
    Query(params): Query<SliceParams>,
) -> Result<Json<ResponseDto<Slice<Portfolio>>>, ApiError> {
    let cursor = params.last_portfolio_id.unwrap_or(i64::MAX);
    let size = params.size();
    let rows = Portfolio::list_before(
        &state.db,
        cursor,
        size,
        params.category.as_deref(),
        params.filter.as_deref(),
    )
    .await?;
    let slice = Slice::from_rows(rows, size);
    Ok(Json(ResponseDto::ok("portfolios found", slice)))
}

/// Offset-paginated keyword search over title and intro, with totals.
#[instrument(skip(state))]
async fn search_portfolios(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ResponseDto<Page<Portfolio>>>, ApiError> {
    let (page_no, size) = (params.page(), params.size());
    let offset = page_no * size;
    let rows = Portfolio::search(&state.db, &params.keyword, size, offset).await?;
    let total = Portfolio::count_search(&state.db, &params.keyword).await?;
    let page = Page::new(rows, total, page_no, size);
    Ok(Json(ResponseDto::ok("search complete", page)))
}

#[instrument(skip(state))]
async fn my_portfolios(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ResponseDto<Vec<Portfolio>>>, ApiError> {
    let rows = Portfolio::list_by_user(&state.db, user_id).await?;
    Ok(Json(ResponseDto::ok("my portfolios found", rows)))
}

/// Cursor bootstrap for the slice endpoint: one past the highest matching
/// id, so the first slice request returns the newest rows.
#[instrument(skip(state))]
async fn next_portfolio_id(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<ResponseDto<i64>>, ApiError> {
    let last = Portfolio::last_id(
        &state.db,
        params.category.as_deref(),
        params.filter.as_deref(),
    )
    .await?;
    Ok(Json(ResponseDto::ok("last id found", last.unwrap_or(0) + 1)))
}
