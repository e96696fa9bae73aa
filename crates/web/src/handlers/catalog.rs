//! Public lookup lists: districts, categories, seasons.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/districts
pub async fn districts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let districts = state.client.list_districts().await?;
    Ok(Json(DataResponse { data: districts }))
}

/// GET /api/v1/categories
pub async fn categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.client.list_categories().await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/seasons
pub async fn seasons(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let seasons = state.client.list_seasons().await?;
    Ok(Json(DataResponse { data: seasons }))
}

/// GET /api/v1/seasons/real-time
pub async fn real_time_seasons(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let seasons = state.client.real_time_seasons().await?;
    Ok(Json(DataResponse { data: seasons }))
}
