//! Aggregated views: home page, map, and search.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tourism_client::map::MapMarker;
use tourism_client::public::DEFAULT_RANDOM_LIMIT;
use tourism_core::error::CoreError;
use tourism_core::models::{Place, Season};
use tourism_core::pagination::{Page, PageParams};
use tourism_core::search::{SearchFilters, SearchParams};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub featured: Vec<Place>,
    pub seasons: Vec<Season>,
    pub open_now: Vec<Place>,
}

/// GET /api/v1/home
///
/// Featured places, seasons in effect today, and places open right now,
/// fetched as one parallel batch.
pub async fn home(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (featured, seasons, open_now) = futures::try_join!(
        state.client.random_places(DEFAULT_RANDOM_LIMIT),
        state.client.real_time_seasons(),
        state.client.currently_open(),
    )?;

    Ok(Json(DataResponse {
        data: HomeView {
            featured,
            seasons,
            open_now,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub maps_api_key: Option<String>,
}

/// GET /api/v1/map
pub async fn map_view(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let markers = state.client.map_markers().await?;

    Ok(Json(DataResponse {
        data: MapView {
            markers,
            maps_api_key: state.config.maps_api_key.clone(),
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct SearchView {
    pub query: String,
    pub results: Page<Place>,
}

/// GET /api/v1/search?q=&category_id=&district_id=&season_id=&day=&time=&page=&per_page=
///
/// At most one facet is applied; see [`SearchFilters::from_params`].
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    Query(page): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let filters = SearchFilters::from_params(&params).map_err(CoreError::Validation)?;
    tracing::debug!(query = filters.query(), facet = ?filters.active_facet(), "Search");

    let results = state.client.search(&filters).await?;

    Ok(Json(DataResponse {
        data: SearchView {
            query: filters.query().to_string(),
            results: page.apply(results),
        },
    }))
}
