//! Public place listings and place detail.
//!
//! Listings are fetched whole from the backend and paginated here.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tourism_client::public::{DEFAULT_NEARBY_RADIUS_KM, DEFAULT_RANDOM_LIMIT};
use tourism_core::geo::Coordinates;
use tourism_core::models::{CategoryKind, DayOfWeek, Place};
use tourism_core::pagination::PageParams;
use tourism_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Offset of the province's local time from UTC (Indochina Time, UTC+7).
const LOCAL_UTC_OFFSET_SECS: i32 = 7 * 60 * 60;

/// Upper bound on the random places a caller may ask for.
const MAX_RANDOM_LIMIT: usize = 24;

/// Current day and clock time in the province.
pub fn local_now() -> (DayOfWeek, chrono::NaiveTime) {
    let now = Utc::now();
    let local = match FixedOffset::east_opt(LOCAL_UTC_OFFSET_SECS) {
        Some(offset) => now.with_timezone(&offset).naive_local(),
        None => now.naive_utc(),
    };
    (DayOfWeek::from(local.weekday()), local.time())
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/v1/places
pub async fn list_places(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let places = state.client.list_places().await?;
    Ok(Json(DataResponse {
        data: page.apply(places),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RandomParams {
    pub limit: Option<usize>,
}

/// GET /api/v1/places/random
pub async fn random_places(
    State(state): State<AppState>,
    Query(params): Query<RandomParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_RANDOM_LIMIT)
        .clamp(1, MAX_RANDOM_LIMIT);
    let places = state.client.random_places(limit).await?;
    Ok(Json(DataResponse { data: places }))
}

/// GET /api/v1/places/currently-open
pub async fn currently_open(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let places = state.client.currently_open().await?;
    Ok(Json(DataResponse { data: places }))
}

async fn list_kind(
    state: &AppState,
    kind: CategoryKind,
    page: PageParams,
) -> AppResult<impl IntoResponse> {
    let places = state.client.list_by_kind(kind).await?;
    Ok(Json(DataResponse {
        data: page.apply(places),
    }))
}

/// GET /api/v1/attractions
pub async fn attractions(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    list_kind(&state, CategoryKind::TouristAttraction, page).await
}

/// GET /api/v1/accommodations
pub async fn accommodations(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    list_kind(&state, CategoryKind::Accommodation, page).await
}

/// GET /api/v1/restaurants
pub async fn restaurants(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    list_kind(&state, CategoryKind::Restaurant, page).await
}

/// GET /api/v1/souvenir-shops
pub async fn souvenir_shops(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    list_kind(&state, CategoryKind::SouvenirShop, page).await
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PlaceDetail {
    #[serde(flatten)]
    pub place: Place,
    pub open_now: bool,
    pub nearby: Vec<Place>,
}

impl PlaceDetail {
    /// Backend fields that would collide with the computed ones are dropped.
    pub fn new(mut place: Place, open_now: bool, nearby: Vec<Place>) -> Self {
        place.extra.remove("open_now");
        place.extra.remove("nearby");
        Self {
            place,
            open_now,
            nearby,
        }
    }
}

/// GET /api/v1/places/{id}
///
/// The place and its neighbours are fetched together. A failed neighbour
/// lookup leaves `nearby` empty rather than failing the page.
pub async fn place_detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (place, nearby) = tokio::join!(
        state.client.get_place(id),
        state.client.nearby_by_place(id, DEFAULT_NEARBY_RADIUS_KM),
    );
    let place = place?;
    let nearby = nearby.unwrap_or_else(|e| {
        tracing::warn!(place_id = id, error = %e, "Nearby lookup failed");
        Vec::new()
    });

    let (day, time) = local_now();
    let open_now = place.is_open_at(day, time);

    Ok(Json(DataResponse {
        data: PlaceDetail::new(place, open_now, nearby),
    }))
}

// ---------------------------------------------------------------------------
// Nearby
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: Option<f64>,
}

/// GET /api/v1/places/nearby?latitude=&longitude=&radius=
pub async fn nearby(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> AppResult<impl IntoResponse> {
    let origin = Coordinates::new(params.latitude, params.longitude)?;
    let radius = params
        .radius
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(DEFAULT_NEARBY_RADIUS_KM);

    let places = state.client.nearby_by_coordinates(origin, radius).await?;
    Ok(Json(DataResponse { data: places }))
}
