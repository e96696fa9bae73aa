//! Public routes: listings, detail, search, map and lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::{catalog, discovery, places};
use crate::state::AppState;

/// Public routes merged at the `/api/v1` root.
///
/// ```text
/// GET /home                    -> home
/// GET /map                     -> map_view
/// GET /search                  -> search
/// GET /places                  -> list_places
/// GET /places/random           -> random_places
/// GET /places/currently-open   -> currently_open
/// GET /places/nearby           -> nearby
/// GET /places/{id}             -> place_detail
/// GET /attractions             -> attractions
/// GET /accommodations          -> accommodations
/// GET /restaurants             -> restaurants
/// GET /souvenir-shops          -> souvenir_shops
/// GET /districts               -> districts
/// GET /categories              -> categories
/// GET /seasons                 -> seasons
/// GET /seasons/real-time       -> real_time_seasons
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(discovery::home))
        .route("/map", get(discovery::map_view))
        .route("/search", get(discovery::search))
        .route("/places", get(places::list_places))
        .route("/places/random", get(places::random_places))
        .route("/places/currently-open", get(places::currently_open))
        .route("/places/nearby", get(places::nearby))
        .route("/places/{id}", get(places::place_detail))
        .route("/attractions", get(places::attractions))
        .route("/accommodations", get(places::accommodations))
        .route("/restaurants", get(places::restaurants))
        .route("/souvenir-shops", get(places::souvenir_shops))
        .route("/districts", get(catalog::districts))
        .route("/categories", get(catalog::categories))
        .route("/seasons", get(catalog::seasons))
        .route("/seasons/real-time", get(catalog::real_time_seasons))
}
