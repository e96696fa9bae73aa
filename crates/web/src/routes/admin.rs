//! Admin dashboard routes. Every handler requires a [`Session`].
//!
//! [`Session`]: crate::middleware::session::Session

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, MethodRouter};
use axum::Router;
use serde::Serialize;
use tourism_client::admin::AdminResource;
use tourism_core::models::{Category, District, OperatingHour, Season, SeasonRelation};

use crate::handlers::admin;
use crate::state::AppState;

/// Largest accepted multipart body (place forms with several photos).
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET    /places                  -> list_places
/// POST   /places                  -> create_place (multipart)
/// GET    /places/{id}             -> get_place
/// PUT    /places/{id}             -> update_place (multipart)
/// DELETE /places/{id}             -> delete_place
/// POST   /places/{id}/images      -> upload_images (multipart)
/// DELETE /images/{id}             -> delete_image
/// GET    /districts               -> list_records::<District>
/// POST   /districts               -> create_district
/// GET    /districts/{id}          -> get_record::<District>
/// PUT    /districts/{id}          -> update_district
/// DELETE /districts/{id}          -> delete_record::<District>
/// (same shape for /categories, /seasons, /time and /seasons-relation)
/// GET    /form-options            -> form_options
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/places",
            get(admin::list_places).post(admin::create_place),
        )
        .route(
            "/places/{id}",
            get(admin::get_place)
                .put(admin::update_place)
                .delete(admin::delete_place),
        )
        .route("/places/{id}/images", post(admin::upload_images))
        .route("/images/{id}", delete(admin::delete_image))
        .route(
            "/districts",
            get(admin::list_records::<District>).post(admin::create_district),
        )
        .route("/districts/{id}", record::<District>().put(admin::update_district))
        .route(
            "/categories",
            get(admin::list_records::<Category>).post(admin::create_category),
        )
        .route("/categories/{id}", record::<Category>().put(admin::update_category))
        .route(
            "/seasons",
            get(admin::list_records::<Season>).post(admin::create_season),
        )
        .route("/seasons/{id}", record::<Season>().put(admin::update_season))
        .route(
            "/time",
            get(admin::list_records::<OperatingHour>).post(admin::create_operating_hour),
        )
        .route(
            "/time/{id}",
            record::<OperatingHour>().put(admin::update_operating_hour),
        )
        .route(
            "/seasons-relation",
            get(admin::list_records::<SeasonRelation>).post(admin::create_season_relation),
        )
        .route(
            "/seasons-relation/{id}",
            record::<SeasonRelation>().put(admin::update_season_relation),
        )
        .route("/form-options", get(admin::form_options))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// GET and DELETE on `/{collection}/{id}`.
fn record<T>() -> MethodRouter<AppState>
where
    T: AdminResource + Serialize + Send + Sync + 'static,
{
    get(admin::get_record::<T>).delete(admin::delete_record::<T>)
}
