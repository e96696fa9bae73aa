pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /home                                 featured, seasonal, open now
/// /map                                  markers + maps key
/// /search                               text + one facet, paginated
///
/// /places                               list (paginated)
/// /places/random                        random pick
/// /places/currently-open                open right now
/// /places/nearby                        around coordinates
/// /places/{id}                          detail + open_now + nearby
///
/// /attractions                          by kind (paginated)
/// /accommodations
/// /restaurants
/// /souvenir-shops
///
/// /districts                            lookups
/// /categories
/// /seasons
/// /seasons/real-time
///
/// /auth/login                           login (sets session cookie)
/// /auth/register                        register
/// /auth/logout                          logout (clears cookie)
/// /auth/profile                         current profile (session)
///
/// /admin/places                         list, create (multipart)
/// /admin/places/{id}                    get, update (multipart), delete
/// /admin/places/{id}/images             upload images (multipart)
/// /admin/images/{id}                    delete image
/// /admin/districts[/{id}]               CRUD
/// /admin/categories[/{id}]              CRUD
/// /admin/seasons[/{id}]                 CRUD
/// /admin/time[/{id}]                    operating hours CRUD
/// /admin/seasons-relation[/{id}]        CRUD
/// /admin/form-options                   dropdown data for the place form
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public listings, search and map.
        .merge(public::router())
        // Login, logout, registration, profile.
        .nest("/auth", auth::router())
        // Admin dashboard (session required).
        .nest("/admin", admin::router())
}
