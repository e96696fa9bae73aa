use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes mounted at `/auth`.
///
/// ```text
/// POST /login      -> login
/// POST /register   -> register
/// POST /logout     -> logout
/// GET  /profile    -> profile (session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/profile", get(auth::profile))
}
