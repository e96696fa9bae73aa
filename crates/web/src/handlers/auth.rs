//! Login, logout, registration and profile.
//!
//! Login exchanges credentials for a backend token and stores it in the
//! session cookie; the token itself is never returned in the body.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tourism_core::forms::{LoginForm, RegisterForm};

use crate::error::AppResult;
use crate::middleware::session::{clear_session_cookie, session_cookie, Session};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> AppResult<impl IntoResponse> {
    let issued = state.client.login(&form).await?;
    let cookie = session_cookie(&issued.token, state.config.session_cookie_secure)?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(DataResponse {
            data: issued.profile,
        }),
    ))
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> AppResult<impl IntoResponse> {
    let profile = state.client.register(&form).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// POST /api/v1/auth/logout
///
/// Always succeeds; clears the cookie whether or not a session existed.
pub async fn logout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cookie = clear_session_cookie(state.config.session_cookie_secure)?;
    Ok(([(SET_COOKIE, cookie)], StatusCode::NO_CONTENT))
}

/// GET /api/v1/auth/profile
pub async fn profile(session: Session) -> AppResult<impl IntoResponse> {
    let profile = session.client.profile().await?;
    Ok(Json(DataResponse { data: profile }))
}
