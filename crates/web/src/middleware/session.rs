//! Admin session handling.
//!
//! The backend token issued at login lives in an `HttpOnly` cookie so page
//! scripts never see it. API callers may send it as a Bearer header instead.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use tourism_client::BackendClient;
use tourism_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the backend token.
pub const SESSION_COOKIE: &str = "tourism_session";

/// Cookie lifetime in seconds (one day).
const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// An authenticated admin session.
///
/// Use this as an extractor in any handler that calls `/admin` endpoints:
///
/// ```ignore
/// async fn my_handler(session: Session) -> AppResult<Json<()>> {
///     let places = session.client.admin_list_places().await?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    /// The backend token.
    pub token: String,
    /// Backend client that attaches the token to every request.
    pub client: BackendClient,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Not signed in".into()))
        })?;

        Ok(Session {
            client: state.client.with_token(token.clone()),
            token,
        })
    }
}

/// Bearer header first, then the session cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    bearer
        .or_else(|| cookie_value(headers, SESSION_COOKIE))
        .map(str::to_string)
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie` value that stores `token`.
pub fn session_cookie(token: &str, secure: bool) -> Result<HeaderValue, AppError> {
    build_cookie(token, SESSION_MAX_AGE_SECS, secure)
}

/// `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie(secure: bool) -> Result<HeaderValue, AppError> {
    build_cookie("", 0, secure)
}

fn build_cookie(value: &str, max_age: u64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))
}
