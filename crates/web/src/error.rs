use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tourism_client::ClientError;
use tourism_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`ClientError`] for backend
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tourism_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed call to the tourism backend.
    #[error(transparent)]
    Backend(#[from] ClientError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Backend errors ---
            AppError::Backend(err) => classify_client_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a backend failure into an HTTP status, error code, and message.
///
/// - Client-side statuses the backend reports (401, 403, 404, 409, 422) pass through.
/// - Other backend replies and transport failures map to 502.
/// - Timeouts map to 504.
fn classify_client_error(err: &ClientError) -> (StatusCode, &'static str, String) {
    match err {
        ClientError::Core(core) => classify_core_error(core),
        ClientError::Api { status, body } => match *status {
            401 => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", backend_message(body)),
            403 => (StatusCode::FORBIDDEN, "FORBIDDEN", backend_message(body)),
            404 => (StatusCode::NOT_FOUND, "NOT_FOUND", backend_message(body)),
            409 => (StatusCode::CONFLICT, "CONFLICT", backend_message(body)),
            422 => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                backend_message(body),
            ),
            other => {
                tracing::error!(status = other, body = %body, "Backend error");
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_ERROR",
                    "The tourism backend returned an error".to_string(),
                )
            }
        },
        ClientError::Request(e) if e.is_timeout() => {
            tracing::error!(error = %e, "Backend timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                "BACKEND_TIMEOUT",
                "The tourism backend did not respond in time".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Backend unavailable");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                "The tourism backend is unavailable".to_string(),
            )
        }
    }
}

/// Pull `message` (or `error`) out of a backend JSON error body, falling
/// back to the raw text.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
