//! Typed HTTP client for the tourism backend REST API.
//!
//! [`BackendClient`] wraps every endpoint the portal consumes, public and
//! admin alike, and resolves image URLs on the way out. The remaining
//! modules orchestrate several calls at once: the map view aggregation,
//! geolocation-driven nearby polling, and search-text debouncing.

pub mod admin;
pub mod auth;
pub mod debounce;
pub mod error;
pub mod http;
pub mod map;
pub mod nearby;
pub mod public;

pub use error::{ClientError, ClientResult};
pub use http::BackendClient;
