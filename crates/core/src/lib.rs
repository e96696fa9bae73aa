//! Domain building blocks for the tourism portal.
//!
//! Everything here is pure logic with no I/O: the records mirrored from the
//! tourism backend, image URL rules, search filter composition, client-side
//! pagination and the admin form payloads. The HTTP client and the web
//! server both build on these types.

pub mod error;
pub mod forms;
pub mod geo;
pub mod image_url;
pub mod list_state;
pub mod models;
pub mod pagination;
pub mod search;
pub mod types;
