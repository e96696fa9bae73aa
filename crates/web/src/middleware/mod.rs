//! Request extractors shared by handlers.
//!
//! - [`session::Session`] -- Extracts the admin session token (cookie or Bearer header).

pub mod session;
