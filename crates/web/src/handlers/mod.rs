pub mod admin;
pub mod auth;
pub mod catalog;
pub mod discovery;
pub mod places;
