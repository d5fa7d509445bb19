//! HTTP route handlers

pub mod auth;
pub mod sessions;
pub mod streak;
pub mod user;
