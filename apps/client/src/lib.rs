//! Client-side streak engine.
//!
//! The engine reads a user's streak from the session service, keeps it fresh
//! across local midnight, and derives the weekly calendar for the view layer.

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod service;

pub use config::ClientConfig;
pub use engine::StreakEngine;
pub use error::{ConfigError, FetchError};
pub use http::HttpSessionService;
pub use service::{
    NewStudySession, RecordedSession, SessionPersistence, SessionRecorder, StreakSnapshot,
};
