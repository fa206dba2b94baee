//! # Tienda API
//!
//! REST server for Tienda POS.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda API Server                                │
//! │                                                                         │
//! │  HTTP client ───► axum (8000) ───► tienda-db service ───► SQLite       │
//! │                      │                                                  │
//! │                      └── TraceLayer (one span per request)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is built by [`app`] so integration tests can drive it without
//! binding a socket.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::app;
pub use state::AppState;
