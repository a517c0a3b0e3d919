//! Axum HTTP API for social-video metadata and downloads.
//!
//! This crate provides:
//! - URL sanitization and validation ahead of any subprocess work
//! - Info and download endpoints backed by the yt-dlp wrapper
//! - Stream and redirect delivery adapters behind one seam
//! - Rate limiting, security headers and Prometheus metrics

pub mod config;
pub mod delivery;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod state;

pub use config::{ApiConfig, DeliveryMode};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
