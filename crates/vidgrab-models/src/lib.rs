//! Shared data models for the vidgrab backend.
//!
//! This crate provides Serde-serializable types for:
//! - Platform detection for supported video sites
//! - Video metadata served by the info endpoint
//! - Requested output format and quality tiers

pub mod format;
pub mod platform;
pub mod video;

// Re-export common types
pub use format::{MediaFormat, QualityTier};
pub use platform::{detect_platform, Platform, PlatformInfo};
pub use video::{FormatEntry, VideoMetadata};
