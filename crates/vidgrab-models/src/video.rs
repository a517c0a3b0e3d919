//! Video metadata served by the info endpoint.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// One entry of the extraction tool's raw format list.
///
/// The info endpoint always serves an empty list (quality tiers are
/// predefined server-side), but the wire shape is kept so clients that
/// modeled the full response keep deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatEntry {
    pub format_id: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    pub ext: String,
}

/// Metadata for a single video.
///
/// Built per response and never cached. Missing source fields degrade
/// to defaults instead of failing the call: no thumbnail becomes an
/// empty string, no duration becomes zero, no filesize is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    pub formats: Vec<FormatEntry>,
    pub platform: Platform,
}
