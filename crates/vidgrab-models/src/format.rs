//! Requested output format and quality tiers.

use serde::{Deserialize, Serialize};

/// Output container requested by the client. `mp4` downloads the muxed
/// video; `mp3` extracts the audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    #[default]
    Mp4,
    Mp3,
}

impl MediaFormat {
    /// Parse a client-supplied format string. Anything other than the
    /// two supported values is rejected, not defaulted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mp4" => Some(Self::Mp4),
            "mp3" => Some(Self::Mp3),
            _ => None,
        }
    }

    pub fn is_audio_only(&self) -> bool {
        matches!(self, Self::Mp3)
    }

    /// File extension used in the attachment filename.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mp3 => "mp3",
        }
    }

    /// MIME type for the response Content-Type header.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp4 => "video/mp4",
            Self::Mp3 => "audio/mpeg",
        }
    }
}

/// Video quality tier, bounding the stream height.
///
/// Parsing is total: an unrecognized or absent tier falls back to 720p,
/// so every request maps to a concrete height bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityTier {
    P1080,
    #[default]
    P720,
    P480,
    P360,
}

impl QualityTier {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("1080p") => Self::P1080,
            Some("720p") => Self::P720,
            Some("480p") => Self::P480,
            Some("360p") => Self::P360,
            _ => Self::default(),
        }
    }

    /// Maximum stream height for this tier.
    pub fn height(&self) -> u32 {
        match self {
            Self::P1080 => 1080,
            Self::P720 => 720,
            Self::P480 => 480,
            Self::P360 => 360,
        }
    }
}
