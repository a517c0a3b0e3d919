//! Platform detection for supported video sites.
//!
//! Classification is a pure function over the URL's hostname. It never
//! blocks and never fails: anything unparseable or unrecognized comes
//! back as `Platform::Unknown` with `is_valid == false`.

use serde::{Deserialize, Serialize};
use url::Url;

/// A video platform the service knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Instagram,
    Facebook,
    Twitter,
    Reddit,
    Dailymotion,
    Unknown,
}

impl Platform {
    /// Stable lowercase name used in API responses and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Reddit => "reddit",
            Platform::Dailymotion => "dailymotion",
            Platform::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a URL's hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub is_valid: bool,
}

impl PlatformInfo {
    fn unknown() -> Self {
        Self {
            platform: Platform::Unknown,
            is_valid: false,
        }
    }

    fn valid(platform: Platform) -> Self {
        Self {
            platform,
            is_valid: true,
        }
    }
}

/// Hostname substrings per platform. Patterns are disjoint, so match
/// order carries no meaning.
const HOST_PATTERNS: &[(&[&str], Platform)] = &[
    (&["youtube.com", "youtu.be"], Platform::Youtube),
    (&["tiktok.com"], Platform::Tiktok),
    (&["instagram.com"], Platform::Instagram),
    (&["facebook.com", "fb.com", "fb.watch"], Platform::Facebook),
    (&["twitter.com", "x.com"], Platform::Twitter),
    (&["reddit.com"], Platform::Reddit),
    (&["dailymotion.com", "dai.ly"], Platform::Dailymotion),
];

/// Classify a URL by its hostname.
pub fn detect_platform(url: &str) -> PlatformInfo {
    let Ok(parsed) = Url::parse(url) else {
        return PlatformInfo::unknown();
    };
    let Some(host) = parsed.host_str() else {
        return PlatformInfo::unknown();
    };
    let host = host.to_lowercase();

    for (needles, platform) in HOST_PATTERNS {
        if needles.iter().any(|needle| host.contains(needle)) {
            return PlatformInfo::valid(*platform);
        }
    }

    PlatformInfo::unknown()
}
