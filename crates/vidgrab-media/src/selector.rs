//! Mapping the requested format and quality to yt-dlp selector
//! arguments.
//!
//! The mapping is pure and deterministic: fixed tables keyed by quality
//! tier, nothing derived from user input ends up inside the selector
//! expression.

use vidgrab_models::{MediaFormat, Platform, QualityTier};

/// A yt-dlp stream selection: the `-f` expression plus the
/// post-processing flags that accompany it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSelector {
    pub expression: String,
    pub flags: Vec<String>,
}

impl FormatSelector {
    /// Arguments to splice into a tool invocation.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-f".to_string(), self.expression.clone()];
        args.extend(self.flags.iter().cloned());
        args
    }

    /// Whether watermark-free extraction was requested.
    pub fn strips_watermark(&self) -> bool {
        self.flags.iter().any(|flag| flag == "--no-watermark")
    }
}

/// `--audio-quality` value (0 best, 9 worst) for a requested bitrate.
/// 320 and 256 map to best, 192 to the middle tier, 128 to the lowest
/// acceptable; anything else defaults to best.
fn audio_quality(quality: Option<&str>) -> &'static str {
    match quality {
        Some("192") => "5",
        Some("128") => "9",
        _ => "0",
    }
}

/// Build the selector for a format/quality/platform triple.
///
/// Total over all inputs: unrecognized quality strings fall back to the
/// defaults (best audio, 720p video).
pub fn build_selector(
    format: MediaFormat,
    quality: Option<&str>,
    platform: Platform,
) -> FormatSelector {
    let mut flags = Vec::new();

    // TikTok serves watermarked streams by default; ask for the clean
    // variant when the extractor has one.
    if platform == Platform::Tiktok {
        flags.push("--no-watermark".to_string());
    }

    let expression = if format.is_audio_only() {
        flags.push("--extract-audio".to_string());
        flags.push("--audio-format".to_string());
        flags.push("mp3".to_string());
        flags.push("--audio-quality".to_string());
        flags.push(audio_quality(quality).to_string());
        "bestaudio/best".to_string()
    } else {
        let height = QualityTier::parse(quality).height();
        flags.push("--merge-output-format".to_string());
        flags.push("mp4".to_string());
        format!("bestvideo[height<={height}]+bestaudio/best[height<={height}]")
    };

    FormatSelector { expression, flags }
}
