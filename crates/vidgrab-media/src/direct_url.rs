//! Direct media URL resolution for the redirect delivery mode.
//!
//! Instead of proxying bytes, the tool is asked for the upstream media
//! URL (`--get-url`) and the caller answers with a redirect. Only the
//! selector expression and the watermark flag apply here; the
//! post-processing flags are meaningless without a download.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};
use crate::locate::ToolLocator;
use crate::selector::FormatSelector;

/// Wall-clock bound for a direct URL resolution.
pub const DIRECT_URL_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve the upstream media URL for a sanitized URL.
pub async fn resolve_direct_url(
    locator: &ToolLocator,
    url: &str,
    selector: &FormatSelector,
) -> MediaResult<String> {
    let tool = locator.locate()?;

    let mut args = vec![
        "--get-url".to_string(),
        "-f".to_string(),
        selector.expression.clone(),
        "--no-warnings".to_string(),
    ];
    if selector.strips_watermark() {
        args.push("--no-watermark".to_string());
    }

    debug!(tool = %tool.display(), expression = %selector.expression, "resolving direct URL");

    let run = Command::new(&tool)
        .args(&args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(DIRECT_URL_TIMEOUT, run)
        .await
        .map_err(|_| MediaError::Timeout(DIRECT_URL_TIMEOUT.as_secs()))??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::from_tool_failure(&stderr, output.status.code()));
    }

    let direct = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if direct.is_empty() {
        return Err(MediaError::extraction_failed("tool returned no URL"));
    }

    Ok(direct)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use vidgrab_models::{MediaFormat, Platform};

    use crate::selector::build_selector;

    fn stub_tool(dir: &tempfile::TempDir, script: &str) -> PathBuf {
        let path = dir.path().join("yt-dlp");
        std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_resolves_trimmed_url() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_tool(&dir, "echo 'https://cdn.example/video.mp4'");
        let locator = ToolLocator::with_candidates(vec![stub]);
        let selector = build_selector(MediaFormat::Mp4, Some("720p"), Platform::Youtube);

        let direct = resolve_direct_url(&locator, "https://youtu.be/abc", &selector)
            .await
            .unwrap();
        assert_eq!(direct, "https://cdn.example/video.mp4");
    }

    #[tokio::test]
    async fn test_empty_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_tool(&dir, "exit 0");
        let locator = ToolLocator::with_candidates(vec![stub]);
        let selector = build_selector(MediaFormat::Mp4, None, Platform::Youtube);

        let err = resolve_direct_url(&locator, "https://youtu.be/abc", &selector)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::ExtractionFailed { .. }));
    }

    #[tokio::test]
    async fn test_failure_is_classified_from_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_tool(&dir, "echo 'ERROR: Video unavailable' >&2; exit 1");
        let locator = ToolLocator::with_candidates(vec![stub]);
        let selector = build_selector(MediaFormat::Mp4, None, Platform::Youtube);

        let err = resolve_direct_url(&locator, "https://youtu.be/abc", &selector)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Unavailable));
    }
}
