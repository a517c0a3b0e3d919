//! Bounded metadata fetch via the tool's JSON dump mode.

use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

use vidgrab_models::{PlatformInfo, VideoMetadata};

use crate::error::{MediaError, MediaResult};
use crate::locate::ToolLocator;

/// Wall-clock bound for a metadata fetch.
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(20);

/// Cap on tool stdout for a metadata fetch.
pub const METADATA_MAX_OUTPUT: usize = 5 * 1024 * 1024;

/// Cap on captured stderr; only used for diagnostics.
const STDERR_CAP: u64 = 64 * 1024;

/// The slice of yt-dlp's `--dump-json` output this service serves.
/// Every field is optional so a single missing key never fails the
/// whole call.
#[derive(Debug, Deserialize)]
struct ToolDump {
    id: Option<String>,
    display_id: Option<String>,
    title: Option<String>,
    thumbnail: Option<String>,
    #[serde(default)]
    thumbnails: Vec<ToolThumbnail>,
    duration: Option<f64>,
    filesize: Option<u64>,
    filesize_approx: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ToolThumbnail {
    url: Option<String>,
}

impl ToolDump {
    fn into_metadata(self, platform: PlatformInfo) -> VideoMetadata {
        let thumbnail = self
            .thumbnail
            .or_else(|| self.thumbnails.into_iter().find_map(|t| t.url))
            .unwrap_or_default();

        VideoMetadata {
            id: self
                .id
                .or(self.display_id)
                .unwrap_or_else(|| "unknown".to_string()),
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            thumbnail,
            duration: self.duration.unwrap_or(0.0),
            filesize: self.filesize.or(self.filesize_approx),
            formats: Vec::new(),
            platform: platform.platform,
        }
    }
}

/// Fetch metadata for a sanitized URL.
///
/// The tool runs with JSON dump flags, playlist expansion and the media
/// download itself disabled, under [`METADATA_TIMEOUT`] and a
/// [`METADATA_MAX_OUTPUT`] stdout cap. Exceeding either bound is an
/// error, never a hang. Non-zero exits are classified from stderr; a
/// JSON parse failure is reported distinctly from a tool failure.
pub async fn fetch_metadata(
    locator: &ToolLocator,
    url: &str,
    platform: PlatformInfo,
) -> MediaResult<VideoMetadata> {
    let tool = locator.locate()?;

    debug!(tool = %tool.display(), "spawning metadata fetch");

    let mut child = Command::new(&tool)
        .args([
            "--dump-json",
            "--no-warnings",
            "--no-playlist",
            "--skip-download",
            "--no-check-certificate",
        ])
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let mut stdout_pipe = child.stdout.take().expect("stdout not captured");
    let stderr_pipe = child.stderr.take().expect("stderr not captured");

    // Drain stderr on its own task so a chatty tool can never wedge the
    // stdout read; the buffer is capped since it only feeds diagnostics.
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stderr_pipe.take(STDERR_CAP).read_to_end(&mut buf).await;
        buf
    });

    let bounded_run = async {
        // Read one byte past the cap so overflow is detectable.
        let mut stdout = Vec::new();
        (&mut stdout_pipe)
            .take(METADATA_MAX_OUTPUT as u64 + 1)
            .read_to_end(&mut stdout)
            .await?;

        if stdout.len() > METADATA_MAX_OUTPUT {
            // kill_on_drop reaps the child when it goes out of scope.
            return Err(MediaError::OutputOverflow(METADATA_MAX_OUTPUT));
        }

        let status = child.wait().await?;
        Ok::<_, MediaError>((stdout, status))
    };

    // Bind before matching so the elapsed branch can kill the child;
    // the bounded future (and its borrow) is dropped with the statement.
    let outcome = tokio::time::timeout(METADATA_TIMEOUT, bounded_run).await;
    let (stdout, status) = match outcome {
        Ok(result) => result?,
        Err(_) => {
            let _ = child.kill().await;
            return Err(MediaError::Timeout(METADATA_TIMEOUT.as_secs()));
        }
    };

    if !status.success() {
        let stderr = stderr_task.await.unwrap_or_default();
        let stderr = String::from_utf8_lossy(&stderr);
        debug!(stderr = %stderr, "tool exited non-zero during metadata fetch");
        return Err(MediaError::from_tool_failure(&stderr, status.code()));
    }

    let dump: ToolDump = serde_json::from_slice(&stdout)?;
    Ok(dump.into_metadata(platform))
}
