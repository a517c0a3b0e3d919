//! Streaming download: tool stdout piped straight to the consumer.
//!
//! The subprocess writes media bytes to its stdout (`-o -`) and the
//! stream forwards them chunk by chunk as they arrive; nothing is
//! buffered to disk or held until completion. Lifecycle:
//!
//! ```text
//! Spawned -> Streaming -> { Completed | Failed | Cancelled }
//! ```
//!
//! Completion is only signalled once stdout has reached end-of-data
//! AND the tool exited with status zero; a non-zero exit after EOF is
//! reported as a final stream error. Dropping the stream at any point
//! kills the subprocess (`kill_on_drop`), which is how client
//! disconnects propagate without leaking processes.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::Stream;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::error::MediaResult;
use crate::locate::ToolLocator;
use crate::selector::FormatSelector;

enum StreamState {
    /// Forwarding stdout chunks; the child is owned here so dropping
    /// the stream mid-transfer kills it.
    Streaming {
        child: Child,
        stdout: ReaderStream<ChildStdout>,
    },
    /// stdout hit EOF; waiting on the exit status before signalling
    /// end-of-stream.
    Draining {
        wait: Pin<Box<dyn Future<Output = io::Result<ExitStatus>> + Send>>,
    },
    Done,
}

/// A running download bound to exactly one request.
pub struct DownloadStream {
    state: StreamState,
    bytes_sent: u64,
}

impl std::fmt::Debug for DownloadStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            StreamState::Streaming { .. } => "Streaming",
            StreamState::Draining { .. } => "Draining",
            StreamState::Done => "Done",
        };
        f.debug_struct("DownloadStream")
            .field("state", &state)
            .field("bytes_sent", &self.bytes_sent)
            .finish()
    }
}

/// Spawn the tool in streaming mode.
///
/// The invocation carries the selector's arguments plus stdout output,
/// playlist suppression, warning suppression, certificate-check
/// suppression and free-format preference; the sanitized URL goes last,
/// as its own argv entry.
pub fn start_download(
    locator: &ToolLocator,
    url: &str,
    selector: &FormatSelector,
) -> MediaResult<DownloadStream> {
    let tool = locator.locate()?;

    debug!(
        tool = %tool.display(),
        expression = %selector.expression,
        "spawning streaming download"
    );

    let mut child = Command::new(&tool)
        .args(selector.to_args())
        .args([
            "-o",
            "-",
            "--no-playlist",
            "--no-warnings",
            "--no-check-certificate",
            "--prefer-free-formats",
        ])
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child.stdout.take().expect("stdout not captured");
    let stderr = child.stderr.take().expect("stderr not captured");

    // Diagnostics only; tool stderr never reaches the client.
    tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(target: "vidgrab_media::tool", "{line}");
        }
    });

    Ok(DownloadStream {
        state: StreamState::Streaming {
            child,
            stdout: ReaderStream::new(stdout),
        },
        bytes_sent: 0,
    })
}

impl DownloadStream {
    /// Bytes forwarded so far.
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }
}

impl Stream for DownloadStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match &mut this.state {
                StreamState::Streaming { stdout, .. } => match Pin::new(stdout).poll_next(cx) {
                    Poll::Ready(Some(Ok(chunk))) => {
                        this.bytes_sent += chunk.len() as u64;
                        return Poll::Ready(Some(Ok(chunk)));
                    }
                    Poll::Ready(Some(Err(err))) => {
                        warn!(error = %err, bytes = this.bytes_sent, "download stream read error");
                        this.state = StreamState::Done;
                        return Poll::Ready(Some(Err(err)));
                    }
                    Poll::Ready(None) => {
                        // stdout closed; resolve the exit status before
                        // signalling end-of-stream so a failed run is
                        // not mistaken for a completed one.
                        let prev = std::mem::replace(&mut this.state, StreamState::Done);
                        if let StreamState::Streaming { mut child, .. } = prev {
                            this.state = StreamState::Draining {
                                wait: Box::pin(async move { child.wait().await }),
                            };
                        }
                    }
                    Poll::Pending => return Poll::Pending,
                },
                StreamState::Draining { wait } => {
                    return match wait.as_mut().poll(cx) {
                        Poll::Ready(Ok(status)) if status.success() => {
                            debug!(bytes = this.bytes_sent, "download completed");
                            this.state = StreamState::Done;
                            Poll::Ready(None)
                        }
                        Poll::Ready(Ok(status)) => {
                            warn!(
                                exit_code = ?status.code(),
                                bytes = this.bytes_sent,
                                "tool exited non-zero during download"
                            );
                            this.state = StreamState::Done;
                            Poll::Ready(Some(Err(io::Error::other(format!(
                                "yt-dlp exited with code {}",
                                status.code().unwrap_or(-1)
                            )))))
                        }
                        Poll::Ready(Err(err)) => {
                            this.state = StreamState::Done;
                            Poll::Ready(Some(Err(err)))
                        }
                        Poll::Pending => Poll::Pending,
                    };
                }
                StreamState::Done => return Poll::Ready(None),
            }
        }
    }
}
