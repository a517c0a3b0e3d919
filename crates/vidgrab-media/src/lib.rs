//! yt-dlp CLI wrapper.
//!
//! This crate drives the external extraction tool as a subprocess:
//! - Ordered executable lookup with injectable candidates
//! - Pure format-selector construction from format/quality/platform
//! - Bounded JSON metadata fetch (timeout + output cap)
//! - Streaming downloads with kill-on-drop cancellation
//! - Direct URL resolution for the redirect delivery mode
//!
//! Every invocation passes arguments as a vector to the spawn
//! primitive; no command line is ever assembled as a string.

pub mod direct_url;
pub mod error;
pub mod locate;
pub mod metadata;
pub mod selector;
pub mod stream;

pub use direct_url::{resolve_direct_url, DIRECT_URL_TIMEOUT};
pub use error::{MediaError, MediaResult};
pub use locate::ToolLocator;
pub use metadata::{fetch_metadata, METADATA_MAX_OUTPUT, METADATA_TIMEOUT};
pub use selector::{build_selector, FormatSelector};
pub use stream::{start_download, DownloadStream};
