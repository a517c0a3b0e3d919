//! Delivery adapters for the download endpoint.
//!
//! One request path, two interchangeable adapters behind the same seam:
//! `Redirect` resolves the upstream media URL and answers 307, `Stream`
//! pipes tool stdout into the response body. The configuration flag
//! picks the adapter; handlers never branch on deployment target
//! anywhere else.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use tracing::info;

use vidgrab_media::{resolve_direct_url, start_download, DownloadStream, FormatSelector};
use vidgrab_models::MediaFormat;

use crate::config::DeliveryMode;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Deliver a download response for an admitted URL.
pub async fn deliver(
    state: &AppState,
    url: &str,
    selector: &FormatSelector,
    format: MediaFormat,
) -> ApiResult<Response> {
    match state.config.delivery_mode {
        DeliveryMode::Redirect => redirect_to_source(state, url, selector).await,
        DeliveryMode::Stream => stream_to_client(state, url, selector, format),
    }
}

/// Resolve the upstream media URL and redirect the client to it.
async fn redirect_to_source(
    state: &AppState,
    url: &str,
    selector: &FormatSelector,
) -> ApiResult<Response> {
    let direct = resolve_direct_url(&state.locator, url, selector).await?;
    info!("redirecting client to upstream media URL");
    Ok(Redirect::temporary(&direct).into_response())
}

/// Spawn the tool and pipe its stdout into the response body.
///
/// Headers go out before the first byte; once bytes are in flight the
/// only failure mode left is a truncated transfer. Dropping the body
/// (client disconnect) kills the subprocess.
fn stream_to_client(
    state: &AppState,
    url: &str,
    selector: &FormatSelector,
    format: MediaFormat,
) -> ApiResult<Response> {
    let download: DownloadStream = start_download(&state.locator, url, selector)?;

    let filename = format!("video_{}.{}", Utc::now().timestamp_millis(), format.extension());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(download))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {e}")))
}
