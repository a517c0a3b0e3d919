//! Video info and download handlers.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

use vidgrab_media::{build_selector, fetch_metadata};
use vidgrab_models::{detect_platform, MediaFormat, PlatformInfo, VideoMetadata};

use crate::delivery;
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::security::{sanitize_url, validate_url, MAX_URL_LENGTH};
use crate::state::AppState;

/// Body for `POST /api/video/info`.
#[derive(Deserialize)]
pub struct InfoRequest {
    pub url: Option<String>,
}

/// Query for `GET /api/video/info`.
#[derive(Deserialize)]
pub struct InfoQuery {
    pub url: Option<String>,
}

/// Query for `GET /api/video/download`.
#[derive(Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
    pub format: Option<String>,
    pub quality: Option<String>,
    /// Sent by the legacy front-end but never consumed: quality/format
    /// are the authoritative selection mechanism.
    pub format_id: Option<String>,
}

/// Admit a raw URL into the request pipeline.
///
/// Sanitize, validate, bound, classify — in that order, all before any
/// subprocess work. Everything downstream sees only the sanitized
/// string; the raw input is dropped here.
fn admit_url(raw: &str) -> ApiResult<(String, PlatformInfo)> {
    let sanitized = sanitize_url(raw);

    if !validate_url(&sanitized) {
        return Err(ApiError::validation("Invalid URL format"));
    }
    if sanitized.len() > MAX_URL_LENGTH {
        return Err(ApiError::validation("URL is too long"));
    }

    let platform = detect_platform(&sanitized);
    if !platform.is_valid {
        return Err(ApiError::UnsupportedPlatform);
    }

    Ok((sanitized, platform))
}

/// `POST /api/video/info` with a JSON body.
pub async fn video_info(
    State(state): State<AppState>,
    Json(request): Json<InfoRequest>,
) -> ApiResult<Json<VideoMetadata>> {
    let url = request
        .url
        .ok_or_else(|| ApiError::validation("URL is required"))?;
    fetch_info(&state, &url).await.map(Json)
}

/// `GET /api/video/info?url=` for clients that cannot send a body.
pub async fn video_info_query(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> ApiResult<Json<VideoMetadata>> {
    let url = query
        .url
        .ok_or_else(|| ApiError::validation("URL is required"))?;
    fetch_info(&state, &url).await.map(Json)
}

async fn fetch_info(state: &AppState, raw_url: &str) -> ApiResult<VideoMetadata> {
    let (url, platform) = admit_url(raw_url)?;

    info!(platform = %platform.platform, "fetching video metadata");

    let result = fetch_metadata(&state.locator, &url, platform).await;
    metrics::record_metadata_fetch(
        platform.platform.as_str(),
        if result.is_ok() { "ok" } else { "error" },
    );

    Ok(result?)
}

/// `GET /api/video/download?url=&format=&quality=`.
pub async fn video_download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Response> {
    let raw_url = query
        .url
        .as_deref()
        .ok_or_else(|| ApiError::validation("URL is required"))?;
    let (url, platform) = admit_url(raw_url)?;

    let format = match query.format.as_deref() {
        None => MediaFormat::default(),
        Some(value) => {
            MediaFormat::parse(value).ok_or_else(|| ApiError::validation("Invalid format"))?
        }
    };

    if let Some(format_id) = &query.format_id {
        debug!(%format_id, "ignoring format_id; quality/format are authoritative");
    }

    let selector = build_selector(format, query.quality.as_deref(), platform.platform);

    info!(
        platform = %platform.platform,
        format = format.extension(),
        quality = query.quality.as_deref().unwrap_or("default"),
        "starting download"
    );
    metrics::record_download_started(platform.platform.as_str(), format.extension());

    delivery::deliver(&state, &url, &selector, format).await
}
