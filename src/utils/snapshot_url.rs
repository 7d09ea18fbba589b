//! Snapshot id extraction from snapshot URLs

use url::Url;

use crate::api::librato::ApiError;

/// Take the snapshot id from the last path segment of a snapshot URL.
///
/// Absolute URLs are parsed so query strings and fragments are ignored.
/// Anything else is treated as a bare path and split on `/`, so a plain id
/// such as `"58"` is returned unchanged. The segment itself is not checked
/// beyond being non-empty.
pub fn snapshot_id_from_url(snapshot_url: &str) -> Result<String, ApiError> {
    let id = match Url::parse(snapshot_url) {
        Ok(url) if !url.cannot_be_a_base() => url
            .path_segments()
            .and_then(|segments| segments.last())
            .map(str::to_string),
        _ => snapshot_url.rsplit('/').next().map(str::to_string),
    };

    id.filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidSnapshotUrl(snapshot_url.to_string()))
}

/// Relative API path for a single snapshot
pub fn snapshot_path(snapshot_id: &str) -> String {
    format!("snapshots/{}", snapshot_id)
}
