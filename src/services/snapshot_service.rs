use chrono::{DateTime, Utc};
use reqwest::Method;
use tracing::debug;

use crate::api::librato::{ApiError, ResponseMeta, Transport};
use crate::models::{ChartReference, ChartSnapshot};
use crate::utils::snapshot_url::{snapshot_id_from_url, snapshot_path};

const SNAPSHOTS_PATH: &str = "snapshots";

/// Chart snapshot operations on top of a Librato transport
pub struct SnapshotService<'a, T: Transport> {
    transport: &'a T,
}

impl<'a, T: Transport> SnapshotService<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// POST /snapshots
    ///
    /// Asks Librato to render a snapshot of a chart.
    ///
    /// # Arguments
    /// * `chart_id` - The chart to capture
    /// * `duration` - Time span to capture, in seconds
    /// * `end_time` - Optional: end of the captured window, defaults to now on the server
    /// * `source` - Source the chart is rendered for (`*` for all)
    /// * `chart_type` - Rendering type, e.g. `line` or `stacked`
    ///
    /// # Returns
    /// * `Ok((ChartSnapshot, ResponseMeta))` - Snapshot with the server-assigned `href` and `image_href`
    /// * `Err(ApiError)` - Request construction, transport or decoding error
    pub async fn create_chart_snapshot(
        &self,
        chart_id: u64,
        duration: u64,
        end_time: Option<DateTime<Utc>>,
        source: &str,
        chart_type: &str,
    ) -> Result<(ChartSnapshot, ResponseMeta), ApiError> {
        let chart = ChartReference::new(chart_id, source, chart_type);
        let payload = ChartSnapshot::for_chart(chart, duration, end_time);

        let request = self
            .transport
            .new_request(Method::POST, SNAPSHOTS_PATH, Some(&payload))?;

        debug!("Creating snapshot of chart {} ({}s, source {})", chart_id, duration, source);
        self.transport.execute(request).await
    }

    /// GET /snapshots/{id}
    ///
    /// Fetches a snapshot given its URL, as returned in `href` by
    /// [`create_chart_snapshot`](Self::create_chart_snapshot). Only the last
    /// path segment is used, so a bare snapshot id works too.
    pub async fn get_chart_snapshot(
        &self,
        snapshot_url: &str,
    ) -> Result<(ChartSnapshot, ResponseMeta), ApiError> {
        let snapshot_id = snapshot_id_from_url(snapshot_url)?;
        let request = self
            .transport
            .new_request::<()>(Method::GET, &snapshot_path(&snapshot_id), None)?;

        self.transport.execute(request).await
    }
}
