use tracing::info;

use librato_snapshots::{LibratoClient, SnapshotService};

pub async fn execute(client: &LibratoClient, args: &[&str]) -> Result<(), String> {
    let snapshot_url = match args {
        [url] => *url,
        _ => return Err("Usage: get <snapshot_url>".to_string()),
    };

    let service = SnapshotService::new(client);
    let (snapshot, meta) = service
        .get_chart_snapshot(snapshot_url)
        .await
        .map_err(|e| e.to_string())?;

    info!("Snapshot fetched ({})", meta.status);
    super::print_snapshot(&snapshot)
}
