use chrono::{DateTime, Utc};
use tracing::info;

use librato_snapshots::{LibratoClient, SnapshotService};

#[derive(Debug, PartialEq)]
pub struct CreateArgs {
    pub chart_id: u64,
    pub duration: u64,
    pub source: String,
    pub chart_type: String,
    pub end_time: Option<DateTime<Utc>>,
}

/// Parse `<chart_id> <duration_secs> <source> <chart_type> [end_time]`
pub fn parse_args(args: &[&str]) -> Result<CreateArgs, String> {
    if args.len() < 4 || args.len() > 5 {
        return Err("Usage: create <chart_id> <duration_secs> <source> <chart_type> [end_time]".to_string());
    }

    let chart_id = args[0]
        .parse::<u64>()
        .map_err(|_| format!("Invalid chart id: '{}'", args[0]))?;
    let duration = args[1]
        .parse::<u64>()
        .map_err(|_| format!("Invalid duration: '{}'. Use whole seconds", args[1]))?;
    let end_time = args.get(4).map(|raw| parse_end_time(raw)).transpose()?;

    Ok(CreateArgs {
        chart_id,
        duration,
        source: args[2].to_string(),
        chart_type: args[3].to_string(),
        end_time,
    })
}

/// Accept either Unix seconds or an RFC 3339 timestamp
pub fn parse_end_time(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| format!("End time out of range: {}", secs));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| format!("Invalid end time: '{}'. Use Unix seconds or RFC 3339", raw))
}

pub async fn execute(client: &LibratoClient, args: &[&str]) -> Result<(), String> {
    let args = parse_args(args)?;
    let service = SnapshotService::new(client);

    let (snapshot, meta) = service
        .create_chart_snapshot(
            args.chart_id,
            args.duration,
            args.end_time,
            &args.source,
            &args.chart_type,
        )
        .await
        .map_err(|e| e.to_string())?;

    info!("Snapshot created ({})", meta.status);
    super::print_snapshot(&snapshot)
}
