pub mod create;
pub mod get;
pub mod help;

use librato_snapshots::{ChartSnapshot, LibratoClient};

/// Help needs no credentials, so it is answered before the client is built
pub fn wants_help(args: &[String]) -> bool {
    matches!(
        args.first().map(String::as_str),
        None | Some("help" | "--help" | "-h")
    )
}

pub async fn handle_args(client: &LibratoClient, args: &[String]) -> Result<(), String> {
    let parts: Vec<&str> = args.iter().map(String::as_str).collect();
    let Some((&command, rest)) = parts.split_first() else {
        return Err("No command given. Run `librato-snapshot help`".to_string());
    };

    match command {
        "create" | "new" => create::execute(client, rest).await,
        "get" | "show" => get::execute(client, rest).await,
        other => Err(format!("Unknown command '{}'. Run `librato-snapshot help`", other)),
    }
}

fn print_snapshot(snapshot: &ChartSnapshot) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(snapshot)
        .map_err(|e| format!("Failed to render snapshot: {}", e))?;
    println!("{}", rendered);
    Ok(())
}
