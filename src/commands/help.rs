pub fn execute() -> Result<(), String> {
    println!("librato-snapshot - create and fetch Librato chart snapshots");
    println!();
    println!("Commands:");
    println!("  create <chart_id> <duration_secs> <source> <chart_type> [end_time]");
    println!("      Render a snapshot. end_time is Unix seconds or RFC 3339");
    println!("  get <snapshot_url>");
    println!("      Fetch a snapshot by its href (or bare id)");
    println!("  help");
    println!("      Show this help message");
    println!();
    println!("Environment: LIBRATO_USER, LIBRATO_TOKEN, LIBRATO_BASE_URL, LIBRATO_TIMEOUT_SECS");
    Ok(())
}
