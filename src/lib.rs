//! Client binding for the Librato chart snapshot API.
//!
//! ```no_run
//! use librato_snapshots::{LibratoClient, LibratoConfig, SnapshotService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LibratoConfig::from_env()?;
//! let client = LibratoClient::new(&config)?;
//! let snapshots = SnapshotService::new(&client);
//!
//! let (snapshot, _) = snapshots.create_chart_snapshot(42, 3600, None, "*", "line").await?;
//! println!("{:?}", snapshot.image);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use api::librato::{ApiError, ApiRequest, LibratoClient, ResponseMeta, Transport};
pub use config::{ConfigError, LibratoConfig};
pub use models::{ChartReference, ChartSnapshot, ChartSnapshotSubject};
pub use services::SnapshotService;
