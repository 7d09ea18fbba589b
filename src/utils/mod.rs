pub mod snapshot_url;

pub use snapshot_url::{snapshot_id_from_url, snapshot_path};
