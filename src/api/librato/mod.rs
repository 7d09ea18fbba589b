pub mod client;
pub mod models;
pub mod transport;

pub use client::LibratoClient;
pub use models::{ApiError, ErrorResponse, ResponseMeta};
pub use transport::{ApiRequest, Transport};
