//! Fetch layer: filtered, cursor-paginated queries against the telemetry
//! backend, with per-view retry policies.
mod client;
mod filter;
mod retry;
mod types;


pub use client::{DEFAULT_PAGE_SIZE, PageFetcher, XatuClient, follow_pages};
pub use filter::FilterSpec;
pub use retry::{RetryPolicy, with_retry};
pub use types::{
    BlobTimingRow, BlockFirstSeenRow, NetworkConfig, NodeRow, PagedResponse, StateSizeRow,
    TableBounds,
};
