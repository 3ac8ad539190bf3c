//! View runners: gate, fetch, aggregate, render, export.
mod gate;
mod runner;
mod summary;

pub use gate::{BLOB_TIMING_PATH, GEO_PATH, LATENCY_PATH, STATE_GROWTH_PATH, view_enabled};
pub use runner::{
    BLOB_TIMING_TABLE, BLOCK_FIRST_SEEN_TABLE, NODES_TABLE, STATE_SIZE_TABLE, run,
};
