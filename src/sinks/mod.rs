//! File exports of assembled series and summaries.
mod writers;

pub use writers::write_json;
