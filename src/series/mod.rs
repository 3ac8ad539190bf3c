//! Normalization, aggregation and series assembly.
//!
//! Every builder in this module is a pure function over already-fetched row
//! arrays: inputs are treated as immutable, output structures are freshly
//! built per invocation, and emitted points are sorted ascending by x before
//! they reach the chart layer.
mod delta;
mod latency;
mod memo;
mod palette;
mod preagg;
mod types;


pub use delta::{GrowthDelta, GrowthPoint, GrowthSeries, Timeframe, compute_growth_delta};
pub use latency::{AVERAGE_SERIES_NAME, build_node_latency_series};
pub use memo::Memo;
pub use palette::{AVERAGE_COLOR, Palette};
pub use preagg::build_preagg_series;
pub use types::{
    AxisRange, EnrichedPoint, EnrichedSeries, EnrichedSeriesSet, LineStyle, Rgb, Series,
    SeriesPoint, SeriesSet,
};
