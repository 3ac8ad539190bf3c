//! Chart rendering over assembled series.
mod growth;
mod latency;


pub use growth::plot_state_growth;
pub use latency::plot_series_set;
