//! Geographic hierarchy builder for the node map and list views.
mod continents;
mod hierarchy;
mod types;

#[cfg(test)]
mod tests;

pub use continents::{continent_for, continent_name};
pub use hierarchy::build_geo_summary;
pub use types::{CitySummary, ClientShare, ContinentSummary, CountrySummary, GeoSummary};
