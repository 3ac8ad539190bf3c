use crate::api::NetworkConfig;

pub const LATENCY_PATH: &str = "/latency";
pub const BLOB_TIMING_PATH: &str = "/blob-timing";
pub const STATE_GROWTH_PATH: &str = "/state-growth";
pub const GEO_PATH: &str = "/geo";

/// Whether a view path is enabled for the selected network.
///
/// A network absent from the config's network list is disabled outright. A
/// path absent from the per-path table is enabled on every known network:
/// the table restricts, it does not grant.
#[must_use]
pub fn view_enabled(config: &NetworkConfig, path: &str, network: &str) -> bool {
    if !config.networks.is_empty() && !config.networks.iter().any(|name| name == network) {
        return false;
    }
    config
        .path_features
        .get(path)
        .is_none_or(|networks| networks.iter().any(|name| name == network))
}
