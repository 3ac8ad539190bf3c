use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rows come off the wire with many optional fields; field presence is
/// validated by the aggregation stage, not here.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BlockFirstSeenRow {
    pub slot: Option<u64>,
    pub node_id: Option<String>,
    pub client_name: Option<String>,
    pub seen_slot_start_diff_ms: Option<f64>,
}

/// One backend-aggregated (node, slot) statistic row.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BlobTimingRow {
    pub slot: Option<u64>,
    pub node_id: Option<String>,
    pub client_name: Option<String>,
    pub median_ms: Option<f64>,
    pub min_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub avg_ms: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StateSizeRow {
    pub date: Option<NaiveDate>,
    pub size_bytes: Option<f64>,
    pub expiry_policy: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NodeRow {
    pub node_id: Option<String>,
    pub client_name: Option<String>,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Cursor-paginated list envelope. An absent or empty `next_page_token`
/// marks the final page.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// `/config` payload: supported networks plus per-path network enablement.
/// A path missing from `path_features` is enabled everywhere; the table
/// restricts, it does not grant.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub networks: Vec<String>,
    #[serde(default)]
    pub path_features: BTreeMap<String, Vec<String>>,
}

/// Per-table min/max bounds used to compute default query windows.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct TableBounds {
    pub min_slot: Option<u64>,
    pub max_slot: Option<u64>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}
