use serde::Deserialize;

/// On-disk configuration. Every field is optional; `apply` fills defaults
/// and lets CLI flags win.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiSection>,
    pub views: Option<ViewsSection>,
    pub geo: Option<GeoSection>,
    pub output: Option<OutputSection>,
    /// Palette override as `#rrggbb` entries.
    pub palette: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiSection {
    pub endpoint: Option<String>,
    pub network: Option<String>,
    pub page_size: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ViewsSection {
    pub latency: Option<RetrySection>,
    pub blob_timing: Option<RetrySection>,
    pub state_growth: Option<RetrySection>,
    pub geo: Option<RetrySection>,
    /// Expiry-policy variants fetched concurrently by the state-growth view.
    pub expiry_policies: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RetrySection {
    pub max_attempts: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GeoSection {
    /// Continent code nodes with unknown countries are folded into.
    pub fallback_continent: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputSection {
    pub directory: Option<String>,
}
