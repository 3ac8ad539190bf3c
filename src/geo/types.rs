use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct GeoSummary {
    pub total_nodes: u64,
    pub continents: Vec<ContinentSummary>,
    pub clients: Vec<ClientShare>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ContinentSummary {
    pub code: String,
    pub name: &'static str,
    pub total_nodes: u64,
    pub countries: Vec<CountrySummary>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CountrySummary {
    pub code: String,
    pub total_nodes: u64,
    pub cities: Vec<CitySummary>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CitySummary {
    pub name: String,
    pub total_nodes: u64,
}

/// Per-client-implementation share of the node population.
#[derive(Clone, Debug, Serialize)]
pub struct ClientShare {
    pub client: String,
    pub count: u64,
    pub percent: f64,
}
