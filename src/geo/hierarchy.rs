use std::collections::BTreeMap;

use crate::api::NodeRow;

use super::continents::{continent_for, continent_name};
use super::types::{CitySummary, ClientShare, ContinentSummary, CountrySummary, GeoSummary};

const UNKNOWN_COUNTRY: &str = "??";
const UNKNOWN_CITY: &str = "Unknown";
const UNKNOWN_CLIENT: &str = "unknown";

/// Folds a flat node list into continent → country → city counts plus
/// per-client shares, in a single linear pass with progressive map
/// insertion. Unknown or missing country codes land in
/// `fallback_continent`.
#[must_use]
pub fn build_geo_summary(nodes: &[NodeRow], fallback_continent: &str) -> GeoSummary {
    let mut tree: BTreeMap<String, BTreeMap<String, BTreeMap<String, u64>>> = BTreeMap::new();
    let mut clients: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_nodes = 0u64;

    for node in nodes {
        total_nodes = total_nodes.saturating_add(1);

        let country = node
            .country_code
            .as_deref()
            .map_or_else(|| UNKNOWN_COUNTRY.to_owned(), str::to_uppercase);
        let continent = continent_for(&country).unwrap_or(fallback_continent);
        let city = node.city.as_deref().unwrap_or(UNKNOWN_CITY);

        let count = tree
            .entry(continent.to_owned())
            .or_default()
            .entry(country)
            .or_default()
            .entry(city.to_owned())
            .or_default();
        *count = count.saturating_add(1);

        let client = node.client_name.as_deref().unwrap_or(UNKNOWN_CLIENT);
        let share = clients.entry(client.to_owned()).or_default();
        *share = share.saturating_add(1);
    }

    let continents = tree
        .into_iter()
        .map(|(code, countries)| {
            let countries: Vec<CountrySummary> = countries
                .into_iter()
                .map(|(country_code, cities)| {
                    let cities: Vec<CitySummary> = cities
                        .into_iter()
                        .map(|(name, count)| CitySummary {
                            name,
                            total_nodes: count,
                        })
                        .collect();
                    CountrySummary {
                        code: country_code,
                        total_nodes: cities
                            .iter()
                            .fold(0u64, |sum, city| sum.saturating_add(city.total_nodes)),
                        cities,
                    }
                })
                .collect();
            ContinentSummary {
                name: continent_name(&code),
                total_nodes: countries
                    .iter()
                    .fold(0u64, |sum, country| sum.saturating_add(country.total_nodes)),
                code,
                countries,
            }
        })
        .collect();

    let clients = clients
        .into_iter()
        .map(|(client, count)| ClientShare {
            client,
            count,
            percent: if total_nodes == 0 {
                0.0
            } else {
                count as f64 / total_nodes as f64 * 100.0
            },
        })
        .collect();

    GeoSummary {
        total_nodes,
        continents,
        clients,
    }
}
