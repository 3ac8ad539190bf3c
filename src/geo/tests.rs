use crate::api::NodeRow;

use super::build_geo_summary;

fn node(country: Option<&str>, city: Option<&str>, client: &str) -> NodeRow {
    NodeRow {
        node_id: Some(format!("node-{}-{}", country.unwrap_or("xx"), client)),
        client_name: Some(client.to_owned()),
        country_code: country.map(str::to_owned),
        city: city.map(str::to_owned),
        latitude: None,
        longitude: None,
    }
}

#[test]
fn totals_roll_up_from_cities_to_continents() {
    let nodes = vec![
        node(Some("DE"), Some("Berlin"), "lighthouse"),
        node(Some("DE"), Some("Berlin"), "prysm"),
        node(Some("DE"), Some("Munich"), "teku"),
        node(Some("FR"), Some("Paris"), "prysm"),
        node(Some("US"), Some("Austin"), "lighthouse"),
    ];
    let summary = build_geo_summary(&nodes, "EU");
    assert_eq!(summary.total_nodes, 5);

    for continent in &summary.continents {
        let country_sum: u64 = continent
            .countries
            .iter()
            .map(|country| country.total_nodes)
            .sum();
        assert_eq!(continent.total_nodes, country_sum, "{}", continent.code);
        for country in &continent.countries {
            let city_sum: u64 = country.cities.iter().map(|city| city.total_nodes).sum();
            assert_eq!(country.total_nodes, city_sum, "{}", country.code);
        }
    }

    let europe = summary
        .continents
        .iter()
        .find(|continent| continent.code == "EU");
    assert_eq!(europe.map(|continent| continent.total_nodes), Some(4));
}

#[test]
fn unknown_country_lands_in_the_fallback_continent() {
    let nodes = vec![node(Some("ZZ"), None, "prysm"), node(None, None, "prysm")];
    let summary = build_geo_summary(&nodes, "OC");
    assert_eq!(summary.continents.len(), 1);
    assert_eq!(
        summary.continents.first().map(|c| c.code.as_str()),
        Some("OC")
    );
    assert_eq!(summary.continents.first().map(|c| c.total_nodes), Some(2));
}

#[test]
fn lowercase_country_codes_are_normalized() {
    let nodes = vec![node(Some("de"), Some("Berlin"), "teku")];
    let summary = build_geo_summary(&nodes, "NA");
    assert_eq!(
        summary.continents.first().map(|c| c.code.as_str()),
        Some("EU")
    );
}

#[test]
fn client_shares_sum_to_one_hundred_percent() {
    let nodes = vec![
        node(Some("DE"), None, "lighthouse"),
        node(Some("DE"), None, "lighthouse"),
        node(Some("US"), None, "prysm"),
        node(Some("US"), None, "teku"),
    ];
    let summary = build_geo_summary(&nodes, "EU");
    let total_percent: f64 = summary.clients.iter().map(|share| share.percent).sum();
    assert!((total_percent - 100.0).abs() < 1e-9);

    let lighthouse = summary
        .clients
        .iter()
        .find(|share| share.client == "lighthouse");
    assert_eq!(lighthouse.map(|share| share.count), Some(2));
    assert_eq!(lighthouse.map(|share| share.percent), Some(50.0));
}

#[test]
fn empty_node_list_produces_an_empty_summary() {
    let summary = build_geo_summary(&[], "EU");
    assert_eq!(summary.total_nodes, 0);
    assert!(summary.continents.is_empty());
    assert!(summary.clients.is_empty());
}
