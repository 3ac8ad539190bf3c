use tracing::info;

use crate::geo::GeoSummary;
use crate::series::{GrowthDelta, SeriesSet};

pub(super) fn log_series_set(view: &str, set: &SeriesSet) {
    let points: usize = set.series.iter().map(|series| series.points.len()).sum();
    info!(
        view,
        series = set.series.len(),
        points,
        x_min = set.x_range.min,
        x_max = set.x_range.max,
        "series assembled"
    );
}

pub(super) fn log_growth(policy: &str, delta: Option<&GrowthDelta>) {
    match delta {
        Some(delta) => info!(
            policy,
            "{} change: {:+.0} bytes ({:+.2}%)", delta.timeframe, delta.delta, delta.percent
        ),
        None => info!(policy, "fewer than two data points, no delta"),
    }
}

pub(super) fn log_geo(summary: &GeoSummary) {
    info!(
        total_nodes = summary.total_nodes,
        continents = summary.continents.len(),
        clients = summary.clients.len(),
        "geo summary assembled"
    );
    for continent in &summary.continents {
        info!(
            "{} ({}): {} nodes across {} countries",
            continent.name,
            continent.code,
            continent.total_nodes,
            continent.countries.len()
        );
    }
}
