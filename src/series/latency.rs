use std::collections::BTreeMap;

use crate::api::BlockFirstSeenRow;

use super::palette::{AVERAGE_COLOR, Palette};
use super::types::{AxisRange, LineStyle, Series, SeriesPoint, SeriesSet};

pub const AVERAGE_SERIES_NAME: &str = "Average";

/// Builds one mean-latency line series per node plus a synthetic cross-node
/// "Average" series from raw first-seen rows.
///
/// Rows missing the slot, node identifier or measurement are skipped; the
/// dataset is expected to contain partial rows and that is not an error.
/// Per-node points are the mean of all measurements for that (node, slot)
/// pair, sorted ascending by slot. The x-axis range is padded one slot past
/// the observed extremes, or (0, 0) when nothing was aggregated.
#[must_use]
pub fn build_node_latency_series(rows: &[BlockFirstSeenRow], palette: &Palette) -> SeriesSet {
    let mut per_node: BTreeMap<&str, BTreeMap<u64, MeanBucket>> = BTreeMap::new();
    let mut overall: BTreeMap<u64, MeanBucket> = BTreeMap::new();

    for row in rows {
        let (Some(slot), Some(node_id), Some(latency)) = (
            row.slot,
            row.node_id.as_deref(),
            row.seen_slot_start_diff_ms,
        ) else {
            continue;
        };
        per_node
            .entry(node_id)
            .or_default()
            .entry(slot)
            .or_default()
            .add(latency);
        overall.entry(slot).or_default().add(latency);
    }

    let colors = palette.assign(per_node.keys().copied());
    let mut series: Vec<Series> = per_node
        .iter()
        .map(|(node_id, buckets)| Series {
            name: (*node_id).to_owned(),
            display_label: (*node_id).to_owned(),
            color: colors.get(node_id).copied().unwrap_or(AVERAGE_COLOR),
            style: LineStyle::solid(),
            points: buckets
                .iter()
                .map(|(slot, bucket)| SeriesPoint {
                    x: *slot,
                    y: bucket.mean(),
                })
                .collect(),
        })
        .collect();

    let x_range = match (overall.keys().next(), overall.keys().next_back()) {
        (Some(min), Some(max)) => AxisRange::padded(*min, *max),
        _ => AxisRange::EMPTY,
    };

    if !overall.is_empty() {
        series.push(Series {
            name: AVERAGE_SERIES_NAME.to_owned(),
            display_label: AVERAGE_SERIES_NAME.to_owned(),
            color: AVERAGE_COLOR,
            style: LineStyle::dashed(),
            points: overall
                .iter()
                .map(|(slot, bucket)| SeriesPoint {
                    x: *slot,
                    y: bucket.mean(),
                })
                .collect(),
        });
    }

    SeriesSet { series, x_range }
}

#[derive(Clone, Copy, Debug, Default)]
struct MeanBucket {
    sum: f64,
    count: u64,
}

impl MeanBucket {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count = self.count.saturating_add(1);
    }

    fn mean(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }
}
