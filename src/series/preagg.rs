use std::collections::BTreeMap;

use crate::api::BlobTimingRow;

use super::palette::{AVERAGE_COLOR, Palette};
use super::types::{AxisRange, EnrichedPoint, EnrichedSeries, EnrichedSeriesSet, LineStyle};

/// Legend labels shorten the node identifier to this many trailing
/// characters. Display polish only; the series key keeps the full id.
const LABEL_SUFFIX_LEN: usize = 6;

/// Builds enriched series from rows the backend already aggregated per
/// (node, slot): one row becomes one point, no client-side summation.
///
/// The series key combines the client implementation label with the full
/// node identifier, so two nodes running the same client can never collide.
/// Slot bounds are tracked with a running comparison during the single
/// accumulation pass.
#[must_use]
pub fn build_preagg_series(rows: &[BlobTimingRow], palette: &Palette) -> EnrichedSeriesSet {
    let mut per_node: BTreeMap<&str, NodeSeries<'_>> = BTreeMap::new();
    let mut min_slot: Option<u64> = None;
    let mut max_slot: Option<u64> = None;

    for row in rows {
        let (Some(slot), Some(median), Some(node_id)) =
            (row.slot, row.median_ms, row.node_id.as_deref())
        else {
            continue;
        };
        min_slot = Some(min_slot.map_or(slot, |current| current.min(slot)));
        max_slot = Some(max_slot.map_or(slot, |current| current.max(slot)));

        let entry = per_node.entry(node_id).or_insert_with(|| NodeSeries {
            client: row.client_name.as_deref().unwrap_or("unknown"),
            points: Vec::new(),
        });
        entry.points.push(EnrichedPoint {
            x: slot,
            y: median,
            min: row.min_ms.unwrap_or(median),
            max: row.max_ms.unwrap_or(median),
            avg: row.avg_ms.unwrap_or(median),
        });
    }

    let colors = palette.assign(per_node.keys().copied());
    let series = per_node
        .into_iter()
        .map(|(node_id, node)| {
            let mut points = node.points;
            points.sort_by_key(|point| point.x);
            EnrichedSeries {
                name: format!("{} ({})", node.client, node_id),
                display_label: format!("{} ({})", node.client, label_suffix(node_id)),
                color: colors.get(node_id).copied().unwrap_or(AVERAGE_COLOR),
                style: LineStyle::solid(),
                points,
            }
        })
        .collect();

    let x_range = match (min_slot, max_slot) {
        (Some(min), Some(max)) => AxisRange::padded(min, max),
        _ => AxisRange::EMPTY,
    };

    EnrichedSeriesSet { series, x_range }
}

struct NodeSeries<'row> {
    client: &'row str,
    points: Vec<EnrichedPoint>,
}

fn label_suffix(node_id: &str) -> &str {
    let len = node_id.chars().count();
    if len <= LABEL_SUFFIX_LEN {
        return node_id;
    }
    let skip = len.saturating_sub(LABEL_SUFFIX_LEN);
    node_id
        .char_indices()
        .nth(skip)
        .map_or(node_id, |(index, _)| node_id.get(index..).unwrap_or(node_id))
}
