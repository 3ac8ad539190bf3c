use std::path::Path;

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;

use crate::error::AppResult;
use crate::series::{GrowthDelta, GrowthSeries};

const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Renders state-size growth lines, one per expiry policy, dates on the
/// x-axis and gigabytes on the y-axis. The period-over-period delta for the
/// primary policy lands in the caption when available.
///
/// # Errors
///
/// Returns an error when the backing file cannot be written.
pub fn plot_state_growth(
    series: &[GrowthSeries],
    delta: Option<&GrowthDelta>,
    file_path: &Path,
) -> AppResult<()> {
    if series.iter().all(|entry| entry.points.is_empty()) {
        return Ok(());
    }

    let days: Vec<i32> = series
        .iter()
        .flat_map(|entry| entry.points.iter())
        .map(|point| point.date.num_days_from_ce())
        .collect();
    let x_min = days.iter().copied().min().unwrap_or(0);
    let x_max = days.iter().copied().max().unwrap_or(0).saturating_add(1);
    let y_max = series
        .iter()
        .flat_map(|entry| entry.points.iter())
        .map(|point| point.value)
        .fold(1.0f64, f64::max)
        * 1.05;

    let caption = match delta {
        Some(delta) => format!(
            "State size growth ({} change: {:+.2} GB, {:+.1}%)",
            delta.timeframe,
            delta.delta / BYTES_PER_GB,
            delta.percent
        ),
        None => "State size growth".to_owned(),
    };

    let root = BitMapBackend::new(file_path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("State size (GB)")
        .x_label_formatter(&|days_from_ce| {
            NaiveDate::from_num_days_from_ce_opt(*days_from_ce)
                .map_or_else(String::new, |date| date.format("%Y-%m-%d").to_string())
        })
        .y_label_formatter(&|bytes| format!("{:.1}", bytes / BYTES_PER_GB))
        .draw()?;

    for entry in series {
        let color = RGBColor(entry.color.r, entry.color.g, entry.color.b);
        let points: Vec<(i32, f64)> = entry
            .points
            .iter()
            .map(|point| (point.date.num_days_from_ce(), point.value))
            .collect();
        chart
            .draw_series(LineSeries::new(points, color))?
            .label(entry.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x.saturating_add(20), y)], color));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
