use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::error::AppResult;
use crate::series::SeriesSet;

/// Renders an assembled series set as a multi-line chart.
///
/// Per-node series draw solid with point markers; the synthetic average
/// draws dashed without markers. Nothing is drawn for an empty set.
///
/// # Errors
///
/// Returns an error when the backing file cannot be written.
pub fn plot_series_set(
    set: &SeriesSet,
    title: &str,
    y_desc: &str,
    file_path: &Path,
) -> AppResult<()> {
    if set.series.iter().all(|series| series.points.is_empty()) {
        return Ok(());
    }

    let x_min = set.x_range.min;
    let x_max = set.x_range.max.max(x_min.saturating_add(1));
    let y_max = set
        .series
        .iter()
        .flat_map(|series| series.points.iter())
        .map(|point| point.y)
        .fold(1.0f64, f64::max)
        * 1.05;

    let root = BitMapBackend::new(file_path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Slot")
        .y_desc(y_desc)
        .draw()?;

    for series in &set.series {
        let color = RGBColor(series.color.r, series.color.g, series.color.b);
        let points: Vec<(u64, f64)> = series.points.iter().map(|point| (point.x, point.y)).collect();
        if series.style.dashed {
            chart
                .draw_series(DashedLineSeries::new(
                    points.iter().copied(),
                    6,
                    3,
                    color.stroke_width(2),
                ))?
                .label(series.display_label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x.saturating_add(20), y)], color)
                });
        } else {
            chart
                .draw_series(LineSeries::new(points.iter().copied(), color))?
                .label(series.display_label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x.saturating_add(20), y)], color)
                });
        }
        if series.style.markers {
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
