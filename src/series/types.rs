use serde::Serialize;

/// Palette entry. Kept independent of the plotting backend so assembled
/// series can be serialized by the sinks as-is.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: u64,
    pub y: f64,
}

/// One backend pre-aggregated measurement, carrying the spread alongside the
/// plotted median for tooltip-style exports.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EnrichedPoint {
    pub x: u64,
    pub y: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct LineStyle {
    pub dashed: bool,
    pub markers: bool,
}

impl LineStyle {
    #[must_use]
    pub const fn solid() -> Self {
        Self {
            dashed: false,
            markers: true,
        }
    }

    #[must_use]
    pub const fn dashed() -> Self {
        Self {
            dashed: true,
            markers: false,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Series {
    /// Uniqueness key. Never truncated.
    pub name: String,
    /// Legend text; may carry a shortened node identifier.
    pub display_label: String,
    pub color: Rgb,
    pub style: LineStyle,
    pub points: Vec<SeriesPoint>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EnrichedSeries {
    pub name: String,
    pub display_label: String,
    pub color: Rgb,
    pub style: LineStyle,
    pub points: Vec<EnrichedPoint>,
}

impl EnrichedSeries {
    /// Drops the min/max/avg metadata, keeping the plotted median.
    #[must_use]
    pub fn to_series(&self) -> Series {
        Series {
            name: self.name.clone(),
            display_label: self.display_label.clone(),
            color: self.color,
            style: self.style,
            points: self
                .points
                .iter()
                .map(|point| SeriesPoint {
                    x: point.x,
                    y: point.y,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: u64,
    pub max: u64,
}

impl AxisRange {
    pub const EMPTY: AxisRange = AxisRange { min: 0, max: 0 };

    /// Chart bounds padded one slot past the observed extremes.
    #[must_use]
    pub fn padded(min: u64, max: u64) -> Self {
        Self {
            min: min.saturating_sub(1),
            max: max.saturating_add(1),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SeriesSet {
    pub series: Vec<Series>,
    pub x_range: AxisRange,
}

#[derive(Clone, Debug, Serialize)]
pub struct EnrichedSeriesSet {
    pub series: Vec<EnrichedSeries>,
    pub x_range: AxisRange,
}

impl EnrichedSeriesSet {
    /// Plain view for chart rendering; enriched metadata stays in exports.
    #[must_use]
    pub fn to_series_set(&self) -> SeriesSet {
        SeriesSet {
            series: self.series.iter().map(EnrichedSeries::to_series).collect(),
            x_range: self.x_range,
        }
    }
}
