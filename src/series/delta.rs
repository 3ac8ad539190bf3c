use chrono::NaiveDate;
use serde::Serialize;

/// How far back the delta comparison reaches. Monthly is a fixed 30 days,
/// not a calendar month.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, clap::ValueEnum)]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    #[must_use]
    pub const fn days_back(self) -> i64 {
        match self {
            Timeframe::Daily => 1,
            Timeframe::Weekly => 7,
            Timeframe::Monthly => 30,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::Daily => write!(formatter, "daily"),
            Timeframe::Weekly => write!(formatter, "weekly"),
            Timeframe::Monthly => write!(formatter, "monthly"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One expiry-policy variant of the state-size time series.
#[derive(Clone, Debug, Serialize)]
pub struct GrowthSeries {
    pub name: String,
    pub color: super::types::Rgb,
    pub points: Vec<GrowthPoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GrowthDelta {
    pub timeframe: Timeframe,
    pub current: GrowthPoint,
    pub previous: GrowthPoint,
    pub delta: f64,
    pub percent: f64,
}

/// Period-over-period delta for an ascending-by-date series.
///
/// The latest point is "current"; "previous" is the strictly-earlier point
/// whose date is closest to (current − N days). Returns `None` when fewer
/// than two points exist, which is a normal first-load state rather than an
/// error. Percent change against a zero base is defined as 0.
#[must_use]
pub fn compute_growth_delta(points: &[GrowthPoint], timeframe: Timeframe) -> Option<GrowthDelta> {
    let current = *points.last()?;
    let target = current.date - chrono::Duration::days(timeframe.days_back());

    let mut previous: Option<GrowthPoint> = None;
    let mut best_distance: Option<i64> = None;
    for point in points {
        if point.date >= current.date {
            continue;
        }
        let distance = (point.date - target).num_days().abs();
        if best_distance.is_none_or(|best| distance < best) {
            best_distance = Some(distance);
            previous = Some(*point);
        }
    }
    let previous = previous?;

    let delta = current.value - previous.value;
    let percent = if previous.value == 0.0 {
        0.0
    } else {
        delta / previous.value * 100.0
    };
    Some(GrowthDelta {
        timeframe,
        current,
        previous,
        delta,
        percent,
    })
}
