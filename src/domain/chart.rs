// Line chart geometry for sparse date series
use super::stats::SeriesPoint;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartGeometry {
    pub points: Vec<PlotPoint>,
    pub path: String,
    pub x_labels: Vec<String>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub has_data: bool,
    pub width: f64,
    pub height: f64,
}

impl ChartGeometry {
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            points: Vec::new(),
            path: String::new(),
            x_labels: Vec::new(),
            y_min: None,
            y_max: None,
            has_data: false,
            width,
            height,
        }
    }
}

/// Map a date series onto a `width` x `height` plot with y growing downwards.
///
/// Positions without a value are skipped; points sharing a date keep their
/// original order.
pub fn build_chart(series: &[SeriesPoint<Option<f64>>], width: f64, height: f64) -> ChartGeometry {
    let mut present: Vec<(NaiveDate, usize, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| p.value.map(|v| (p.date, idx, v)))
        .collect();

    if present.is_empty() {
        return ChartGeometry::empty(width, height);
    }
    present.sort_by_key(|&(date, idx, _)| (date, idx));

    let min_date = present[0].0;
    let max_date = present[present.len() - 1].0;
    let min_value = present.iter().map(|p| p.2).fold(f64::INFINITY, f64::min);
    let max_value = present.iter().map(|p| p.2).fold(f64::NEG_INFINITY, f64::max);

    let total_days = (max_date - min_date).num_days().max(1) as f64;
    let value_range = max_value - min_value;

    let points: Vec<PlotPoint> = present
        .iter()
        .map(|&(date, _, value)| {
            let x = if max_date == min_date {
                width / 2.0
            } else {
                (date - min_date).num_days() as f64 / total_days * width
            };
            let y = if value_range == 0.0 {
                height / 2.0
            } else {
                height - (value - min_value) / value_range * height
            };
            PlotPoint { x, y }
        })
        .collect();

    let dates: Vec<NaiveDate> = present.iter().map(|p| p.0).collect();

    ChartGeometry {
        path: to_svg_path(&points),
        x_labels: x_axis_labels(&dates),
        points,
        y_min: Some(min_value),
        y_max: Some(max_value),
        has_data: true,
        width,
        height,
    }
}

/// Polyline path: `M x0 y0 L x1 y1 ...` with two decimals.
pub fn to_svg_path(points: &[PlotPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let command = if i == 0 { 'M' } else { 'L' };
            format!("{} {:.2} {:.2}", command, p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First and last date labels, plus the middle one when it is distinct.
fn x_axis_labels(sorted_dates: &[NaiveDate]) -> Vec<String> {
    let mut unique = sorted_dates.to_vec();
    unique.dedup();
    let labels: Vec<String> = unique.iter().map(|d| d.format("%b %d").to_string()).collect();

    let (Some(first), Some(last)) = (labels.first(), labels.last()) else {
        return Vec::new();
    };

    let mut result = vec![first.clone()];
    if labels.len() > 2 {
        let middle = &labels[labels.len() / 2];
        if middle != first && middle != last {
            result.push(middle.clone());
        }
    }
    if labels.len() > 1 {
        result.push(last.clone());
    }
    result
}
