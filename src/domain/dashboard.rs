// Dashboard view models
use super::chart::ChartGeometry;
use super::display::{DisplayFormatter, or_placeholder};
use super::fillup::{FillUpId, FillUpRecord, Vehicle, VehicleId};
use super::metrics::{AggregateMetrics, PerFillMetrics};
use super::stats::{BrandGradeSummary, StatsWindow};
use chrono::NaiveDate;
use serde::Serialize;

/// Headline figures of an aggregate, formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub avg_cost_per_volume: String,
    pub avg_consumption: String,
    pub avg_distance_per_day: String,
    pub avg_cost_per_distance: String,
    pub total_spend: String,
    pub total_distance: String,
}

impl MetricsSummary {
    pub fn from_aggregate(metrics: &AggregateMetrics, fmt: &DisplayFormatter) -> Self {
        Self {
            avg_cost_per_volume: or_placeholder(fmt.cost_per_volume(metrics.avg_cost_per_liter)),
            avg_consumption: or_placeholder(fmt.consumption(
                metrics.avg_consumption_l_per_100km,
                metrics.avg_consumption_mpg,
            )),
            avg_distance_per_day: or_placeholder(
                fmt.distance_per_day(metrics.avg_distance_per_day_km),
            ),
            avg_cost_per_distance: or_placeholder(
                fmt.cost_per_distance(metrics.avg_cost_per_km, metrics.avg_cost_per_mile),
            ),
            total_spend: fmt.money(metrics.total_spend),
            total_distance: fmt.distance(metrics.total_distance_km as f64),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsOverview {
    pub window: StatsWindow,
    pub window_label: String,
    pub selected_vehicle: Option<VehicleId>,
    pub efficiency_label: String,
    pub rolling: MetricsSummary,
    pub all_time: MetricsSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub unit_label: String,
    pub y_min_label: Option<String>,
    pub y_max_label: Option<String>,
    pub geometry: ChartGeometry,
}

impl ChartView {
    pub fn new(geometry: ChartGeometry, precision: usize, unit_label: String) -> Self {
        let label = |value: Option<f64>| value.map(|v| format!("{:.*}", precision, v));
        Self {
            unit_label,
            y_min_label: label(geometry.y_min),
            y_max_label: label(geometry.y_max),
            geometry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandGradeRow {
    pub brand: String,
    pub grade: String,
    pub avg_cost_per_volume: String,
    pub avg_consumption: String,
    pub count: usize,
}

impl BrandGradeRow {
    pub fn from_summary(summary: &BrandGradeSummary, fmt: &DisplayFormatter) -> Self {
        let blank_to_placeholder = |value: &str| {
            if value.is_empty() {
                or_placeholder(None)
            } else {
                value.to_string()
            }
        };

        Self {
            brand: blank_to_placeholder(&summary.brand),
            grade: blank_to_placeholder(&summary.grade),
            avg_cost_per_volume: or_placeholder(fmt.cost_per_volume(summary.avg_cost_per_liter)),
            avg_consumption: or_placeholder(
                fmt.consumption_from_l_per_100km(summary.avg_consumption_l_per_100km),
            ),
            count: summary.count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDashboard {
    pub title: String,
    pub window: StatsWindow,
    pub window_label: String,
    pub selected_vehicle: Option<VehicleId>,
    pub efficiency_label: String,
    pub summary: MetricsSummary,
    pub cost_chart: ChartView,
    pub consumption_chart: ChartView,
    pub brand_rows: Vec<BrandGradeRow>,
}

/// One fill-up as listed in the history, with its derived metrics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub id: FillUpId,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub date: NaiveDate,
    pub station_name: String,
    pub fuel_brand: String,
    pub fuel_grade: String,
    pub odometer: i64,
    pub volume: String,
    pub total: String,
    pub distance_since_last: Option<String>,
    pub unit_price: Option<String>,
    pub efficiency: Option<String>,
    pub cost_per_distance: Option<String>,
    pub metrics: PerFillMetrics,
}

impl HistoryRow {
    pub fn new(
        record: &FillUpRecord,
        vehicle: Option<&Vehicle>,
        metrics: PerFillMetrics,
        fmt: &DisplayFormatter,
    ) -> Self {
        let vehicle_name = vehicle
            .map(Vehicle::display_name)
            .unwrap_or_else(|| format!("Vehicle #{}", record.vehicle_id));

        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            vehicle_name,
            date: record.date,
            station_name: record.station_name.clone(),
            fuel_brand: record.fuel_brand.clone(),
            fuel_grade: record.fuel_grade.clone(),
            odometer: fmt.distance_value(f64::from(record.odometer_km)),
            volume: fmt.volume(record.liters),
            total: fmt.money(record.total_amount),
            distance_since_last: metrics
                .distance_since_last_km
                .map(|km| fmt.distance_value(f64::from(km)).to_string()),
            unit_price: fmt.cost_per_volume(metrics.unit_price_per_liter),
            efficiency: fmt.consumption(metrics.efficiency_l_per_100km, metrics.efficiency_mpg),
            cost_per_distance: fmt.cost_per_distance(metrics.cost_per_km, metrics.cost_per_mile),
            metrics,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub rows: Vec<HistoryRow>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub sort: String,
    pub dir: String,
    pub efficiency_label: String,
    /// Distinct non-blank values across every fill-up, for filter controls
    pub brand_options: Vec<String>,
    pub grade_options: Vec<String>,
    pub station_options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::build_chart;
    use crate::domain::display::{PLACEHOLDER, UnitPreferences};
    use crate::domain::fillup::test_support::{day, fillup};
    use crate::domain::metrics::{aggregate_metrics, per_fill_metrics};
    use crate::domain::stats::SeriesPoint;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_from_empty_aggregate() {
        let fmt = DisplayFormatter::new(UnitPreferences::default());
        let summary = MetricsSummary::from_aggregate(&AggregateMetrics::empty(), &fmt);

        assert_eq!(summary.total_spend, "USD 0.00");
        assert_eq!(summary.total_distance, "0 km");
        assert_eq!(summary.avg_consumption, PLACEHOLDER);
        assert_eq!(summary.avg_cost_per_volume, PLACEHOLDER);
        assert_eq!(summary.avg_distance_per_day, PLACEHOLDER);
        assert_eq!(summary.avg_cost_per_distance, PLACEHOLDER);
    }

    #[test]
    fn test_summary_from_aggregate() {
        let records = vec![
            fillup(1, 1, "2024-01-01", 1000, dec!(40.00), dec!(80.00)),
            fillup(2, 1, "2024-01-15", 1100, dec!(8.00), dec!(16.00)),
        ];
        let metrics = aggregate_metrics(&records, None, day("2024-02-01"));
        let fmt = DisplayFormatter::new(UnitPreferences::default());
        let summary = MetricsSummary::from_aggregate(&metrics, &fmt);

        assert_eq!(summary.avg_cost_per_volume, "USD 2.00 / L");
        assert_eq!(summary.avg_consumption, "8.0 L/100km");
        assert_eq!(summary.avg_cost_per_distance, "USD 0.16 / km");
        assert_eq!(summary.total_spend, "USD 96.00");
        assert_eq!(summary.total_distance, "100 km");
        assert_eq!(summary.avg_distance_per_day, "7 km/day");
    }

    #[test]
    fn test_history_row_formats_metrics() {
        let records = vec![
            fillup(1, 1, "2024-01-01", 1000, dec!(40.00), dec!(80.00)),
            fillup(2, 1, "2024-01-15", 1100, dec!(8.00), dec!(16.00)),
        ];
        let metrics = per_fill_metrics(&records);
        let fmt = DisplayFormatter::new(UnitPreferences::default());

        let first = HistoryRow::new(&records[0], None, metrics[0].clone(), &fmt);
        assert_eq!(first.vehicle_name, "Vehicle #1");
        assert_eq!(first.distance_since_last, None);
        assert_eq!(first.efficiency, None);

        let second = HistoryRow::new(&records[1], None, metrics[1].clone(), &fmt);
        assert_eq!(second.odometer, 1100);
        assert_eq!(second.volume, "8.00");
        assert_eq!(second.total, "USD 16.00");
        assert_eq!(second.distance_since_last.as_deref(), Some("100"));
        assert_eq!(second.unit_price.as_deref(), Some("USD 2.00 / L"));
        assert_eq!(second.efficiency.as_deref(), Some("8.0 L/100km"));
        assert_eq!(second.cost_per_distance.as_deref(), Some("USD 0.16 / km"));
    }

    #[test]
    fn test_brand_row_placeholders() {
        let fmt = DisplayFormatter::new(UnitPreferences::default());
        let summary = BrandGradeSummary {
            brand: String::new(),
            grade: "Regular".to_string(),
            avg_cost_per_liter: None,
            avg_consumption_l_per_100km: Some(7.26),
            count: 3,
        };
        let row = BrandGradeRow::from_summary(&summary, &fmt);

        assert_eq!(row.brand, PLACEHOLDER);
        assert_eq!(row.grade, "Regular");
        assert_eq!(row.avg_cost_per_volume, PLACEHOLDER);
        assert_eq!(row.avg_consumption, "7.3 L/100km");
        assert_eq!(row.count, 3);
    }

    #[test]
    fn test_chart_view_labels_use_precision() {
        let series = vec![
            SeriesPoint::new(day("2024-01-01"), Some(1.457)),
            SeriesPoint::new(day("2024-01-02"), Some(2.0)),
        ];
        let view = ChartView::new(build_chart(&series, 600.0, 160.0), 2, "USD / L".to_string());
        assert_eq!(view.y_min_label.as_deref(), Some("1.46"));
        assert_eq!(view.y_max_label.as_deref(), Some("2.00"));

        let empty = ChartView::new(build_chart(&[], 600.0, 160.0), 1, "L/100km".to_string());
        assert_eq!(empty.y_min_label, None);
    }
}
