// Statistics service - Use case for the metrics overview and statistics dashboard
use crate::application::error::Result;
use crate::application::fillup_repository::FillUpRepository;
use crate::application::vehicle_service::VehicleSelection;
use crate::domain::chart::build_chart;
use crate::domain::dashboard::{
    BrandGradeRow, ChartView, MetricsOverview, MetricsSummary, StatisticsDashboard,
};
use crate::domain::display::DisplayFormatter;
use crate::domain::fillup::{FillUpRecord, Vehicle};
use crate::domain::metrics::aggregate_metrics;
use crate::domain::stats::{
    ChartSeries, SeriesPoint, StatsWindow, brand_grade_summary, timeseries_consumption,
    timeseries_cost_per_liter,
};
use crate::infrastructure::config::ChartSettings;
use chrono::NaiveDate;
use std::sync::Arc;

const COST_PRECISION: usize = 2;
const CONSUMPTION_PRECISION: usize = 1;

#[derive(Clone)]
pub struct StatisticsService {
    repository: Arc<dyn FillUpRepository>,
    formatter: DisplayFormatter,
    charts: ChartSettings,
}

impl StatisticsService {
    pub fn new(
        repository: Arc<dyn FillUpRepository>,
        formatter: DisplayFormatter,
        charts: ChartSettings,
    ) -> Self {
        Self {
            repository,
            formatter,
            charts,
        }
    }

    /// Rolling-window and all-time summaries side by side.
    pub async fn metrics_overview(
        &self,
        vehicle_param: Option<&str>,
        window: StatsWindow,
        today: NaiveDate,
    ) -> Result<MetricsOverview> {
        let (selection, _, records) = self.load(vehicle_param).await?;

        let rolling = aggregate_metrics(&records, window.start(today), today);
        let all_time = aggregate_metrics(&records, None, today);

        Ok(MetricsOverview {
            window,
            window_label: window.label().to_string(),
            selected_vehicle: selection.vehicle_id(),
            efficiency_label: self.formatter.efficiency_label().to_string(),
            rolling: MetricsSummary::from_aggregate(&rolling, &self.formatter),
            all_time: MetricsSummary::from_aggregate(&all_time, &self.formatter),
        })
    }

    pub async fn statistics_dashboard(
        &self,
        vehicle_param: Option<&str>,
        window: StatsWindow,
        today: NaiveDate,
    ) -> Result<StatisticsDashboard> {
        let (selection, vehicle, records) = self.load(vehicle_param).await?;
        let window_start = window.start(today);

        let summary = aggregate_metrics(&records, window_start, today);
        let window_records: Vec<FillUpRecord> = records
            .into_iter()
            .filter(|r| window_start.is_none_or(|start| r.date >= start))
            .collect();

        let subject = vehicle
            .map(|v| v.display_name())
            .unwrap_or_else(|| "All vehicles".to_string());
        let title = format!("{} statistics ({})", subject, window.label().to_lowercase());

        let brand_rows = brand_grade_summary(&window_records)
            .iter()
            .map(|s| BrandGradeRow::from_summary(s, &self.formatter))
            .collect();

        tracing::debug!(
            "Statistics for {:?} over {}: {} fill-ups in window",
            selection,
            window.param(),
            window_records.len()
        );

        Ok(StatisticsDashboard {
            title,
            window,
            window_label: window.label().to_string(),
            selected_vehicle: selection.vehicle_id(),
            efficiency_label: self.formatter.efficiency_label().to_string(),
            summary: MetricsSummary::from_aggregate(&summary, &self.formatter),
            cost_chart: self.cost_chart(&window_records),
            consumption_chart: self.consumption_chart(&window_records),
            brand_rows,
        })
    }

    fn cost_chart(&self, records: &[FillUpRecord]) -> ChartView {
        let series: ChartSeries = timeseries_cost_per_liter(records)
            .into_iter()
            .map(|p| SeriesPoint::new(p.date, self.formatter.cost_per_volume_value(p.value)))
            .collect();

        ChartView::new(
            build_chart(&series, self.charts.width, self.charts.height),
            COST_PRECISION,
            self.formatter.cost_per_volume_unit(),
        )
    }

    fn consumption_chart(&self, records: &[FillUpRecord]) -> ChartView {
        let series: ChartSeries = timeseries_consumption(records)
            .into_iter()
            .map(|p| {
                let value = p.value.and_then(|v| self.formatter.consumption_value(v));
                SeriesPoint::new(p.date, value)
            })
            .collect();

        ChartView::new(
            build_chart(&series, self.charts.width, self.charts.height),
            CONSUMPTION_PRECISION,
            self.formatter.efficiency_label().to_string(),
        )
    }

    async fn load(
        &self,
        vehicle_param: Option<&str>,
    ) -> Result<(VehicleSelection, Option<Vehicle>, Vec<FillUpRecord>)> {
        let vehicles = self.repository.list_vehicles().await?;
        let selection = VehicleSelection::resolve(vehicle_param, &vehicles);
        let vehicle = selection
            .vehicle_id()
            .and_then(|id| vehicles.into_iter().find(|v| v.id == id));

        let ids = selection.vehicle_id().map(|id| vec![id]);
        let records = self.repository.list_fillups(ids.as_deref()).await?;
        Ok((selection, vehicle, records))
    }
}
