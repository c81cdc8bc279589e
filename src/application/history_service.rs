// History service - Filtered, sorted and paginated fill-up listing
use crate::application::error::Result;
use crate::application::fillup_repository::FillUpRepository;
use crate::application::vehicle_service::VehicleSelection;
use crate::domain::dashboard::{HistoryPage, HistoryRow};
use crate::domain::display::DisplayFormatter;
use crate::domain::fillup::{FillUpId, FillUpRecord, VehicleId};
use crate::domain::metrics::{PerFillMetrics, per_fill_metrics};
use chrono::NaiveDate;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Raw history query parameters; invalid values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub brand: Option<String>,
    pub grade: Option<String>,
    pub station: Option<String>,
    pub vehicle: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySort {
    Date,
    Odometer,
    Liters,
    Total,
}

impl HistorySort {
    fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some("odometer") => HistorySort::Odometer,
            Some("liters") => HistorySort::Liters,
            Some("total") => HistorySort::Total,
            _ => HistorySort::Date,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            HistorySort::Date => "date",
            HistorySort::Odometer => "odometer",
            HistorySort::Liters => "liters",
            HistorySort::Total => "total",
        }
    }

    fn compare(&self, a: &FillUpRecord, b: &FillUpRecord) -> Ordering {
        let primary = match self {
            HistorySort::Date => a.date.cmp(&b.date),
            HistorySort::Odometer => a.odometer_km.cmp(&b.odometer_km),
            HistorySort::Liters => a.liters.cmp(&b.liters),
            HistorySort::Total => a.total_amount.cmp(&b.total_amount),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

/// Text filters match case-insensitively anywhere in the field.
#[derive(Debug)]
struct HistoryFilter {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    brand: Option<String>,
    grade: Option<String>,
    station: Option<String>,
}

impl HistoryFilter {
    fn from_query(query: &HistoryQuery) -> Self {
        let date = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| v.trim().parse::<NaiveDate>().ok())
        };
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
        };

        Self {
            start: date(&query.start),
            end: date(&query.end),
            brand: text(&query.brand),
            grade: text(&query.grade),
            station: text(&query.station),
        }
    }

    fn matches(&self, record: &FillUpRecord) -> bool {
        let contains = |needle: &Option<String>, haystack: &str| {
            needle
                .as_ref()
                .is_none_or(|n| haystack.to_lowercase().contains(n.as_str()))
        };

        self.start.is_none_or(|start| record.date >= start)
            && self.end.is_none_or(|end| record.date <= end)
            && contains(&self.brand, &record.fuel_brand)
            && contains(&self.grade, &record.fuel_grade)
            && contains(&self.station, &record.station_name)
    }
}

#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn FillUpRepository>,
    formatter: DisplayFormatter,
    page_size: usize,
}

impl HistoryService {
    pub fn new(
        repository: Arc<dyn FillUpRepository>,
        formatter: DisplayFormatter,
        page_size: usize,
    ) -> Self {
        Self {
            repository,
            formatter,
            page_size: page_size.max(1),
        }
    }

    pub async fn history(&self, query: &HistoryQuery) -> Result<HistoryPage> {
        let vehicles = self.repository.list_vehicles().await?;
        let selection = VehicleSelection::resolve(query.vehicle.as_deref(), &vehicles);
        let all_records = self.repository.list_fillups(None).await?;

        let filter = HistoryFilter::from_query(query);
        let mut records: Vec<&FillUpRecord> = all_records
            .iter()
            .filter(|r| selection.vehicle_id().is_none_or(|id| r.vehicle_id == id))
            .filter(|r| filter.matches(r))
            .collect();

        let sort = HistorySort::from_param(query.sort.as_deref());
        let descending = query.dir.as_deref().map(str::trim) != Some("asc");
        records.sort_by(|a, b| {
            let ordering = sort.compare(a, b);
            if descending { ordering.reverse() } else { ordering }
        });

        let total_count = records.len();
        let total_pages = total_count.div_ceil(self.page_size).max(1);
        let page = query
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, total_pages);

        let page_records: Vec<&FillUpRecord> = records
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        let mut metrics_by_id = metrics_for_vehicles_of(&page_records, &all_records);
        let vehicles_by_id: HashMap<VehicleId, _> = vehicles.iter().map(|v| (v.id, v)).collect();

        let rows = page_records
            .iter()
            .map(|record| {
                let metrics = metrics_by_id.remove(&record.id).unwrap_or_default();
                HistoryRow::new(
                    record,
                    vehicles_by_id.get(&record.vehicle_id).copied(),
                    metrics,
                    &self.formatter,
                )
            })
            .collect();

        tracing::debug!(
            "History page {}/{}: {} of {} fill-ups",
            page,
            total_pages,
            page_records.len(),
            total_count
        );

        Ok(HistoryPage {
            rows,
            page,
            total_pages,
            total_count,
            sort: sort.as_str().to_string(),
            dir: if descending { "desc" } else { "asc" }.to_string(),
            efficiency_label: self.formatter.efficiency_label().to_string(),
            brand_options: distinct_values(&all_records, |r| &r.fuel_brand),
            grade_options: distinct_values(&all_records, |r| &r.fuel_grade),
            station_options: distinct_values(&all_records, |r| &r.station_name),
        })
    }
}

/// Per-fill metrics over the complete history of every vehicle on the page,
/// so that list filters never move a row's baseline.
fn metrics_for_vehicles_of(
    page_records: &[&FillUpRecord],
    all_records: &[FillUpRecord],
) -> HashMap<FillUpId, PerFillMetrics> {
    let vehicle_ids: BTreeSet<VehicleId> = page_records.iter().map(|r| r.vehicle_id).collect();

    let mut by_vehicle: BTreeMap<VehicleId, Vec<&FillUpRecord>> = BTreeMap::new();
    for record in all_records.iter().filter(|r| vehicle_ids.contains(&r.vehicle_id)) {
        by_vehicle.entry(record.vehicle_id).or_default().push(record);
    }

    let mut metrics_by_id = HashMap::new();
    for records in by_vehicle.values_mut() {
        records.sort_by_key(|r| r.chronological_key());
        let metrics = per_fill_metrics(records.iter().copied());
        metrics_by_id.extend(records.iter().map(|r| r.id).zip(metrics));
    }
    metrics_by_id
}

/// Sorted distinct non-blank values of a text field, for filter controls.
fn distinct_values<F>(records: &[FillUpRecord], field: F) -> Vec<String>
where
    F: Fn(&FillUpRecord) -> &String,
{
    records
        .iter()
        .map(field)
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
