// Statistics windows, chart series and brand/grade summaries
use super::fillup::{FillUpId, FillUpRecord, OdometerCursor, sorted_by_vehicle, sorted_chronologically};
use super::metrics::consumption_l_per_100km;
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsWindow {
    #[default]
    #[serde(rename = "30")]
    Last30Days,
    #[serde(rename = "90")]
    Last90Days,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "all")]
    AllTime,
}

impl StatsWindow {
    /// Parse a `window` query value; anything unrecognised means the last 30 days.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(|p| p.trim().to_lowercase()).as_deref() {
            Some("90") => StatsWindow::Last90Days,
            Some("ytd") => StatsWindow::YearToDate,
            Some("all") => StatsWindow::AllTime,
            _ => StatsWindow::Last30Days,
        }
    }

    /// Inclusive first day of the window, `None` for all time.
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            StatsWindow::Last30Days => Some(today - Days::new(30)),
            StatsWindow::Last90Days => Some(today - Days::new(90)),
            StatsWindow::YearToDate => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            StatsWindow::AllTime => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsWindow::Last30Days => "Last 30 days",
            StatsWindow::Last90Days => "Last 90 days",
            StatsWindow::YearToDate => "Year to date",
            StatsWindow::AllTime => "All time",
        }
    }

    pub fn param(&self) -> &'static str {
        match self {
            StatsWindow::Last30Days => "30",
            StatsWindow::Last90Days => "90",
            StatsWindow::YearToDate => "ytd",
            StatsWindow::AllTime => "all",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint<T> {
    pub date: NaiveDate,
    pub value: T,
}

impl<T> SeriesPoint<T> {
    pub fn new(date: NaiveDate, value: T) -> Self {
        Self { date, value }
    }
}

/// Chart-ready series; a `None` value is a position without a data point.
pub type ChartSeries = Vec<SeriesPoint<Option<f64>>>;

/// Price per litre of every fill-up with fuel, in `(date, id)` order.
pub fn timeseries_cost_per_liter(records: &[FillUpRecord]) -> Vec<SeriesPoint<Decimal>> {
    sorted_chronologically(records)
        .into_iter()
        .filter(|r| r.liters > Decimal::ZERO)
        .map(|r| SeriesPoint::new(r.date, r.total_amount / r.liters))
        .collect()
}

/// Per-fill consumption in L/100km for every record, in `(date, id)` order.
///
/// Records without a usable previous fill-up of the same vehicle keep their
/// position with a `None` value.
pub fn timeseries_consumption(records: &[FillUpRecord]) -> ChartSeries {
    let mut cursor = OdometerCursor::new();
    let consumption_by_id: HashMap<FillUpId, Option<f64>> = sorted_by_vehicle(records)
        .into_iter()
        .map(|record| {
            let value = cursor
                .advance(record)
                .distance()
                .and_then(|distance| consumption_l_per_100km(record.liters, distance));
            (record.id, value)
        })
        .collect();

    sorted_chronologically(records)
        .into_iter()
        .map(|r| SeriesPoint::new(r.date, consumption_by_id.get(&r.id).copied().flatten()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandGradeSummary {
    pub brand: String,
    pub grade: String,
    pub avg_cost_per_liter: Option<Decimal>,
    pub avg_consumption_l_per_100km: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Default)]
struct BrandGradeTotals {
    total_amount: Decimal,
    total_liters: Decimal,
    consumptions: Vec<f64>,
    count: usize,
}

/// Average price and consumption per `(brand, grade)`, sorted
/// case-insensitively by brand then grade. Empty brand or grade is a group
/// of its own.
///
/// Consumption is attributed to the group of the fill-up that refilled the
/// tank, measured against the previous fill-up of the same vehicle whatever
/// its brand.
pub fn brand_grade_summary(records: &[FillUpRecord]) -> Vec<BrandGradeSummary> {
    let mut groups: BTreeMap<(String, String), BrandGradeTotals> = BTreeMap::new();
    let mut cursor = OdometerCursor::new();

    for record in sorted_by_vehicle(records) {
        let step = cursor.advance(record);
        let totals = groups
            .entry((record.fuel_brand.clone(), record.fuel_grade.clone()))
            .or_default();

        if record.liters > Decimal::ZERO {
            totals.total_amount += record.total_amount;
            totals.total_liters += record.liters;
        }
        if let Some(consumption) = step
            .distance()
            .and_then(|distance| consumption_l_per_100km(record.liters, distance))
        {
            totals.consumptions.push(consumption);
        }
        totals.count += 1;
    }

    let mut summaries: Vec<BrandGradeSummary> = groups
        .into_iter()
        .map(|((brand, grade), totals)| {
            let avg_cost_per_liter = (totals.total_liters > Decimal::ZERO)
                .then(|| totals.total_amount / totals.total_liters);
            let avg_consumption_l_per_100km = (!totals.consumptions.is_empty()).then(|| {
                totals.consumptions.iter().sum::<f64>() / totals.consumptions.len() as f64
            });

            BrandGradeSummary {
                brand,
                grade,
                avg_cost_per_liter,
                avg_consumption_l_per_100km,
                count: totals.count,
            }
        })
        .collect();

    summaries.sort_by_cached_key(|s| (s.brand.to_lowercase(), s.grade.to_lowercase()));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fillup::test_support::{branded, day, fillup};
    use rust_decimal_macros::dec;

    fn three_fills() -> Vec<FillUpRecord> {
        vec![
            branded(fillup(1, 1, "2025-01-10", 1000, dec!(40.00), dec!(80.00)), "BrandA", "Regular"),
            branded(fillup(2, 1, "2025-01-11", 1200, dec!(50.00), dec!(100.00)), "BrandA", "Regular"),
            branded(fillup(3, 1, "2025-01-12", 1400, dec!(45.00), dec!(90.00)), "BrandB", "Premium"),
        ]
    }

    #[test]
    fn test_window_start_from_param() {
        let today = day("2025-01-15");
        let start = |p: &str| StatsWindow::from_param(Some(p)).start(today);

        assert_eq!(start("30"), Some(day("2024-12-16")));
        assert_eq!(start("90"), Some(day("2024-10-17")));
        assert_eq!(start("ytd"), Some(day("2025-01-01")));
        assert_eq!(start(" YTD "), Some(day("2025-01-01")));
        assert_eq!(start("all"), None);
        assert_eq!(start("unknown"), Some(day("2024-12-16")));
        assert_eq!(StatsWindow::from_param(None), StatsWindow::Last30Days);

        // Calendar arithmetic across a leap February.
        assert_eq!(StatsWindow::Last30Days.start(day("2024-03-01")), Some(day("2024-01-31")));
    }

    #[test]
    fn test_timeseries_cost_per_liter() {
        let mut records = three_fills();
        records.swap(0, 1);
        records.push(fillup(4, 1, "2025-01-13", 1500, dec!(0), dec!(10)));

        let series = timeseries_cost_per_liter(&records);
        let dates: Vec<_> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day("2025-01-10"), day("2025-01-11"), day("2025-01-12")]);
        assert!(series.iter().all(|p| p.value == dec!(2)));
    }

    #[test]
    fn test_timeseries_consumption() {
        let series = timeseries_consumption(&three_fills());

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, day("2025-01-10"));
        assert_eq!(series[0].value, None);
        assert_eq!(series[1].value, Some(25.0));
        assert_eq!(series[2].value, Some(22.5));
    }

    #[test]
    fn test_timeseries_consumption_keeps_every_record_across_vehicles() {
        let records = vec![
            fillup(1, 1, "2025-01-01", 1000, dec!(40), dec!(80)),
            fillup(2, 2, "2025-01-02", 7000, dec!(40), dec!(80)),
            fillup(3, 1, "2025-01-03", 1400, dec!(40), dec!(80)),
            fillup(4, 2, "2025-01-03", 7200, dec!(20), dec!(40)),
        ];
        let values: Vec<_> = timeseries_consumption(&records).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![None, None, Some(10.0), Some(10.0)]);
    }

    #[test]
    fn test_brand_grade_summary() {
        let summary = brand_grade_summary(&three_fills());
        assert_eq!(summary.len(), 2);

        let brand_a = summary.iter().find(|s| s.brand == "BrandA").unwrap();
        assert_eq!(brand_a.count, 2);
        assert_eq!(brand_a.avg_cost_per_liter, Some(dec!(2)));
        assert_eq!(brand_a.avg_consumption_l_per_100km, Some(25.0));

        let brand_b = summary.iter().find(|s| s.brand == "BrandB").unwrap();
        assert_eq!(brand_b.count, 1);
        assert_eq!(brand_b.avg_cost_per_liter, Some(dec!(2)));
        assert_eq!(brand_b.avg_consumption_l_per_100km, Some(22.5));
    }

    #[test]
    fn test_brand_grade_summary_groups_blank_and_sorts_case_insensitively() {
        let records = vec![
            branded(fillup(1, 1, "2025-01-01", 1000, dec!(40), dec!(80)), "shell", "Regular"),
            branded(fillup(2, 2, "2025-01-01", 3000, dec!(30), dec!(66)), "", ""),
            branded(fillup(3, 3, "2025-01-01", 5000, dec!(20), dec!(50)), "Aral", "Super"),
        ];
        let summary = brand_grade_summary(&records);
        let brands: Vec<_> = summary.iter().map(|s| s.brand.as_str()).collect();
        assert_eq!(brands, vec!["", "Aral", "shell"]);

        let blank = &summary[0];
        assert_eq!(blank.count, 1);
        assert_eq!(blank.avg_cost_per_liter, Some(dec!(2.2)));
        assert_eq!(blank.avg_consumption_l_per_100km, None);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(timeseries_cost_per_liter(&[]).is_empty());
        assert!(timeseries_consumption(&[]).is_empty());
        assert!(brand_grade_summary(&[]).is_empty());
    }
}
