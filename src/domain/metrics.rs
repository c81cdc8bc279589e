// Per-fill and aggregate fuel metrics
use super::fillup::{FillUpRecord, OdometerCursor, OdometerStep};
use super::units::{MILES_PER_KM_DECIMAL, km_to_miles, liters_to_gallons};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Metrics derived for one fill-up relative to the previous fill-up of the
/// same vehicle. `None` means the value is undefined for this record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerFillMetrics {
    pub distance_since_last_km: Option<u32>,
    pub unit_price_per_liter: Option<Decimal>,
    pub efficiency_l_per_100km: Option<f64>,
    pub efficiency_mpg: Option<f64>,
    pub cost_per_km: Option<Decimal>,
    pub cost_per_mile: Option<Decimal>,
}

/// Consumption in L/100km for `liters` burnt over `distance_km`.
pub fn consumption_l_per_100km(liters: Decimal, distance_km: u32) -> Option<f64> {
    if liters <= Decimal::ZERO || distance_km == 0 {
        return None;
    }
    ((liters * Decimal::ONE_HUNDRED) / Decimal::from(distance_km)).to_f64()
}

fn miles_per_gallon(liters: Decimal, distance_km: Decimal) -> Option<f64> {
    let gallons = liters_to_gallons(liters.to_f64()?);
    let miles = km_to_miles(distance_km.to_f64()?);
    if gallons > 0.0 {
        Some(miles / gallons)
    } else {
        None
    }
}

fn cost_per_mile(amount: Decimal, distance_km: Decimal) -> Option<Decimal> {
    let miles = distance_km * MILES_PER_KM_DECIMAL;
    if miles > Decimal::ZERO {
        Some(amount / miles)
    } else {
        None
    }
}

/// Compute metrics for each record of a single vehicle.
///
/// `records` must already be ordered by `(date, id)`; the output is parallel
/// to the input.
pub fn per_fill_metrics<'a, I>(records: I) -> Vec<PerFillMetrics>
where
    I: IntoIterator<Item = &'a FillUpRecord>,
{
    let mut cursor = OdometerCursor::new();

    records
        .into_iter()
        .map(|record| {
            let step = cursor.advance(record);
            fill_metrics(record, step)
        })
        .collect()
}

fn fill_metrics(record: &FillUpRecord, step: OdometerStep) -> PerFillMetrics {
    let mut metrics = PerFillMetrics::default();
    if step == OdometerStep::NoBaseline {
        return metrics;
    }

    let liters = record.liters;
    let amount = record.total_amount;

    if liters > Decimal::ZERO {
        metrics.unit_price_per_liter = Some(amount / liters);
    }

    let Some(distance) = step.distance() else {
        return metrics;
    };
    let distance_decimal = Decimal::from(distance);
    metrics.distance_since_last_km = Some(distance);

    if liters > Decimal::ZERO {
        metrics.efficiency_l_per_100km = consumption_l_per_100km(liters, distance);
        metrics.efficiency_mpg = miles_per_gallon(liters, distance_decimal);
    }

    if amount > Decimal::ZERO {
        metrics.cost_per_km = Some(amount / distance_decimal);
        metrics.cost_per_mile = cost_per_mile(amount, distance_decimal);
    }

    metrics
}

/// Summary over a set of fill-ups, in kilometres, litres and raw currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    pub avg_cost_per_liter: Option<Decimal>,
    pub avg_consumption_l_per_100km: Option<f64>,
    pub avg_consumption_mpg: Option<f64>,
    pub avg_distance_per_day_km: Option<f64>,
    pub avg_cost_per_km: Option<Decimal>,
    pub avg_cost_per_mile: Option<Decimal>,
    pub total_spend: Decimal,
    pub total_distance_km: u64,
    pub total_liters: Decimal,
}

impl AggregateMetrics {
    pub fn empty() -> Self {
        Self {
            avg_cost_per_liter: None,
            avg_consumption_l_per_100km: None,
            avg_consumption_mpg: None,
            avg_distance_per_day_km: None,
            avg_cost_per_km: None,
            avg_cost_per_mile: None,
            total_spend: Decimal::ZERO,
            total_distance_km: 0,
            total_liters: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Default)]
struct Totals {
    spend: Decimal,
    liters: Decimal,
    distance_km: u64,
    liters_for_distance: Decimal,
    cost_for_distance: Decimal,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
}

impl Totals {
    fn add(&mut self, record: &FillUpRecord, step: OdometerStep) {
        self.spend += record.total_amount;
        self.liters += record.liters;

        self.first_date = Some(self.first_date.map_or(record.date, |d| d.min(record.date)));
        self.last_date = Some(self.last_date.map_or(record.date, |d| d.max(record.date)));

        if let Some(distance) = step.distance() {
            self.distance_km += u64::from(distance);
            self.liters_for_distance += record.liters;
            self.cost_for_distance += record.total_amount;
        }
    }
}

/// Aggregate metrics over records of one or more vehicles.
///
/// When `window_start` is given only records dated on or after it count, and
/// the per-day distance is averaged over `window_start..=today`.
pub fn aggregate_metrics(
    records: &[FillUpRecord],
    window_start: Option<NaiveDate>,
    today: NaiveDate,
) -> AggregateMetrics {
    let mut in_window: Vec<&FillUpRecord> = records
        .iter()
        .filter(|r| window_start.is_none_or(|start| r.date >= start))
        .collect();

    if in_window.is_empty() {
        return AggregateMetrics::empty();
    }
    in_window.sort_by_key(|r| r.vehicle_key());

    let mut cursor = OdometerCursor::new();
    let totals = in_window
        .into_iter()
        .fold(Totals::default(), |mut totals, record| {
            let step = cursor.advance(record);
            totals.add(record, step);
            totals
        });

    let distance = Decimal::from(totals.distance_km);
    let mut metrics = AggregateMetrics::empty();
    metrics.total_spend = totals.spend;
    metrics.total_liters = totals.liters;
    metrics.total_distance_km = totals.distance_km;

    if totals.liters > Decimal::ZERO {
        metrics.avg_cost_per_liter = Some(totals.spend / totals.liters);
    }

    if distance > Decimal::ZERO && totals.liters_for_distance > Decimal::ZERO {
        metrics.avg_consumption_l_per_100km =
            ((totals.liters_for_distance * Decimal::ONE_HUNDRED) / distance).to_f64();
        metrics.avg_consumption_mpg = miles_per_gallon(totals.liters_for_distance, distance);
    }

    if distance > Decimal::ZERO && totals.cost_for_distance > Decimal::ZERO {
        metrics.avg_cost_per_km = Some(totals.cost_for_distance / distance);
        metrics.avg_cost_per_mile = cost_per_mile(totals.cost_for_distance, distance);
    }

    if let (Some(first), Some(last)) = (totals.first_date, totals.last_date) {
        let (period_start, period_end) = match window_start {
            Some(start) => (start, today),
            None => (first, last),
        };
        metrics.avg_distance_per_day_km = Some(distance_per_day(
            totals.distance_km,
            period_start,
            period_end,
        ));
    }

    metrics
}

/// Average distance per calendar day, counting both endpoints.
fn distance_per_day(distance_km: u64, start: NaiveDate, end: NaiveDate) -> f64 {
    let end = end.max(start);
    let day_count = ((end - start).num_days() + 1).max(1);
    distance_km as f64 / day_count as f64
}
