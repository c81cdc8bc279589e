// Fill-up and vehicle domain models
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub type VehicleId = i64;
pub type FillUpId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillUpRecord {
    pub id: FillUpId,
    pub vehicle_id: VehicleId,
    pub date: NaiveDate,
    pub odometer_km: u32,
    pub liters: Decimal,
    pub total_amount: Decimal,
    #[serde(default)]
    pub fuel_brand: String,
    #[serde(default)]
    pub fuel_grade: String,
    #[serde(default)]
    pub station_name: String,
    #[serde(default)]
    pub notes: String,
}

impl FillUpRecord {
    pub fn chronological_key(&self) -> (NaiveDate, FillUpId) {
        (self.date, self.id)
    }

    pub fn vehicle_key(&self) -> (VehicleId, NaiveDate, FillUpId) {
        (self.vehicle_id, self.date, self.id)
    }
}

/// Borrowed view of `records` ordered by `(date, id)`.
pub fn sorted_chronologically(records: &[FillUpRecord]) -> Vec<&FillUpRecord> {
    let mut sorted: Vec<&FillUpRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.chronological_key());
    sorted
}

/// Borrowed view of `records` ordered by `(vehicle_id, date, id)`.
pub fn sorted_by_vehicle(records: &[FillUpRecord]) -> Vec<&FillUpRecord> {
    let mut sorted: Vec<&FillUpRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.vehicle_key());
    sorted
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub fuel_type: String,
}

impl Vehicle {
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("Vehicle #{}", self.id)
        } else {
            name.to_string()
        }
    }
}

/// Outcome of comparing a record against the previous one of the same vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdometerStep {
    /// First record seen for the vehicle
    NoBaseline,
    /// Odometer did not move forward since the previous record
    NonPositive,
    Distance(u32),
}

impl OdometerStep {
    pub fn distance(&self) -> Option<u32> {
        match self {
            OdometerStep::Distance(km) => Some(*km),
            _ => None,
        }
    }
}

/// Tracks the previous odometer reading per vehicle while walking records in
/// `(vehicle_id, date, id)` or per-vehicle chronological order.
#[derive(Debug, Default)]
pub struct OdometerCursor {
    previous: HashMap<VehicleId, u32>,
}

impl OdometerCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `record` with the vehicle's baseline, then make it the new
    /// baseline whether or not the delta was usable.
    pub fn advance(&mut self, record: &FillUpRecord) -> OdometerStep {
        let step = match self.previous.get(&record.vehicle_id) {
            None => OdometerStep::NoBaseline,
            Some(&previous) if record.odometer_km > previous => {
                OdometerStep::Distance(record.odometer_km - previous)
            }
            Some(_) => OdometerStep::NonPositive,
        };
        self.previous.insert(record.vehicle_id, record.odometer_km);
        step
    }
}

/// A record that breaks the record store's write-time rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIssue {
    #[error("fill-up {id}: odometer reading must be greater than 0")]
    ZeroOdometer { id: FillUpId },

    #[error("fill-up {id}: fuel volume must be greater than 0")]
    NonPositiveLiters { id: FillUpId },

    #[error("fill-up {id}: total amount must be greater than 0")]
    NonPositiveAmount { id: FillUpId },

    #[error("fill-up {id}: date {date} is in the future")]
    FutureDate { id: FillUpId, date: NaiveDate },

    #[error(
        "fill-up {id}: odometer {odometer_km} km must be greater than previous fill-up {previous_id} ({previous_km} km)"
    )]
    OdometerNotIncreasing {
        id: FillUpId,
        odometer_km: u32,
        previous_id: FillUpId,
        previous_km: u32,
    },
}

/// Check records against the rules the record store enforces on write.
///
/// The calculators never call this; they tolerate records that fail it.
pub fn check_records(records: &[FillUpRecord], today: NaiveDate) -> Vec<RecordIssue> {
    let mut issues = Vec::new();

    for record in records {
        if record.odometer_km == 0 {
            issues.push(RecordIssue::ZeroOdometer { id: record.id });
        }
        if record.liters <= Decimal::ZERO {
            issues.push(RecordIssue::NonPositiveLiters { id: record.id });
        }
        if record.total_amount <= Decimal::ZERO {
            issues.push(RecordIssue::NonPositiveAmount { id: record.id });
        }
        if record.date > today {
            issues.push(RecordIssue::FutureDate {
                id: record.id,
                date: record.date,
            });
        }
    }

    let mut previous: HashMap<VehicleId, &FillUpRecord> = HashMap::new();
    for record in sorted_by_vehicle(records) {
        if let Some(prev) = previous.get(&record.vehicle_id) {
            if record.odometer_km <= prev.odometer_km {
                issues.push(RecordIssue::OdometerNotIncreasing {
                    id: record.id,
                    odometer_km: record.odometer_km,
                    previous_id: prev.id,
                    previous_km: prev.odometer_km,
                });
            }
        }
        previous.insert(record.vehicle_id, record);
    }

    issues
}
