// JSON file repository implementation
use crate::application::fillup_repository::FillUpRepository;
use crate::domain::fillup::{FillUpRecord, Vehicle, VehicleId, check_records};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

/// On-disk layout of the record store.
#[derive(Debug, Default, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub fillups: Vec<FillUpRecord>,
}

/// Read-only record store loaded once from a JSON document.
#[derive(Debug)]
pub struct JsonFileRepository {
    data: StoreData,
}

impl JsonFileRepository {
    pub async fn load(path: impl AsRef<Path>, today: NaiveDate) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read record store {}", path.display()))?;

        let repository = Self::from_json(&raw, today)
            .with_context(|| format!("Failed to parse record store {}", path.display()))?;

        tracing::info!(
            "Loaded {} vehicles and {} fill-ups from {}",
            repository.data.vehicles.len(),
            repository.data.fillups.len(),
            path.display()
        );
        Ok(repository)
    }

    pub fn from_json(raw: &str, today: NaiveDate) -> Result<Self> {
        let data: StoreData = serde_json::from_str(raw)?;
        Ok(Self::from_data(data, today))
    }

    /// Wrap already parsed data, logging records that break the store's
    /// write rules. Such records are kept as they are.
    pub fn from_data(data: StoreData, today: NaiveDate) -> Self {
        for issue in check_records(&data.fillups, today) {
            tracing::warn!("Inconsistent record: {}", issue);
        }
        Self { data }
    }
}

#[async_trait]
impl FillUpRepository for JsonFileRepository {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        Ok(self.data.vehicles.clone())
    }

    async fn list_fillups(&self, vehicle_ids: Option<&[VehicleId]>) -> Result<Vec<FillUpRecord>> {
        let fillups: Vec<FillUpRecord> = self
            .data
            .fillups
            .iter()
            .filter(|f| vehicle_ids.is_none_or(|ids| ids.contains(&f.vehicle_id)))
            .cloned()
            .collect();

        tracing::debug!(
            "Returning {} fill-ups for vehicles {:?}",
            fillups.len(),
            vehicle_ids
        );
        Ok(fillups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fillup::test_support::day;
    use rust_decimal_macros::dec;

    const STORE: &str = r#"{
        "vehicles": [
            {"id": 1, "name": "Golf", "make": "VW", "year": 2018},
            {"id": 2, "name": ""}
        ],
        "fillups": [
            {"id": 10, "vehicleId": 1, "date": "2024-01-01", "odometerKm": 1000,
             "liters": "40.00", "totalAmount": "80.00", "fuelBrand": "Aral"},
            {"id": 11, "vehicleId": 1, "date": "2024-01-15", "odometerKm": 1100,
             "liters": 8.5, "totalAmount": 17, "stationName": "Main St"},
            {"id": 20, "vehicleId": 2, "date": "2024-02-01", "odometerKm": 500,
             "liters": "30", "totalAmount": "45"}
        ]
    }"#;

    #[tokio::test]
    async fn test_parses_store_document() {
        let repository = JsonFileRepository::from_json(STORE, day("2024-06-01")).unwrap();

        let vehicles = repository.list_vehicles().await.unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].year, Some(2018));
        assert_eq!(vehicles[1].display_name(), "Vehicle #2");

        let fillups = repository.list_fillups(None).await.unwrap();
        assert_eq!(fillups.len(), 3);
        assert_eq!(fillups[0].liters, dec!(40.00));
        assert_eq!(fillups[0].fuel_brand, "Aral");
        assert_eq!(fillups[1].liters, dec!(8.5));
        assert_eq!(fillups[1].total_amount, dec!(17));
        assert_eq!(fillups[1].station_name, "Main St");
        assert_eq!(fillups[2].notes, "");
    }

    #[tokio::test]
    async fn test_filters_by_vehicle() {
        let repository = JsonFileRepository::from_json(STORE, day("2024-06-01")).unwrap();

        let ids: Vec<_> = repository
            .list_fillups(Some(&[2][..]))
            .await
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![20]);

        let none = repository.list_fillups(Some(&[][..])).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_inconsistent_records_are_kept() {
        let raw = r#"{"fillups": [
            {"id": 1, "vehicleId": 1, "date": "2024-01-01", "odometerKm": 1000, "liters": 40, "totalAmount": 80},
            {"id": 2, "vehicleId": 1, "date": "2024-01-02", "odometerKm": 900, "liters": 40, "totalAmount": 80}
        ]}"#;
        let repository = JsonFileRepository::from_json(raw, day("2024-01-01")).unwrap();

        assert_eq!(repository.list_fillups(None).await.unwrap().len(), 2);
        assert!(repository.list_vehicles().await.unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(JsonFileRepository::from_json("{\"fillups\": [{}]}", day("2024-01-01")).is_err());
        assert!(JsonFileRepository::from_json("not json", day("2024-01-01")).is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = JsonFileRepository::load("does/not/exist.json", day("2024-01-01"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
