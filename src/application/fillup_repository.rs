// Repository trait for fill-up record access
use crate::domain::fillup::{FillUpRecord, Vehicle, VehicleId};
use async_trait::async_trait;

#[async_trait]
pub trait FillUpRepository: Send + Sync {
    /// List every vehicle known to the store
    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehicle>>;

    /// List fill-ups, restricted to `vehicle_ids` when given, in no particular order
    async fn list_fillups(
        &self,
        vehicle_ids: Option<&[VehicleId]>,
    ) -> anyhow::Result<Vec<FillUpRecord>>;
}
