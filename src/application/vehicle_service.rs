// Vehicle service - Use case for listing vehicles and resolving selections
use crate::application::error::Result;
use crate::application::fillup_repository::FillUpRepository;
use crate::domain::fillup::{Vehicle, VehicleId};
use std::sync::Arc;

/// Which vehicles a statistics or history query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleSelection {
    All,
    Vehicle(VehicleId),
}

impl VehicleSelection {
    /// Resolve a `vehicle` query value against the known vehicles.
    ///
    /// Blank, `all`, unparseable and unknown ids all select every vehicle.
    pub fn resolve(param: Option<&str>, vehicles: &[Vehicle]) -> Self {
        let Some(param) = param.map(str::trim).filter(|p| !p.is_empty() && *p != "all") else {
            return VehicleSelection::All;
        };

        match param.parse::<VehicleId>() {
            Ok(id) if vehicles.iter().any(|v| v.id == id) => VehicleSelection::Vehicle(id),
            _ => {
                tracing::debug!("Ignoring unknown vehicle selection {:?}", param);
                VehicleSelection::All
            }
        }
    }

    pub fn vehicle_id(&self) -> Option<VehicleId> {
        match self {
            VehicleSelection::All => None,
            VehicleSelection::Vehicle(id) => Some(*id),
        }
    }
}

#[derive(Clone)]
pub struct VehicleService {
    repository: Arc<dyn FillUpRepository>,
}

impl VehicleService {
    pub fn new(repository: Arc<dyn FillUpRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        let mut vehicles = self.repository.list_vehicles().await?;
        vehicles.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(vehicles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ServiceError;
    use crate::application::fillup_repository::test_support::{MockFillUpRepository, vehicle};

    #[test]
    fn test_resolve_selection() {
        let vehicles = vec![vehicle(3, "Civic"), vehicle(5, "Golf")];

        assert_eq!(VehicleSelection::resolve(None, &vehicles), VehicleSelection::All);
        assert_eq!(VehicleSelection::resolve(Some("all"), &vehicles), VehicleSelection::All);
        assert_eq!(VehicleSelection::resolve(Some(" "), &vehicles), VehicleSelection::All);
        assert_eq!(VehicleSelection::resolve(Some("abc"), &vehicles), VehicleSelection::All);
        assert_eq!(VehicleSelection::resolve(Some("9"), &vehicles), VehicleSelection::All);
        assert_eq!(
            VehicleSelection::resolve(Some(" 5 "), &vehicles),
            VehicleSelection::Vehicle(5)
        );
        assert_eq!(VehicleSelection::Vehicle(5).vehicle_id(), Some(5));
    }

    #[tokio::test]
    async fn test_list_vehicles_sorted_by_name() {
        let repository = Arc::new(MockFillUpRepository::new(
            vec![vehicle(2, "Zoe"), vehicle(9, "Astra"), vehicle(1, "Zoe")],
            Vec::new(),
        ));
        let service = VehicleService::new(repository);

        let ids: Vec<_> = service
            .list_vehicles()
            .await
            .unwrap()
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![9, 1, 2]);
    }

    #[tokio::test]
    async fn test_list_vehicles_propagates_store_errors() {
        let service = VehicleService::new(Arc::new(MockFillUpRepository::failing()));
        let err = service.list_vehicles().await.unwrap_err();
        assert!(matches!(err, ServiceError::Repository(_)));
    }
}
