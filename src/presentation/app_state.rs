// Application state for HTTP handlers
use crate::application::history_service::HistoryService;
use crate::application::statistics_service::StatisticsService;
use crate::application::vehicle_service::VehicleService;

#[derive(Clone)]
pub struct AppState {
    pub vehicle_service: VehicleService,
    pub history_service: HistoryService,
    pub statistics_service: StatisticsService,
}
