// Application layer - Use cases over the fill-up record store
pub mod error;
pub mod fillup_repository;
pub mod history_service;
pub mod statistics_service;
pub mod vehicle_service;
