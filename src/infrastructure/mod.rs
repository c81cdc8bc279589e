// Infrastructure layer - Configuration and the record store adapter
pub mod config;
pub mod json_repository;
