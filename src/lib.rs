// Fuel fill-up metrics and statistics engine
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
