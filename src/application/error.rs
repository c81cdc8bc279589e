// Errors surfaced by application services
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record store error: {0}")]
    Repository(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
