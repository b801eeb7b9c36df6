use thiserror::Error;

use crate::repository::RepositoryError;

pub mod job_cost;
pub mod night_surcharge;
pub mod session;
pub mod stop_surcharge;
pub mod tiers;
pub mod totals;

/// Result type returned by engine operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A pricing lookup seam failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// User input could not be applied to the draft.
    #[error("invalid input: {0}")]
    Form(String),
    /// The targeted field is currently system-owned.
    #[error("field `{0}` is system-owned and cannot be edited")]
    ReadOnlyField(&'static str),
}
