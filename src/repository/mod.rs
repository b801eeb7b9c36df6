//! Read-only seams over the pre-loaded pricing snapshots.
//!
//! Fetching, storing and administering the pricing tables is an external
//! collaborator's responsibility; the engine only consumes immutable
//! lookups through these traits.

use thiserror::Error;

use crate::domain::ancillary::{AncillaryService, ConditionKind};

pub mod snapshot;

#[cfg(test)]
pub mod mock;

pub use snapshot::PricingSnapshot;

/// Result type returned by repository lookups.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by repository lookups.
///
/// Missing rows are expressed as `Ok(None)` by the lookup methods; these
/// variants cover genuine backend failures only.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity does not exist.
    #[error("entity not found")]
    NotFound,
    /// The underlying snapshot source failed.
    #[error("repository backend failure: {0}")]
    Backend(String),
}

/// Read-only lookups over customer-specific and default service pricing.
pub trait ServicePriceReader {
    /// Price from the customer-specific override tier, if present.
    fn customer_service_price(
        &self,
        customer_id: i32,
        service_id: i32,
    ) -> RepositoryResult<Option<i64>>;

    /// Price from the default matrix tier keyed by service and vehicle
    /// type, if present.
    fn default_service_price(
        &self,
        service_id: i32,
        vehicle_type_id: i32,
    ) -> RepositoryResult<Option<i64>>;
}

/// Read-only lookups over ancillary (conditional surcharge) definitions.
pub trait AncillaryServiceReader {
    /// The ancillary service gated on the given condition kind, if one
    /// is configured.
    fn find_ancillary_service(
        &self,
        kind: ConditionKind,
    ) -> RepositoryResult<Option<AncillaryService>>;
}

/// Read-only lookups over contractor claim pricing.
pub trait ContractorPriceReader {
    /// The contractor's rate for the given service and vehicle type, if
    /// present in the contractor pricing matrix.
    fn contractor_price(
        &self,
        contractor_id: i32,
        service_id: i32,
        vehicle_type_id: i32,
    ) -> RepositoryResult<Option<i64>>;
}
