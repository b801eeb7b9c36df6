//! Contractor claim ("job cost") resolver.

use crate::domain::booking::BookingDraft;
use crate::repository::ContractorPriceReader;
use crate::services::ServiceResult;

/// Ownership decision for the job cost field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCostResolution {
    /// No contractor is selected: the field is user-editable and the
    /// stored value is left untouched.
    UserOwned,
    /// A contractor is selected: the engine owns the field and writes
    /// this value, read-only for the user.
    SystemOwned(i64),
}

/// Resolves who owns the job cost field and, when system-owned, its value.
///
/// With a contractor selected but the service or vehicle type still
/// missing, the claim cannot be priced and is forced to zero. A missing
/// matrix row is an informational condition, not an error.
pub fn resolve_job_cost<R>(repo: &R, draft: &BookingDraft) -> ServiceResult<JobCostResolution>
where
    R: ContractorPriceReader + ?Sized,
{
    let Some(contractor_id) = draft.contractor_id else {
        return Ok(JobCostResolution::UserOwned);
    };

    let (Some(service_id), Some(vehicle_type_id)) = (draft.service_id, draft.vehicle_type_id)
    else {
        return Ok(JobCostResolution::SystemOwned(0));
    };

    match repo.contractor_price(contractor_id, service_id, vehicle_type_id)? {
        Some(cost_cents) => Ok(JobCostResolution::SystemOwned(cost_cents)),
        None => {
            log::info!(
                "no contractor pricing for contractor {contractor_id}, service {service_id}, vehicle type {vehicle_type_id}"
            );
            Ok(JobCostResolution::SystemOwned(0))
        }
    }
}
