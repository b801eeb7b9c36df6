//! Pricing tier resolver.
//!
//! Every price in the system is resolved through the same two-tier
//! precedence: a customer-specific override always wins; otherwise the
//! default matrix keyed by service and vehicle type is consulted. Both
//! lookups are pure and side-effect free; a miss at every tier is a
//! legitimate "no charge" outcome decided by the caller.

use crate::repository::ServicePriceReader;
use crate::services::ServiceResult;

/// Resolves the customer-specific override price for a service.
///
/// Returns `None` when no customer is selected or no override row
/// exists; callers decide the fallback. Base price resolution uses this
/// tier only and falls back to zero.
pub fn customer_override<R>(
    repo: &R,
    customer_id: Option<i32>,
    service_id: i32,
) -> ServiceResult<Option<i64>>
where
    R: ServicePriceReader + ?Sized,
{
    let Some(customer_id) = customer_id else {
        return Ok(None);
    };

    Ok(repo.customer_service_price(customer_id, service_id)?)
}

/// Resolves a service price across both pricing tiers.
///
/// The customer override is consulted first; on a miss, the default
/// matrix entry for the booking's vehicle type. `None` means no tier
/// priced the service.
pub fn resolve_service_price<R>(
    repo: &R,
    customer_id: Option<i32>,
    service_id: i32,
    vehicle_type_id: Option<i32>,
) -> ServiceResult<Option<i64>>
where
    R: ServicePriceReader + ?Sized,
{
    if let Some(price) = customer_override(repo, customer_id, service_id)? {
        return Ok(Some(price));
    }

    let Some(vehicle_type_id) = vehicle_type_id else {
        return Ok(None);
    };

    Ok(repo.default_service_price(service_id, vehicle_type_id)?)
}
