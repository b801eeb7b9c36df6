//! Additional-stops surcharge calculator.

use crate::domain::ancillary::{ConditionConfig, ConditionKind};
use crate::domain::booking::{BookingDraft, StopLeg};
use crate::repository::{AncillaryServiceReader, ServicePriceReader};
use crate::services::{ServiceResult, tiers};

/// Breakdown of the additional-stops surcharge for one recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopSurcharge {
    /// Default price assigned to each auto-tracked occupied stop slot.
    /// Always the bare magnitude, never the aggregate.
    pub per_slot_default_cents: i64,
    /// Aggregate additional-stops component: zero below the trigger
    /// count, then flat or per-occurrence depending on the service.
    pub aggregate_cents: i64,
    /// Effective stop count measured against the trigger threshold.
    pub effective_count: u32,
}

impl StopSurcharge {
    fn none(effective_count: u32) -> Self {
        Self {
            per_slot_default_cents: 0,
            aggregate_cents: 0,
            effective_count,
        }
    }
}

/// Computes the additional-stops surcharge for the draft.
///
/// The effective count is the maximum of the occupied pickup and dropoff
/// slots; both legs are evaluated symmetrically so they receive the same
/// per-slot default. A missing ancillary service or zero magnitude
/// short-circuits to a zero surcharge.
pub fn stop_surcharge<R>(repo: &R, draft: &BookingDraft) -> ServiceResult<StopSurcharge>
where
    R: ServicePriceReader + AncillaryServiceReader + ?Sized,
{
    let effective_count = draft
        .occupied_stop_count(StopLeg::Pickup)
        .max(draft.occupied_stop_count(StopLeg::Dropoff)) as u32;

    let Some(service) = repo.find_ancillary_service(ConditionKind::AdditionalStops)? else {
        return Ok(StopSurcharge::none(effective_count));
    };

    let magnitude =
        tiers::resolve_service_price(repo, draft.customer_id, service.id, draft.vehicle_type_id)?
            .unwrap_or(0);
    if magnitude <= 0 {
        return Ok(StopSurcharge::none(effective_count));
    }

    let trigger_count = match service.config {
        ConditionConfig::StopThreshold { trigger_count } => trigger_count,
        ConditionConfig::TimeWindow(_) => 0,
    };

    let aggregate_cents = if effective_count < trigger_count {
        0
    } else if service.is_per_occurrence {
        magnitude * i64::from(effective_count)
    } else {
        magnitude
    };

    Ok(StopSurcharge {
        per_slot_default_cents: magnitude,
        aggregate_cents,
        effective_count,
    })
}
