//! Time-window ("midnight") surcharge calculator.

use crate::domain::ancillary::{ConditionConfig, ConditionKind, TimeWindow, parse_clock_time};
use crate::domain::booking::BookingDraft;
use crate::repository::{AncillaryServiceReader, ServicePriceReader};
use crate::services::{ServiceResult, tiers};

/// Outcome of a time-window surcharge calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurchargeOutcome {
    /// A definite amount, allowed to overwrite an auto-tracked field.
    /// Zero is a definite outcome too (outside the window, or no pricing).
    Charge(i64),
    /// The pickup time is missing or unreadable; the stored surcharge
    /// must be preserved rather than zeroed out.
    Indeterminate,
}

/// Computes the time-window surcharge candidate for the draft.
///
/// The magnitude is resolved through the regular two-tier precedence
/// scoped to the time-window ancillary service. A zero magnitude (or no
/// such service) short-circuits to a definite zero regardless of the
/// pickup time.
pub fn night_surcharge<R>(repo: &R, draft: &BookingDraft) -> ServiceResult<SurchargeOutcome>
where
    R: ServicePriceReader + AncillaryServiceReader + ?Sized,
{
    let Some(service) = repo.find_ancillary_service(ConditionKind::TimeWindow)? else {
        return Ok(SurchargeOutcome::Charge(0));
    };

    let magnitude =
        tiers::resolve_service_price(repo, draft.customer_id, service.id, draft.vehicle_type_id)?
            .unwrap_or(0);
    if magnitude <= 0 {
        return Ok(SurchargeOutcome::Charge(0));
    }

    let window = match service.config {
        ConditionConfig::TimeWindow(window) => window,
        ConditionConfig::StopThreshold { .. } => TimeWindow::default_night(),
    };

    let Some(raw) = draft
        .pickup_time
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    else {
        return Ok(SurchargeOutcome::Indeterminate);
    };

    let Some(pickup) = parse_clock_time(raw) else {
        return Ok(SurchargeOutcome::Indeterminate);
    };

    if window.contains(pickup) {
        Ok(SurchargeOutcome::Charge(magnitude))
    } else {
        Ok(SurchargeOutcome::Charge(0))
    }
}
