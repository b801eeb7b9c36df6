//! Interactive editing session over a booking draft.
//!
//! Every user mutation flows through [`BookingSession::apply`], which
//! updates the draft, adjusts the edit-tracking state machine, and runs
//! exactly one synchronous recompute pass. Recomputation is deliberate
//! and explicit: given the same draft and pricing snapshot it always
//! produces the same result, and a pass that changes nothing writes
//! nothing, so the engine can never re-trigger itself.

use serde::{Deserialize, Serialize};

use crate::STOP_SLOTS_PER_LEG;
use crate::domain::booking::{BookingDraft, BookingIdentity, StopLeg, StopSlot};
use crate::domain::edit::BookingEdit;
use crate::domain::tracking::{EditTracking, TrackedField};
use crate::repository::{AncillaryServiceReader, ContractorPriceReader, ServicePriceReader};
use crate::services::job_cost::{self, JobCostResolution};
use crate::services::night_surcharge::{self, SurchargeOutcome};
use crate::services::{ServiceError, ServiceResult, stop_surcharge, tiers, totals};

/// Result of one recompute pass over the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeSummary {
    /// The identity triple changed since the last pass; the tracking set
    /// was reset before any candidate was applied.
    pub identity_changed: bool,
    /// At least one draft field was rewritten by this pass.
    pub changed: bool,
    /// Aggregate additional-stops component, exposed for display. The
    /// final price sums the per-slot prices instead, so this amount is
    /// never added on top of them.
    pub additional_stops_cents: i64,
    /// Advisory for the surrounding UI: the final price is negative.
    pub negative_total: bool,
}

/// One editing session: the draft, its edit-tracking set, and the
/// last-observed identity triple.
///
/// The session is single-owner and never blocks; discarding it on cancel
/// requires no cleanup since nothing is persisted until the external
/// save call takes the draft via [`BookingSession::into_draft`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSession {
    draft: BookingDraft,
    tracking: EditTracking,
    last_identity: BookingIdentity,
}

impl BookingSession {
    /// Start a session over an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session over a pre-populated draft (copy/edit flows).
    ///
    /// The draft's current identity becomes the baseline, so resuming by
    /// itself never counts as an identity change.
    pub fn resume(draft: BookingDraft) -> Self {
        let last_identity = draft.identity();
        Self {
            draft,
            tracking: EditTracking::new(),
            last_identity,
        }
    }

    /// Borrow the current draft.
    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Borrow the edit-tracking state.
    pub fn tracking(&self) -> &EditTracking {
        &self.tracking
    }

    /// Consume the session and hand the draft to the persistence layer.
    pub fn into_draft(self) -> BookingDraft {
        self.draft
    }

    /// Apply one user mutation and run a recompute pass.
    pub fn apply<R>(&mut self, repo: &R, edit: BookingEdit) -> ServiceResult<RecomputeSummary>
    where
        R: ServicePriceReader + AncillaryServiceReader + ContractorPriceReader + ?Sized,
    {
        self.apply_edit(edit)?;
        self.recompute(repo)
    }

    /// Run one recompute pass without applying an edit.
    ///
    /// Deterministic and idempotent: a second pass over an unchanged
    /// draft and snapshot reports `changed == false` and leaves the
    /// draft byte-identical.
    pub fn recompute<R>(&mut self, repo: &R) -> ServiceResult<RecomputeSummary>
    where
        R: ServicePriceReader + AncillaryServiceReader + ContractorPriceReader + ?Sized,
    {
        let mut changed = false;

        let identity = self.draft.identity();
        let identity_changed = identity != self.last_identity;
        if identity_changed {
            self.tracking.reset_all();
            self.last_identity = identity;
        }

        // Base price: customer override tier only, zero on a miss.
        let base_candidate = match self.draft.service_id {
            Some(service_id) => {
                tiers::customer_override(repo, self.draft.customer_id, service_id)?.unwrap_or(0)
            }
            None => 0,
        };
        changed |= self.write_guarded(TrackedField::BasePrice, base_candidate);

        // Night surcharge: an indeterminate pickup time preserves the
        // stored value instead of zeroing it out.
        match night_surcharge::night_surcharge(repo, &self.draft)? {
            SurchargeOutcome::Charge(amount) => {
                changed |= self.write_guarded(TrackedField::NightSurcharge, amount);
            }
            SurchargeOutcome::Indeterminate => {}
        }

        // Per-slot stop defaults for occupied, auto-tracked slots.
        let stops = stop_surcharge::stop_surcharge(repo, &self.draft)?;
        for leg in StopLeg::ALL {
            for slot in 0..STOP_SLOTS_PER_LEG {
                if self.tracking.is_manual(TrackedField::StopPrice(leg, slot)) {
                    continue;
                }
                if let Some(stop) = self.draft.stop_mut(leg, slot)
                    && stop.price_cents != stops.per_slot_default_cents
                {
                    stop.price_cents = stops.per_slot_default_cents;
                    changed = true;
                }
            }
        }

        // Job cost: system-owned writes bypass tracking but still only
        // land when the value differs.
        match job_cost::resolve_job_cost(repo, &self.draft)? {
            JobCostResolution::UserOwned => {}
            JobCostResolution::SystemOwned(cost_cents) => {
                if self.draft.job_cost_cents != cost_cents {
                    self.draft.job_cost_cents = cost_cents;
                    changed = true;
                }
            }
        }

        let breakdown = totals::calculate_totals(&self.draft);
        if self.draft.final_price_cents != breakdown.final_price_cents {
            self.draft.final_price_cents = breakdown.final_price_cents;
            changed = true;
        }

        Ok(RecomputeSummary {
            identity_changed,
            changed,
            additional_stops_cents: stops.aggregate_cents,
            negative_total: breakdown.negative_total,
        })
    }

    fn apply_edit(&mut self, edit: BookingEdit) -> ServiceResult<()> {
        match edit {
            BookingEdit::SetCustomer(customer_id) => {
                self.draft.customer_id = customer_id;
            }
            BookingEdit::SetService(service_id) => {
                self.draft.service_id = service_id;
            }
            BookingEdit::SetVehicleType(vehicle_type_id) => {
                self.draft.vehicle_type_id = vehicle_type_id;
            }
            BookingEdit::SetContractor(contractor_id) => {
                // Clearing the contractor retains the last claim value
                // and returns the field to the user.
                self.draft.contractor_id = contractor_id;
            }
            BookingEdit::SetPickupDate(pickup_date) => {
                self.draft.pickup_date = pickup_date;
            }
            BookingEdit::SetPickupTime(pickup_time) => {
                self.draft.pickup_time = pickup_time;
            }
            BookingEdit::SetBasePrice(price_cents) => {
                self.draft.base_price_cents = price_cents;
                self.tracking.mark_manual(TrackedField::BasePrice);
            }
            BookingEdit::SetNightSurcharge(price_cents) => {
                self.draft.night_surcharge_cents = price_cents;
                self.tracking.mark_manual(TrackedField::NightSurcharge);
            }
            BookingEdit::SetDiscount(discount_cents) => {
                self.draft.discount_cents = discount_cents;
            }
            BookingEdit::SetCashToCollect(cash_cents) => {
                self.draft.cash_to_collect_cents = cash_cents;
            }
            BookingEdit::SetJobCost(cost_cents) => {
                if self.draft.contractor_id.is_some() {
                    return Err(ServiceError::ReadOnlyField("job_cost"));
                }
                self.draft.job_cost_cents = cost_cents;
            }
            BookingEdit::SetStopLocation { leg, slot, location } => {
                Self::check_slot(slot)?;
                let location = location.trim().to_string();
                if location.is_empty() {
                    self.vacate_stop(leg, slot);
                } else if let Some(stop) = self.draft.stop_mut(leg, slot) {
                    stop.location = location;
                } else {
                    // A fresh occupant starts at zero; the recompute pass
                    // assigns the per-slot default while the slot is auto.
                    self.draft.stops_mut(leg)[slot] = Some(StopSlot::new(location, 0));
                }
            }
            BookingEdit::SetStopPrice { leg, slot, price_cents } => {
                Self::check_slot(slot)?;
                let Some(stop) = self.draft.stop_mut(leg, slot) else {
                    return Err(ServiceError::Form(format!(
                        "stop slot {slot} has no location yet"
                    )));
                };
                stop.price_cents = price_cents;
                self.tracking.mark_manual(TrackedField::StopPrice(leg, slot));
            }
            BookingEdit::RemoveStop { leg, slot } => {
                Self::check_slot(slot)?;
                self.vacate_stop(leg, slot);
            }
            BookingEdit::AddExtraService(service) => {
                self.draft.extra_services.push(service);
            }
            BookingEdit::RemoveExtraService(index) => {
                if index >= self.draft.extra_services.len() {
                    return Err(ServiceError::Form(format!(
                        "no extra service at position {index}"
                    )));
                }
                self.draft.extra_services.remove(index);
            }
        }

        Ok(())
    }

    /// Writes a candidate into a guarded coarse field if it is auto and
    /// the value actually differs. Returns whether a write happened.
    fn write_guarded(&mut self, field: TrackedField, candidate: i64) -> bool {
        if self.tracking.is_manual(field) {
            return false;
        }

        let target = match field {
            TrackedField::BasePrice => &mut self.draft.base_price_cents,
            TrackedField::NightSurcharge => &mut self.draft.night_surcharge_cents,
            // Stop slots are handled by the recompute loop directly.
            TrackedField::StopPrice(_, _) => return false,
        };

        if *target == candidate {
            return false;
        }

        *target = candidate;
        true
    }

    fn vacate_stop(&mut self, leg: StopLeg, slot: usize) {
        self.draft.stops_mut(leg)[slot] = None;
        self.tracking.reset(TrackedField::StopPrice(leg, slot));
    }

    fn check_slot(slot: usize) -> ServiceResult<()> {
        if slot >= STOP_SLOTS_PER_LEG {
            return Err(ServiceError::Form(format!(
                "stop slot {slot} is out of range"
            )));
        }
        Ok(())
    }
}
