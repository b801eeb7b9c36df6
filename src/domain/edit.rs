use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::booking::{ExtraService, StopLeg};

/// One discrete user mutation applied to a booking draft.
///
/// Every variant corresponds to an input control on the booking form.
/// Edits to guarded fields (base price, night surcharge, per-slot stop
/// prices) transition those fields to their manual state; everything else
/// simply updates the draft before the next recompute pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingEdit {
    /// Select or clear the customer.
    SetCustomer(Option<i32>),
    /// Select or clear the core transport service.
    SetService(Option<i32>),
    /// Select or clear the vehicle type.
    SetVehicleType(Option<i32>),
    /// Select or clear the contractor carrying out the job.
    SetContractor(Option<i32>),
    /// Set or clear the pickup date.
    SetPickupDate(Option<NaiveDate>),
    /// Set or clear the raw pickup time text.
    SetPickupTime(Option<String>),
    /// Directly enter the base price.
    SetBasePrice(i64),
    /// Directly enter the night surcharge.
    SetNightSurcharge(i64),
    /// Enter the discount subtracted from the final price.
    SetDiscount(i64),
    /// Enter the cash portion collected on site.
    SetCashToCollect(i64),
    /// Enter the contractor claim; rejected while a contractor is selected.
    SetJobCost(i64),
    /// Enter or replace a stop location. A blank location vacates the slot.
    SetStopLocation {
        leg: StopLeg,
        slot: usize,
        location: String,
    },
    /// Directly enter the price of an occupied stop slot.
    SetStopPrice {
        leg: StopLeg,
        slot: usize,
        price_cents: i64,
    },
    /// Vacate a stop slot, recycling its tracking state for the next occupant.
    RemoveStop { leg: StopLeg, slot: usize },
    /// Append an extra-service line.
    AddExtraService(ExtraService),
    /// Remove the extra-service line at the given position.
    RemoveExtraService(usize),
}
