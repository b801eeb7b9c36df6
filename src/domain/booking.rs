use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::STOP_SLOTS_PER_LEG;

/// Identifies one of the two extra-stop lists carried by a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopLeg {
    /// Extra stops on the way to the main pickup.
    Pickup,
    /// Extra stops on the way to the final dropoff.
    Dropoff,
}

impl StopLeg {
    /// Both legs, in the order they appear on the booking form.
    pub const ALL: [StopLeg; 2] = [StopLeg::Pickup, StopLeg::Dropoff];
}

/// One occupied extra-stop slot on a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSlot {
    /// Free-text location of the extra stop.
    pub location: String,
    /// Charge for this stop represented in the smallest currency unit.
    pub price_cents: i64,
}

impl StopSlot {
    /// Construct an occupied stop slot.
    pub fn new(location: impl Into<String>, price_cents: i64) -> Self {
        Self {
            location: location.into(),
            price_cents,
        }
    }
}

/// A billable extra service attached to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraService {
    /// Name of the extra service as shown on the invoice.
    pub name: String,
    /// Charge represented in the smallest currency unit.
    pub price_cents: i64,
}

impl ExtraService {
    /// Construct a named extra-service line.
    pub fn new(name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            name: name.into(),
            price_cents,
        }
    }
}

/// The defining attribute triple of a booking.
///
/// Recomputation treats a change to any of these as a discrete
/// "identity changed" event that unlocks every guarded field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingIdentity {
    /// Customer the booking is billed to.
    pub customer_id: Option<i32>,
    /// Core transport service being booked.
    pub service_id: Option<i32>,
    /// Vehicle type assigned to the booking.
    pub vehicle_type_id: Option<i32>,
}

/// In-memory, single-owner record of one booking being edited.
///
/// The draft is created empty or pre-populated from an existing booking,
/// mutated field by field as the user interacts, and handed to an
/// external persistence call on save. Monetary fields are integer cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Customer the booking is billed to.
    pub customer_id: Option<i32>,
    /// Core transport service being booked.
    pub service_id: Option<i32>,
    /// Vehicle type assigned to the booking.
    pub vehicle_type_id: Option<i32>,
    /// Contractor/driver assigned to carry out the job.
    pub contractor_id: Option<i32>,
    /// Scheduled pickup date.
    pub pickup_date: Option<NaiveDate>,
    /// Raw pickup time text as typed by the user; may be unparseable.
    pub pickup_time: Option<String>,
    /// Extra-stop slots on the pickup leg.
    pub pickup_stops: [Option<StopSlot>; STOP_SLOTS_PER_LEG],
    /// Extra-stop slots on the dropoff leg.
    pub dropoff_stops: [Option<StopSlot>; STOP_SLOTS_PER_LEG],
    /// Base transport price in the smallest currency unit.
    pub base_price_cents: i64,
    /// Conditional time-window surcharge in the smallest currency unit.
    pub night_surcharge_cents: i64,
    /// Discount subtracted from the final price.
    pub discount_cents: i64,
    /// Billable extra services attached to the booking.
    pub extra_services: Vec<ExtraService>,
    /// Amount claimable by the contractor for this job.
    pub job_cost_cents: i64,
    /// Cash portion the driver collects on site.
    pub cash_to_collect_cents: i64,
    /// Derived final price; owned by the aggregator.
    pub final_price_cents: i64,
}

impl BookingDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a customer to the draft.
    pub fn with_customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Attach a service to the draft.
    pub fn with_service_id(mut self, service_id: i32) -> Self {
        self.service_id = Some(service_id);
        self
    }

    /// Attach a vehicle type to the draft.
    pub fn with_vehicle_type_id(mut self, vehicle_type_id: i32) -> Self {
        self.vehicle_type_id = Some(vehicle_type_id);
        self
    }

    /// Attach a contractor to the draft.
    pub fn with_contractor_id(mut self, contractor_id: i32) -> Self {
        self.contractor_id = Some(contractor_id);
        self
    }

    /// Set the pickup date.
    pub fn with_pickup_date(mut self, pickup_date: NaiveDate) -> Self {
        self.pickup_date = Some(pickup_date);
        self
    }

    /// Set the raw pickup time text.
    pub fn with_pickup_time(mut self, pickup_time: impl Into<String>) -> Self {
        self.pickup_time = Some(pickup_time.into());
        self
    }

    /// The defining attribute triple of this draft.
    pub fn identity(&self) -> BookingIdentity {
        BookingIdentity {
            customer_id: self.customer_id,
            service_id: self.service_id,
            vehicle_type_id: self.vehicle_type_id,
        }
    }

    /// Borrow the stop slots of one leg.
    pub fn stops(&self, leg: StopLeg) -> &[Option<StopSlot>; STOP_SLOTS_PER_LEG] {
        match leg {
            StopLeg::Pickup => &self.pickup_stops,
            StopLeg::Dropoff => &self.dropoff_stops,
        }
    }

    /// Mutably borrow the stop slots of one leg.
    pub fn stops_mut(&mut self, leg: StopLeg) -> &mut [Option<StopSlot>; STOP_SLOTS_PER_LEG] {
        match leg {
            StopLeg::Pickup => &mut self.pickup_stops,
            StopLeg::Dropoff => &mut self.dropoff_stops,
        }
    }

    /// Borrow one stop slot if it is occupied.
    pub fn stop(&self, leg: StopLeg, slot: usize) -> Option<&StopSlot> {
        self.stops(leg).get(slot).and_then(Option::as_ref)
    }

    /// Mutably borrow one stop slot if it is occupied.
    pub fn stop_mut(&mut self, leg: StopLeg, slot: usize) -> Option<&mut StopSlot> {
        self.stops_mut(leg).get_mut(slot).and_then(Option::as_mut)
    }

    /// Number of occupied stop slots on one leg.
    pub fn occupied_stop_count(&self, leg: StopLeg) -> usize {
        self.stops(leg).iter().flatten().count()
    }

    /// Sum of all occupied stop prices across both legs.
    pub fn stop_prices_total_cents(&self) -> i64 {
        StopLeg::ALL
            .iter()
            .flat_map(|leg| self.stops(*leg).iter().flatten())
            .map(|stop| stop.price_cents)
            .sum()
    }

    /// Sum of all extra-service prices.
    pub fn extra_services_total_cents(&self) -> i64 {
        self.extra_services
            .iter()
            .map(|service| service.price_cents)
            .sum()
    }
}
