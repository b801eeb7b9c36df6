use serde::{Deserialize, Serialize};

/// Customer-specific price override for one service.
///
/// The highest-precedence pricing tier: when a row exists for the
/// booking's customer and service, it always wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerServicePrice {
    /// Customer the override applies to.
    pub customer_id: i32,
    /// Service (core or ancillary) being priced.
    pub service_id: i32,
    /// Price represented in the smallest currency unit.
    pub price_cents: i64,
}

impl CustomerServicePrice {
    /// Construct an override row.
    pub fn new(customer_id: i32, service_id: i32, price_cents: i64) -> Self {
        Self {
            customer_id,
            service_id,
            price_cents,
        }
    }
}

/// Default pricing matrix entry keyed by service and vehicle type.
///
/// Consulted when no customer-specific override exists. Absence at both
/// tiers is a legitimate zero-charge outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceVehiclePrice {
    /// Service (core or ancillary) being priced.
    pub service_id: i32,
    /// Vehicle type the price applies to.
    pub vehicle_type_id: i32,
    /// Price represented in the smallest currency unit.
    pub price_cents: i64,
}

impl ServiceVehiclePrice {
    /// Construct a default matrix row.
    pub fn new(service_id: i32, vehicle_type_id: i32, price_cents: i64) -> Self {
        Self {
            service_id,
            vehicle_type_id,
            price_cents,
        }
    }
}

/// Contractor pricing matrix entry, used only to resolve the job cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorPrice {
    /// Contractor the rate belongs to.
    pub contractor_id: i32,
    /// Service being carried out.
    pub service_id: i32,
    /// Vehicle type the rate applies to.
    pub vehicle_type_id: i32,
    /// Claimable cost represented in the smallest currency unit.
    pub cost_cents: i64,
}

impl ContractorPrice {
    /// Construct a contractor rate row.
    pub fn new(contractor_id: i32, service_id: i32, vehicle_type_id: i32, cost_cents: i64) -> Self {
        Self {
            contractor_id,
            service_id,
            vehicle_type_id,
            cost_cents,
        }
    }
}
