//! Helpers for integration tests.
#![allow(dead_code)]

use transfer_billing::domain::ancillary::AncillaryServiceRecord;
use transfer_billing::domain::pricing::{
    ContractorPrice, CustomerServicePrice, ServiceVehiclePrice,
};
use transfer_billing::repository::PricingSnapshot;

/// Customer with pricing overrides in the standard snapshot.
pub const CUSTOMER: i32 = 42;
/// "Airport Transfer" core service.
pub const SERVICE: i32 = 3;
/// "Sedan" vehicle type.
pub const VEHICLE: i32 = 2;
/// Contractor with a matrix entry for (SERVICE, VEHICLE).
pub const CONTRACTOR: i32 = 7;
/// Ancillary service id for the midnight surcharge.
pub const MIDNIGHT_SERVICE: i32 = 9;
/// Ancillary service id for the additional-stops surcharge.
pub const STOPS_SERVICE: i32 = 10;

/// Snapshot used by most scenarios: a customer override for the base
/// price (55.00) and the midnight surcharge (20.00), a default matrix
/// rate for additional stops (5.00 per stop, trigger 1), and one
/// contractor rate (35.00).
pub fn standard_snapshot() -> PricingSnapshot {
    snapshot_with_stop_policy(true)
}

/// Same tables, but the additional-stops surcharge is a flat fee.
pub fn flat_stop_snapshot() -> PricingSnapshot {
    snapshot_with_stop_policy(false)
}

/// Initialize test logging; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn snapshot_with_stop_policy(is_per_occurrence: bool) -> PricingSnapshot {
    init_logging();
    PricingSnapshot::from_tables(
        vec![
            CustomerServicePrice::new(CUSTOMER, SERVICE, 5500),
            CustomerServicePrice::new(CUSTOMER, MIDNIGHT_SERVICE, 2000),
        ],
        vec![ServiceVehiclePrice::new(STOPS_SERVICE, VEHICLE, 500)],
        vec![
            AncillaryServiceRecord::new(
                MIDNIGHT_SERVICE,
                "Midnight pricing",
                "time_window",
                r#"{"start_time": "23:00", "end_time": "06:59"}"#,
                false,
            ),
            AncillaryServiceRecord::new(
                STOPS_SERVICE,
                "Additional stops",
                "additional_stops",
                r#"{"trigger_count": 1}"#,
                is_per_occurrence,
            ),
        ],
        vec![ContractorPrice::new(CONTRACTOR, SERVICE, VEHICLE, 3500)],
    )
}
