use crate::domain::ancillary::{AncillaryService, AncillaryServiceRecord, ConditionKind};
use crate::domain::pricing::{ContractorPrice, CustomerServicePrice, ServiceVehiclePrice};

use super::{
    AncillaryServiceReader, ContractorPriceReader, RepositoryResult, ServicePriceReader,
};

/// Immutable in-memory implementation of the pricing lookup traits.
///
/// Built once from the already-loaded pricing tables and shared with the
/// engine for the lifetime of an editing session. Raw ancillary rows are
/// parsed into typed condition configurations on construction, so no
/// JSON work happens during recomputation.
#[derive(Debug, Clone, Default)]
pub struct PricingSnapshot {
    customer_prices: Vec<CustomerServicePrice>,
    default_prices: Vec<ServiceVehiclePrice>,
    ancillary_services: Vec<AncillaryService>,
    contractor_prices: Vec<ContractorPrice>,
}

impl PricingSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from the externally loaded tables.
    ///
    /// Ancillary rows with an unknown condition type are skipped (with a
    /// warning); malformed condition configs fall back to their defaults.
    pub fn from_tables(
        customer_prices: Vec<CustomerServicePrice>,
        default_prices: Vec<ServiceVehiclePrice>,
        ancillary_records: Vec<AncillaryServiceRecord>,
        contractor_prices: Vec<ContractorPrice>,
    ) -> Self {
        let ancillary_services = ancillary_records
            .into_iter()
            .filter_map(AncillaryService::from_record)
            .collect();

        Self {
            customer_prices,
            default_prices,
            ancillary_services,
            contractor_prices,
        }
    }

    /// Add a customer-specific override row.
    pub fn with_customer_price(mut self, price: CustomerServicePrice) -> Self {
        self.customer_prices.push(price);
        self
    }

    /// Add a default matrix row.
    pub fn with_default_price(mut self, price: ServiceVehiclePrice) -> Self {
        self.default_prices.push(price);
        self
    }

    /// Add a raw ancillary service row, parsing its condition config.
    pub fn with_ancillary_record(mut self, record: AncillaryServiceRecord) -> Self {
        if let Some(service) = AncillaryService::from_record(record) {
            self.ancillary_services.push(service);
        }
        self
    }

    /// Add an already-parsed ancillary service definition.
    pub fn with_ancillary_service(mut self, service: AncillaryService) -> Self {
        self.ancillary_services.push(service);
        self
    }

    /// Add a contractor rate row.
    pub fn with_contractor_price(mut self, price: ContractorPrice) -> Self {
        self.contractor_prices.push(price);
        self
    }

    /// Number of ancillary services that survived parsing.
    pub fn ancillary_service_count(&self) -> usize {
        self.ancillary_services.len()
    }
}

impl ServicePriceReader for PricingSnapshot {
    fn customer_service_price(
        &self,
        customer_id: i32,
        service_id: i32,
    ) -> RepositoryResult<Option<i64>> {
        Ok(self
            .customer_prices
            .iter()
            .find(|row| row.customer_id == customer_id && row.service_id == service_id)
            .map(|row| row.price_cents))
    }

    fn default_service_price(
        &self,
        service_id: i32,
        vehicle_type_id: i32,
    ) -> RepositoryResult<Option<i64>> {
        Ok(self
            .default_prices
            .iter()
            .find(|row| row.service_id == service_id && row.vehicle_type_id == vehicle_type_id)
            .map(|row| row.price_cents))
    }
}

impl AncillaryServiceReader for PricingSnapshot {
    fn find_ancillary_service(
        &self,
        kind: ConditionKind,
    ) -> RepositoryResult<Option<AncillaryService>> {
        Ok(self
            .ancillary_services
            .iter()
            .find(|service| service.condition_kind() == kind)
            .cloned())
    }
}

impl ContractorPriceReader for PricingSnapshot {
    fn contractor_price(
        &self,
        contractor_id: i32,
        service_id: i32,
        vehicle_type_id: i32,
    ) -> RepositoryResult<Option<i64>> {
        Ok(self
            .contractor_prices
            .iter()
            .find(|row| {
                row.contractor_id == contractor_id
                    && row.service_id == service_id
                    && row.vehicle_type_id == vehicle_type_id
            })
            .map(|row| row.cost_cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ancillary::{ConditionConfig, TimeWindow};

    fn snapshot() -> PricingSnapshot {
        PricingSnapshot::new()
            .with_customer_price(CustomerServicePrice::new(42, 3, 5500))
            .with_default_price(ServiceVehiclePrice::new(9, 2, 2000))
            .with_ancillary_record(AncillaryServiceRecord::new(
                9,
                "Midnight pricing",
                "time_window",
                r#"{"start_time": "23:00", "end_time": "06:59"}"#,
                false,
            ))
            .with_contractor_price(ContractorPrice::new(7, 3, 2, 3500))
    }

    #[test]
    fn customer_price_lookup_matches_both_keys() {
        let snapshot = snapshot();

        let hit = snapshot
            .customer_service_price(42, 3)
            .expect("expected success");
        assert_eq!(hit, Some(5500));

        let wrong_service = snapshot
            .customer_service_price(42, 4)
            .expect("expected success");
        assert_eq!(wrong_service, None);

        let wrong_customer = snapshot
            .customer_service_price(41, 3)
            .expect("expected success");
        assert_eq!(wrong_customer, None);
    }

    #[test]
    fn default_price_lookup_matches_service_and_vehicle() {
        let snapshot = snapshot();

        assert_eq!(
            snapshot
                .default_service_price(9, 2)
                .expect("expected success"),
            Some(2000)
        );
        assert_eq!(
            snapshot
                .default_service_price(9, 3)
                .expect("expected success"),
            None
        );
    }

    #[test]
    fn ancillary_lookup_is_keyed_by_condition_kind() {
        let snapshot = snapshot();

        let service = snapshot
            .find_ancillary_service(ConditionKind::TimeWindow)
            .expect("expected success")
            .expect("expected service");
        assert_eq!(service.id, 9);
        assert_eq!(
            service.config,
            ConditionConfig::TimeWindow(TimeWindow::default_night())
        );

        assert!(
            snapshot
                .find_ancillary_service(ConditionKind::AdditionalStops)
                .expect("expected success")
                .is_none()
        );
    }

    #[test]
    fn contractor_lookup_requires_all_three_keys() {
        let snapshot = snapshot();

        assert_eq!(
            snapshot.contractor_price(7, 3, 2).expect("expected success"),
            Some(3500)
        );
        assert_eq!(
            snapshot.contractor_price(7, 3, 1).expect("expected success"),
            None
        );
        assert_eq!(
            snapshot.contractor_price(8, 3, 2).expect("expected success"),
            None
        );
    }

    #[test]
    fn unknown_condition_types_are_dropped_at_construction() {
        let snapshot = PricingSnapshot::from_tables(
            Vec::new(),
            Vec::new(),
            vec![
                AncillaryServiceRecord::new(1, "Weather", "weather", "{}", false),
                AncillaryServiceRecord::new(
                    2,
                    "Additional stops",
                    "additional_stops",
                    r#"{"trigger_count": 1}"#,
                    true,
                ),
            ],
            Vec::new(),
        );

        assert_eq!(snapshot.ancillary_service_count(), 1);
    }
}
