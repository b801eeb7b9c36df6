use mockall::mock;

use super::{
    AncillaryServiceReader, ContractorPriceReader, RepositoryResult, ServicePriceReader,
};
use crate::domain::ancillary::{AncillaryService, ConditionKind};

mock! {
    pub ServicePriceReader {}

    impl ServicePriceReader for ServicePriceReader {
        fn customer_service_price(&self, customer_id: i32, service_id: i32) -> RepositoryResult<Option<i64>>;
        fn default_service_price(&self, service_id: i32, vehicle_type_id: i32) -> RepositoryResult<Option<i64>>;
    }
}

mock! {
    pub AncillaryServiceReader {}

    impl AncillaryServiceReader for AncillaryServiceReader {
        fn find_ancillary_service(&self, kind: ConditionKind) -> RepositoryResult<Option<AncillaryService>>;
    }
}

mock! {
    pub ContractorPriceReader {}

    impl ContractorPriceReader for ContractorPriceReader {
        fn contractor_price(&self, contractor_id: i32, service_id: i32, vehicle_type_id: i32) -> RepositoryResult<Option<i64>>;
    }
}
