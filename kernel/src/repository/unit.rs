use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{BusinessUnitId, SubUnitId},
    unit::{BusinessUnit, SubUnit},
};

#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn find_business_units(&self) -> AppResult<Vec<BusinessUnit>>;
    async fn find_sub_units(&self, business_unit: Option<BusinessUnitId>)
        -> AppResult<Vec<SubUnit>>;
    async fn find_sub_unit_by_id(&self, sub_unit_id: SubUnitId) -> AppResult<Option<SubUnit>>;
}
