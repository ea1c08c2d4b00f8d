use kernel::model::{
    id::{BusinessUnitId, SubUnitId},
    unit::{BusinessUnit, SubUnit},
};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct BusinessUnitRow {
    pub business_unit_id: BusinessUnitId,
    pub name: String,
}

impl From<BusinessUnitRow> for BusinessUnit {
    fn from(value: BusinessUnitRow) -> Self {
        Self {
            id: value.business_unit_id,
            name: value.name,
        }
    }
}

#[derive(FromRow)]
pub struct SubUnitRow {
    pub sub_unit_id: SubUnitId,
    pub name: String,
    pub business_unit_id: Option<BusinessUnitId>,
}

impl From<SubUnitRow> for SubUnit {
    fn from(value: SubUnitRow) -> Self {
        Self {
            id: value.sub_unit_id,
            name: value.name,
            business_unit: value.business_unit_id,
        }
    }
}
