use kernel::model::{
    id::{BusinessUnitId, SubUnitId},
    unit::{BusinessUnit, SubUnit},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUnitResponse {
    pub id: BusinessUnitId,
    pub name: String,
}

impl From<BusinessUnit> for BusinessUnitResponse {
    fn from(value: BusinessUnit) -> Self {
        let BusinessUnit { id, name } = value;
        Self { id, name }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUnitsResponse {
    pub items: Vec<BusinessUnitResponse>,
}

impl From<Vec<BusinessUnit>> for BusinessUnitsResponse {
    fn from(value: Vec<BusinessUnit>) -> Self {
        Self {
            items: value.into_iter().map(BusinessUnitResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubUnitResponse {
    pub id: SubUnitId,
    pub name: String,
    pub business_unit_id: Option<BusinessUnitId>,
}

impl From<SubUnit> for SubUnitResponse {
    fn from(value: SubUnit) -> Self {
        let SubUnit {
            id,
            name,
            business_unit,
        } = value;
        Self {
            id,
            name,
            business_unit_id: business_unit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubUnitsResponse {
    pub items: Vec<SubUnitResponse>,
}

impl From<Vec<SubUnit>> for SubUnitsResponse {
    fn from(value: Vec<SubUnit>) -> Self {
        Self {
            items: value.into_iter().map(SubUnitResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubUnitListQuery {
    pub business_unit_id: Option<BusinessUnitId>,
}
