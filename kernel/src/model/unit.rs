use crate::model::id::{BusinessUnitId, SubUnitId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessUnit {
    pub id: BusinessUnitId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubUnit {
    pub id: SubUnitId,
    pub name: String,
    pub business_unit: Option<BusinessUnitId>,
}

impl SubUnit {
    /// A sub-unit scoped to one business unit cannot be paired with another.
    pub fn fits(&self, business_unit: Option<BusinessUnitId>) -> bool {
        match (self.business_unit, business_unit) {
            (Some(own), Some(requested)) => own == requested,
            _ => true,
        }
    }
}
