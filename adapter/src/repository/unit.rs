use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{BusinessUnitId, SubUnitId},
    unit::{BusinessUnit, SubUnit},
};
use kernel::repository::unit::UnitRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::unit::{BusinessUnitRow, SubUnitRow},
    ConnectionPool,
};

#[derive(new)]
pub struct UnitRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UnitRepository for UnitRepositoryImpl {
    async fn find_business_units(&self) -> AppResult<Vec<BusinessUnit>> {
        sqlx::query_as::<_, BusinessUnitRow>(
            r#"
                SELECT business_unit_id, name FROM business_units
                ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(BusinessUnit::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_sub_units(
        &self,
        business_unit: Option<BusinessUnitId>,
    ) -> AppResult<Vec<SubUnit>> {
        // A NULL filter lists every sub-unit.
        sqlx::query_as::<_, SubUnitRow>(
            r#"
                SELECT sub_unit_id, name, business_unit_id FROM sub_units
                WHERE $1::uuid IS NULL OR business_unit_id = $1
                ORDER BY name ASC
            "#,
        )
        .bind(business_unit)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(SubUnit::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_sub_unit_by_id(&self, sub_unit_id: SubUnitId) -> AppResult<Option<SubUnit>> {
        sqlx::query_as::<_, SubUnitRow>(
            r#"
                SELECT sub_unit_id, name, business_unit_id FROM sub_units
                WHERE sub_unit_id = $1
            "#,
        )
        .bind(sub_unit_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(SubUnit::from))
        .map_err(AppError::SpecificOperationError)
    }
}
