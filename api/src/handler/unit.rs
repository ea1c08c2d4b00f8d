use axum::{
    extract::{Path, Query, State},
    Json,
};
use kernel::model::id::BusinessUnitId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::unit::{BusinessUnitsResponse, SubUnitListQuery, SubUnitsResponse},
};

pub async fn list_business_units(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BusinessUnitsResponse>> {
    registry
        .unit_repository()
        .find_business_units()
        .await
        .map(BusinessUnitsResponse::from)
        .map(Json)
}

pub async fn list_sub_units(
    _user: AuthorizedUser,
    Query(query): Query<SubUnitListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SubUnitsResponse>> {
    registry
        .unit_repository()
        .find_sub_units(query.business_unit_id)
        .await
        .map(SubUnitsResponse::from)
        .map(Json)
}

pub async fn list_sub_units_of(
    _user: AuthorizedUser,
    Path(business_unit_id): Path<BusinessUnitId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SubUnitsResponse>> {
    registry
        .unit_repository()
        .find_sub_units(Some(business_unit_id))
        .await
        .map(SubUnitsResponse::from)
        .map(Json)
}
