use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::unit::{list_business_units, list_sub_units, list_sub_units_of};

pub fn build_unit_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/business-units", get(list_business_units))
        .route("/business-units/:business_unit_id/sub-units", get(list_sub_units_of))
        .route("/sub-units", get(list_sub_units))
}
