use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::attendance::{export_attendance, show_attendance_summary};

pub fn build_attendance_routers() -> Router<AppRegistry> {
    let attendance_routers = Router::new()
        .route("/summary", get(show_attendance_summary))
        .route("/export", get(export_attendance));

    Router::new().nest("/attendance", attendance_routers)
}
