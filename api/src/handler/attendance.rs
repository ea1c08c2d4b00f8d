use adapter::spreadsheet::{attendance_workbook, XLSX_CONTENT_TYPE};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use kernel::model::{
    access::Viewer,
    attendance::{
        event::{MarkAttended, RegisterAttendance},
        export_rows,
    },
    event::Event,
    id::{EventId, UserId},
    role::Role,
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::attendance::{AttendanceDetailsResponse, AttendanceSummariesResponse},
};

pub async fn register_attendance(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.require(Role::Student)?;

    registry
        .attendance_repository()
        .register(RegisterAttendance::new(event_id, user.id()))
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn show_attendances(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AttendanceDetailsResponse>> {
    registry
        .event_repository()
        .find_managed(event_id, user.id())
        .await?;

    registry
        .attendance_repository()
        .detail(event_id)
        .await
        .map(AttendanceDetailsResponse::from)
        .map(Json)
}

pub async fn mark_attended(
    user: AuthorizedUser,
    Path((event_id, user_id)): Path<(EventId, UserId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .attendance_repository()
        .mark_attended(MarkAttended::new(event_id, user_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_attendance_summary(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AttendanceSummariesResponse>> {
    let events = visible_to_organizer(&user, &registry).await?;
    let event_ids: Vec<EventId> = events.iter().map(|e| e.id).collect();

    let summaries = registry
        .attendance_repository()
        .aggregate(&event_ids)
        .await?;
    Ok(Json(AttendanceSummariesResponse::new(events, summaries)))
}

pub async fn export_attendance(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let events = visible_to_organizer(&user, &registry).await?;
    let event_ids: Vec<EventId> = events.iter().map(|e| e.id).collect();

    let details = registry
        .attendance_repository()
        .find_details_by_event_ids(&event_ids)
        .await?;
    let rows = export_rows(&events, details);
    let body = attendance_workbook(&rows)?;

    tracing::info!(user_id = %user.id(), rows = rows.len(), "attendance exported");
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"attendance.xlsx\"",
            ),
        ],
        body,
    ))
}

async fn visible_to_organizer(
    user: &AuthorizedUser,
    registry: &AppRegistry,
) -> AppResult<Vec<Event>> {
    user.require(Role::Organizer)?;
    registry
        .event_repository()
        .find_visible(Viewer::from(&user.user))
        .await
}
