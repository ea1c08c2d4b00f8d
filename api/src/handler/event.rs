use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    access::{validate_co_organizer, Viewer},
    event::command::{CreateEvent, DeactivateEvent, EnrollCoOrganizer, UpdateEvent},
    id::{BusinessUnitId, EventId, SubUnitId, UserId},
    role::Role,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        event::{
            CreateEventRequest, CreateEventRequestWithUser, CreatedEventResponse, EventResponse,
            EventsResponse, UpdateEventRequest, UpdateEventRequestWithIds,
        },
        user::CoOrganizersResponse,
    },
};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<CreatedEventResponse>)> {
    user.require(Role::Organizer)?;
    req.validate(&())?;

    let event = CreateEvent::try_from(CreateEventRequestWithUser::new(user.id(), req))?;
    ensure_units_fit(&registry, event.business_unit, event.sub_unit).await?;

    let id = registry.event_repository().create(event).await?;
    Ok((StatusCode::CREATED, Json(CreatedEventResponse { id })))
}

pub async fn show_event_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_visible(Viewer::from(&user.user))
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn show_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    let event = registry
        .event_repository()
        .find_viewable(Viewer::from(&user.user), event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("event {event_id} not found")))?;
    Ok(Json(event.into()))
}

pub async fn update_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update = UpdateEvent::try_from(UpdateEventRequestWithIds::new(event_id, user.id(), req))?;
    let current = registry
        .event_repository()
        .find_managed(event_id, user.id())
        .await?;
    let merged = update.apply_to(current);
    ensure_units_fit(&registry, merged.business_unit, merged.sub_unit).await?;

    registry
        .event_repository()
        .update(update)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let deactivate_event = DeactivateEvent {
        event_id,
        requested_user: user.id(),
    };
    registry
        .event_repository()
        .deactivate(deactivate_event)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_co_organizers(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CoOrganizersResponse>> {
    registry
        .event_repository()
        .find_managed(event_id, user.id())
        .await?;

    registry
        .event_repository()
        .find_co_organizers(event_id)
        .await
        .map(CoOrganizersResponse::from)
        .map(Json)
}

pub async fn enroll_co_organizer(
    user: AuthorizedUser,
    Path((event_id, user_id)): Path<(EventId, UserId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let event = registry
        .event_repository()
        .find_managed(event_id, user.id())
        .await?;
    let candidate = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("user {user_id} not found")))?;
    validate_co_organizer(&event, &candidate)?;

    registry
        .event_repository()
        .enroll_co_organizer(EnrollCoOrganizer {
            event_id,
            user_id,
            requested_user: user.id(),
        })
        .await
        .map(|_| StatusCode::OK)
}

async fn ensure_units_fit(
    registry: &AppRegistry,
    business_unit: Option<BusinessUnitId>,
    sub_unit: Option<SubUnitId>,
) -> AppResult<()> {
    let Some(sub_unit_id) = sub_unit else {
        return Ok(());
    };
    let sub_unit = registry
        .unit_repository()
        .find_sub_unit_by_id(sub_unit_id)
        .await?
        .ok_or_else(|| AppError::UnprocessableEntity(format!("unknown sub-unit {sub_unit_id}")))?;
    if !sub_unit.fits(business_unit) {
        return Err(AppError::UnprocessableEntity(format!(
            "sub-unit {} does not belong to the selected business unit",
            sub_unit.name
        )));
    }
    Ok(())
}
