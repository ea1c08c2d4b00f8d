use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        command::{CreateEvent, UpdateEvent},
        AttendeeLimit, Event, EventState,
    },
    id::{BusinessUnitId, EventId, SubUnitId, UserId},
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

fn not_blank(value: &str, _: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(custom(not_blank))]
    pub event_name: String,
    #[garde(skip)]
    pub event_date: NaiveDate,
    // 0 or absent means unlimited
    #[garde(skip)]
    pub attendee_limit: Option<i32>,
    #[garde(skip)]
    pub business_unit_id: Option<BusinessUnitId>,
    #[garde(skip)]
    pub sub_unit_id: Option<SubUnitId>,
}

#[derive(new)]
pub struct CreateEventRequestWithUser(UserId, CreateEventRequest);

impl TryFrom<CreateEventRequestWithUser> for CreateEvent {
    type Error = AppError;

    fn try_from(value: CreateEventRequestWithUser) -> Result<Self, Self::Error> {
        let CreateEventRequestWithUser(
            created_by,
            CreateEventRequest {
                event_name,
                event_date,
                attendee_limit,
                business_unit_id,
                sub_unit_id,
            },
        ) = value;
        Ok(CreateEvent {
            event_name: event_name.trim().to_string(),
            event_date,
            attendee_limit: AttendeeLimit::from_requested(attendee_limit)?,
            business_unit: business_unit_id,
            sub_unit: sub_unit_id,
            created_by,
        })
    }
}

fn not_blank_if_present(value: &Option<String>, ctx: &()) -> garde::Result {
    value.as_deref().map_or(Ok(()), |v| not_blank(v, ctx))
}

// Absent fields keep their stored value; an `attendeeLimit` of 0 clears the
// limit.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(custom(not_blank_if_present))]
    pub event_name: Option<String>,
    #[garde(skip)]
    pub event_date: Option<NaiveDate>,
    #[garde(skip)]
    pub attendee_limit: Option<i32>,
    #[garde(skip)]
    pub business_unit_id: Option<BusinessUnitId>,
    #[garde(skip)]
    pub sub_unit_id: Option<SubUnitId>,
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, UserId, UpdateEventRequest);

impl TryFrom<UpdateEventRequestWithIds> for UpdateEvent {
    type Error = AppError;

    fn try_from(value: UpdateEventRequestWithIds) -> Result<Self, Self::Error> {
        let UpdateEventRequestWithIds(
            event_id,
            requested_user,
            UpdateEventRequest {
                event_name,
                event_date,
                attendee_limit,
                business_unit_id,
                sub_unit_id,
            },
        ) = value;
        Ok(UpdateEvent {
            event_id,
            event_name: event_name.map(|n| n.trim().to_string()),
            event_date,
            attendee_limit: attendee_limit
                .map(|l| AttendeeLimit::from_requested(Some(l)))
                .transpose()?,
            business_unit: business_unit_id,
            sub_unit: sub_unit_id,
            requested_user,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventStateName {
    Active,
    Inactive,
}

impl From<EventState> for EventStateName {
    fn from(value: EventState) -> Self {
        match value {
            EventState::Active => Self::Active,
            EventState::Inactive => Self::Inactive,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub attendee_limit: Option<i32>,
    pub created_by: UserId,
    pub business_unit_id: Option<BusinessUnitId>,
    pub sub_unit_id: Option<SubUnitId>,
    pub state: EventStateName,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            id,
            event_name,
            event_date,
            attendee_limit,
            created_by,
            business_unit,
            sub_unit,
            state,
        } = value;
        Self {
            id,
            event_name,
            event_date,
            attendee_limit: attendee_limit.map(AttendeeLimit::value),
            created_by,
            business_unit_id: business_unit,
            sub_unit_id: sub_unit,
            state: state.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub items: Vec<EventResponse>,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(value: Vec<Event>) -> Self {
        Self {
            items: value.into_iter().map(EventResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEventResponse {
    pub id: EventId,
}
