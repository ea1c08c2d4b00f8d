use std::str::FromStr;

use chrono::NaiveDate;
use kernel::model::{
    event::{AttendeeLimit, Event, EventState},
    id::{BusinessUnitId, EventId, SubUnitId, UserId},
};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub attendee_limit: Option<i32>,
    pub created_by: UserId,
    pub business_unit_id: Option<BusinessUnitId>,
    pub sub_unit_id: Option<SubUnitId>,
    pub state: String,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(value: EventRow) -> Result<Self, Self::Error> {
        let EventRow {
            event_id,
            event_name,
            event_date,
            attendee_limit,
            created_by,
            business_unit_id,
            sub_unit_id,
            state,
        } = value;
        let state = EventState::from_str(&state)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown event state: {state}")))?;
        let attendee_limit = AttendeeLimit::from_requested(attendee_limit)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Event {
            id: event_id,
            event_name,
            event_date,
            attendee_limit,
            created_by,
            business_unit: business_unit_id,
            sub_unit: sub_unit_id,
            state,
        })
    }
}

// What the write paths need to decide whether the requester may touch an
// event.
#[derive(FromRow)]
pub struct EventManagementRow {
    pub created_by: UserId,
    pub state: String,
    pub is_co_organizer: bool,
}

impl EventManagementRow {
    pub fn is_managed_by(&self, user_id: UserId) -> bool {
        self.created_by == user_id || self.is_co_organizer
    }

    pub fn is_active(&self) -> bool {
        self.state == EventState::Active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, attendee_limit: Option<i32>) -> EventRow {
        EventRow {
            event_id: EventId::new(),
            event_name: "Open day".into(),
            event_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            attendee_limit,
            created_by: UserId::new(),
            business_unit_id: None,
            sub_unit_id: None,
            state: state.into(),
        }
    }

    #[test]
    fn converts_a_stored_event() {
        let event = Event::try_from(row("Inactive", Some(40))).unwrap();
        assert_eq!(event.state, EventState::Inactive);
        assert_eq!(event.attendee_limit.map(AttendeeLimit::value), Some(40));
    }

    #[test]
    fn unknown_state_is_a_conversion_error() {
        assert!(matches!(
            Event::try_from(row("Deleted", None)),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
