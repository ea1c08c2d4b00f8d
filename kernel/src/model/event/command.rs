use crate::model::{
    event::{AttendeeLimit, Event},
    id::{BusinessUnitId, EventId, SubUnitId, UserId},
};
use chrono::NaiveDate;

#[derive(Debug)]
pub struct CreateEvent {
    pub event_name: String,
    pub event_date: NaiveDate,
    pub attendee_limit: Option<AttendeeLimit>,
    pub business_unit: Option<BusinessUnitId>,
    pub sub_unit: Option<SubUnitId>,
    pub created_by: UserId,
}

// Fields left as `None` keep their stored value. `attendee_limit` is
// doubly optional: `Some(None)` clears the limit.
#[derive(Debug)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub event_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub attendee_limit: Option<Option<AttendeeLimit>>,
    pub business_unit: Option<BusinessUnitId>,
    pub sub_unit: Option<SubUnitId>,
    pub requested_user: UserId,
}

impl UpdateEvent {
    /// The event as it looks once this update is applied.
    pub fn apply_to(&self, event: Event) -> Event {
        Event {
            event_name: self.event_name.clone().unwrap_or(event.event_name),
            event_date: self.event_date.unwrap_or(event.event_date),
            attendee_limit: self.attendee_limit.unwrap_or(event.attendee_limit),
            business_unit: self.business_unit.or(event.business_unit),
            sub_unit: self.sub_unit.or(event.sub_unit),
            ..event
        }
    }
}

#[derive(Debug)]
pub struct DeactivateEvent {
    pub event_id: EventId,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct EnrollCoOrganizer {
    pub event_id: EventId,
    pub user_id: UserId,
    pub requested_user: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::fixture::event;

    fn update(event_id: EventId) -> UpdateEvent {
        UpdateEvent {
            event_id,
            event_name: None,
            event_date: None,
            attendee_limit: None,
            business_unit: None,
            sub_unit: None,
            requested_user: UserId::new(),
        }
    }

    #[test]
    fn omitted_fields_keep_their_values() {
        let mut current = event(UserId::new(), "Open day", (2026, 5, 1));
        current.attendee_limit = AttendeeLimit::from_requested(Some(40)).unwrap();
        let renamed = UpdateEvent {
            event_name: Some("Open house".into()),
            ..update(current.id)
        };

        let merged = renamed.apply_to(current.clone());

        assert_eq!(merged.event_name, "Open house");
        assert_eq!(merged.event_date, current.event_date);
        assert_eq!(merged.attendee_limit, current.attendee_limit);
    }

    #[test]
    fn explicit_unlimited_clears_the_limit() {
        let mut current = event(UserId::new(), "Open day", (2026, 5, 1));
        current.attendee_limit = AttendeeLimit::from_requested(Some(40)).unwrap();
        let cleared = UpdateEvent {
            attendee_limit: Some(None),
            ..update(current.id)
        };

        assert_eq!(cleared.apply_to(current).attendee_limit, None);
    }
}
