use crate::model::id::{BusinessUnitId, EventId, SubUnitId, UserId};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, EnumString};

pub mod command;

/// Lifecycle of an event. `Inactive` is terminal: there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
pub enum EventState {
    #[default]
    Active,
    Inactive,
}

/// Advisory cap on attendees. Never checked against registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendeeLimit(u32);

impl AttendeeLimit {
    /// Normalises a requested limit: absent or zero means unlimited.
    pub fn from_requested(value: Option<i32>) -> AppResult<Option<Self>> {
        match value {
            None | Some(0) => Ok(None),
            Some(v) => u32::try_from(v).map(|v| Some(Self(v))).map_err(|_| {
                AppError::UnprocessableEntity(format!(
                    "attendee limit must not be negative (got {v})"
                ))
            }),
        }
    }

    pub fn value(self) -> i32 {
        self.0 as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub attendee_limit: Option<AttendeeLimit>,
    pub created_by: UserId,
    pub business_unit: Option<BusinessUnitId>,
    pub sub_unit: Option<SubUnitId>,
    pub state: EventState,
}

impl Event {
    pub fn is_active(&self) -> bool {
        self.state == EventState::Active
    }

    /// The creator manages the event implicitly; anyone else needs an
    /// enrollment.
    pub fn is_managed_by(&self, user_id: UserId, co_organizers: &[UserId]) -> bool {
        self.created_by == user_id || co_organizers.contains(&user_id)
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use super::*;

    pub fn event(created_by: UserId, name: &str, date: (i32, u32, u32)) -> Event {
        Event {
            id: EventId::new(),
            event_name: name.into(),
            event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            attendee_limit: None,
            created_by,
            business_unit: None,
            sub_unit: None,
            state: EventState::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_missing_limit_means_unlimited() {
        assert_eq!(AttendeeLimit::from_requested(None).unwrap(), None);
        assert_eq!(AttendeeLimit::from_requested(Some(0)).unwrap(), None);
        assert_eq!(
            AttendeeLimit::from_requested(Some(30)).unwrap().map(AttendeeLimit::value),
            Some(30)
        );
    }

    #[test]
    fn negative_limit_is_rejected() {
        assert!(matches!(
            AttendeeLimit::from_requested(Some(-1)),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn creator_and_co_organizers_manage_the_event() {
        let creator = UserId::new();
        let co = UserId::new();
        let stranger = UserId::new();
        let event = fixture::event(creator, "Open day", (2026, 5, 1));

        assert!(event.is_managed_by(creator, &[]));
        assert!(event.is_managed_by(co, &[co]));
        assert!(!event.is_managed_by(stranger, &[co]));
    }

    #[test]
    fn state_names_match_stored_values() {
        assert_eq!(EventState::Inactive.as_ref(), "Inactive");
        assert_eq!("Active".parse::<EventState>().unwrap(), EventState::Active);
    }
}
