use std::collections::HashMap;

use shared::error::{AppError, AppResult};

use crate::model::{event::Event, id::UserId, role::Role, user::User};

/// Who is asking for a list of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: UserId,
    pub role: Role,
}

impl From<&User> for Viewer {
    fn from(value: &User) -> Self {
        Self {
            user_id: value.id,
            role: value.role,
        }
    }
}

/// Keyed union of the events an organizer created and the ones they
/// co-organize. Only active events survive; the result is ordered by date,
/// then name.
pub fn merge_visible_events(created: Vec<Event>, co_organized: Vec<Event>) -> Vec<Event> {
    let mut by_id = HashMap::with_capacity(created.len() + co_organized.len());
    for event in created.into_iter().chain(co_organized) {
        if event.is_active() {
            by_id.entry(event.id).or_insert(event);
        }
    }

    let mut events: Vec<Event> = by_id.into_values().collect();
    sort_events(&mut events);
    events
}

pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.event_date
            .cmp(&b.event_date)
            .then_with(|| a.event_name.cmp(&b.event_name))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Whether `viewer` may open `event` by id. Students see active events only;
/// organizers see the events they manage, in any state.
pub fn can_view(viewer: &Viewer, event: &Event, co_organizers: &[UserId]) -> bool {
    match viewer.role {
        Role::Student => event.is_active(),
        Role::Organizer => event.is_managed_by(viewer.user_id, co_organizers),
    }
}

/// Checks that `candidate` may be enrolled as co-organizer of `event`.
pub fn validate_co_organizer(event: &Event, candidate: &User) -> AppResult<()> {
    if event.created_by == candidate.id {
        return Err(AppError::UnprocessableEntity(
            "the creator already organizes this event".into(),
        ));
    }
    if !candidate.is_organizer() {
        return Err(AppError::UnprocessableEntity(format!(
            "user {} is not an organizer",
            candidate.user_name
        )));
    }
    Ok(())
}
