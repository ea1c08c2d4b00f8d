use crate::model::id::{EventId, UserId};
use derive_new::new;

#[derive(new, Debug)]
pub struct RegisterAttendance {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(new, Debug)]
pub struct MarkAttended {
    pub event_id: EventId,
    pub user_id: UserId,
    pub requested_user: UserId,
}
