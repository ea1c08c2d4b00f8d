use async_trait::async_trait;
use shared::error::{AppError, AppResult};

use crate::model::{
    access::{can_view, merge_visible_events, Viewer},
    event::{
        command::{CreateEvent, DeactivateEvent, EnrollCoOrganizer, UpdateEvent},
        Event,
    },
    id::{EventId, UserId},
    role::Role,
    user::CoOrganizer,
};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    async fn find_active(&self) -> AppResult<Vec<Event>>;
    async fn find_active_created_by(&self, user_id: UserId) -> AppResult<Vec<Event>>;
    async fn find_active_co_organized_by(&self, user_id: UserId) -> AppResult<Vec<Event>>;
    async fn find_co_organizers(&self, event_id: EventId) -> AppResult<Vec<CoOrganizer>>;
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    // Soft delete: the row and everything hanging off it stay in place.
    async fn deactivate(&self, event: DeactivateEvent) -> AppResult<()>;
    // Re-enrolling an existing co-organizer succeeds without a second row.
    async fn enroll_co_organizer(&self, event: EnrollCoOrganizer) -> AppResult<()>;

    /// Events a viewer may list. Organizers see what they created or
    /// co-organize, students see every active event.
    async fn find_visible(&self, viewer: Viewer) -> AppResult<Vec<Event>> {
        match viewer.role {
            Role::Student => self.find_active().await,
            Role::Organizer => {
                let created = self.find_active_created_by(viewer.user_id).await?;
                let co_organized = self.find_active_co_organized_by(viewer.user_id).await?;
                Ok(merge_visible_events(created, co_organized))
            }
        }
    }

    /// Loads a single event if `viewer` may see it.
    async fn find_viewable(&self, viewer: Viewer, event_id: EventId) -> AppResult<Option<Event>> {
        let Some(event) = self.find_by_id(event_id).await? else {
            return Ok(None);
        };
        let co_organizers: Vec<UserId> = match viewer.role {
            Role::Student => Vec::new(),
            Role::Organizer => self
                .find_co_organizers(event_id)
                .await?
                .into_iter()
                .map(|c| c.user_id)
                .collect(),
        };
        Ok(can_view(&viewer, &event, &co_organizers).then_some(event))
    }

    /// Loads an event on behalf of someone who wants to manage it.
    async fn find_managed(&self, event_id: EventId, user_id: UserId) -> AppResult<Event> {
        let event = self
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("event {event_id} not found")))?;
        let co_organizers: Vec<UserId> = self
            .find_co_organizers(event_id)
            .await?
            .into_iter()
            .map(|c| c.user_id)
            .collect();
        if !event.is_managed_by(user_id, &co_organizers) {
            return Err(AppError::ForbiddenOperation);
        }
        Ok(event)
    }
}
