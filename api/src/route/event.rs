use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    attendance::{mark_attended, register_attendance, show_attendances},
    event::{
        delete_event, enroll_co_organizer, register_event, show_co_organizers, show_event,
        show_event_list, update_event,
    },
};

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", post(register_event).get(show_event_list))
        .route(
            "/:event_id",
            get(show_event).put(update_event).delete(delete_event),
        )
        .route("/:event_id/co-organizers", get(show_co_organizers))
        .route("/:event_id/co-organizers/:user_id", put(enroll_co_organizer))
        .route("/:event_id/registrations", post(register_attendance))
        .route("/:event_id/attendances", get(show_attendances))
        .route("/:event_id/attendances/:user_id", put(mark_attended));

    Router::new().nest("/events", events_routers)
}
