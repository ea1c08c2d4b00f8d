use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{change_password, get_current_user, list_organizers};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/me", get(get_current_user))
        .route("/me/password", put(change_password))
        .route("/organizers", get(list_organizers));

    Router::new().nest("/users", user_routers)
}
