use axum::{
    Router,
    routing::{get, patch, post},
};

use super::handlers::{
    add_tracked_exercise, complete_session, create_set, get_session, list_sessions, remove_set,
    start_session, update_set,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(start_session).get(list_sessions))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/complete", post(complete_session))
        .route("/sessions/:id/exercises", post(add_tracked_exercise))
        .route("/tracked-exercises/:id/sets", post(create_set))
        .route("/sets/:id", patch(update_set).delete(remove_set))
}
