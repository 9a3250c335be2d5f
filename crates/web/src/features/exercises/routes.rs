use axum::{Router, routing::get};

use super::handlers::{
    create_exercise, delete_exercise, get_exercise, list_exercises, update_exercise,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route(
            "/:id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
}
