use axum::{Router, routing::get};

use super::handlers::{
    create_muscle_group, delete_muscle_group, get_muscle_group, list_muscle_groups,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_muscle_groups).post(create_muscle_group))
        .route("/:id", get(get_muscle_group).delete(delete_muscle_group))
}
