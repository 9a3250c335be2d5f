use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MuscleGroup {
    pub muscle_group_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
