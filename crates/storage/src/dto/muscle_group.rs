use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMuscleGroupRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MuscleGroupResponse {
    pub muscle_group_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::models::MuscleGroup> for MuscleGroupResponse {
    fn from(group: crate::models::MuscleGroup) -> Self {
        Self {
            muscle_group_id: group.muscle_group_id,
            name: group.name,
            created_at: group.created_at,
        }
    }
}
