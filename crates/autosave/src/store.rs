use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Client-side view of one persisted set row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRow {
    pub set_id: Uuid,
    pub tracked_exercise_id: Uuid,
    pub set_number: i64,
    pub weight: f64,
    pub reps: i64,
    pub is_completed: bool,
}

/// Partial update for one set; `None` leaves the field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl SetPatch {
    pub fn weight(value: f64) -> Self {
        Self {
            weight: Some(value),
            ..Default::default()
        }
    }

    pub fn reps(value: i64) -> Self {
        Self {
            reps: Some(value),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.reps.is_none() && self.is_completed.is_none()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not authenticated")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Network or server failure. The retryable class: an edit whose write
    /// fails this way stays dirty and is flushed again later.
    #[error("transport error: {0}")]
    Transport(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The slice of the remote surface the autosave engine drives.
#[async_trait]
pub trait SetStore: Send + Sync + 'static {
    async fn update_set(&self, set_id: Uuid, patch: SetPatch) -> StoreResult<()>;

    async fn create_set(
        &self,
        tracked_exercise_id: Uuid,
        set_number: i64,
        weight: f64,
        reps: i64,
        is_completed: bool,
    ) -> StoreResult<SetRow>;
}
