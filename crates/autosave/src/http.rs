use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::store::{SetPatch, SetRow, SetStore, StoreError, StoreResult};

/// `SetStore` backed by the workout tracking API. Authenticates with the
/// caller's bearer token; the server resolves it to the owning user.
pub struct HttpSetStore {
    client: Client,
    base_url: String,
    auth_token: String,
}

impl HttpSetStore {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.into(),
        }
    }

    fn classify(status: StatusCode) -> StoreError {
        match status {
            StatusCode::UNAUTHORIZED => StoreError::Unauthorized,
            StatusCode::NOT_FOUND => StoreError::NotFound,
            status => StoreError::Transport(format!("unexpected status {status}")),
        }
    }
}

#[async_trait]
impl SetStore for HttpSetStore {
    async fn update_set(&self, set_id: Uuid, patch: SetPatch) -> StoreResult<()> {
        let response = self
            .client
            .patch(format!("{}/api/sets/{set_id}", self.base_url))
            .bearer_auth(&self.auth_token)
            .json(&patch)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::classify(response.status()))
        }
    }

    async fn create_set(
        &self,
        tracked_exercise_id: Uuid,
        set_number: i64,
        weight: f64,
        reps: i64,
        is_completed: bool,
    ) -> StoreResult<SetRow> {
        let response = self
            .client
            .post(format!(
                "{}/api/tracked-exercises/{tracked_exercise_id}/sets",
                self.base_url
            ))
            .bearer_auth(&self.auth_token)
            .json(&json!({
                "set_number": set_number,
                "weight": weight,
                "reps": reps,
                "is_completed": is_completed,
            }))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify(response.status()));
        }

        response
            .json::<SetRow>()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }
}
