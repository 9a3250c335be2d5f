use std::collections::HashMap;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::AppState;
use crate::error::WebError;

/// Static bearer-token registry standing in for the identity provider:
/// each configured token resolves to one opaque user id.
#[derive(Clone, Default)]
pub struct AuthTokens {
    tokens: HashMap<String, Uuid>,
}

impl AuthTokens {
    /// Parse `token:user-uuid` pairs from a comma-separated list.
    /// Malformed entries are skipped.
    pub fn from_comma_separated(raw: &str) -> Self {
        let tokens = raw
            .split(',')
            .filter_map(|pair| {
                let (token, user) = pair.trim().split_once(':')?;
                let user_id = Uuid::parse_str(user.trim()).ok()?;
                let token = token.trim();
                (!token.is_empty()).then(|| (token.to_string(), user_id))
            })
            .collect();

        Self { tokens }
    }

    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        self.tokens.get(token).copied()
    }
}

/// Resolved caller identity. Taking this extractor is what makes a route
/// authenticated: identity resolution runs (and fails closed) before any
/// domain logic, and the handler receives the user id explicitly.
pub struct AuthedUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(WebError::NotAuthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(WebError::NotAuthenticated)?;

        state.tokens.resolve(token).map(AuthedUser).ok_or_else(|| {
            tracing::warn!("Invalid bearer token attempt");
            WebError::NotAuthenticated
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_user_pairs() {
        let user = Uuid::new_v4();
        let tokens = AuthTokens::from_comma_separated(&format!("alice:{user}"));

        assert_eq!(tokens.resolve("alice"), Some(user));
        assert_eq!(tokens.resolve("bob"), None);
    }

    #[test]
    fn skips_malformed_entries() {
        let user = Uuid::new_v4();
        let raw = format!("broken, also-broken:not-a-uuid, ok:{user} ,:{user}");
        let tokens = AuthTokens::from_comma_separated(&raw);

        assert_eq!(tokens.resolve("ok"), Some(user));
        assert_eq!(tokens.resolve("broken"), None);
        assert_eq!(tokens.resolve(""), None);
    }

    #[test]
    fn empty_config_resolves_nothing() {
        let tokens = AuthTokens::from_comma_separated("");
        assert_eq!(tokens.resolve("anything"), None);
    }
}
