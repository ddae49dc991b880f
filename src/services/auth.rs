//! Session resolution service
//!
//! Identities are issued elsewhere; this service only verifies the signed
//! session token and provisions the matching user row.

use crate::{
    config::AuthConfig,
    error::AppResult,
    models::user::{Caller, Role, SessionClaims, UpsertUser},
    repository::Repository,
};

/// Cookie holding the session token
pub const SESSION_COOKIE_NAME: &str = "app_session_id";

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Resolve the caller behind a session token.
    /// Missing or invalid tokens yield an anonymous caller, never an error.
    pub async fn resolve_session(&self, token: Option<&str>) -> AppResult<Caller> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(Caller::anonymous());
        };

        let claims = match SessionClaims::from_token(token, &self.config.jwt_secret) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Ignoring invalid session token: {}", e);
                return Ok(Caller::anonymous());
            }
        };

        let is_owner = self.config.owner_open_id.as_deref() == Some(claims.sub.as_str());
        let user = self
            .repository
            .users
            .upsert(&UpsertUser {
                open_id: claims.sub,
                name: claims.name,
                email: claims.email,
                login_method: claims.login_method,
                role: is_owner.then_some(Role::Admin),
            })
            .await?;

        Ok(Caller::from(user))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::services::test_support::untouchable_repository;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            owner_open_id: Some("owner".to_string()),
            secure_cookies: false,
        }
    }

    fn token_for(open_id: &str, secret: &str) -> String {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: open_id.to_string(),
            name: Some(format!("{} name", open_id)),
            email: None,
            login_method: Some("oauth".to_string()),
            iat: now,
            exp: now + 3600,
        }
        .create_token(secret)
        .unwrap()
    }

    #[tokio::test]
    async fn missing_or_bad_tokens_are_anonymous_without_storage_access() {
        let service = AuthService::new(untouchable_repository(), config());

        for token in [None, Some(""), Some("garbage")] {
            let caller = service.resolve_session(token).await.unwrap();
            assert!(caller.user().is_none());
        }

        let forged = token_for("owner", "wrong-secret");
        let caller = service.resolve_session(Some(&forged)).await.unwrap();
        assert!(caller.user().is_none());
    }

    #[tokio::test]
    async fn owner_is_provisioned_as_admin() {
        let service = AuthService::new(Repository::in_memory(), config());

        let caller = service
            .resolve_session(Some(&token_for("owner", "test-secret")))
            .await
            .unwrap();
        assert!(caller.require_admin().is_ok());
        assert_eq!(caller.user().unwrap().name.as_deref(), Some("owner name"));
        assert_eq!(caller.user().unwrap().open_id, "owner");
    }

    #[tokio::test]
    async fn other_identities_are_plain_users() {
        let service = AuthService::new(Repository::in_memory(), config());

        let caller = service
            .resolve_session(Some(&token_for("student", "test-secret")))
            .await
            .unwrap();
        assert_eq!(caller.user().unwrap().role, Role::User);
        assert!(caller.require_admin().is_err());

        // Signing in again keeps the same row
        let again = service
            .resolve_session(Some(&token_for("student", "test-secret")))
            .await
            .unwrap();
        assert_eq!(again.user().unwrap().id, caller.user().unwrap().id);
    }
}
