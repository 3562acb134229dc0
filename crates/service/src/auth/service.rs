use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use dashmap::DashMap;
use rand::rngs::OsRng;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{LoginInput, Session};
use super::errors::AuthError;
use super::repository::CredentialRepository;

/// Auth business service independent of the web framework.
///
/// Sessions are opaque uuid tokens mapped to usernames in process memory:
/// `end_session` invalidates immediately and a restart drops everything,
/// which is exactly the lifetime the session contract asks for.
pub struct AuthService<R: CredentialRepository> {
    repo: Arc<R>,
    sessions: DashMap<Uuid, Session>,
}

impl<R: CredentialRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, sessions: DashMap::new() }
    }

    /// Insert the seed credential unless the username already exists.
    ///
    /// The stock deployment seeds john/password; that is a known default
    /// credential and gets a warning in the log when created.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn seed_user(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.repo.find(username).await?.is_some() {
            return Ok(());
        }
        let hash = hash_password(password)?;
        self.repo.insert(username, hash).await?;
        warn!(%username, "seed credential created; change it before exposing this service");
        Ok(())
    }

    /// Check a username/password pair and establish a session.
    ///
    /// Unknown usernames and wrong passwords both come back as
    /// `InvalidCredentials`; the caller never learns which one it was.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, domain::LoginInput, repository::mock::MockCredentialRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockCredentialRepository::default());
    /// let svc = AuthService::new(repo);
    /// tokio_test::block_on(svc.seed_user("john", "password")).unwrap();
    /// let session = tokio_test::block_on(svc.authenticate(LoginInput {
    ///     username: "john".into(),
    ///     password: "password".into(),
    /// })).unwrap();
    /// assert_eq!(session.username, "john");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn authenticate(&self, input: LoginInput) -> Result<Session, AuthError> {
        let cred = self.repo
            .find(&input.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&cred.password_hash)
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session { token: Uuid::new_v4(), username: cred.username };
        self.sessions.insert(session.token, session.clone());
        info!(username = %session.username, "session_established");
        Ok(session)
    }

    /// Recover the active session for a token, if any.
    pub fn current_session(&self, token: Option<Uuid>) -> Option<Session> {
        let token = token?;
        self.sessions.get(&token).map(|s| s.value().clone())
    }

    /// Gate for protected operations: a missing or stale token fails with
    /// `Unauthorized`.
    pub fn require_session(&self, token: Option<Uuid>) -> Result<Session, AuthError> {
        self.current_session(token).ok_or(AuthError::Unauthorized)
    }

    /// Invalidate a session; later `require_session` calls with the same
    /// token fail.
    pub fn end_session(&self, token: Uuid) {
        if let Some((_, s)) = self.sessions.remove(&token) {
            info!(username = %s.username, "session_ended");
        }
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockCredentialRepository;

    fn svc() -> AuthService<MockCredentialRepository> {
        AuthService::new(Arc::new(MockCredentialRepository::default()))
    }

    #[tokio::test]
    async fn seed_then_login_ok() {
        let svc = svc();
        svc.seed_user("john", "password").await.unwrap();
        let session = svc
            .authenticate(LoginInput { username: "john".into(), password: "password".into() })
            .await
            .unwrap();
        assert_eq!(session.username, "john");
        assert!(svc.require_session(Some(session.token)).is_ok());
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let svc = svc();
        svc.seed_user("john", "password").await.unwrap();
        svc.seed_user("john", "different").await.unwrap();
        // the first password still wins
        assert!(svc
            .authenticate(LoginInput { username: "john".into(), password: "password".into() })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_identical() {
        let svc = svc();
        svc.seed_user("john", "password").await.unwrap();
        let wrong = svc
            .authenticate(LoginInput { username: "john".into(), password: "nope".into() })
            .await
            .unwrap_err();
        let unknown = svc
            .authenticate(LoginInput { username: "jane".into(), password: "password".into() })
            .await
            .unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn end_session_invalidates_token() {
        let svc = svc();
        svc.seed_user("john", "password").await.unwrap();
        let session = svc
            .authenticate(LoginInput { username: "john".into(), password: "password".into() })
            .await
            .unwrap();
        svc.end_session(session.token);
        assert!(matches!(
            svc.require_session(Some(session.token)),
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let svc = svc();
        assert!(matches!(svc.require_session(None), Err(AuthError::Unauthorized)));
        assert!(svc.current_session(None).is_none());
    }
}
