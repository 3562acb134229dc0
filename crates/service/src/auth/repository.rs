use async_trait::async_trait;

use super::domain::Credential;
use super::errors::AuthError;

/// Repository abstraction over the credential store.
///
/// The only write the application ever performs is the startup seed;
/// everything after that is `find`.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find(&self, username: &str) -> Result<Option<Credential>, AuthError>;
    async fn insert(&self, username: &str, password_hash: String) -> Result<Credential, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCredentialRepository {
        creds: Mutex<HashMap<String, Credential>>,
    }

    #[async_trait]
    impl CredentialRepository for MockCredentialRepository {
        async fn find(&self, username: &str) -> Result<Option<Credential>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(username).cloned())
        }

        async fn insert(&self, username: &str, password_hash: String) -> Result<Credential, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credential { username: username.to_string(), password_hash };
            creds.insert(username.to_string(), c.clone());
            Ok(c)
        }
    }
}
