use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::domain::Credential;
use crate::auth::errors::AuthError;
use crate::auth::repository::CredentialRepository;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// File-backed credential store.
/// Keeps a map of `username -> credential` persisted as JSON.
#[derive(Clone)]
pub struct CredentialsStore {
    store: Arc<JsonMapStore<String, Credential>>,
}

impl CredentialsStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, Credential>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// Look up the credential for a username.
    pub async fn find(&self, username: &str) -> Option<Credential> {
        self.store.get(&username.to_string()).await
    }

    /// Insert a credential and persist.
    pub async fn insert(&self, username: String, password_hash: String) -> Result<Credential, ServiceError> {
        let cred = Credential { username: username.clone(), password_hash };
        self.store.insert(username, cred.clone()).await?;
        Ok(cred)
    }

    /// Whether the store holds any credential at all.
    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }
}

#[async_trait]
impl CredentialRepository for CredentialsStore {
    async fn find(&self, username: &str) -> Result<Option<Credential>, AuthError> {
        Ok(CredentialsStore::find(self, username).await)
    }

    async fn insert(&self, username: &str, password_hash: String) -> Result<Credential, AuthError> {
        CredentialsStore::insert(self, username.to_string(), password_hash)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }
}
