use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Seed credential and session cookie settings.
///
/// The defaults reproduce the well-known john/password account the original
/// deployment shipped with; override both in production.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_seed_username")]
    pub seed_username: String,
    #[serde(default = "default_seed_password")]
    pub seed_password: String,
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            seed_username: default_seed_username(),
            seed_password: default_seed_password(),
            session_cookie: default_session_cookie(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { credentials_path: default_credentials_path() }
    }
}

fn default_seed_username() -> String { "john".to_string() }
fn default_seed_password() -> String { "password".to_string() }
fn default_session_cookie() -> String { "session_token".to_string() }
fn default_credentials_path() -> String { "data/credentials.json".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.store.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl AuthConfig {
    /// Environment variables override the TOML seed credential.
    pub fn normalize_from_env(&mut self) {
        if let Ok(u) = std::env::var("SEED_USERNAME") {
            if !u.trim().is_empty() { self.seed_username = u; }
        }
        if let Ok(p) = std::env::var("SEED_PASSWORD") {
            if !p.is_empty() { self.seed_password = p; }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.seed_username.trim().is_empty() {
            return Err(anyhow!("auth.seed_username must not be empty"));
        }
        if self.seed_password.is_empty() {
            return Err(anyhow!("auth.seed_password must not be empty"));
        }
        if self.session_cookie.trim().is_empty() {
            return Err(anyhow!("auth.session_cookie must not be empty"));
        }
        Ok(())
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.credentials_path.trim().is_empty() {
            return Err(anyhow!("store.credentials_path must not be empty"));
        }
        Ok(())
    }
}
