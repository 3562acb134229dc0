use std::{env, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};
use service::auth::AuthService;
use service::file::credentials_store::CredentialsStore;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the app config, falling back to defaults plus env vars when no
/// config file is present.
fn load_config() -> configs::AppConfig {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(_) => {
            let mut cfg = configs::AppConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                cfg.server.host = host;
            }
            if let Ok(port) = env::var("SERVER_PORT") {
                if let Ok(port) = port.parse::<u16>() {
                    cfg.server.port = port;
                }
            }
            cfg.auth.normalize_from_env();
            cfg
        }
    }
}

fn bind_addr(cfg: &configs::AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Open the credential store and seed the configured default user if it is
/// not present yet. The only write ever issued happens here, before the
/// first request is served.
pub async fn build_state(cfg: &configs::AppConfig) -> anyhow::Result<auth::ServerState> {
    if let Some(data_dir) = Path::new(&cfg.store.credentials_path).parent() {
        if !data_dir.as_os_str().is_empty() {
            common::env::ensure_env(&data_dir.to_string_lossy()).await?;
        }
    }

    let store = CredentialsStore::new(&cfg.store.credentials_path).await?;
    let auth_svc = Arc::new(AuthService::new(store));
    auth_svc
        .seed_user(&cfg.auth.seed_username, &cfg.auth.seed_password)
        .await?;

    Ok(auth::ServerState {
        auth: auth_svc,
        cookie_name: cfg.auth.session_cookie.clone(),
    })
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config();
    let state = build_state(&cfg).await?;

    let app: Router = routes::build_router(build_cors(), state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting calculator server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
