use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use service::auth::domain::{LoginInput, Session};
use service::auth::AuthService;
use service::file::credentials_store::CredentialsStore;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<CredentialsStore>>,
    pub cookie_name: String,
}

fn session_token(jar: &CookieJar, cookie_name: &str) -> Option<Uuid> {
    jar.get(cookie_name).and_then(|c| Uuid::parse_str(c.value()).ok())
}

/// Entry point: logged-in users land on the first calculator, everyone
/// else on the login page.
pub async fn index(State(state): State<ServerState>, jar: CookieJar) -> Redirect {
    match state.auth.current_session(session_token(&jar, &state.cookie_name)) {
        Some(_) => Redirect::to("/calculators/weight_goal"),
        None => Redirect::to("/login"),
    }
}

/// Login page; already-authenticated users are sent back to the index.
pub async fn login_view(State(state): State<ServerState>, jar: CookieJar) -> Response {
    if state
        .auth
        .current_session(session_token(&jar, &state.cookie_name))
        .is_some()
    {
        return Redirect::to("/").into_response();
    }
    Json(serde_json::json!({
        "view": "login",
        "message": "POST username and password to /auth/login"
    }))
    .into_response()
}

/// The distinct not-logged-in view that gated routes redirect to.
pub async fn unauthorized_view() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({"view": "unauthorized", "error": "not logged in"})),
    )
        .into_response()
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let session = state.auth.authenticate(input).await?;
    let mut cookie = Cookie::new(state.cookie_name.clone(), session.token.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Redirect::to("/")))
}

/// Gated like the calculators; the middleware already resolved the session.
pub async fn logout(
    State(state): State<ServerState>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    state.auth.end_session(session.token);
    let mut removal = Cookie::new(state.cookie_name.clone(), "");
    removal.set_path("/");
    (jar.remove(removal), Redirect::to("/login"))
}

/// Route-layer middleware for protected routes: resolve the session from
/// the cookie and hand it to the handler via request extensions, or
/// redirect to the unauthorized view.
pub async fn require_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    match state
        .auth
        .require_session(session_token(&jar, &state.cookie_name))
    {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(_) => Redirect::to("/unauthorized").into_response(),
    }
}
