use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use server::routes::{self, auth};
use service::auth::AuthService;
use service::file::credentials_store::CredentialsStore;

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

/// Fresh app with an isolated temp credential store seeded with john/password.
async fn build_app() -> anyhow::Result<Router> {
    let tmp = std::env::temp_dir().join(format!("auth_flow_creds_{}.json", Uuid::new_v4()));
    let store = CredentialsStore::new(&tmp).await?;
    let auth_svc = Arc::new(AuthService::new(store));
    auth_svc.seed_user("john", "password").await?;
    let state = auth::ServerState { auth: auth_svc, cookie_name: "session_token".into() };
    Ok(routes::build_router(cors(), state))
}

fn login_request(username: &str, password: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(
            &json!({"username": username, "password": password}),
        )?))?)
}

/// Log in and return the session cookie pair (`name=value`).
async fn login(app: &Router) -> anyhow::Result<String> {
    let resp = app.clone().call(login_request("john", "password")?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .expect("login must set the session cookie")
        .to_str()?;
    Ok(set_cookie.split(';').next().unwrap().to_string())
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_login_with_seed_credential() -> anyhow::Result<()> {
    let app = build_app().await?;

    let resp = app.clone().call(login_request("john", "password")?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/");
    assert!(resp.headers().get("set-cookie").is_some());

    // the root now routes to the first calculator
    let cookie = login(&app).await?;
    let req = Request::builder().uri("/").header("cookie", &cookie).body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/calculators/weight_goal");
    Ok(())
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_get_the_same_answer() -> anyhow::Result<()> {
    let app = build_app().await?;

    let resp = app.clone().call(login_request("john", "wrong")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get("set-cookie").is_none());
    let wrong = body_json(resp).await?;

    let resp = app.clone().call(login_request("nobody", "password")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(resp).await?;

    assert_eq!(wrong, unknown);
    assert_eq!(wrong["error"], "invalid username or password");
    Ok(())
}

#[tokio::test]
async fn test_unauthenticated_calculator_redirects_to_unauthorized() -> anyhow::Result<()> {
    let app = build_app().await?;

    for uri in [
        "/calculators/weight_goal",
        "/calculators/body_attr",
        "/calculators/body_fat",
        "/calculators/circ_exp",
        "/calculators/abs_power",
    ] {
        let req = Request::builder().uri(uri).body(Body::empty())?;
        let resp = app.clone().call(req).await?;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(resp.headers().get("location").unwrap(), "/unauthorized");
    }

    let resp = app
        .clone()
        .call(Request::builder().uri("/unauthorized").body(Body::empty())?)
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_authenticated_calculator_computes() -> anyhow::Result<()> {
    let app = build_app().await?;
    let cookie = login(&app).await?;

    // zero jump means zero power
    let req = Request::builder()
        .method("POST")
        .uri("/calculators/abs_power")
        .header("content-type", "application/json")
        .header("cookie", &cookie)
        .body(Body::from(serde_json::to_vec(&json!({"weight": 10.0, "vertical_jump": 0.0}))?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?["result"], 0.0);

    let req = Request::builder()
        .method("POST")
        .uri("/calculators/body_fat")
        .header("content-type", "application/json")
        .header("cookie", &cookie)
        .body(Body::from(serde_json::to_vec(
            &json!({"height": 180.0, "navel": 85.0, "neck": 38.0, "weight": 80.0}),
        )?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["body_fat"], 16.11);
    assert_eq!(body["lean_body_mass"], 67.11);
    Ok(())
}

#[tokio::test]
async fn test_domain_edge_input_rejected_with_400() -> anyhow::Result<()> {
    let app = build_app().await?;
    let cookie = login(&app).await?;

    // equal initial and goal weight would divide by zero in the exponent
    let req = Request::builder()
        .method("POST")
        .uri("/calculators/circ_exp")
        .header("content-type", "application/json")
        .header("cookie", &cookie)
        .body(Body::from(serde_json::to_vec(&json!({
            "init_weight": 80.0, "init_circ": 40.0,
            "goal_weight": 80.0, "goal_circ": 38.0,
            "curr_weight": 80.0
        }))?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // navel below neck leaves the log10 domain
    let req = Request::builder()
        .method("POST")
        .uri("/calculators/body_fat")
        .header("content-type", "application/json")
        .header("cookie", &cookie)
        .body(Body::from(serde_json::to_vec(
            &json!({"height": 180.0, "navel": 36.0, "neck": 38.0}),
        )?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_login_page_redirects_authenticated_users_away() -> anyhow::Result<()> {
    let app = build_app().await?;

    let resp = app
        .clone()
        .call(Request::builder().uri("/login").body(Body::empty())?)
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = login(&app).await?;
    let req = Request::builder().uri("/login").header("cookie", &cookie).body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/");
    Ok(())
}

#[tokio::test]
async fn test_logout_invalidates_the_session() -> anyhow::Result<()> {
    let app = build_app().await?;
    let cookie = login(&app).await?;

    let req = Request::builder().uri("/auth/logout").header("cookie", &cookie).body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/login");

    // the old token no longer opens any calculator
    let req = Request::builder()
        .uri("/calculators/weight_goal")
        .header("cookie", &cookie)
        .body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/unauthorized");
    Ok(())
}
