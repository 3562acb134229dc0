use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod auth;
pub mod calculators;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public routes plus the calculator
/// routes gated behind the session middleware.
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    // Public routes: health, entry redirects, login, the unauthorized view
    let public = Router::new()
        .route("/health", get(health))
        .route("/", get(auth::index))
        .route("/login", get(auth::login_view))
        .route("/unauthorized", get(auth::unauthorized_view))
        .route("/auth/login", post(auth::login));

    // Every calculator (and logout) requires an active session; without one
    // the middleware redirects to the unauthorized view.
    let protected = Router::new()
        .route("/auth/logout", get(auth::logout))
        .route(
            "/calculators/weight_goal",
            get(calculators::weight_goal_view).post(calculators::weight_goal),
        )
        .route(
            "/calculators/body_attr",
            get(calculators::body_attr_view).post(calculators::body_attr),
        )
        .route(
            "/calculators/body_fat",
            get(calculators::body_fat_view).post(calculators::body_fat),
        )
        .route(
            "/calculators/circ_exp",
            get(calculators::circ_exp_view).post(calculators::circ_exp),
        )
        .route(
            "/calculators/abs_power",
            get(calculators::abs_power_view).post(calculators::abs_power),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
