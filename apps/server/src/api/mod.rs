//! HTTP routes, all served under `/api/v1`.

mod assessment;
mod children;
mod dashboard;
mod examinations;
mod health;
mod mothers;
mod screenings;
mod visits;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    auth::{auth_status, identify_client, login, require_jwt},
    config::Config,
    main_lib::AppState,
};

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let public = Router::new()
        .merge(health::router())
        .route(
            "/auth/login",
            post(login).route_layer(middleware::from_fn_with_state(
                state.clone(),
                identify_client,
            )),
        )
        .route("/auth/status", get(auth_status));

    let protected = Router::new()
        .merge(mothers::router())
        .merge(children::router())
        .merge(visits::router())
        .merge(examinations::router())
        .merge(screenings::router())
        .merge(dashboard::router())
        .merge(assessment::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let api = public.merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
