use std::sync::Arc;

use axum::{extract::State, http::HeaderValue, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState};
use dealflow_core::sources::{RefreshOutcome, SnapshotInfo};

pub mod deals;
pub mod frameworks;
pub mod notes;
pub mod portfolio;

/// Result of a manual refresh together with the snapshot it left behind.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshResponse {
    pub result: RefreshOutcome,
    pub snapshot: SnapshotInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    backend_configured: bool,
    deals: SnapshotInfo,
    portfolio: SnapshotInfo,
}

async fn healthz(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend_configured: state.backend_configured,
        deals: state.deal_service.snapshot_info(),
        portfolio: state.portfolio_service.snapshot_info(),
    })
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .route("/healthz", get(healthz))
        .merge(deals::router())
        .merge(frameworks::router())
        .merge(notes::router())
        .merge(portfolio::router());

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
