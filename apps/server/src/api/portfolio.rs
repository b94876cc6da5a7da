use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::RefreshResponse;
use crate::{error::ApiResult, main_lib::AppState};
use dealflow_core::portfolio::{PortfolioCompany, PortfolioSummary};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortfolioQuery {
    #[serde(default)]
    include_archived: bool,
}

async fn list_companies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PortfolioQuery>,
) -> ApiResult<Json<Vec<PortfolioCompany>>> {
    Ok(Json(state.portfolio_service.list_companies(q.include_archived)))
}

async fn portfolio_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioSummary>> {
    Ok(Json(state.portfolio_service.summary()))
}

async fn get_company(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioCompany>> {
    Ok(Json(state.portfolio_service.get_company(&id)?))
}

async fn archive_company(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioCompany>> {
    let company = state.portfolio_service.archive_company(&id)?;
    tracing::info!("Archived portfolio company '{}'", id);
    Ok(Json(company))
}

async fn refresh_portfolio(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshResponse>> {
    let result = state.portfolio_service.refresh().await;
    Ok(Json(RefreshResponse {
        result,
        snapshot: state.portfolio_service.snapshot_info(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(list_companies))
        .route("/portfolio/summary", get(portfolio_summary))
        .route("/portfolio/refresh", post(refresh_portfolio))
        .route("/portfolio/{id}", get(get_company))
        .route("/portfolio/{id}/archive", post(archive_company))
}
