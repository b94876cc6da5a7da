use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::RefreshResponse;
use crate::{error::ApiResult, main_lib::AppState};
use dealflow_core::{
    aggregate::DealSummary, constants::STATUS_FILTER_ALL, pipeline::DealQuery, ScoredDeal,
};

/// Query string of the listing endpoints. Missing parameters mean no
/// search, every status and listing order.
#[derive(Debug, Default, Deserialize)]
pub struct DealListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

impl DealListQuery {
    fn to_query(&self) -> DealQuery {
        DealQuery::new(
            self.search.as_deref().unwrap_or_default(),
            self.status.as_deref().unwrap_or(STATUS_FILTER_ALL),
            self.sort.as_deref().unwrap_or_default(),
        )
    }
}

async fn list_deals(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DealListQuery>,
) -> ApiResult<Json<Vec<ScoredDeal>>> {
    Ok(Json(state.deal_service.list_deals(&q.to_query())))
}

async fn deal_summary(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DealListQuery>,
) -> ApiResult<Json<DealSummary>> {
    Ok(Json(state.deal_service.summarize(&q.to_query())))
}

async fn get_deal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ScoredDeal>> {
    let deal = state.deal_service.get_deal(&id)?;
    Ok(Json(deal))
}

async fn refresh_deals(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshResponse>> {
    let result = state.deal_service.refresh().await;
    Ok(Json(RefreshResponse {
        result,
        snapshot: state.deal_service.snapshot_info(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deals", get(list_deals))
        .route("/deals/summary", get(deal_summary))
        .route("/deals/refresh", post(refresh_deals))
        .route("/deals/{id}", get(get_deal))
}
