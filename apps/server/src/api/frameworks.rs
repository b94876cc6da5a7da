use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use dealflow_core::{
    constants::MAX_SCORE,
    frameworks::{AnalysisView, FrameworkDescriptor, FrameworkKey},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameworkInfo {
    key: FrameworkKey,
    #[serde(flatten)]
    descriptor: FrameworkDescriptor,
}

/// Body of the completion endpoint. The score is taken as a plain integer so
/// an out-of-range value gets a 400 with our error body.
#[derive(Debug, Default, Deserialize)]
struct CompleteRequest {
    score: Option<i64>,
}

fn parse_score(raw: Option<i64>) -> ApiResult<Option<u8>> {
    raw.map(|score| {
        u8::try_from(score)
            .ok()
            .filter(|s| *s <= MAX_SCORE)
            .ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "score must be between 0 and {}, got {}",
                    MAX_SCORE, score
                ))
            })
    })
    .transpose()
}

async fn list_frameworks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<FrameworkInfo>>> {
    let config = state.analysis_service.framework_config();
    let frameworks = config
        .ordered_keys()
        .into_iter()
        .filter_map(|key| {
            config.descriptor(key).map(|descriptor| FrameworkInfo {
                key,
                descriptor: descriptor.clone(),
            })
        })
        .collect();
    Ok(Json(frameworks))
}

async fn get_analysis(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AnalysisView>> {
    let scored = state.deal_service.get_deal(&id)?;
    Ok(Json(state.analysis_service.view(&scored.deal)))
}

async fn reset_analysis(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AnalysisView>> {
    let scored = state.deal_service.get_deal(&id)?;
    state.analysis_service.reset(&id);
    Ok(Json(state.analysis_service.view(&scored.deal)))
}

async fn complete_framework(
    Path((id, framework)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    body: Option<Json<CompleteRequest>>,
) -> ApiResult<Json<AnalysisView>> {
    let key: FrameworkKey = framework.parse()?;
    let request = body.map(|Json(inner)| inner).unwrap_or_default();
    let score = parse_score(request.score)?;
    let scored = state.deal_service.get_deal(&id)?;
    let view = state.analysis_service.complete(&scored.deal, key, score)?;
    tracing::info!("Deal '{}': {} completed ({}/6)", id, key, view.completed_count);
    Ok(Json(view))
}

async fn select_framework(
    Path((id, framework)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AnalysisView>> {
    let key: FrameworkKey = framework.parse()?;
    let scored = state.deal_service.get_deal(&id)?;
    Ok(Json(state.analysis_service.select(&scored.deal, key)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/frameworks", get(list_frameworks))
        .route("/deals/{id}/analysis", get(get_analysis).delete(reset_analysis))
        .route("/deals/{id}/analysis/{framework}", post(complete_framework))
        .route("/deals/{id}/analysis/{framework}/select", post(select_framework))
}
