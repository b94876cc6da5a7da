use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use dealflow_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use std::io::Write;
use tower::ServiceExt;

async fn build_test_router() -> Router {
    let config = Config::default();
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send(app, Method::POST, uri, body).await
}

fn names(deals: &Value) -> Vec<String> {
    deals
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["companyName"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Health and deals
// =============================================================================

#[tokio::test]
async fn healthz_reports_fallback_data_without_backend() {
    let app = build_test_router().await;
    let (status, body) = get(&app, "/api/v1/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backendConfigured"], false);
    assert_eq!(body["deals"]["origin"], "FALLBACK");
    assert_eq!(body["deals"]["count"], 4);
}

#[tokio::test]
async fn list_deals_filters_and_sorts() {
    let app = build_test_router().await;

    let (status, body) = get(&app, "/api/v1/deals?sort=amount").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&body),
        vec!["NeuralFlow AI", "MediSync Health", "GreenGrid Energy", "FinLedger"]
    );
    assert!(body[0]["dealScore"].as_u64().unwrap() <= 100);
    assert!(body[0]["scoreBreakdown"]["team"].is_number());

    let (_, completed) = get(&app, "/api/v1/deals?status=completed").await;
    assert_eq!(names(&completed), vec!["GreenGrid Energy"]);

    let (_, searched) = get(&app, "/api/v1/deals?search=health&sort=company").await;
    assert_eq!(names(&searched), vec!["MediSync Health"]);

    let (_, unknown_sort) = get(&app, "/api/v1/deals?sort=bogus").await;
    assert_eq!(names(&unknown_sort)[0], "NeuralFlow AI");
    assert_eq!(names(&unknown_sort)[3], "FinLedger");
}

#[tokio::test]
async fn deal_summary_follows_query() {
    let app = build_test_router().await;
    let (status, body) = get(&app, "/api/v1/deals/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);
    assert_eq!(body["totalValue"].as_f64(), Some(29.5));
    assert_eq!(body["completedCount"], 1);
    assert_eq!(body["inProgressCount"], 1);

    let (_, filtered) = get(&app, "/api/v1/deals/summary?status=in_progress").await;
    assert_eq!(filtered["count"], 1);
    assert_eq!(filtered["totalValue"].as_f64(), Some(15.0));
}

#[tokio::test]
async fn unknown_deal_is_not_found() {
    let app = build_test_router().await;
    let (status, body) = get(&app, "/api/v1/deals/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert!(body["message"].as_str().unwrap().contains("nope"));

    let (status, _) = get(&app, "/api/v1/deals/deal-002").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn manual_refresh_falls_back_to_fixtures() {
    let app = build_test_router().await;
    let (status, body) = post(&app, "/api/v1/deals/refresh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["outcome"], "applied");
    assert_eq!(body["result"]["origin"], "FALLBACK");
    assert_eq!(body["snapshot"]["count"], 4);
}

// =============================================================================
// Frameworks and analysis
// =============================================================================

#[tokio::test]
async fn frameworks_are_listed_in_order() {
    let app = build_test_router().await;
    let (status, body) = get(&app, "/api/v1/frameworks").await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![
            "founder_signal",
            "market_opportunity",
            "product_traction",
            "competitive_moat",
            "financial_health",
            "due_diligence"
        ]
    );
    assert_eq!(body[0]["name"], "Founder Signal");
}

#[tokio::test]
async fn completing_frameworks_tracks_progress() {
    let app = build_test_router().await;

    let (status, view) = post(
        &app,
        "/api/v1/deals/deal-001/analysis/founder_signal",
        Some(json!({ "score": 90 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["completedCount"], 1);
    assert_eq!(view["current"], "market_opportunity");
    assert_eq!(view["averageScore"].as_f64(), Some(90.0));

    let (_, view) = post(&app, "/api/v1/deals/deal-001/analysis/due_diligence", None).await;
    assert_eq!(view["completedCount"], 2);

    let (_, view) = get(&app, "/api/v1/deals/deal-001/analysis").await;
    assert_eq!(view["completedCount"], 2);
    let health = view["frameworks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["key"] == "financial_health")
        .unwrap()
        .clone();
    assert_eq!(health["suggestedScore"], 75);

    let (status, view) = send(&app, Method::DELETE, "/api/v1/deals/deal-001/analysis", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["completedCount"], 0);
}

#[tokio::test]
async fn analysis_rejects_bad_input() {
    let app = build_test_router().await;

    let (status, body) = post(&app, "/api/v1/deals/deal-001/analysis/vibes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = post(
        &app,
        "/api/v1/deals/deal-001/analysis/founder_signal",
        Some(json!({ "score": 150 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/v1/deals/missing/analysis/founder_signal", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn selecting_a_framework_moves_current() {
    let app = build_test_router().await;
    let (status, view) = post(
        &app,
        "/api/v1/deals/deal-002/analysis/competitive_moat/select",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["current"], "competitive_moat");
}

// =============================================================================
// Notes
// =============================================================================

#[tokio::test]
async fn notes_round_trip_through_local_sink() {
    let app = build_test_router().await;

    let (status, note) = post(
        &app,
        "/api/v1/deals/deal-001/notes",
        Some(json!({ "framework": "founder_signal", "content": "Second-time founders" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["dealId"], "deal-001");

    post(
        &app,
        "/api/v1/deals/deal-001/notes",
        Some(json!({ "framework": "due_diligence", "content": "Cap table clean", "author": "kim" })),
    )
    .await;

    let (_, all) = get(&app, "/api/v1/deals/deal-001/notes").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    let (_, filtered) = get(&app, "/api/v1/deals/deal-001/notes?framework=due_diligence").await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["author"], "kim");
}

#[tokio::test]
async fn notes_validate_input() {
    let app = build_test_router().await;

    let (status, _) = post(
        &app,
        "/api/v1/deals/deal-001/notes",
        Some(json!({ "framework": "founder_signal", "content": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/v1/deals/deal-001/notes",
        Some(json!({ "framework": "astrology", "content": "hmm" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/v1/deals/ghost/notes",
        Some(json!({ "framework": "founder_signal", "content": "hmm" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Portfolio
// =============================================================================

#[tokio::test]
async fn archive_hides_company_from_default_listing() {
    let app = build_test_router().await;

    let (_, before) = get(&app, "/api/v1/portfolio").await;
    let active = before.as_array().unwrap().len();

    let (status, company) = post(&app, "/api/v1/portfolio/pc-001/archive", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(company["archived"], true);

    let (_, after) = get(&app, "/api/v1/portfolio").await;
    assert_eq!(after.as_array().unwrap().len(), active - 1);
    let (_, all) = get(&app, "/api/v1/portfolio?includeArchived=true").await;
    assert!(all.as_array().unwrap().len() >= active);

    let (_, summary) = get(&app, "/api/v1/portfolio/summary").await;
    assert!(summary["archivedCount"].as_u64().unwrap() >= 1);

    let (status, _) = post(&app, "/api/v1/portfolio/nope/archive", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Startup configuration
// =============================================================================

#[tokio::test]
async fn invalid_policy_file_fails_startup() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"weights": {{"team": 0.9, "market": 0.9, "traction": 0, "risk": 0}}}}"#)
        .unwrap();
    let config = Config {
        scoring_policy_path: Some(file.path().to_path_buf()),
        ..Config::default()
    };
    assert!(build_state(&config).await.is_err());

    let missing = Config {
        frameworks_path: Some("/definitely/not/here.json".into()),
        ..Config::default()
    };
    assert!(build_state(&missing).await.is_err());
}

#[tokio::test]
async fn custom_policy_changes_scores() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"weights": {{"team": 0, "market": 0, "traction": 0, "risk": 1}}}}"#
    )
    .unwrap();
    let config = Config {
        scoring_policy_path: Some(file.path().to_path_buf()),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    // Risk alone: 100 - 20 per factor.
    let (_, deal) = get(&app, "/api/v1/deals/deal-003").await;
    assert_eq!(deal["dealScore"], 80);
}
