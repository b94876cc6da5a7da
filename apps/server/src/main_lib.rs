use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use dealflow_backend::BackendClient;
use dealflow_core::{
    deals::{DealService, DealServiceTrait},
    frameworks::{AnalysisService, AnalysisServiceTrait, FrameworkConfig, FrameworkRegistry},
    notes::{NoteService, NoteServiceTrait, NoteSinkTrait},
    portfolio::{PortfolioService, PortfolioServiceTrait},
    sources::{
        fallback_deals, fallback_portfolio, DealSourceTrait, OfflineSource, PortfolioSourceTrait,
    },
    ScoringPolicy,
};

pub struct AppState {
    pub deal_service: Arc<dyn DealServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub analysis_service: Arc<dyn AnalysisServiceTrait>,
    pub note_service: Arc<dyn NoteServiceTrait>,
    /// Whether a backend is configured; without one every list is a fixture.
    pub backend_configured: bool,
}

pub fn init_tracing() {
    let log_format = std::env::var("DF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

fn read_config_file(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {}", what, path.display()))
}

fn load_policy(config: &Config) -> anyhow::Result<ScoringPolicy> {
    match &config.scoring_policy_path {
        Some(path) => {
            let json = read_config_file(path, "scoring policy")?;
            let policy = ScoringPolicy::from_json(&json)
                .with_context(|| format!("Invalid scoring policy in {}", path.display()))?;
            tracing::info!("Scoring policy loaded from {}", path.display());
            Ok(policy)
        }
        None => Ok(ScoringPolicy::default()),
    }
}

fn load_frameworks(config: &Config) -> anyhow::Result<FrameworkConfig> {
    match &config.frameworks_path {
        Some(path) => {
            let json = read_config_file(path, "framework configuration")?;
            let frameworks = FrameworkConfig::from_json(&json)
                .with_context(|| format!("Invalid framework configuration in {}", path.display()))?;
            tracing::info!("Framework configuration loaded from {}", path.display());
            Ok(frameworks)
        }
        None => Ok(FrameworkConfig::default()),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let policy = load_policy(config)?;
    let frameworks = load_frameworks(config)?;

    let backend = config
        .backend_url
        .as_deref()
        .map(|url| BackendClient::new(url, config.backend_timeout, config.backend_token.as_deref()))
        .transpose()?
        .map(Arc::new);

    let (deal_source, portfolio_source, remote_notes): (
        Arc<dyn DealSourceTrait>,
        Arc<dyn PortfolioSourceTrait>,
        Option<Arc<dyn NoteSinkTrait>>,
    ) = match &backend {
        Some(client) => {
            tracing::info!("Using backend at {}", client.base_url());
            let deals: Arc<dyn DealSourceTrait> = client.clone();
            let portfolio: Arc<dyn PortfolioSourceTrait> = client.clone();
            let notes: Arc<dyn NoteSinkTrait> = client.clone();
            (deals, portfolio, Some(notes))
        }
        None => {
            tracing::warn!("DF_BACKEND_URL not set; serving fallback data");
            let offline = Arc::new(OfflineSource);
            let deals: Arc<dyn DealSourceTrait> = offline.clone();
            let portfolio: Arc<dyn PortfolioSourceTrait> = offline;
            (deals, portfolio, None)
        }
    };

    let deal_service = Arc::new(DealService::new(deal_source, fallback_deals(), policy.clone()));
    let portfolio_service = Arc::new(PortfolioService::new(portfolio_source, fallback_portfolio()));
    let analysis_service = Arc::new(AnalysisService::new(
        frameworks,
        FrameworkRegistry::default(),
        policy,
    ));
    let note_service = Arc::new(NoteService::new(remote_notes));

    let (deals, portfolio) = tokio::join!(deal_service.refresh(), portfolio_service.refresh());
    tracing::info!("Initial refresh: deals {:?}, portfolio {:?}", deals, portfolio);

    Ok(Arc::new(AppState {
        deal_service,
        portfolio_service,
        analysis_service,
        note_service,
        backend_configured: backend.is_some(),
    }))
}
