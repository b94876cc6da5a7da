use dealflow_server::{
    api::app_router, build_state, config::Config, init_tracing, start_refresh_scheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    let state = build_state(&config).await?;

    if let Some(every) = config.refresh_interval {
        start_refresh_scheduler(state.clone(), every);
    }

    let router = app_router(state, &config);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
