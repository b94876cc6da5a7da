//! Background scheduler for periodic listing refresh.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::main_lib::AppState;

/// Starts refreshing deals and portfolio every `every`. The first refresh
/// happens one period after startup, since `build_state` already ran one.
pub fn start_refresh_scheduler(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("Refresh scheduler started ({}s interval)", every.as_secs());

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

async fn run_scheduled_refresh(state: &Arc<AppState>) {
    if !state.backend_configured {
        debug!("Scheduled refresh skipped: no backend configured");
        return;
    }
    let (deals, portfolio) = tokio::join!(
        state.deal_service.refresh(),
        state.portfolio_service.refresh()
    );
    info!("Scheduled refresh: deals {:?}, portfolio {:?}", deals, portfolio);
}
