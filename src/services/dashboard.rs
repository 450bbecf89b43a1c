//! Dashboard service — simulated refresh and layout toggle.
//!
//! DESIGN
//! ======
//! Refresh stands in for a network round trip: it raises `loading`, sleeps
//! for the configured delay, then lowers it. The sleep runs on a spawned
//! task so only the loading indicator waits; other events keep being
//! processed. A refresh cannot be cancelled, and a second refresh while one
//! is in flight is ignored. A task outlived by `AppState::reset` wakes to a
//! newer generation and leaves `loading` alone.

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Start a refresh. Returns `None` if one is already running.
///
/// `loading` is set before this returns, so callers observe it immediately.
pub async fn spawn_refresh(state: &AppState) -> Option<JoinHandle<()>> {
    let generation = {
        let mut dashboard = state.dashboard.write().await;
        if dashboard.loading {
            debug!("dashboard: refresh already in flight");
            return None;
        }
        dashboard.loading = true;
        dashboard.refresh_generation = dashboard.refresh_generation.wrapping_add(1);
        dashboard.refresh_generation
    };
    info!(delay = ?state.config.refresh_delay, generation, "dashboard: refresh started");

    let state = state.clone();
    Some(tokio::spawn(async move {
        tokio::time::sleep(state.config.refresh_delay).await;
        let mut dashboard = state.dashboard.write().await;
        if dashboard.refresh_generation != generation {
            debug!(generation, current = dashboard.refresh_generation, "dashboard: stale refresh finished");
            return;
        }
        dashboard.loading = false;
        info!(generation, "dashboard: refresh finished");
    }))
}

/// Run a refresh to completion.
pub async fn refresh(state: &AppState) {
    if let Some(handle) = spawn_refresh(state).await {
        if let Err(e) = handle.await {
            warn!(error = %e, "dashboard: refresh task failed");
        }
    }
}

/// Flip between the vertical list and the horizontal carousel. Returns the
/// new value.
pub async fn toggle_layout(state: &AppState) -> bool {
    let mut dashboard = state.dashboard.write().await;
    dashboard.horizontal_layout = !dashboard.horizontal_layout;
    debug!(horizontal = dashboard.horizontal_layout, "dashboard: layout toggled");
    dashboard.horizontal_layout
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
