//! Headless driver: one UI event per stdin line, JSON snapshot per event.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use spanr::config::AppConfig;
use spanr::event::{self, ErrorCode, UiEvent};
use spanr::state::AppState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = AppConfig::from_env();
    let state = AppState::new(config);
    info!(refresh_delay = ?config.refresh_delay, screen = %state.screen().await, "spanr ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let result = match UiEvent::parse(&line) {
            Ok(ev) => event::dispatch(&state, ev).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(screen) => info!(%screen, "screen"),
            Err(e) => warn!(code = e.error_code(), error = %e, "event rejected"),
        }

        let snapshot = state.snapshot().await;
        match serde_json::to_string(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "snapshot encode failed"),
        }
    }

    Ok(())
}
