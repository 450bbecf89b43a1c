//! Runtime configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_REFRESH_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Simulated round trip of the dashboard refresh action.
    pub refresh_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { refresh_delay: Duration::from_millis(DEFAULT_REFRESH_DELAY_MS) }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `SPANR_REFRESH_DELAY_MS`: default 1000
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unparseable values fall
    /// back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let delay_ms = parse_u64(lookup("SPANR_REFRESH_DELAY_MS").as_deref(), DEFAULT_REFRESH_DELAY_MS);
        Self { refresh_delay: Duration::from_millis(delay_ms) }
    }
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
