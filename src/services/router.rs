//! Router — maps auth state and the navigation stack to a screen.
//!
//! DESIGN
//! ======
//! `resolve` is pure: the screen is re-derived after every event rather than
//! stored. Auth state decides everything except for a signed-in user, where
//! the top of the navigation stack (if any) wins over the dashboard.

use serde::Serialize;
use tracing::debug;

use super::auth::AuthState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    SignIn,
    Reactivate,
    Dashboard,
    AddProperty,
}

impl Screen {
    /// Route name used by UI tests and logs.
    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Self::SignIn => "login",
            Self::Reactivate => "reactivate",
            Self::Dashboard => "dashboard",
            Self::AddProperty => "add_property",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.route())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("cannot open {to} from {from}")]
    NotReachable { from: Screen, to: Screen },
}

impl crate::event::ErrorCode for RouteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotReachable { .. } => "E_NOT_REACHABLE",
        }
    }
}

// =============================================================================
// NAVIGATOR
// =============================================================================

/// Screens pushed on top of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn top(&self) -> Option<Screen> {
        self.stack.last().copied()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push the add-property screen. Only reachable from the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `NotReachable` when the current screen is not the dashboard.
    pub fn open_add_property(&mut self, auth: AuthState) -> Result<Screen, RouteError> {
        let from = resolve(auth, self);
        if from != Screen::Dashboard {
            return Err(RouteError::NotReachable { from, to: Screen::AddProperty });
        }
        self.stack.push(Screen::AddProperty);
        debug!(depth = self.stack.len(), "router: pushed add_property");
        Ok(Screen::AddProperty)
    }

    /// Pop the top screen. Returns what was popped.
    pub fn pop(&mut self) -> Option<Screen> {
        let popped = self.stack.pop();
        debug!(?popped, "router: pop");
        popped
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

// =============================================================================
// RESOLVE
// =============================================================================

/// Screen to render for the given auth state and navigation stack.
#[must_use]
pub fn resolve(auth: AuthState, nav: &Navigator) -> Screen {
    match auth {
        AuthState::SignedOut => Screen::SignIn,
        AuthState::ScheduledForDeletion => Screen::Reactivate,
        AuthState::SignedIn => nav.top().unwrap_or(Screen::Dashboard),
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
