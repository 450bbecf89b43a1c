//! Auth service — mock sign-in state machine and provider records.
//!
//! DESIGN
//! ======
//! Sign-in is simulated: every request succeeds except a provider sign-in
//! that omits a required scope. The store holds exactly one `AuthState`
//! at a time and the provider records created by successful provider
//! sign-ins.
//!
//! TRANSITIONS
//! ===========
//! `SignedOut --sign_in--> SignedIn`
//! `SignedOut --sign_in(deletion)--> ScheduledForDeletion`
//! `ScheduledForDeletion --reactivate--> SignedIn`
//! `* --reset--> SignedOut`
//!
//! `reactivate` from any state other than `ScheduledForDeletion` is a no-op.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// =============================================================================
// TYPES
// =============================================================================

/// Field key under which the provider id is stored in a provider record.
pub const PROVIDER_ID_FIELD: &str = "providerId";

/// Scopes every provider sign-in must request.
pub const REQUIRED_SCOPES: [Scope; 2] = [Scope::FullName, Scope::Email];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn,
    ScheduledForDeletion,
}

/// Scope requested from a third-party sign-in provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    FullName,
    Email,
}

/// Field map stored for one provider, e.g. `providerId -> apple.com`.
pub type ProviderRecord = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("sign-in with {provider} requires full name and email scopes")]
    InvalidScopes { provider: String },
}

impl crate::event::ErrorCode for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidScopes { .. } => "E_INVALID_SCOPES",
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Current authentication state plus provider metadata.
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    state: AuthState,
    providers: BTreeMap<String, ProviderRecord>,
}

impl AuthStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// True once any sign-in has completed, including a deletion-scheduled one.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state != AuthState::SignedOut
    }

    #[must_use]
    pub fn provider(&self, key: &str) -> Option<&ProviderRecord> {
        self.providers.get(key)
    }

    #[must_use]
    pub fn provider_records(&self) -> &BTreeMap<String, ProviderRecord> {
        &self.providers
    }

    /// Simulated sign-in. Lands on `ScheduledForDeletion` when the account
    /// is flagged, `SignedIn` otherwise.
    pub fn sign_in(&mut self, as_deletion_scheduled: bool) -> AuthState {
        self.state = if as_deletion_scheduled { AuthState::ScheduledForDeletion } else { AuthState::SignedIn };
        info!(state = ?self.state, "auth: signed in");
        self.state
    }

    /// Reactivate an account scheduled for deletion.
    ///
    /// Returns `true` if the state changed. Any other starting state is left
    /// untouched.
    pub fn reactivate(&mut self) -> bool {
        if self.state != AuthState::ScheduledForDeletion {
            debug!(state = ?self.state, "auth: reactivate ignored");
            return false;
        }
        self.state = AuthState::SignedIn;
        info!("auth: account reactivated");
        true
    }

    /// Sign in through a third-party provider.
    ///
    /// # Errors
    ///
    /// Returns `InvalidScopes` if `scopes` lacks full name or email. State
    /// and provider records are unchanged in that case.
    pub fn sign_in_with_provider(&mut self, provider_key: &str, scopes: &HashSet<Scope>) -> Result<AuthState, AuthError> {
        if !REQUIRED_SCOPES.iter().all(|s| scopes.contains(s)) {
            return Err(AuthError::InvalidScopes { provider: provider_key.to_string() });
        }

        let mut record = ProviderRecord::new();
        record.insert(PROVIDER_ID_FIELD.into(), format!("{provider_key}.com"));
        self.providers.insert(provider_key.to_string(), record);
        self.state = AuthState::SignedIn;

        info!(provider = %provider_key, "auth: provider sign-in");
        Ok(self.state)
    }

    /// Back to `SignedOut` with no provider records.
    pub fn reset(&mut self) {
        self.state = AuthState::SignedOut;
        self.providers.clear();
        info!("auth: reset");
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
