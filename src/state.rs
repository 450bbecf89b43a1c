//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is constructed explicitly and passed to the event surface and
//! to tests; there is no process-wide singleton. Each store sits behind its
//! own `RwLock` so the refresh task can hold a clone across its sleep while
//! other events keep flowing.
//!
//! LOCK ORDER
//! ==========
//! auth → catalog → nav → dashboard → draft. Locks are never held across an
//! `.await` other than the lock acquisition itself.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::services::auth::{AuthState, AuthStore, ProviderRecord};
use crate::services::catalog::{Catalog, Property};
use crate::services::router::{self, Navigator, Screen};

// =============================================================================
// DASHBOARD
// =============================================================================

/// Transient dashboard flags. Not part of any store's invariants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub loading: bool,
    pub horizontal_layout: bool,
    /// Bumped by every refresh start and every reset. A refresh task only
    /// lowers `loading` if the generation it started with is still current.
    #[serde(skip)]
    pub refresh_generation: u64,
}

// =============================================================================
// PROPERTY DRAFT
// =============================================================================

/// Field values typed into the add-property screen before saving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub is_primary: bool,
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Point-in-time copy of everything a screen can display.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub auth: AuthState,
    pub providers: BTreeMap<String, ProviderRecord>,
    /// Dashboard order.
    pub properties: Vec<Property>,
    pub dashboard: DashboardState,
    pub draft: PropertyDraft,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Cloneable handle to all application stores.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub auth: Arc<RwLock<AuthStore>>,
    pub catalog: Arc<RwLock<Catalog>>,
    pub nav: Arc<RwLock<Navigator>>,
    pub dashboard: Arc<RwLock<DashboardState>>,
    pub draft: Arc<RwLock<PropertyDraft>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            auth: Arc::new(RwLock::new(AuthStore::new())),
            catalog: Arc::new(RwLock::new(Catalog::new())),
            nav: Arc::new(RwLock::new(Navigator::new())),
            dashboard: Arc::new(RwLock::new(DashboardState::default())),
            draft: Arc::new(RwLock::new(PropertyDraft::default())),
        }
    }

    /// Screen for the current auth state and navigation stack.
    pub async fn screen(&self) -> Screen {
        let auth = self.auth.read().await.state();
        let nav = self.nav.read().await;
        router::resolve(auth, &nav)
    }

    pub async fn snapshot(&self) -> Snapshot {
        let auth = self.auth.read().await;
        let catalog = self.catalog.read().await;
        let nav = self.nav.read().await;
        let dashboard = *self.dashboard.read().await;
        let draft = self.draft.read().await.clone();

        Snapshot {
            screen: router::resolve(auth.state(), &nav),
            auth: auth.state(),
            providers: auth.provider_records().clone(),
            properties: catalog.sorted_view().iter().cloned().collect(),
            dashboard,
            draft,
        }
    }

    /// Return every store to its launch state.
    pub async fn reset(&self) {
        self.auth.write().await.reset();
        self.catalog.write().await.reset();
        self.nav.write().await.clear();
        {
            let mut dashboard = self.dashboard.write().await;
            let refresh_generation = dashboard.refresh_generation.wrapping_add(1);
            *dashboard = DashboardState { refresh_generation, ..DashboardState::default() };
        }
        *self.draft.write().await = PropertyDraft::default();
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
