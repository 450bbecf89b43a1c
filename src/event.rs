//! UI event surface — stable tags, parsing, and dispatch.
//!
//! DESIGN
//! ======
//! Every button or field the UI exposes maps to one `UiEvent`, named by the
//! same tag UI tests use to find it (`save_property_button`,
//! `refresh_button`, ...). Tags are part of the external contract and must
//! not change.
//!
//! Dispatch checks that the event belongs to the current screen, applies it
//! to the stores, and returns the screen re-derived from the new state. A
//! failed event leaves every store untouched and the screen unchanged.
//!
//! TEXT FORM
//! =========
//! One event per line: `tag` or `tag argument`. The argument is everything
//! after the first space, e.g. `address_field 123 Main St`.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::services::auth::{AuthError, REQUIRED_SCOPES, Scope};
use crate::services::catalog::CatalogError;
use crate::services::dashboard;
use crate::services::router::{RouteError, Screen};
use crate::state::{AppState, PropertyDraft};

// =============================================================================
// ERROR CODES
// =============================================================================

/// Errors carry a stable machine-readable code alongside their message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    #[error("{tag} requires an argument")]
    MissingArgument { tag: &'static str },
    #[error("{tag} is not available on {screen}")]
    NotOnScreen { tag: &'static str, screen: Screen },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl ErrorCode for EventError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEvent(_) => "E_UNKNOWN_EVENT",
            Self::MissingArgument { .. } => "E_MISSING_ARGUMENT",
            Self::NotOnScreen { .. } => "E_NOT_ON_SCREEN",
            Self::Auth(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Route(e) => e.error_code(),
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

pub const APPLE_LOGIN: &str = "apple_login_button";
pub const GOOGLE_LOGIN: &str = "google_login_button";
pub const GOOGLE_LOGIN_DELETION: &str = "google_login_deletion_button";
pub const REACTIVATE: &str = "reactivate_button";
pub const REFRESH: &str = "refresh_button";
pub const TOGGLE_LAYOUT: &str = "toggle_layout_button";
pub const ADD_PROPERTY: &str = "add_property_fab";
pub const SIGN_OUT: &str = "sign_out_button";
pub const PROPERTY_CARD: &str = "property_card";
pub const PRIMARY_SWITCH: &str = "primary_switch";
pub const NAME_FIELD: &str = "name_field";
pub const ADDRESS_FIELD: &str = "address_field";
pub const CITY_FIELD: &str = "city_field";
pub const PRIMARY_CHECKBOX: &str = "primary_checkbox";
pub const SAVE_PROPERTY: &str = "save_property_button";
pub const BACK: &str = "back_button";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    AppleLogin,
    GoogleLogin,
    /// Sign in as an account that is scheduled for deletion.
    GoogleLoginDeletion,
    Reactivate,
    Refresh,
    ToggleLayout,
    AddProperty,
    SignOut,
    /// Card tap: make this property the active one.
    SelectProperty(String),
    TogglePrimary(String),
    NameInput(String),
    AddressInput(String),
    CityInput(String),
    PrimaryCheckbox,
    SaveProperty,
    Back,
}

impl UiEvent {
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AppleLogin => APPLE_LOGIN,
            Self::GoogleLogin => GOOGLE_LOGIN,
            Self::GoogleLoginDeletion => GOOGLE_LOGIN_DELETION,
            Self::Reactivate => REACTIVATE,
            Self::Refresh => REFRESH,
            Self::ToggleLayout => TOGGLE_LAYOUT,
            Self::AddProperty => ADD_PROPERTY,
            Self::SignOut => SIGN_OUT,
            Self::SelectProperty(_) => PROPERTY_CARD,
            Self::TogglePrimary(_) => PRIMARY_SWITCH,
            Self::NameInput(_) => NAME_FIELD,
            Self::AddressInput(_) => ADDRESS_FIELD,
            Self::CityInput(_) => CITY_FIELD,
            Self::PrimaryCheckbox => PRIMARY_CHECKBOX,
            Self::SaveProperty => SAVE_PROPERTY,
            Self::Back => BACK,
        }
    }

    /// The only screen on which this event can be raised.
    #[must_use]
    pub fn screen(&self) -> Screen {
        match self {
            Self::AppleLogin | Self::GoogleLogin | Self::GoogleLoginDeletion => Screen::SignIn,
            Self::Reactivate => Screen::Reactivate,
            Self::Refresh
            | Self::ToggleLayout
            | Self::AddProperty
            | Self::SignOut
            | Self::SelectProperty(_)
            | Self::TogglePrimary(_) => Screen::Dashboard,
            Self::NameInput(_)
            | Self::AddressInput(_)
            | Self::CityInput(_)
            | Self::PrimaryCheckbox
            | Self::SaveProperty
            | Self::Back => Screen::AddProperty,
        }
    }

    /// Parse the `tag [argument]` text form.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEvent` for an unrecognized tag and `MissingArgument`
    /// when a card or switch tag has no property id.
    pub fn parse(line: &str) -> Result<Self, EventError> {
        let line = line.trim_start();
        let (tag, arg) = match line.split_once(' ') {
            Some((tag, arg)) => (tag, arg.trim_end()),
            None => (line.trim_end(), ""),
        };

        let id_arg = |tag: &'static str| {
            let id = arg.trim();
            if id.is_empty() { Err(EventError::MissingArgument { tag }) } else { Ok(id.to_string()) }
        };

        let event = match tag {
            APPLE_LOGIN => Self::AppleLogin,
            GOOGLE_LOGIN => Self::GoogleLogin,
            GOOGLE_LOGIN_DELETION => Self::GoogleLoginDeletion,
            REACTIVATE => Self::Reactivate,
            REFRESH => Self::Refresh,
            TOGGLE_LAYOUT => Self::ToggleLayout,
            ADD_PROPERTY => Self::AddProperty,
            SIGN_OUT => Self::SignOut,
            PROPERTY_CARD => Self::SelectProperty(id_arg(PROPERTY_CARD)?),
            PRIMARY_SWITCH => Self::TogglePrimary(id_arg(PRIMARY_SWITCH)?),
            NAME_FIELD => Self::NameInput(arg.to_string()),
            ADDRESS_FIELD => Self::AddressInput(arg.to_string()),
            CITY_FIELD => Self::CityInput(arg.to_string()),
            PRIMARY_CHECKBOX => Self::PrimaryCheckbox,
            SAVE_PROPERTY => Self::SaveProperty,
            BACK => Self::Back,
            other => return Err(EventError::UnknownEvent(other.to_string())),
        };
        Ok(event)
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Apply one event and return the screen to render next.
///
/// # Errors
///
/// Returns `NotOnScreen` if the event is not offered by the current screen,
/// or the underlying store error. State is unchanged on error.
pub async fn dispatch(state: &AppState, event: UiEvent) -> Result<Screen, EventError> {
    let current = state.screen().await;
    if event.screen() != current {
        warn!(tag = event.tag(), screen = %current, "event: not on screen");
        return Err(EventError::NotOnScreen { tag: event.tag(), screen: current });
    }
    info!(tag = event.tag(), screen = %current, "event: dispatch");

    match event {
        UiEvent::AppleLogin => provider_sign_in(state, "apple").await?,
        UiEvent::GoogleLogin => provider_sign_in(state, "google").await?,
        UiEvent::GoogleLoginDeletion => {
            state.auth.write().await.sign_in(true);
            state.nav.write().await.clear();
        }
        UiEvent::Reactivate => {
            state.auth.write().await.reactivate();
        }
        UiEvent::Refresh => {
            // Detached: the task lowers `loading` on its own.
            let _ = dashboard::spawn_refresh(state).await;
        }
        UiEvent::ToggleLayout => {
            dashboard::toggle_layout(state).await;
        }
        UiEvent::AddProperty => {
            let auth = state.auth.read().await.state();
            state.nav.write().await.open_add_property(auth)?;
        }
        UiEvent::SignOut => {
            state.auth.write().await.reset();
            state.nav.write().await.clear();
            *state.draft.write().await = PropertyDraft::default();
        }
        UiEvent::SelectProperty(id) => state.catalog.write().await.set_active(&id)?,
        UiEvent::TogglePrimary(id) => {
            state.catalog.write().await.toggle_primary(&id)?;
        }
        UiEvent::NameInput(text) => state.draft.write().await.name = text,
        UiEvent::AddressInput(text) => state.draft.write().await.address = text,
        UiEvent::CityInput(text) => state.draft.write().await.city = text,
        UiEvent::PrimaryCheckbox => {
            let mut draft = state.draft.write().await;
            draft.is_primary = !draft.is_primary;
        }
        UiEvent::SaveProperty => save_draft(state).await?,
        UiEvent::Back => {
            state.nav.write().await.pop();
            *state.draft.write().await = PropertyDraft::default();
        }
    }

    Ok(state.screen().await)
}

async fn provider_sign_in(state: &AppState, provider: &str) -> Result<(), EventError> {
    let scopes: HashSet<Scope> = REQUIRED_SCOPES.into_iter().collect();
    state
        .auth
        .write()
        .await
        .sign_in_with_provider(provider, &scopes)?;
    state.nav.write().await.clear();
    Ok(())
}

/// Submit the draft. On success the draft is cleared and the form closes;
/// on failure both stay so the user can fix the input.
async fn save_draft(state: &AppState) -> Result<(), EventError> {
    let draft = state.draft.read().await.clone();
    state
        .catalog
        .write()
        .await
        .add(&draft.name, &draft.address, &draft.city, draft.is_primary)?;
    state.nav.write().await.pop();
    *state.draft.write().await = PropertyDraft::default();
    Ok(())
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
