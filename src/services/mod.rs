//! Domain services driven by UI events.
//!
//! ARCHITECTURE
//! ============
//! `auth`, `catalog` and `router` are synchronous leaf models with no
//! knowledge of each other. `dashboard` works on the shared `AppState`
//! because refresh outlives the event that started it.

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod router;
