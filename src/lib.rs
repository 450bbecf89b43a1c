//! # spanr
//!
//! Headless state core for the Spanr property app: mock social sign-in,
//! the account-reactivation gate, and the property dashboard.
//!
//! `AppState` owns the stores, `event::dispatch` applies UI events to it,
//! and `services::router::resolve` derives the screen to show.

pub mod config;
pub mod event;
pub mod services;
pub mod state;
