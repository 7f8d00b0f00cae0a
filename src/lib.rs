//! Fuel Pro agency management
//!
//! REST JSON API for managing customers, suppliers, gas cylinders, bookings
//! and bills, plus a server-rendered frontend that talks to that API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;
pub mod models;
pub mod pdf;
pub mod repository;
pub mod services;

pub use api::create_router;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
