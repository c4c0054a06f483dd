//! Program core.
//!
//! Owns the application state (graphics context + loop state), the startup
//! configuration, and the `run` sequence tying them to a backend and a loop
//! driver.

mod app;
mod config;
mod context;
mod error;

pub use app::{run, AppState};
pub use config::{AppConfig, WindowSpec};
pub use context::GraphicsContext;
pub use error::InitError;
