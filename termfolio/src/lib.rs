//! termfolio library
//!
//! The screen-navigation core, the ten screens, and the drivers that run a
//! session on the local terminal or for remote telnet clients. Exported for
//! the binary and for integration tests.

pub mod app;
pub mod cli;
pub mod error;
pub mod markdown;
pub mod remote;
pub mod runtime;
pub mod screens;
pub mod services;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{AppState, Dispatcher, Event, ScreenId};
pub use error::{Result, TuiError};
pub use screens::{Screen, ScreenSettings};
