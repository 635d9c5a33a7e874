//! Termfolio - a developer portfolio for the terminal
//!
//! This library holds everything the terminal front-end consumes but does not
//! draw: configuration, the error taxonomy, logging setup, the fixed portfolio
//! content, and the external collaborators (GitHub, clipboard, theme file)
//! behind traits so they can be swapped for mocks in tests.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod mock;
pub mod portfolio;
pub mod source;
pub mod theme_store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{FolioError, Result, SourceError};
pub use source::PortfolioSource;
pub use types::{AccountStats, Repository};
