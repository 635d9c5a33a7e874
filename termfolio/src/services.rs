//! Service layer adapter
//!
//! Bundles the collaborators screens never touch directly (data source,
//! markdown renderer, clipboard, theme store) and owns the tokio runtime the
//! scheduler spawns work on. The event loop itself stays synchronous.
//!
//! # Example
//!
//! ```no_run
//! use termfolio::services::{ServiceHandle, Services};
//!
//! # fn example() -> termfolio::error::Result<()> {
//! let config = libtermfolio::Config::load()?;
//! let services = Services::from_config(&config)?;
//! let handle = ServiceHandle::new(services)?;
//! let _tokio = handle.handle();
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use libtermfolio::{
    clipboard::{ArboardClipboard, ClipboardSink, NoClipboard},
    github::GitHubSource,
    theme_store::{FileThemeStore, MemoryThemeStore, ThemeStore},
    Config, PortfolioSource,
};

use crate::error::Result;
use crate::markdown::{CmarkRenderer, MarkdownRenderer};
use crate::ui::theme::ThemeId;

/// Everything the scheduler needs to run jobs
#[derive(Clone)]
pub struct Services {
    pub source: Arc<dyn PortfolioSource>,
    pub markdown: Arc<dyn MarkdownRenderer>,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub themes: Arc<dyn ThemeStore>,
    /// GitHub account whose repositories and stats are shown
    pub username: String,
    /// Upper bound for every network fetch
    pub fetch_timeout: Duration,
}

impl Services {
    /// Production collaborators for a local session
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = GitHubSource::new(&config.github)?;
        Ok(Self {
            source: Arc::new(source),
            markdown: Arc::new(CmarkRenderer::default()),
            clipboard: Arc::new(ArboardClipboard::new()),
            themes: Arc::new(FileThemeStore::new(config.ui.theme_file_path()?)),
            username: config.github.username.clone(),
            fetch_timeout: config.timing.fetch_timeout,
        })
    }

    /// Test and remote setup around an arbitrary source, with no clipboard and an in-memory theme store
    pub fn with_source(source: Arc<dyn PortfolioSource>, username: &str, fetch_timeout: Duration) -> Self {
        Self {
            source,
            markdown: Arc::new(CmarkRenderer::default()),
            clipboard: Arc::new(NoClipboard),
            themes: Arc::new(MemoryThemeStore::default()),
            username: username.to_string(),
            fetch_timeout,
        }
    }

    /// Copy for one remote session: shared source, no clipboard, private theme memory
    pub fn for_remote_session(&self) -> Self {
        Self {
            clipboard: Arc::new(NoClipboard),
            themes: Arc::new(MemoryThemeStore::default()),
            ..self.clone()
        }
    }

    /// Pick the starting theme: CLI flag, then saved theme, then config, then default
    pub fn initial_theme(&self, cli: Option<ThemeId>, config: &Config) -> ThemeId {
        if let Some(theme) = cli {
            return theme;
        }
        if let Some(saved) = self.themes.load_theme_name() {
            match saved.parse() {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(error = %e, "ignoring saved theme"),
            }
        }
        config.ui.theme.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring configured theme");
            ThemeId::default()
        })
    }
}

/// Services plus the tokio runtime they run on
pub struct ServiceHandle {
    services: Arc<Services>,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Create the runtime for async operations
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(services: Services) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("termfolio-worker")
            .build()?;

        Ok(Self {
            services: Arc::new(services),
            runtime,
        })
    }

    pub fn services(&self) -> Arc<Services> {
        Arc::clone(&self.services)
    }

    /// Handle for spawning onto the runtime from synchronous code
    pub fn handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Run a future to completion on the runtime
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
