//! Remembering the picked theme between runs

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::Result;

/// Persistence for the theme name
pub trait ThemeStore: Send + Sync {
    /// Saved theme name, `None` if nothing usable was saved
    fn load_theme_name(&self) -> Option<String>;

    fn save_theme_name(&self, name: &str) -> Result<()>;
}

/// Plain text file holding just the theme name
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ThemeStore for FileThemeStore {
    fn load_theme_name(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let name = content.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read theme file");
                None
            }
        }
    }

    fn save_theme_name(&self, name: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{}\n", name))?;
        Ok(())
    }
}

/// In-memory store for remote sessions and tests
#[derive(Default)]
pub struct MemoryThemeStore {
    name: Mutex<Option<String>>,
}

impl ThemeStore for MemoryThemeStore {
    fn load_theme_name(&self) -> Option<String> {
        self.name.lock().ok().and_then(|n| n.clone())
    }

    fn save_theme_name(&self, name: &str) -> Result<()> {
        if let Ok(mut slot) = self.name.lock() {
            *slot = Some(name.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileThemeStore::new(dir.path().join("theme"));
        assert_eq!(store.load_theme_name(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileThemeStore::new(dir.path().join("nested").join("theme"));

        store.save_theme_name("dracula").unwrap();
        assert_eq!(store.load_theme_name().as_deref(), Some("dracula"));
    }

    #[test]
    fn test_blank_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        std::fs::write(&path, "  \n").unwrap();

        assert_eq!(FileThemeStore::new(path).load_theme_name(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryThemeStore::default();
        assert_eq!(store.load_theme_name(), None);
        store.save_theme_name("hacker").unwrap();
        assert_eq!(store.load_theme_name().as_deref(), Some("hacker"));
    }
}
