//! Core data types for Termfolio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A public repository as shown on the projects screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u32,
    pub language: Option<String>,
}

impl Repository {
    /// Description with the placeholder used when the owner left it blank
    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => desc,
            _ => "No description provided",
        }
    }

    /// Primary language, "Unknown" when GitHub could not detect one
    pub fn language_or_unknown(&self) -> &str {
        self.language.as_deref().unwrap_or("Unknown")
    }
}

/// Aggregate account numbers for the stats screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStats {
    pub repo_count: u32,
    pub star_count: u64,
    pub follower_count: u32,
    pub following_count: u32,
    pub gist_count: u32,
    /// When the numbers were fetched
    pub fetched_at: DateTime<Utc>,
}
