//! Arena of screen instances
//!
//! Screens are constructed on first navigation and live until the session
//! ends. The arena is bounded by the ten [`ScreenId`]s, so nothing is ever
//! evicted.

use std::collections::HashMap;

use super::state::ScreenId;
use crate::screens::{self, Screen, ScreenSettings};

pub struct ScreenRegistry {
    screens: HashMap<ScreenId, Box<dyn Screen>>,
    settings: ScreenSettings,
}

impl ScreenRegistry {
    pub fn new(settings: ScreenSettings) -> Self {
        Self {
            screens: HashMap::with_capacity(ScreenId::ALL.len()),
            settings,
        }
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.screens.contains_key(&id)
    }

    pub fn get(&self, id: ScreenId) -> Option<&dyn Screen> {
        self.screens.get(&id).map(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, id: ScreenId) -> Option<&mut (dyn Screen + 'static)> {
        self.screens.get_mut(&id).map(|s| s.as_mut())
    }

    /// Construct the screen for `id` unless it exists. Returns true if it was created.
    pub fn ensure(&mut self, id: ScreenId) -> bool {
        if self.screens.contains_key(&id) {
            return false;
        }
        tracing::debug!(screen = %id, "constructing screen");
        self.screens.insert(id, screens::build(id, &self.settings));
        true
    }

    /// Ids of every constructed screen, in declaration order
    pub fn instantiated(&self) -> Vec<ScreenId> {
        ScreenId::ALL
            .into_iter()
            .filter(|id| self.screens.contains_key(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
