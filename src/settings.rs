//! User preferences
//!
//! Persisted separately from win statistics in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_AGENTS_PER_KIND, MAX_AGENTS_PER_KIND};

/// Battle preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// How many agents of each kind a battle starts with
    pub agents_per_kind: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            agents_per_kind: DEFAULT_AGENTS_PER_KIND,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rps_arena_settings";

    /// Set the battle size, clamped to the supported range
    pub fn set_agents_per_kind(&mut self, n: u32) {
        self.agents_per_kind = n.clamp(1, MAX_AGENTS_PER_KIND);
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut settings) = serde_json::from_str::<Settings>(&json) {
                    // Re-clamp: stored values may predate the current range
                    let n = settings.agents_per_kind;
                    settings.set_agents_per_kind(n);
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agents_per_kind_clamped() {
        let mut settings = Settings::default();
        assert_eq!(settings.agents_per_kind, DEFAULT_AGENTS_PER_KIND);

        settings.set_agents_per_kind(0);
        assert_eq!(settings.agents_per_kind, 1);

        settings.set_agents_per_kind(500);
        assert_eq!(settings.agents_per_kind, MAX_AGENTS_PER_KIND);

        settings.set_agents_per_kind(12);
        assert_eq!(settings.agents_per_kind, 12);
    }
}
