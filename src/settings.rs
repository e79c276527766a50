//! Game settings and preferences
//!
//! Persisted separately from scores in LocalStorage. Game state itself is
//! never saved; a reload always starts a fresh maze.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Visual Effects ===
    /// Floating score text on pickups
    pub floating_text: bool,
    /// Gold rain celebration on the win screen
    pub win_particles: bool,
    /// Faint grid lines over empty floor cells
    pub grid_lines: bool,

    // === Behavior ===
    /// Pause automatically when the tab is hidden or the window blurs
    pub auto_pause: bool,

    // === Accessibility ===
    /// Reduced motion (disables bounce/pulse animations and gold rain)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            floating_text: true,
            win_particles: true,
            grid_lines: true,
            auto_pause: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "nian_blast_settings";

    /// Effective win particles (respects reduced_motion)
    pub fn effective_win_particles(&self) -> bool {
        self.win_particles && !self.reduced_motion
    }

    /// Effective floating text (respects reduced_motion)
    pub fn effective_floating_text(&self) -> bool {
        self.floating_text && !self.reduced_motion
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
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
    fn test_reduced_motion_overrides_effects() {
        let mut settings = Settings::default();
        assert!(settings.effective_win_particles());
        assert!(settings.effective_floating_text());
        settings.reduced_motion = true;
        assert!(!settings.effective_win_particles());
        assert!(!settings.effective_floating_text());
    }

    #[test]
    fn test_settings_roundtrip_json() {
        let settings = Settings {
            grid_lines: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(!back.grid_lines);
        assert!(back.floating_text);
    }

    #[test]
    fn test_every_toggle_survives_persistence() {
        // Each checkbox in the shell flips one field and re-saves; the
        // persisted payload must restore all of them away from defaults.
        let settings = Settings {
            floating_text: false,
            win_particles: false,
            grid_lines: false,
            auto_pause: false,
            reduced_motion: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(!back.floating_text);
        assert!(!back.win_particles);
        assert!(!back.grid_lines);
        assert!(!back.auto_pause);
        assert!(back.reduced_motion);
    }
}
