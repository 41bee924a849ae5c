//! Game settings and preferences
//!
//! Persisted separately from the leaderboards in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TOTAL_ROUNDS, MAX_TOTAL_ROUNDS};
use crate::highscores::GUEST_NAME;
use crate::sim::SimConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hurdles per game (1..=20)
    pub total_rounds: u32,
    /// Name scores are filed under
    pub player_name: String,
    /// Arrow volleys on or off
    pub arrows_enabled: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            player_name: GUEST_NAME.to_string(),
            arrows_enabled: true,
            master_volume: 0.3,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pawlympics_settings";

    pub fn set_total_rounds(&mut self, total_rounds: u32) {
        self.total_rounds = total_rounds.clamp(1, MAX_TOTAL_ROUNDS);
    }

    /// Blank names fall back to the guest name
    pub fn set_player_name(&mut self, name: &str) {
        let name = name.trim();
        self.player_name = if name.is_empty() {
            GUEST_NAME.to_string()
        } else {
            name.to_string()
        };
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Volume after mute is applied
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Options the simulation needs
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            total_rounds: self.total_rounds.clamp(1, MAX_TOTAL_ROUNDS),
            arrows_enabled: self.arrows_enabled,
        }
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
                    log::info!("Loaded settings from LocalStorage");
                    settings.set_total_rounds(settings.total_rounds);
                    settings.set_master_volume(settings.master_volume);
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
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Settings could not be written");
                    }
                }
                Err(e) => log::warn!("Settings could not be serialized: {e}"),
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
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.total_rounds, 5);
        assert_eq!(settings.player_name, "Guest");
        assert!(settings.arrows_enabled);
        assert_eq!(settings.effective_volume(), 0.3);
    }

    #[test]
    fn test_round_count_is_clamped() {
        let mut settings = Settings::default();
        settings.set_total_rounds(0);
        assert_eq!(settings.total_rounds, 1);
        settings.set_total_rounds(99);
        assert_eq!(settings.total_rounds, MAX_TOTAL_ROUNDS);
        assert_eq!(settings.sim_config().total_rounds, MAX_TOTAL_ROUNDS);
    }

    #[test]
    fn test_blank_name_is_guest() {
        let mut settings = Settings::default();
        settings.set_player_name("  Luna ");
        assert_eq!(settings.player_name, "Luna");
        settings.set_player_name("   ");
        assert_eq!(settings.player_name, GUEST_NAME);
    }

    #[test]
    fn test_mute_silences() {
        let mut settings = Settings::default();
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"total_rounds": 3}"#).expect("partial settings parse");
        assert_eq!(settings.total_rounds, 3);
        assert_eq!(settings.player_name, GUEST_NAME);
    }
}
