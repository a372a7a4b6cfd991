//! Game settings and preferences
//!
//! One `Settings` value is created per running game and handed to the level
//! catalog and the state machine; nothing here is global.

use serde::{Deserialize, Serialize};

use crate::Viewport;
use crate::consts::TICK_INTERVAL_MS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Developer mode: every level reads as unlocked
    pub developer_mode: bool,
    /// Seed for level generation (same seed, same layouts)
    pub seed: u64,

    // === Audio ===
    /// Sound cues enabled (playback belongs to the audio collaborator)
    pub sound_enabled: bool,

    // === Timing ===
    /// Nominal scheduler interval in milliseconds
    pub tick_interval_ms: u64,

    // === Display ===
    /// Logical screen size the simulation measures against
    pub viewport: Viewport,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            developer_mode: false,
            seed: 0x1ED6_E0A5,

            sound_enabled: true,

            tick_interval_ms: TICK_INTERVAL_MS,

            viewport: Viewport::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn try_from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tick_interval_ms = settings.tick_interval_ms.max(1);
        Ok(settings)
    }

    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match Self::try_from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn toggle_developer_mode(&mut self) -> bool {
        self.developer_mode = !self.developer_mode;
        self.developer_mode
    }

    /// Scheduler interval as a `Duration`
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::try_from_json(r#"{ "developer_mode": true }"#).unwrap();
        assert!(settings.developer_mode);
        assert!(settings.sound_enabled);
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
        assert_eq!(settings.viewport, Viewport::default());
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert!(Settings::try_from_json("{ nope").is_err());
        assert_eq!(Settings::from_json("{ nope"), Settings::default());
    }

    #[test]
    fn test_zero_interval_is_raised() {
        let settings = Settings::try_from_json(r#"{ "tick_interval_ms": 0 }"#).unwrap();
        assert_eq!(settings.tick_interval_ms, 1);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.toggle_sound();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }
}
