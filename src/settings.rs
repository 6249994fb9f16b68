//! Game settings and preferences
//!
//! Read once at startup from an optional JSON blob embedded in the page.
//! Nothing here changes gameplay; it only shapes what the renderer draws
//! and which seed a run starts from.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake after death
    pub screen_shake: bool,
    /// Red flash after death
    pub death_flash: bool,
    /// Death-burst particles
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, dimmer flash)
    pub reduced_motion: bool,

    // === Debug ===
    /// Fixed run seed (random per page load when unset)
    pub seed: Option<u64>,
    /// Start with the autopilot enabled
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Visual effects - all on by default
            screen_shake: true,
            death_flash: true,
            particles: true,

            // Accessibility
            reduced_motion: false,

            seed: None,
            autopilot: false,
        }
    }
}

impl Settings {
    /// DOM id of the optional `<script type="application/json">` settings blob
    pub const ELEMENT_ID: &'static str = "game-settings";

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Peak opacity of the death flash overlay
    pub fn death_flash_strength(&self) -> f32 {
        match (self.death_flash, self.reduced_motion) {
            (false, _) => 0.0,
            (true, true) => 0.2,
            (true, false) => 0.5,
        }
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json.as_deref().map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from page");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid settings JSON, using defaults: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "screen_shake": false }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.screen_shake);
        assert!(settings.particles);
        assert!(settings.death_flash);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ seed: }").is_err());
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        assert_eq!(settings.death_flash_strength(), 0.2);
        assert_eq!(Settings::default().death_flash_strength(), 0.5);
    }
}
