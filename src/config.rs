use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::SoundboardError;

/// Name of the optional global a host page can define to override defaults.
pub const WINDOW_CONFIG_KEY: &str = "soundboardConfig";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoundboardConfig {
    pub manifest_url: String,
    pub assets_root: String,
    /// Catalog used when the manifest cannot be loaded.
    pub fallback_sounds: Vec<String>,
    pub initial_volume: f32,
    /// Time constant of the exponential master-gain ramp, in seconds.
    pub volume_ramp_seconds: f64,
    pub hotkey_count: usize,
    pub log_level: String,
}

impl Default for SoundboardConfig {
    fn default() -> Self {
        SoundboardConfig {
            manifest_url: "./sounds.json".to_string(),
            assets_root: "./sounds/".to_string(),
            fallback_sounds: vec![
                "beep.wav".to_string(),
                "ding.wav".to_string(),
                "pop.wav".to_string(),
            ],
            initial_volume: 1.0,
            volume_ramp_seconds: 0.01,
            hotkey_count: 9,
            log_level: "info".to_string(),
        }
    }
}

impl SoundboardConfig {
    pub fn from_json(json: &str) -> Result<Self, SoundboardError> {
        serde_json::from_str(json).map_err(|e| SoundboardError::Config(e.to_string()))
    }

    /// Reads `window.soundboardConfig`, which may be a JSON string or a plain object.
    pub fn from_window() -> Result<Self, SoundboardError> {
        let Some(window) = web_sys::window() else {
            return Ok(Self::default());
        };
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(WINDOW_CONFIG_KEY))
            .map_err(|e| SoundboardError::platform("read window config", e))?;
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        if let Some(json) = value.as_string() {
            return Self::from_json(&json);
        }
        let json = js_sys::JSON::stringify(&value)
            .map_err(|e| SoundboardError::platform("serialize window config", e))?;
        Self::from_json(&String::from(json))
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Hotkeys are the digits 1-9, so never more than nine.
    pub fn hotkeys(&self) -> usize {
        self.hotkey_count.min(9)
    }
}
