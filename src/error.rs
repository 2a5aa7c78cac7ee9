use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoundboardError {
    #[error("manifest unavailable: {0}")]
    Manifest(String),
    #[error("failed to fetch {id}: HTTP {status}")]
    Fetch { id: String, status: u16 },
    #[error("failed to fetch {id}: {reason}")]
    Transport { id: String, reason: String },
    #[error("failed to decode {id}: {reason}")]
    Decode { id: String, reason: String },
    #[error("audio output has not been activated")]
    NotActivated,
    #[error("{0}")]
    Platform(String),
    #[error("invalid config: {0}")]
    Config(String),
}

impl SoundboardError {
    /// Wraps a rejected web API call, keeping the JS error text.
    pub fn platform(action: &str, err: JsValue) -> Self {
        SoundboardError::Platform(format!("{action} failed: {}", js_error_text(&err)))
    }
}

pub fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
