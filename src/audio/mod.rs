pub mod cache;
pub mod engine;
pub mod platform;
pub mod web;

pub use engine::{ContextPhase, PlaybackEngine};
pub use platform::{
    AssetResponse, AssetTransport, AudioPlatform, GainControl, OutputContext, PlatformState,
};

use crate::net::fetch::HttpTransport;

pub type WebEngine = PlaybackEngine<web::WebAudioPlatform, HttpTransport>;
