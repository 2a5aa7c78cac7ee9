use futures::future::LocalBoxFuture;

use crate::error::SoundboardError;

/// State of the output context as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformState {
    Running,
    Suspended,
    Closed,
}

/// Creates the output context. Called at most once per engine.
pub trait AudioPlatform {
    type Context: OutputContext;

    fn create_context(&self) -> Result<Self::Context, SoundboardError>;
}

pub trait OutputContext {
    type Buffer: Clone + 'static;
    type Gain: GainControl;

    fn state(&self) -> PlatformState;

    /// Asks the platform to resume a suspended context. Completion is not awaited.
    fn resume(&self) -> Result<(), SoundboardError>;

    /// Context clock in seconds, used as the start of gain ramps.
    fn current_time(&self) -> f64;

    /// Creates a gain stage at `initial` and connects it to the output destination.
    fn create_master_gain(&self, initial: f32) -> Result<Self::Gain, SoundboardError>;

    /// Decodes encoded audio bytes. Errors carry the platform's reason text.
    fn decode(&self, bytes: Vec<u8>) -> LocalBoxFuture<'static, Result<Self::Buffer, String>>;

    /// Creates a one-shot voice for `buffer`, routes it into `gain` and starts it now.
    fn start_voice(&self, buffer: &Self::Buffer, gain: &Self::Gain)
    -> Result<(), SoundboardError>;
}

pub trait GainControl {
    /// Exponential approach toward `value` starting at `start_time`.
    fn set_target(
        &self,
        value: f32,
        start_time: f64,
        time_constant: f64,
    ) -> Result<(), SoundboardError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl AssetResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches raw asset bytes. `Err` means the request never produced a response.
pub trait AssetTransport {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<AssetResponse, String>>;
}
