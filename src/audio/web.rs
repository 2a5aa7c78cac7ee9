use futures::{FutureExt, future::LocalBoxFuture};
use js_sys::Uint8Array;
use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AudioBuffer, AudioContext, AudioContextState, GainNode};

use super::platform::{AudioPlatform, GainControl, OutputContext, PlatformState};
use crate::error::{SoundboardError, js_error_text};

/// Web Audio backed output. Contexts are created from a user gesture handler.
pub struct WebAudioPlatform;

impl AudioPlatform for WebAudioPlatform {
    type Context = WebOutputContext;

    fn create_context(&self) -> Result<WebOutputContext, SoundboardError> {
        let context =
            AudioContext::new().map_err(|e| SoundboardError::platform("create AudioContext", e))?;
        info!("AudioContext created ({} Hz)", context.sample_rate());
        Ok(WebOutputContext { context })
    }
}

pub struct WebOutputContext {
    context: AudioContext,
}

impl OutputContext for WebOutputContext {
    type Buffer = AudioBuffer;
    type Gain = WebGain;

    fn state(&self) -> PlatformState {
        match self.context.state() {
            AudioContextState::Suspended => PlatformState::Suspended,
            AudioContextState::Closed => PlatformState::Closed,
            _ => PlatformState::Running,
        }
    }

    fn resume(&self) -> Result<(), SoundboardError> {
        let promise = self
            .context
            .resume()
            .map_err(|e| SoundboardError::platform("resume AudioContext", e))?;
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!("AudioContext resume rejected: {}", js_error_text(&err));
            }
        });
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.context.current_time()
    }

    fn create_master_gain(&self, initial: f32) -> Result<WebGain, SoundboardError> {
        let node = self
            .context
            .create_gain()
            .map_err(|e| SoundboardError::platform("create GainNode", e))?;
        node.gain().set_value(initial);
        node.connect_with_audio_node(&self.context.destination())
            .map_err(|e| SoundboardError::platform("connect master gain", e))?;
        Ok(WebGain { node })
    }

    fn decode(&self, bytes: Vec<u8>) -> LocalBoxFuture<'static, Result<AudioBuffer, String>> {
        let array = Uint8Array::from(&bytes[..]);
        let started = self.context.decode_audio_data(&array.buffer());
        async move {
            let promise = started.map_err(|e| js_error_text(&e))?;
            let decoded = JsFuture::from(promise)
                .await
                .map_err(|e| js_error_text(&e))?;
            decoded
                .dyn_into::<AudioBuffer>()
                .map_err(|_| "decode result is not an AudioBuffer".to_string())
        }
        .boxed_local()
    }

    fn start_voice(&self, buffer: &AudioBuffer, gain: &WebGain) -> Result<(), SoundboardError> {
        let source = self
            .context
            .create_buffer_source()
            .map_err(|e| SoundboardError::platform("create AudioBufferSourceNode", e))?;
        source.set_buffer(Some(buffer));
        source
            .connect_with_audio_node(&gain.node)
            .map_err(|e| SoundboardError::platform("connect voice", e))?;
        source
            .start()
            .map_err(|e| SoundboardError::platform("start voice", e))
    }
}

pub struct WebGain {
    node: GainNode,
}

impl GainControl for WebGain {
    fn set_target(
        &self,
        value: f32,
        start_time: f64,
        time_constant: f64,
    ) -> Result<(), SoundboardError> {
        self.node
            .gain()
            .set_target_at_time(value, start_time, time_constant)
            .map(|_| ())
            .map_err(|e| SoundboardError::platform("ramp master gain", e))
    }
}
