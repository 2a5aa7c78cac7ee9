use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures::task::{LocalSpawn, LocalSpawnExt};
use log::{debug, error, info, warn};

use super::{
    cache::DecodedBufferCache,
    platform::{AssetTransport, AudioPlatform, GainControl, OutputContext, PlatformState},
};
use crate::{config::SoundboardConfig, error::SoundboardError, net::asset_path};

pub type BufferOf<P> = <<P as AudioPlatform>::Context as OutputContext>::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextPhase {
    Uninitialized,
    Active,
    Suspended,
}

/// The live output path. Context and master gain are created together.
struct ActiveOutput<C: OutputContext> {
    context: C,
    master_gain: C::Gain,
}

pub struct PlaybackEngine<P: AudioPlatform, T: AssetTransport> {
    platform: P,
    transport: T,
    spawner: Box<dyn LocalSpawn>,
    assets_root: String,
    ramp_seconds: f64,
    output: RefCell<Option<ActiveOutput<P::Context>>>,
    volume: Cell<f32>,
    cache: RefCell<DecodedBufferCache<BufferOf<P>>>,
    on_activated: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl<P, T> PlaybackEngine<P, T>
where
    P: AudioPlatform + 'static,
    T: AssetTransport + 'static,
{
    pub fn new(
        platform: P,
        transport: T,
        spawner: impl LocalSpawn + 'static,
        config: &SoundboardConfig,
    ) -> Self {
        PlaybackEngine {
            platform,
            transport,
            spawner: Box::new(spawner),
            assets_root: config.assets_root.clone(),
            ramp_seconds: config.volume_ramp_seconds,
            output: RefCell::new(None),
            volume: Cell::new(config.initial_volume),
            cache: RefCell::new(DecodedBufferCache::new()),
            on_activated: RefCell::new(None),
        }
    }

    /// Registers the callback fired once, when the output context is first created.
    pub fn set_on_activated(&self, callback: impl FnOnce() + 'static) {
        *self.on_activated.borrow_mut() = Some(Box::new(callback));
    }

    pub fn phase(&self) -> ContextPhase {
        match self.output.borrow().as_ref() {
            None => ContextPhase::Uninitialized,
            Some(active) => match active.context.state() {
                PlatformState::Suspended => ContextPhase::Suspended,
                _ => ContextPhase::Active,
            },
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume.get()
    }

    pub fn is_cached(&self, id: &str) -> bool {
        self.cache.borrow().contains(id)
    }

    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn ensure_active(&self) {
        let created = {
            let mut output = self.output.borrow_mut();
            if output.is_none() {
                match self.open_output() {
                    Ok(active) => {
                        *output = Some(active);
                        true
                    }
                    Err(err) => {
                        error!("Could not start audio output: {}", err);
                        return;
                    }
                }
            } else {
                false
            }
        };

        if let Some(active) = self.output.borrow().as_ref() {
            if active.context.state() == PlatformState::Suspended {
                debug!("Resuming suspended audio context");
                if let Err(err) = active.context.resume() {
                    warn!("Could not resume audio context: {}", err);
                }
            }
        }

        if created {
            info!("Audio enabled");
            let callback = self.on_activated.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
        }
    }

    fn open_output(&self) -> Result<ActiveOutput<P::Context>, SoundboardError> {
        let context = self.platform.create_context()?;
        let master_gain = context.create_master_gain(self.volume.get())?;
        Ok(ActiveOutput {
            context,
            master_gain,
        })
    }

    pub fn set_volume(&self, volume: f32) {
        self.volume.set(volume);
        if let Some(active) = self.output.borrow().as_ref() {
            let now = active.context.current_time();
            if let Err(err) = active
                .master_gain
                .set_target(volume, now, self.ramp_seconds)
            {
                warn!("Could not ramp master gain to {}: {}", volume, err);
            }
        }
    }

    pub async fn load_buffer(&self, id: &str) -> Result<BufferOf<P>, SoundboardError> {
        if let Some(buffer) = self.cache.borrow().get(id) {
            return Ok(buffer);
        }
        if self.output.borrow().is_none() {
            return Err(SoundboardError::NotActivated);
        }

        let path = asset_path(&self.assets_root, id);
        debug!("Fetching {} from {}", id, path);
        let response = self
            .transport
            .fetch(&path)
            .await
            .map_err(|reason| SoundboardError::Transport {
                id: id.to_string(),
                reason,
            })?;
        if !response.is_success() {
            return Err(SoundboardError::Fetch {
                id: id.to_string(),
                status: response.status,
            });
        }

        let decoding = match self.output.borrow().as_ref() {
            Some(active) => active.context.decode(response.body),
            None => return Err(SoundboardError::NotActivated),
        };
        let buffer = decoding.await.map_err(|reason| SoundboardError::Decode {
            id: id.to_string(),
            reason,
        })?;

        debug!("Decoded {}", id);
        self.cache.borrow_mut().insert(id, buffer.clone());
        Ok(buffer)
    }

    /// Fire-and-forget: activates output now, then loads and starts the voice in a task.
    pub fn play(self: &Rc<Self>, id: &str) {
        self.ensure_active();

        let engine = Rc::clone(self);
        let id = id.to_string();
        let task = async move {
            if let Err(err) = engine.start_voice(&id).await {
                error!("Could not play {}: {}", id, err);
            }
        };
        if let Err(err) = self.spawner.spawn_local(task) {
            error!("Could not schedule playback: {:?}", err);
        }
    }

    async fn start_voice(&self, id: &str) -> Result<(), SoundboardError> {
        let buffer = self.load_buffer(id).await?;
        let output = self.output.borrow();
        let active = output.as_ref().ok_or(SoundboardError::NotActivated)?;
        active.context.start_voice(&buffer, &active.master_gain)
    }
}
