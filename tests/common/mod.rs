#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use futures::{
    FutureExt,
    channel::oneshot,
    executor::LocalPool,
    future::LocalBoxFuture,
};
use soundboard::{
    audio::{
        AssetResponse, AssetTransport, AudioPlatform, GainControl, OutputContext, PlatformState,
        PlaybackEngine,
    },
    config::SoundboardConfig,
    error::SoundboardError,
};

#[derive(Default)]
pub struct AudioLog {
    pub contexts_created: Cell<usize>,
    pub gains: RefCell<Vec<MockGain>>,
    pub resumes: Cell<usize>,
    pub decodes: Cell<usize>,
    pub voices: RefCell<Vec<String>>,
    pub suspended: Cell<bool>,
    pub fail_create: Cell<bool>,
    pub clock: Cell<f64>,
}

#[derive(Default)]
pub struct GainLog {
    pub initial: Cell<f32>,
    pub ramps: RefCell<Vec<(f32, f64, f64)>>,
}

#[derive(Clone)]
pub struct MockGain(pub Rc<GainLog>);

impl GainControl for MockGain {
    fn set_target(
        &self,
        value: f32,
        start_time: f64,
        time_constant: f64,
    ) -> Result<(), SoundboardError> {
        self.0
            .ramps
            .borrow_mut()
            .push((value, start_time, time_constant));
        Ok(())
    }
}

/// Decoded "audio": the asset text.
#[derive(Clone, Debug, PartialEq)]
pub struct MockBuffer(pub String);

pub struct MockPlatform(pub Rc<AudioLog>);

impl AudioPlatform for MockPlatform {
    type Context = MockContext;

    fn create_context(&self) -> Result<MockContext, SoundboardError> {
        if self.0.fail_create.get() {
            return Err(SoundboardError::Platform("no output device".to_string()));
        }
        self.0.contexts_created.set(self.0.contexts_created.get() + 1);
        Ok(MockContext(self.0.clone()))
    }
}

pub struct MockContext(Rc<AudioLog>);

impl OutputContext for MockContext {
    type Buffer = MockBuffer;
    type Gain = MockGain;

    fn state(&self) -> PlatformState {
        if self.0.suspended.get() {
            PlatformState::Suspended
        } else {
            PlatformState::Running
        }
    }

    fn resume(&self) -> Result<(), SoundboardError> {
        self.0.resumes.set(self.0.resumes.get() + 1);
        self.0.suspended.set(false);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.0.clock.get()
    }

    fn create_master_gain(&self, initial: f32) -> Result<MockGain, SoundboardError> {
        let gain = MockGain(Rc::new(GainLog::default()));
        gain.0.initial.set(initial);
        self.0.gains.borrow_mut().push(gain.clone());
        Ok(gain)
    }

    fn decode(&self, bytes: Vec<u8>) -> LocalBoxFuture<'static, Result<MockBuffer, String>> {
        self.0.decodes.set(self.0.decodes.get() + 1);
        let result = if bytes.starts_with(b"RIFF") {
            Ok(MockBuffer(String::from_utf8_lossy(&bytes).into_owned()))
        } else {
            Err("unsupported format".to_string())
        };
        async move { result }.boxed_local()
    }

    fn start_voice(&self, buffer: &MockBuffer, gain: &MockGain) -> Result<(), SoundboardError> {
        let routed = self
            .0
            .gains
            .borrow()
            .iter()
            .any(|g| Rc::ptr_eq(&g.0, &gain.0));
        assert!(routed, "voice must route through the master gain");
        self.0.voices.borrow_mut().push(buffer.0.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct NetLog {
    pub assets: RefCell<HashMap<String, Vec<u8>>>,
    pub requests: RefCell<Vec<String>>,
    pub offline: Cell<bool>,
    /// When set, every fetch waits until its gate is released.
    pub gated: Cell<bool>,
    pub gates: RefCell<Vec<Option<oneshot::Sender<()>>>>,
}

impl NetLog {
    pub fn add_asset(&self, path: &str, body: &[u8]) {
        self.assets
            .borrow_mut()
            .insert(path.to_string(), body.to_vec());
    }

    pub fn release(&self, index: usize) {
        if let Some(gate) = self.gates.borrow_mut()[index].take() {
            let _ = gate.send(());
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

pub struct MockTransport(pub Rc<NetLog>);

impl AssetTransport for MockTransport {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<AssetResponse, String>> {
        let net = &self.0;
        net.requests.borrow_mut().push(path.to_string());

        let result = if net.offline.get() {
            Err("network unreachable".to_string())
        } else {
            Ok(match net.assets.borrow().get(path) {
                Some(body) => AssetResponse {
                    status: 200,
                    body: body.clone(),
                },
                None => AssetResponse {
                    status: 404,
                    body: Vec::new(),
                },
            })
        };

        let gate = if net.gated.get() {
            let (tx, rx) = oneshot::channel();
            net.gates.borrow_mut().push(Some(tx));
            Some(rx)
        } else {
            None
        };

        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        }
        .boxed_local()
    }
}

pub type MockEngine = PlaybackEngine<MockPlatform, MockTransport>;

pub struct Harness {
    pub pool: LocalPool,
    pub engine: Rc<MockEngine>,
    pub audio: Rc<AudioLog>,
    pub net: Rc<NetLog>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(SoundboardConfig::default())
    }

    pub fn with_config(config: SoundboardConfig) -> Self {
        let pool = LocalPool::new();
        let audio = Rc::new(AudioLog::default());
        let net = Rc::new(NetLog::default());
        net.add_asset("./sounds/beep.wav", b"RIFF beep");
        net.add_asset("./sounds/ding.wav", b"RIFF ding");
        net.add_asset("./sounds/pop.wav", b"RIFF pop");

        let engine = Rc::new(PlaybackEngine::new(
            MockPlatform(audio.clone()),
            MockTransport(net.clone()),
            pool.spawner(),
            &config,
        ));
        Harness {
            pool,
            engine,
            audio,
            net,
        }
    }

    pub fn load(&mut self, id: &str) -> Result<MockBuffer, SoundboardError> {
        let engine = self.engine.clone();
        self.pool.run_until(async move { engine.load_buffer(id).await })
    }

    pub fn voices(&self) -> Vec<String> {
        self.audio.voices.borrow().clone()
    }
}
