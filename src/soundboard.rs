use std::{cell::RefCell, rc::Rc};

use log::{error, warn};

use crate::{
    audio::{PlaybackEngine, WebEngine, web::WebAudioPlatform},
    config::SoundboardConfig,
    net::fetch::HttpTransport,
    ui,
    utils::BrowserSpawner,
};

thread_local! {
    static ENGINE: RefCell<Option<Rc<WebEngine>>> = const { RefCell::new(None) };
}

/// Runs `callback` with the page's engine. Returns `None` before `boot`.
pub fn reserve_engine<T, F>(callback: F) -> Option<T>
where
    F: FnOnce(&Rc<WebEngine>) -> T,
{
    let engine = ENGINE.with(|slot| slot.borrow().clone());
    match engine {
        Some(engine) => Some(callback(&engine)),
        None => {
            warn!("Soundboard is not running");
            None
        }
    }
}

pub fn boot() {
    let loaded = SoundboardConfig::from_window();
    let config = loaded.as_ref().ok().cloned().unwrap_or_default();
    console_log::init_with_level(config.log_level()).unwrap_or(());
    if let Err(err) = &loaded {
        warn!("Ignoring soundboard config: {}", err);
    }

    let engine = Rc::new(PlaybackEngine::new(
        WebAudioPlatform,
        HttpTransport,
        BrowserSpawner,
        &config,
    ));
    ENGINE.with(|slot| *slot.borrow_mut() = Some(engine.clone()));

    if let Err(err) = ui::attach(engine, config) {
        error!("Soundboard failed to start: {}", err);
    }
}
