pub mod tiles;

use std::rc::Rc;

use log::{debug, error, warn};
use wasm_bindgen::{JsCast, prelude::Closure};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, KeyboardEvent};

use crate::{
    audio::WebEngine,
    catalog::{filter_catalog, hotkey_target, manifest::resolve_catalog},
    config::SoundboardConfig,
    error::SoundboardError,
    net::fetch::HttpManifest,
};
use tiles::{render_tiles, tile_sound};

const GRID_ID: &str = "grid";
const UNLOCK_BUTTON_ID: &str = "unlockBtn";
const UNLOCK_MESSAGE_ID: &str = "unlockMsg";
const VOLUME_ID: &str = "volume";
const FILTER_ID: &str = "filter";

/// The page elements the soundboard binds to.
struct Page {
    document: Document,
    grid: Element,
    unlock_button: Element,
    unlock_message: Element,
    volume: HtmlInputElement,
    filter: HtmlInputElement,
}

impl Page {
    fn locate() -> Result<Page, SoundboardError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SoundboardError::Platform("no document".to_string()))?;
        let element = |id: &str| -> Result<Element, SoundboardError> {
            document
                .get_element_by_id(id)
                .ok_or_else(|| SoundboardError::Platform(format!("missing element #{id}")))
        };
        let input = |id: &str| -> Result<HtmlInputElement, SoundboardError> {
            element(id)?.dyn_into::<HtmlInputElement>().map_err(|_| {
                SoundboardError::Platform(format!("element #{id} is not an input"))
            })
        };

        Ok(Page {
            grid: element(GRID_ID)?,
            unlock_button: element(UNLOCK_BUTTON_ID)?,
            unlock_message: element(UNLOCK_MESSAGE_ID)?,
            volume: input(VOLUME_ID)?,
            filter: input(FILTER_ID)?,
            document,
        })
    }
}

fn listen(
    target: &EventTarget,
    event_type: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), SoundboardError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
        .map_err(|e| SoundboardError::platform("add event listener", e))?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Binds the engine to the page, then loads the catalog and renders it.
pub fn attach(engine: Rc<WebEngine>, config: SoundboardConfig) -> Result<(), SoundboardError> {
    let page = Rc::new(Page::locate()?);

    {
        let message = page.unlock_message.clone();
        engine.set_on_activated(move || message.set_text_content(Some("Audio enabled")));
    }

    match page.volume.value().parse::<f32>() {
        Ok(volume) => engine.set_volume(volume),
        Err(_) => debug!("Volume slider has no value, keeping {}", engine.volume()),
    }

    {
        let engine = engine.clone();
        listen(&page.unlock_button, "click", move |_| engine.ensure_active())?;
    }
    {
        let engine = engine.clone();
        let slider = page.volume.clone();
        listen(&page.volume, "input", move |_| {
            match slider.value().parse::<f32>() {
                Ok(volume) => engine.set_volume(volume),
                Err(_) => warn!("Ignoring volume {:?}", slider.value()),
            }
        })?;
    }

    spawn_local(async move {
        let manifest = HttpManifest::new(&config.manifest_url);
        let files = Rc::new(resolve_catalog(&manifest, &config.fallback_sounds).await);
        if let Err(err) = mount_catalog(&page, engine, files, config.hotkeys()) {
            error!("Could not render soundboard: {}", err);
        }
    });
    Ok(())
}

fn mount_catalog(
    page: &Rc<Page>,
    engine: Rc<WebEngine>,
    files: Rc<Vec<String>>,
    hotkeys: usize,
) -> Result<(), SoundboardError> {
    let all: Vec<&str> = files.iter().map(String::as_str).collect();
    render_tiles(&page.document, &page.grid, &all, hotkeys)?;

    // Tiles come and go with the filter, so pointer events are delegated to the grid.
    {
        let engine = engine.clone();
        listen(&page.grid, "pointerdown", move |event| {
            if tile_sound(&event).is_some() {
                engine.ensure_active();
            }
        })?;
    }
    {
        let engine = engine.clone();
        listen(&page.grid, "click", move |event| {
            if let Some(sound) = tile_sound(&event) {
                engine.play(&sound);
            }
        })?;
    }

    if let Some(body) = page.document.body() {
        let engine = engine.clone();
        let files = files.clone();
        listen(&body, "keydown", move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(sound) = hotkey_target(&files, &key_event.key(), hotkeys) {
                event.prevent_default();
                engine.play(sound);
            }
        })?;
    }

    {
        let page_ref = page.clone();
        listen(&page.filter, "input", move |_| {
            let visible = filter_catalog(&files, &page_ref.filter.value());
            if let Err(err) = render_tiles(&page_ref.document, &page_ref.grid, &visible, hotkeys) {
                error!("Could not render filtered sounds: {}", err);
            }
        })?;
    }
    Ok(())
}
