use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::{
    catalog::{hotkey_hint, label_for},
    error::SoundboardError,
};

pub const TILE_SELECTOR: &str = "button.tile";
const SOUND_ATTRIBUTE: &str = "data-sound";

fn dom_error(action: &str) -> impl Fn(wasm_bindgen::JsValue) -> SoundboardError + '_ {
    move |e| SoundboardError::platform(action, e)
}

/// Replaces the grid contents with one tile per sound.
pub fn render_tiles(
    document: &Document,
    grid: &Element,
    files: &[&str],
    hotkeys: usize,
) -> Result<(), SoundboardError> {
    grid.set_inner_html("");
    for (index, file) in files.iter().enumerate() {
        let tile = create_tile(document, file, &hotkey_hint(index, hotkeys))?;
        grid.append_child(&tile).map_err(dom_error("append tile"))?;
    }
    Ok(())
}

fn create_tile(document: &Document, file: &str, hint: &str) -> Result<Element, SoundboardError> {
    let label = label_for(file);

    let tile = document
        .create_element("button")
        .map_err(dom_error("create tile"))?;
    tile.set_class_name("tile");
    tile.set_attribute("role", "listitem")
        .map_err(dom_error("set tile role"))?;
    tile.set_attribute("aria-label", &format!("Play {label}"))
        .map_err(dom_error("set tile label"))?;
    tile.set_attribute(SOUND_ATTRIBUTE, file)
        .map_err(dom_error("set tile sound"))?;

    let kbd = document
        .create_element("span")
        .map_err(dom_error("create key hint"))?;
    kbd.set_class_name("kbd");
    kbd.set_text_content(Some(hint));

    let text = document
        .create_element("span")
        .map_err(dom_error("create label"))?;
    text.set_class_name("label");
    text.set_text_content(Some(&label));

    tile.append_child(&kbd).map_err(dom_error("append key hint"))?;
    tile.append_child(&text).map_err(dom_error("append label"))?;
    Ok(tile)
}

/// Sound id of the tile an event originated in, if any.
pub fn tile_sound(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let tile = target.closest(TILE_SELECTOR).ok()??;
    tile.get_attribute(SOUND_ATTRIBUTE)
}
