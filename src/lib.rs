pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod net;
mod soundboard;
mod ui;
pub mod utils;

use soundboard::reserve_engine;
use utils::set_panic_hook;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn ensure_active() {
    reserve_engine(|engine| engine.ensure_active());
}

#[wasm_bindgen]
pub fn set_volume(volume: f64) {
    reserve_engine(|engine| engine.set_volume(volume as f32));
}

#[wasm_bindgen]
pub fn play(sound: String) {
    reserve_engine(|engine| engine.play(&sound));
}

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    soundboard::boot();
}
