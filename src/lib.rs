//! Quantum Sushi core crate.
//!
//! Romaji input engine for a conveyor-belt typing game: every kana reading is
//! expanded into all the romaji spellings a player may reasonably type
//! (`shi`/`si`/`ci`, `kka`/`xtsuka`, `n`/`nn`/`n'`, ...), and typed keys are
//! matched against all of them at once. The game session and the wasm
//! bindings on top of it are plain state machines driven by the page.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod data;
pub mod error;
pub mod game;
pub mod matcher;
pub mod menu;
pub mod rng;
pub mod romaji;
mod wasm;

pub use config::GameConfig;
pub use error::{MenuError, ReadingError};
pub use game::{GameEvent, Phase, Session, Summary};
pub use matcher::{Feed, Highlight, TypingTarget};
pub use menu::{SushiDef, SushiGroup, SushiMenu};
pub use romaji::{
    MAX_TOKENIZATIONS, MAX_VARIANTS, MoraToken, VariantCache, generate_variants, tokenize,
    try_generate_variants,
};
pub use wasm::SushiGame;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Milliseconds from `performance.now()`, or 0 outside a browser window.
pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
