//! JavaScript bindings. The page owns rendering and timers; everything it needs
//! to draw a frame comes back from these calls.

use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::config::GameConfig;
use crate::data::chef_line;
use crate::game::{GameEvent, Phase, Session};
use crate::menu::SushiMenu;
use crate::performance_now;

/// Every accepted spelling of `reading`, canonical form first.
#[wasm_bindgen(js_name = generateVariants)]
pub fn generate_variants_js(reading: &str) -> Vec<String> {
    crate::romaji::generate_variants(reading).to_vec()
}

#[wasm_bindgen]
pub struct SushiGame {
    session: Session,
    chef_line: String,
    lines_shown: usize,
}

#[wasm_bindgen]
impl SushiGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SushiGame {
        Self::from_session(Session::new(GameConfig::default(), SushiMenu::builtin(), seed()))
    }

    pub fn start(&mut self) {
        let events = self.session.start(performance_now());
        self.absorb(&events);
    }

    /// Advances one animation frame. Returns `false` once the round is over.
    pub fn tick(&mut self, ts: f64) -> bool {
        let events = self.session.tick(ts);
        self.absorb(&events);
        self.session.phase() == Phase::Playing
    }

    /// Handles a `keydown`; only single `[a-zA-Z-]` keys are consumed.
    /// Returns `true` when a plate was captured.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        if self.session.phase() != Phase::Playing {
            return false;
        }
        let key = event.key();
        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return false;
        };
        if !(ch.is_ascii_alphabetic() || ch == '-') {
            return false;
        }
        event.prevent_default();
        self.key(ch.to_ascii_lowercase())
    }

    pub fn key(&mut self, ch: char) -> bool {
        let events = self.session.key(ch, performance_now());
        self.absorb(&events);
        events
            .iter()
            .any(|e| matches!(e, GameEvent::Captured { .. }))
    }

    pub fn second_elapsed(&mut self) {
        self.session.second_elapsed();
    }

    pub fn set_lane_width(&mut self, width: f64) {
        self.session.set_lane_width(width);
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.session.stats().score as f64
    }

    #[wasm_bindgen(getter)]
    pub fn combo(&self) -> u32 {
        self.session.stats().combo
    }

    #[wasm_bindgen(getter)]
    pub fn time_left(&self) -> u32 {
        self.session.time_left()
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        match self.session.phase() {
            Phase::Title => "title",
            Phase::Playing => "playing",
            Phase::Result => "result",
        }
        .to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn chef_emoji(&self) -> String {
        self.session.chef_emoji().to_string()
    }

    /// Latest thing the chef said.
    #[wasm_bindgen(getter)]
    pub fn chef_line(&self) -> String {
        self.chef_line.clone()
    }

    pub fn share_text(&self) -> String {
        self.session.summary().share_text()
    }
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
impl SushiGame {
    /// Game with a JSON config (missing fields keep defaults) and optional JSON menu.
    #[wasm_bindgen(js_name = withJson)]
    pub fn with_json(config: &str, menu: Option<String>) -> Result<SushiGame, JsValue> {
        let config = GameConfig::from_json(config).map_err(to_js)?;
        let menu = match menu {
            Some(json) => SushiMenu::from_json(&json).map_err(to_js)?,
            None => SushiMenu::builtin(),
        };
        Ok(Self::from_session(Session::new(config, menu, seed())))
    }

    /// Render snapshot of every plate on the belt.
    pub fn items_json(&self) -> Result<String, JsValue> {
        let views: Vec<_> = self.session.items().iter().map(|s| s.view()).collect();
        serde_json::to_string(&views).map_err(to_js)
    }

    pub fn summary_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.summary()).map_err(to_js)
    }
}

#[cfg(feature = "serde_json")]
fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

impl Default for SushiGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SushiGame {
    fn from_session(session: Session) -> Self {
        Self {
            session,
            chef_line: String::new(),
            lines_shown: 0,
        }
    }

    fn absorb(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Chef(trigger) = event {
                self.chef_line = chef_line(*trigger, self.lines_shown).to_string();
                self.lines_shown += 1;
            }
        }
    }
}

#[cfg(feature = "rng")]
fn seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            tracing::warn!(%err, "getrandom failed; seeding from the clock");
            performance_now().to_bits()
        }
    }
}

// Prototype randomness: the clock is good enough to vary rounds.
#[cfg(not(feature = "rng"))]
fn seed() -> u64 {
    performance_now().to_bits()
}
