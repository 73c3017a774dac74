//! One round of the conveyor-belt game, driven by host timestamps.
//!
//! The session never reads a clock: the host calls [`Session::tick`] once per
//! animation frame, [`Session::second_elapsed`] once per second and
//! [`Session::key`] for every accepted keystroke, passing milliseconds from
//! any monotonic source.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::debug;

use crate::config::GameConfig;
use crate::data::{ChefTrigger, Rank, rank_for};
use crate::matcher::{Feed, Highlight, TypingTarget};
use crate::menu::{SushiDef, SushiMenu};
use crate::rng::SpawnRng;
use crate::romaji::VariantCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Phase {
    Title,
    Playing,
    Result,
}

/// Something the host may want to animate or announce.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned { id: u32, lane: usize },
    Captured { id: u32, points: u64, simultaneous: usize },
    Missed { id: u32 },
    /// A keystroke advanced nothing while plates were on the belt.
    Rejected,
    Chef(ChefTrigger),
    Ended,
}

/// A plate on the belt.
#[derive(Debug, Clone)]
pub struct LiveSushi {
    id: u32,
    def: SushiDef,
    target: TypingTarget,
    lane: usize,
    x: f64,
    y: f64,
    captured_at: Option<f64>,
}

impl LiveSushi {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn def(&self) -> &SushiDef {
        &self.def
    }

    pub fn target(&self) -> &TypingTarget {
        &self.target
    }

    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_captured(&self) -> bool {
        self.captured_at.is_some()
    }

    pub fn view(&self) -> SushiView<'_> {
        SushiView {
            id: self.id,
            name: &self.def.name,
            reading: &self.def.reading,
            typed: self.target.typed_prefix(),
            remaining: self.target.remaining_suffix(),
            lane: self.lane,
            x: self.x,
            y: self.y,
            highlight: self.target.highlight(),
            captured: self.is_captured(),
        }
    }
}

/// Render snapshot of a [`LiveSushi`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SushiView<'a> {
    pub id: u32,
    pub name: &'a str,
    pub reading: &'a str,
    pub typed: &'a str,
    pub remaining: &'a str,
    pub lane: usize,
    pub x: f64,
    pub y: f64,
    pub highlight: Highlight,
    pub captured: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stats {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub max_simultaneous: usize,
    pub plates: u32,
}

/// Result screen data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub score: u64,
    pub plates: u32,
    pub max_combo: u32,
    pub max_simultaneous: usize,
    pub rank: &'static Rank,
    pub chef_emoji: String,
}

impl Summary {
    /// Text for the share button.
    pub fn share_text(&self) -> String {
        format!(
            "🍣 タイピング回転寿司 量子マグロ亭\n\n\
             {} {}\n\
             スコア: {}\n\
             取った皿: {}皿\n\
             最大コンボ: {}\n\
             最大同時取り: {}皿！\n\n\
             {} 大将「{}」\n\n\
             #量子マグロ亭",
            self.rank.emoji,
            self.rank.name,
            group_thousands(self.score),
            self.plates,
            self.max_combo,
            self.max_simultaneous,
            self.chef_emoji,
            self.rank.comment,
        )
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    menu: SushiMenu,
    cache: Arc<VariantCache>,
    rng: SpawnRng,
    phase: Phase,
    stats: Stats,
    time_left: u32,
    start_ms: f64,
    next_spawn_ms: f64,
    last_key_ms: Option<f64>,
    last_capture_ms: f64,
    idle_fired: bool,
    last10_fired: bool,
    next_id: u32,
    live: Vec<LiveSushi>,
    random_pool: VecDeque<SushiDef>,
    group_order: VecDeque<usize>,
    pending_group: VecDeque<SushiDef>,
    next_group_secs: f64,
    last_lane: Option<usize>,
    lane_width: f64,
    chef_emoji: usize,
}

impl Session {
    pub fn new(config: GameConfig, menu: SushiMenu, seed: u64) -> Self {
        Self::with_cache(config, menu, Arc::new(VariantCache::new()), seed)
    }

    /// Session sharing `cache` with other sessions.
    pub fn with_cache(
        config: GameConfig,
        menu: SushiMenu,
        cache: Arc<VariantCache>,
        seed: u64,
    ) -> Self {
        let time_left = config.initial_time;
        let lane_width = config.default_lane_width;
        let next_group_secs = config.group_period_secs;
        Self {
            config,
            menu,
            cache,
            rng: SpawnRng::new(seed),
            phase: Phase::Title,
            stats: Stats::default(),
            time_left,
            start_ms: 0.0,
            next_spawn_ms: 0.0,
            last_key_ms: None,
            last_capture_ms: 0.0,
            idle_fired: false,
            last10_fired: false,
            next_id: 0,
            live: Vec::new(),
            random_pool: VecDeque::new(),
            group_order: VecDeque::new(),
            pending_group: VecDeque::new(),
            next_group_secs,
            last_lane: None,
            lane_width,
            chef_emoji: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn menu(&self) -> &SushiMenu {
        &self.menu
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn items(&self) -> &[LiveSushi] {
        &self.live
    }

    pub fn chef_emoji(&self) -> &str {
        self.config
            .chef_emojis
            .get(self.chef_emoji)
            .map_or("", String::as_str)
    }

    /// Visible belt width in px; spawn positions and lane spacing follow it.
    pub fn set_lane_width(&mut self, width: f64) {
        if width > 0.0 {
            self.lane_width = width;
        }
    }

    /// Resets everything and begins a round at `now_ms`.
    pub fn start(&mut self, now_ms: f64) -> Vec<GameEvent> {
        self.phase = Phase::Playing;
        self.stats = Stats::default();
        self.time_left = self.config.initial_time;
        self.start_ms = now_ms;
        self.next_spawn_ms = now_ms;
        self.last_key_ms = None;
        self.last_capture_ms = 0.0;
        self.idle_fired = false;
        self.last10_fired = false;
        self.next_id = 0;
        self.live.clear();
        self.last_lane = None;
        self.chef_emoji = self.rng.index(self.config.chef_emojis.len());

        let mut pool = self.menu.random.clone();
        self.rng.shuffle(&mut pool);
        self.random_pool = pool.into();

        let mut order: Vec<usize> = (0..self.menu.groups.len()).collect();
        self.rng.shuffle(&mut order);
        self.group_order = order.into();
        self.pending_group.clear();
        self.next_group_secs = self.config.group_period_secs;

        debug!(
            plates = self.random_pool.len(),
            groups = self.group_order.len(),
            "round started"
        );
        vec![GameEvent::Chef(ChefTrigger::Start)]
    }

    /// Counts the round clock down by one second.
    pub fn second_elapsed(&mut self) {
        if self.phase == Phase::Playing {
            self.time_left = self.time_left.saturating_sub(1);
        }
    }

    /// Advances the belt to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }

        let elapsed = (now_ms - self.start_ms) / 1000.0;
        self.maybe_start_next_group(elapsed);
        let speed = self.config.speed_at(elapsed);

        let despawn_x = self.config.despawn_x;
        let linger = self.config.capture_linger_ms;
        let mut missed = Vec::new();
        self.live.retain_mut(|s| match s.captured_at {
            Some(at) => now_ms - at < linger,
            None => {
                s.x -= speed;
                if s.x < despawn_x {
                    missed.push(s.id);
                    false
                } else {
                    true
                }
            }
        });
        for id in missed {
            debug!(id, "plate missed");
            self.stats.combo = 0;
            events.push(GameEvent::Missed { id });
            events.push(GameEvent::Chef(ChefTrigger::Missed));
        }

        self.maybe_spawn(now_ms, elapsed, &mut events);

        let exhausted = self.pending_group.is_empty()
            && self.random_pool.is_empty()
            && self.group_order.is_empty();
        if self.live.is_empty() && (exhausted || self.time_left == 0) {
            self.phase = Phase::Result;
            debug!(score = self.stats.score, exhausted, "round over");
            events.push(GameEvent::Ended);
            return events;
        }

        if let Some(last_key) = self.last_key_ms {
            let quiet = self.config.idle_after_ms;
            if !self.idle_fired && now_ms - last_key > quiet && now_ms - self.last_capture_ms > quiet
            {
                self.idle_fired = true;
                events.push(GameEvent::Chef(ChefTrigger::Idle));
            }
        }

        if self.time_left <= 10 && !self.last10_fired {
            self.last10_fired = true;
            events.push(GameEvent::Chef(ChefTrigger::Last10));
        }
        events
    }

    /// Feeds one typed character to every plate on the belt.
    pub fn key(&mut self, ch: char, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }
        self.last_key_ms = Some(now_ms);
        self.idle_fired = false;

        let mut any_match = false;
        let mut captured = Vec::new();
        for (idx, s) in self.live.iter_mut().enumerate() {
            if s.captured_at.is_some() {
                continue;
            }
            match s.target.feed(ch) {
                Feed::Rejected => {}
                Feed::Advanced => any_match = true,
                Feed::Captured { .. } => {
                    any_match = true;
                    s.captured_at = Some(now_ms);
                    captured.push(idx);
                }
            }
        }

        if !any_match && !self.live.is_empty() {
            events.push(GameEvent::Rejected);
        }
        if captured.is_empty() {
            return events;
        }

        let simultaneous = captured.len();
        self.stats.max_simultaneous = self.stats.max_simultaneous.max(simultaneous);
        let simul = self.config.simultaneous_multiplier(simultaneous);
        for &idx in &captured {
            let s = &self.live[idx];
            self.stats.combo += 1;
            self.stats.max_combo = self.stats.max_combo.max(self.stats.combo);
            self.stats.plates += 1;

            let base = f64::from(self.config.base_points) + s.def.reading.chars().count() as f64;
            let combo_mult = 1.0 + f64::from(self.stats.combo) * self.config.combo_multiplier_rate;
            let points = (base * combo_mult * simul).round() as u64;
            self.stats.score += points;
            debug!(id = s.id, reading = %s.def.reading, points, simultaneous, "plate captured");
            events.push(GameEvent::Captured {
                id: s.id,
                points,
                simultaneous,
            });
        }
        self.last_capture_ms = now_ms;

        let trigger = match simultaneous {
            4.. => ChefTrigger::Simul4,
            3 => ChefTrigger::Simul3,
            2 => ChefTrigger::Simul2,
            _ => {
                let len = self.live[captured[0]].def.reading.chars().count();
                if len >= self.config.long_reading_threshold {
                    ChefTrigger::LongComplete
                } else {
                    ChefTrigger::Capture1
                }
            }
        };
        events.push(GameEvent::Chef(trigger));
        match self.stats.combo {
            10 => events.push(GameEvent::Chef(ChefTrigger::Combo10)),
            5 => events.push(GameEvent::Chef(ChefTrigger::Combo5)),
            _ => {}
        }
        events
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.stats.score,
            plates: self.stats.plates,
            max_combo: self.stats.max_combo,
            max_simultaneous: self.stats.max_simultaneous,
            rank: rank_for(self.stats.score),
            chef_emoji: self.chef_emoji().to_string(),
        }
    }

    /// Debug listing of what is left to serve.
    pub fn remaining_readings(&self) -> String {
        let mut out = String::new();
        for def in self.pending_group.iter().chain(&self.random_pool) {
            let _ = write!(out, "{} ", def.reading);
        }
        out.trim_end().to_string()
    }

    fn maybe_start_next_group(&mut self, elapsed: f64) {
        if elapsed < self.config.group_period_secs || elapsed < self.next_group_secs {
            return;
        }
        if !self.pending_group.is_empty() {
            return;
        }
        let Some(gi) = self.group_order.pop_front() else {
            return;
        };
        if let Some(group) = self.menu.groups.get(gi) {
            debug!(group = %group.id, "group started");
            self.pending_group = group.items.iter().cloned().collect();
        }
        self.next_group_secs += self.config.group_period_secs;
    }

    fn next_def(&mut self) -> Option<SushiDef> {
        self.pending_group
            .pop_front()
            .or_else(|| self.random_pool.pop_front())
    }

    fn lane_available(&self, lane: usize) -> bool {
        let right_most = self
            .live
            .iter()
            .filter(|s| s.captured_at.is_none() && s.lane == lane)
            .map(|s| s.x)
            .fold(None, |max: Option<f64>, x| Some(max.map_or(x, |m| m.max(x))));
        match right_most {
            None => true,
            Some(x) => x < self.lane_width - self.config.min_spawn_distance,
        }
    }

    fn maybe_spawn(&mut self, now_ms: f64, elapsed: f64, events: &mut Vec<GameEvent>) {
        let live_count = self.live.iter().filter(|s| s.captured_at.is_none()).count();
        let immediate = live_count <= self.config.immediate_spawn_threshold;
        let has_readings = !self.pending_group.is_empty() || !self.random_pool.is_empty();
        if self.time_left == 0
            || !has_readings
            || live_count >= self.config.max_live_sushi
            || !(now_ms >= self.next_spawn_ms || immediate)
        {
            return;
        }

        let available: Vec<usize> = (0..self.config.lane_y_positions.len())
            .filter(|&lane| self.lane_available(lane))
            .collect();
        if available.is_empty() {
            return;
        }
        let others: Vec<usize> = available
            .iter()
            .copied()
            .filter(|&l| Some(l) != self.last_lane)
            .collect();
        let choices = if others.is_empty() { &available } else { &others };
        let lane = choices[self.rng.index(choices.len())];

        if let Some(def) = self.next_def() {
            let id = self.spawn(def, lane);
            events.push(GameEvent::Spawned { id, lane });
        }
        self.last_lane = Some(lane);

        let progress = (elapsed / f64::from(self.config.initial_time)).clamp(0.0, 1.0);
        let base = self.config.spawn_interval_base
            - (self.config.spawn_interval_base - self.config.spawn_interval_min) * progress;
        let random = self.config.spawn_interval_random * (1.0 - progress * 0.5);
        self.next_spawn_ms = if immediate {
            now_ms + self.config.immediate_spawn_delay
        } else {
            now_ms + base + self.rng.next_f64() * random
        };
    }

    fn spawn(&mut self, def: SushiDef, lane: usize) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        let target = TypingTarget::new(self.cache.variants(&def.reading));
        let y = self.config.lane_y_positions.get(lane).copied().unwrap_or(0.0);
        debug!(id, lane, reading = %def.reading, patterns = target.patterns().len(), "plate spawned");
        self.live.push(LiveSushi {
            id,
            def,
            target,
            lane,
            x: self.lane_width + self.config.spawn_x_offset,
            y,
            captured_at: None,
        });
        id
    }
}
