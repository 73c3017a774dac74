//! Gameplay tuning constants.

/// Balance knobs for a round. `Default` holds the shipped values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct GameConfig {
    /// Round length in seconds.
    pub initial_time: u32,
    /// Belt speed in px per frame at the start of the round.
    pub initial_speed: f64,
    /// Speed gained per elapsed second.
    pub speed_up_rate: f64,
    pub max_speed: f64,
    /// Spawn interval (ms) at the start of the round.
    pub spawn_interval_base: f64,
    /// Spawn interval (ms) at the end of the round.
    pub spawn_interval_min: f64,
    /// Random jitter (ms) added to the spawn interval; halves over the round.
    pub spawn_interval_random: f64,
    /// Combo multiplier is `1 + combo * combo_multiplier_rate`.
    pub combo_multiplier_rate: f64,
    /// Multipliers for 1, 2, 3 and 4+ plates captured by one keystroke.
    pub simultaneous_multipliers: [f64; 4],
    /// Points per plate before multipliers, plus one per reading character.
    pub base_points: u32,
    /// Reading length that counts as a "long" plate.
    pub long_reading_threshold: usize,
    /// Lane heights (px from the bottom).
    pub lane_y_positions: Vec<f64>,
    /// Gap a lane's right-most plate must leave before another can spawn (px).
    pub min_spawn_distance: f64,
    pub max_live_sushi: usize,
    /// At or below this many live plates, spawn without waiting.
    pub immediate_spawn_threshold: usize,
    pub immediate_spawn_delay: f64,
    /// Plates spawn this far right of the lane's visible width (px).
    pub spawn_x_offset: f64,
    /// Plates left of this x are gone (px).
    pub despawn_x: f64,
    /// Lane width used when the host does not report one (px).
    pub default_lane_width: f64,
    /// Seconds between themed group starts; the first starts after one period.
    pub group_period_secs: f64,
    /// Captured plates linger this long before removal (ms).
    pub capture_linger_ms: f64,
    /// Quiet time before the chef gets bored (ms).
    pub idle_after_ms: f64,
    pub chef_emojis: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_time: 60,
            initial_speed: 0.4,
            speed_up_rate: 0.005,
            max_speed: 1.25,
            spawn_interval_base: 1200.0,
            spawn_interval_min: 500.0,
            spawn_interval_random: 1000.0,
            combo_multiplier_rate: 0.1,
            simultaneous_multipliers: [1.0, 2.0, 4.0, 8.0],
            base_points: 120,
            long_reading_threshold: 18,
            lane_y_positions: vec![18.0, 149.0, 280.0],
            min_spawn_distance: 300.0,
            max_live_sushi: 7,
            immediate_spawn_threshold: 3,
            immediate_spawn_delay: 200.0,
            spawn_x_offset: 100.0,
            despawn_x: -280.0,
            default_lane_width: 800.0,
            group_period_secs: 10.0,
            capture_linger_ms: 500.0,
            idle_after_ms: 5000.0,
            chef_emojis: ["🧑🏻‍🍳", "👨🏻‍🍳", "👩🏻‍🍳", "👴🏻", "👵🏻", "🐙", "👽", "👾", "🦖", "🧌"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl GameConfig {
    /// Multiplier for `count` plates captured by the same keystroke.
    pub fn simultaneous_multiplier(&self, count: usize) -> f64 {
        let idx = count.clamp(1, self.simultaneous_multipliers.len()) - 1;
        self.simultaneous_multipliers[idx]
    }

    /// Belt speed after `elapsed_secs` of play.
    pub fn speed_at(&self, elapsed_secs: f64) -> f64 {
        (self.initial_speed + elapsed_secs * self.speed_up_rate).min(self.max_speed)
    }

    /// Parses a (possibly partial) config; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
