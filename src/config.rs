//! Application-level configuration constants.

use serde::{Deserialize, Serialize};

// Autoplay
pub const AUTOPLAY_SPEED_PX: f64 = 2.2;
pub const RESUME_DELAY_MS: u32 = 500;
pub const SETTLE_DELAY_MS: u32 = 500;
pub const WRAP_EPSILON_PX: f64 = 0.5;

// Drag & momentum
pub const MOMENTUM_FRICTION: f64 = 0.92;
pub const MIN_MOMENTUM_VELOCITY: f64 = 0.06; // px/ms
pub const SWIPE_THRESHOLD_PX: f64 = 30.0;
pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_MS: f64 = 50.0;

// Layout fallbacks
pub const DEFAULT_GAP_PX: f64 = 24.0;

// Markup hooks
pub const CARD_SELECTOR: &str = ".testimonial-card";
pub const CONFIG_SCRIPT_ID: &str = "carousel-config";
pub const DOT_COUNT: usize = 4;
/// Cards copied from the head of the track onto its tail.
pub const LOOP_LEAD_CARDS: usize = 3;

// Contact
pub const WHATSAPP_URL: &str = "https://wa.me/message/URL4FFGHMAQLD1";

/// Tuning knobs for the carousel controller.
///
/// Every field defaults to the constant of the same meaning above, so a
/// partial JSON override only replaces what it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Autoplay advance per animation frame, in px.
    pub speed: f64,
    pub resume_delay_ms: u32,
    pub settle_delay_ms: u32,
    pub wrap_epsilon: f64,
    pub friction: f64,
    /// Momentum stops below this speed, in px/ms.
    pub min_velocity: f64,
    pub swipe_threshold: f64,
    pub default_gap: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            speed: AUTOPLAY_SPEED_PX,
            resume_delay_ms: RESUME_DELAY_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            wrap_epsilon: WRAP_EPSILON_PX,
            friction: MOMENTUM_FRICTION,
            min_velocity: MIN_MOMENTUM_VELOCITY,
            swipe_threshold: SWIPE_THRESHOLD_PX,
            default_gap: DEFAULT_GAP_PX,
        }
    }
}

impl CarouselConfig {
    /// Parse a (possibly partial) JSON override.
    ///
    /// A friction outside `(0, 1)` would never decay, so it falls back to the
    /// default along with any non-positive thresholds.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: CarouselConfig = serde_json::from_str(json)?;
        let defaults = CarouselConfig::default();
        if !(config.friction > 0.0 && config.friction < 1.0) {
            config.friction = defaults.friction;
        }
        if !(config.min_velocity > 0.0) {
            config.min_velocity = defaults.min_velocity;
        }
        if !(config.speed >= 0.0) {
            config.speed = defaults.speed;
        }
        if !(config.swipe_threshold >= 0.0) {
            config.swipe_threshold = defaults.swipe_threshold;
        }
        Ok(config)
    }
}
