//! Configuration bundles
//!
//! [`AffectConsts`] carries every tuning constant of the affect computation:
//! cycle periods, decay step count, mood return timing, the
//! neuroticism-stability toggle, and the biosignal simulation switch. It is
//! read at construction and on explicit reconfiguration only.

use crate::error::AffectError;
use crate::personality::Personality;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Affect computation constants. All periods are wall-clock milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffectConsts {
    /// Period of the emotion decay cycle.
    pub emotion_decay_period_ms: u64,
    /// Number of decay steps after which an emotion is back at baseline.
    pub emotion_decay_steps: u32,
    /// Period of the mood computation cycle.
    pub mood_return_period_ms: u64,
    /// Time for the mood to travel the full axis range back to default.
    pub mood_return_overall_time_ms: u64,
    /// When set, neuroticism stretches/shrinks the mood return time.
    pub mood_stability_controlled_by_neuroticism: bool,
    /// Scale applied to trait affinities when deriving resting baselines.
    pub personality_emotion_influence: f32,
    /// Hard cap on any derived resting baseline.
    pub emotion_max_baseline: f32,
    /// Maintenance of the `Physical` slot synthesizes a random PAD sample
    /// (stand-in for real sensor input) when enabled.
    pub simulated_bio_signals: bool,
    /// Fixed seed for the simulated biosignal RNG; `None` uses entropy.
    pub bio_signal_seed: Option<u64>,
}

impl Default for AffectConsts {
    fn default() -> Self {
        Self {
            emotion_decay_period_ms: 500,
            emotion_decay_steps: 15,
            mood_return_period_ms: 500,
            mood_return_overall_time_ms: 60_000,
            mood_stability_controlled_by_neuroticism: true,
            personality_emotion_influence: 0.5,
            emotion_max_baseline: 0.75,
            simulated_bio_signals: true,
            bio_signal_seed: None,
        }
    }
}

impl AffectConsts {
    pub fn emotion_decay_period(&self) -> Duration {
        Duration::from_millis(self.emotion_decay_period_ms)
    }

    pub fn mood_return_period(&self) -> Duration {
        Duration::from_millis(self.mood_return_period_ms)
    }

    pub fn mood_return_overall_time(&self) -> Duration {
        Duration::from_millis(self.mood_return_overall_time_ms)
    }

    pub fn validate(&self) -> Result<(), AffectError> {
        for (name, value) in [
            ("emotion_decay_period_ms", self.emotion_decay_period_ms),
            ("emotion_decay_steps", self.emotion_decay_steps as u64),
            ("mood_return_period_ms", self.mood_return_period_ms),
            (
                "mood_return_overall_time_ms",
                self.mood_return_overall_time_ms,
            ),
        ] {
            if value == 0 {
                return Err(AffectError::ConstantOutOfRange {
                    name,
                    value: value as f64,
                });
            }
        }
        for (name, value, lo, hi) in [
            (
                "personality_emotion_influence",
                self.personality_emotion_influence,
                0.0,
                1.0,
            ),
            ("emotion_max_baseline", self.emotion_max_baseline, 0.0, 1.0),
        ] {
            if !value.is_finite() || !(lo..=hi).contains(&value) {
                return Err(AffectError::ConstantOutOfRange {
                    name,
                    value: value as f64,
                });
            }
        }
        Ok(())
    }
}

/// Top-level config for a single-character deployment: who the character is
/// plus the affect constants.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThymiaConfig {
    pub character: CharacterSection,
    pub affect: AffectConsts,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CharacterSection {
    pub name: String,
    pub personality: Personality,
}

impl Default for CharacterSection {
    fn default() -> Self {
        Self {
            name: "character".to_string(),
            personality: Personality::default(),
        }
    }
}

impl ThymiaConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: ThymiaConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        config.character.personality.validate()?;
        config.affect.validate()?;
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return
    /// defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("THYMIA_CHARACTER") {
            self.character.name = v;
        }
        if let Ok(v) = std::env::var("THYMIA_DECAY_PERIOD_MS") {
            if let Ok(n) = v.parse() {
                self.affect.emotion_decay_period_ms = n;
            }
        }
        if let Ok(v) = std::env::var("THYMIA_DECAY_STEPS") {
            if let Ok(n) = v.parse() {
                self.affect.emotion_decay_steps = n;
            }
        }
        if let Ok(v) = std::env::var("THYMIA_MOOD_RETURN_PERIOD_MS") {
            if let Ok(n) = v.parse() {
                self.affect.mood_return_period_ms = n;
            }
        }
        if let Ok(v) = std::env::var("THYMIA_MOOD_RETURN_OVERALL_MS") {
            if let Ok(n) = v.parse() {
                self.affect.mood_return_overall_time_ms = n;
            }
        }
        if let Ok(v) = std::env::var("THYMIA_BIO_SIGNAL_SEED") {
            if let Ok(n) = v.parse() {
                self.affect.bio_signal_seed = Some(n);
            }
        }
    }
}
