//! Observer seams
//!
//! The engine pushes state to narrow, capability-typed sinks instead of a
//! generic listener hierarchy. Sinks are called synchronously inside the
//! character's critical section and are expected to be non-blocking; an
//! absent or disabled sink is a no-op.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thymia_core::{EmotionVector, Mood};

/// Everything a rich status display needs after a state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectSnapshot {
    pub character: String,
    pub emotions: EmotionVector,
    pub emotions_center: Mood,
    pub default_mood: Mood,
    pub current_mood: Mood,
    pub mood_tendency: Mood,
    /// Unix timestamp of the state change.
    pub timestamp: i64,
}

impl AffectSnapshot {
    pub fn new(
        character: impl Into<String>,
        emotions: EmotionVector,
        emotions_center: Mood,
        default_mood: Mood,
        current_mood: Mood,
        mood_tendency: Mood,
    ) -> Self {
        Self {
            character: character.into(),
            emotions,
            emotions_center,
            default_mood,
            current_mood,
            mood_tendency,
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// Display sink for the emotional state alone.
pub trait EmotionObserver: Send + Sync {
    fn on_emotion_changed(&self, character: &str, emotions: &EmotionVector);
}

/// Richer sink receiving the full affect snapshot.
pub trait MoodObserver: Send + Sync {
    fn on_mood_changed(&self, snapshot: &AffectSnapshot);
}
