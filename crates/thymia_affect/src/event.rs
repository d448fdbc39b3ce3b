//! Maintenance events
//!
//! Maintenance events arrive from an external broadcast channel and are
//! addressed by character name; every manager sees every event and filters
//! for its own character.

use serde::{Deserialize, Serialize};
use thymia_core::EmotionType;

/// A request to hold or raise one emotion of one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionMaintenanceEvent {
    pub emotion_type: EmotionType,
    pub character_name: String,
    pub intensity: f32,
}

impl EmotionMaintenanceEvent {
    pub fn new(
        emotion_type: EmotionType,
        character_name: impl Into<String>,
        intensity: f32,
    ) -> Self {
        Self {
            emotion_type,
            character_name: character_name.into(),
            intensity: intensity.clamp(0.0, 1.0),
        }
    }
}
