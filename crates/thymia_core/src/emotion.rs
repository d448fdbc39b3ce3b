//! Discrete emotion catalog and emotion vectors
//!
//! Emotions follow the OCC appraisal taxonomy: a closed set of categories,
//! each anchored at a fixed point in PAD (Pleasure-Arousal-Dominance) space.
//! A character's emotional state at any instant is an [`EmotionVector`]: one
//! [`Emotion`] per catalog entry, always a total covering, replaced wholesale
//! rather than patched in place.

use crate::error::AffectError;
use crate::mood::Mood;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed emotion catalog. `Physical` is the slot for biosignal-derived
/// input; it carries no fixed PAD anchor of its own (samples bring their own).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionType {
    Joy,
    Distress,
    Hope,
    Fear,
    Satisfaction,
    Relief,
    FearsConfirmed,
    Disappointment,
    HappyFor,
    Pity,
    Gloating,
    Resentment,
    Pride,
    Shame,
    Admiration,
    Reproach,
    Gratification,
    Remorse,
    Gratitude,
    Anger,
    Liking,
    Disliking,
    Love,
    Hate,
    Physical,
}

impl EmotionType {
    /// The full catalog, in canonical order. Characters may be configured
    /// with any subset; vectors preserve the order given at construction.
    pub fn all() -> &'static [EmotionType] {
        use EmotionType::*;
        &[
            Joy,
            Distress,
            Hope,
            Fear,
            Satisfaction,
            Relief,
            FearsConfirmed,
            Disappointment,
            HappyFor,
            Pity,
            Gloating,
            Resentment,
            Pride,
            Shame,
            Admiration,
            Reproach,
            Gratification,
            Remorse,
            Gratitude,
            Anger,
            Liking,
            Disliking,
            Love,
            Hate,
            Physical,
        ]
    }

    /// PAD anchor point used when projecting this emotion into mood space.
    pub fn pad_anchor(&self) -> Mood {
        use EmotionType::*;
        let (p, a, d) = match self {
            Joy => (0.40, 0.20, 0.10),
            Distress => (-0.40, -0.20, -0.50),
            Hope => (0.20, 0.20, -0.10),
            Fear => (-0.64, 0.60, -0.43),
            Satisfaction => (0.30, -0.20, 0.40),
            Relief => (0.20, -0.30, 0.40),
            FearsConfirmed => (-0.50, -0.30, -0.70),
            Disappointment => (-0.30, 0.10, -0.40),
            HappyFor => (0.40, 0.20, 0.20),
            Pity => (-0.40, -0.20, -0.50),
            Gloating => (0.30, -0.30, -0.10),
            Resentment => (-0.20, -0.30, -0.20),
            Pride => (0.40, 0.30, 0.30),
            Shame => (-0.30, 0.10, -0.60),
            Admiration => (0.50, 0.30, -0.20),
            Reproach => (-0.30, -0.10, 0.40),
            Gratification => (0.60, 0.50, 0.40),
            Remorse => (-0.30, 0.10, -0.60),
            Gratitude => (0.40, 0.20, -0.30),
            Anger => (-0.51, 0.59, 0.25),
            Liking => (0.40, 0.16, -0.24),
            Disliking => (-0.40, 0.20, 0.10),
            Love => (0.30, 0.10, 0.20),
            Hate => (-0.60, 0.60, 0.30),
            Physical => (0.0, 0.0, 0.0),
        };
        Mood::new(p, a, d)
    }

    pub fn as_str(&self) -> &'static str {
        use EmotionType::*;
        match self {
            Joy => "joy",
            Distress => "distress",
            Hope => "hope",
            Fear => "fear",
            Satisfaction => "satisfaction",
            Relief => "relief",
            FearsConfirmed => "fears_confirmed",
            Disappointment => "disappointment",
            HappyFor => "happy_for",
            Pity => "pity",
            Gloating => "gloating",
            Resentment => "resentment",
            Pride => "pride",
            Shame => "shame",
            Admiration => "admiration",
            Reproach => "reproach",
            Gratification => "gratification",
            Remorse => "remorse",
            Gratitude => "gratitude",
            Anger => "anger",
            Liking => "liking",
            Disliking => "disliking",
            Love => "love",
            Hate => "hate",
            Physical => "physical",
        }
    }
}

impl fmt::Display for EmotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionType {
    type Err = AffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        EmotionType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| AffectError::UnknownEmotionType(s.to_string()))
    }
}

/// One emotion instance: a catalog entry with its current intensity, the
/// resting baseline it decays toward, and the cause that elicited it.
///
/// `pad` is set only for biosignal-derived entries, which carry their own
/// PAD point instead of the catalog anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub kind: EmotionType,
    pub intensity: f32,
    pub baseline: f32,
    pub cause: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad: Option<Mood>,
}

impl Emotion {
    pub fn new(kind: EmotionType, intensity: f32, baseline: f32, cause: impl Into<String>) -> Self {
        let baseline = baseline.clamp(0.0, 1.0);
        Self {
            kind,
            intensity: intensity.clamp(baseline, 1.0),
            baseline,
            cause: cause.into(),
            pad: None,
        }
    }

    /// A resting entry: intensity equals baseline, no cause.
    pub fn at_baseline(kind: EmotionType, baseline: f32) -> Self {
        Self::new(kind, baseline, baseline, "")
    }

    /// An emotion is active when it has risen above its resting baseline.
    pub fn is_active(&self) -> bool {
        self.intensity > self.baseline
    }

    /// Excess intensity over baseline; zero for resting entries.
    pub fn excess(&self) -> f32 {
        (self.intensity - self.baseline).max(0.0)
    }

    /// The point this emotion occupies in PAD space.
    pub fn pad_point(&self) -> Mood {
        self.pad.unwrap_or_else(|| self.kind.pad_anchor())
    }
}

/// A PAD sample from a (possibly simulated) biosignal source, to be infused
/// into the emotional state under the `Physical` catalog slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadEmotion {
    pub pad: Mood,
    pub intensity: f32,
    pub cause: String,
}

impl PadEmotion {
    pub fn new(pad: Mood, intensity: f32, cause: impl Into<String>) -> Self {
        Self {
            pad,
            intensity: intensity.clamp(0.0, 1.0),
            cause: cause.into(),
        }
    }

    /// Wrap the sample as a `Physical` emotion with the given baseline.
    pub fn into_emotion(self, baseline: f32) -> Emotion {
        let mut e = Emotion::new(EmotionType::Physical, self.intensity, baseline, self.cause);
        e.pad = Some(self.pad);
        e
    }
}

/// A complete snapshot of the configured catalog: exactly one [`Emotion`]
/// per configured type, in catalog order. Vectors are created fresh whenever
/// a new snapshot is needed and replaced wholesale, never mutated
/// entry-by-entry from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionVector {
    emotions: Vec<Emotion>,
}

impl EmotionVector {
    /// Build a vector from explicit entries. Order is preserved.
    pub fn from_emotions(emotions: Vec<Emotion>) -> Self {
        Self { emotions }
    }

    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Emotion> {
        self.emotions.iter()
    }

    /// Entries currently above their baseline.
    pub fn active(&self) -> impl Iterator<Item = &Emotion> {
        self.emotions.iter().filter(|e| e.is_active())
    }

    pub fn is_all_baseline(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn get(&self, kind: EmotionType) -> Option<&Emotion> {
        self.emotions.iter().find(|e| e.kind == kind)
    }

    /// Replace the entry for `emotion.kind`. Types outside the configured
    /// catalog are skipped; the total-covering invariant never changes.
    pub fn set(&mut self, emotion: Emotion) {
        match self.emotions.iter_mut().find(|e| e.kind == emotion.kind) {
            Some(slot) => *slot = emotion,
            None => {
                tracing::debug!(kind = %emotion.kind, "emotion type not in catalog, ignoring");
            }
        }
    }

    /// The strongest currently active entry, if any.
    pub fn strongest_active(&self) -> Option<&Emotion> {
        self.active()
            .max_by(|a, b| a.intensity.partial_cmp(&b.intensity).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn len(&self) -> usize {
        self.emotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }
}
