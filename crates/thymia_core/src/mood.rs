//! PAD mood space
//!
//! Mood is a slow-moving point in the three-dimensional
//! Pleasure-Arousal-Dominance space, each axis bounded to [-1, 1]. Unlike
//! discrete emotions, which spike and decay within seconds, the mood point
//! drifts: pulled toward the center of mass of active emotions and released
//! back toward the personality's default mood.

use serde::{Deserialize, Serialize};

/// Guard against NaN and Infinity sneaking into mood axes.
#[inline]
fn sanitize_f32(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("NaN/Inf detected in mood axis, resetting to fallback {}", fallback);
        fallback
    }
}

/// A point in PAD space. Also used for mood *deltas* (the tendency vector),
/// which are guaranteed to fit the same bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub pleasure: f32,
    pub arousal: f32,
    pub dominance: f32,
}

impl Default for Mood {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Mood {
    pub fn new(pleasure: f32, arousal: f32, dominance: f32) -> Self {
        Self {
            pleasure: sanitize_f32(pleasure, 0.0).clamp(-1.0, 1.0),
            arousal: sanitize_f32(arousal, 0.0).clamp(-1.0, 1.0),
            dominance: sanitize_f32(dominance, 0.0).clamp(-1.0, 1.0),
        }
    }

    pub fn neutral() -> Self {
        Self {
            pleasure: 0.0,
            arousal: 0.0,
            dominance: 0.0,
        }
    }

    /// Euclidean distance to another mood point.
    pub fn distance(&self, other: &Mood) -> f32 {
        let dp = self.pleasure - other.pleasure;
        let da = self.arousal - other.arousal;
        let dd = self.dominance - other.dominance;
        (dp * dp + da * da + dd * dd).sqrt()
    }

    /// Distance from the neutral origin, normalized to [0, 1].
    pub fn intensity(&self) -> f32 {
        (self.distance(&Mood::neutral()) / 3f32.sqrt()).min(1.0)
    }

    /// Interpolate toward another mood point.
    pub fn lerp(&self, other: &Mood, t: f32) -> Mood {
        let t = t.clamp(0.0, 1.0);
        Mood::new(
            self.pleasure + (other.pleasure - self.pleasure) * t,
            self.arousal + (other.arousal - self.arousal) * t,
            self.dominance + (other.dominance - self.dominance) * t,
        )
    }

    /// Move each axis toward `target` by at most `max_step`, never
    /// overshooting. This is the primitive behind timed mood return: with a
    /// step of `full_range * period / overall_time` the point reaches the
    /// target within the configured overall time from any start.
    pub fn step_toward(&self, target: &Mood, max_step: f32) -> Mood {
        let max_step = max_step.max(0.0);
        let axis = |from: f32, to: f32| {
            let delta = to - from;
            if delta.abs() <= max_step {
                to
            } else {
                from + max_step.copysign(delta)
            }
        };
        Mood::new(
            axis(self.pleasure, target.pleasure),
            axis(self.arousal, target.arousal),
            axis(self.dominance, target.dominance),
        )
    }

    /// Component-wise difference `self - other`, as a tendency vector.
    pub fn delta_from(&self, other: &Mood) -> Mood {
        Mood::new(
            self.pleasure - other.pleasure,
            self.arousal - other.arousal,
            self.dominance - other.dominance,
        )
    }

    /// Octant name in the mood-word scheme (sign of each PAD axis).
    pub fn octant_label(&self) -> &'static str {
        match (
            self.pleasure >= 0.0,
            self.arousal >= 0.0,
            self.dominance >= 0.0,
        ) {
            (true, true, true) => "exuberant",
            (true, true, false) => "dependent",
            (true, false, true) => "relaxed",
            (true, false, false) => "docile",
            (false, true, true) => "hostile",
            (false, true, false) => "anxious",
            (false, false, true) => "disdainful",
            (false, false, false) => "bored",
        }
    }

    /// Human-readable mood description with an intensity word.
    pub fn describe(&self) -> String {
        let i = self.intensity();
        if i < 0.05 {
            return "neutral".to_string();
        }
        let strength = if i < 0.33 {
            "slightly"
        } else if i < 0.66 {
            "moderately"
        } else {
            "fully"
        };
        format!("{} {}", strength, self.octant_label())
    }
}
