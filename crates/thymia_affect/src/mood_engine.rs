//! Mood dynamics
//!
//! The mood engine evolves the PAD mood point independently of the emotion
//! decay cycle. Active emotions pull the mood toward their center of mass;
//! in their absence the mood travels back toward the personality's default
//! mood at a rate set by the overall return time (optionally stretched by
//! neuroticism). The engine is a value object: rebuilt from configuration
//! on every change, never partially mutated.

use std::time::Duration;
use thymia_core::{AffectConsts, EmotionVector, Mood, Personality};

pub struct MoodEngine {
    default_mood: Mood,
    return_period: Duration,
    effective_overall_time: Duration,
    /// Centroid of the last computed vector, for display/debug.
    emotions_center: Mood,
    /// Delta between the last two computed mood points.
    tendency: Mood,
}

impl MoodEngine {
    /// `default_mood` is passed in rather than re-derived so reconstruction
    /// (on resume or reconfiguration) keeps the established default.
    pub fn new(personality: &Personality, consts: &AffectConsts, default_mood: Mood) -> Self {
        let overall = consts.mood_return_overall_time();
        let effective_overall_time = if consts.mood_stability_controlled_by_neuroticism {
            // Higher neuroticism holds moods longer (slower return); stable
            // characters snap back faster.
            let scale = (1.0 + 0.5 * personality.neuroticism).clamp(0.5, 1.5);
            overall.mul_f64(scale as f64)
        } else {
            overall
        };
        Self {
            default_mood,
            return_period: consts.mood_return_period(),
            effective_overall_time,
            emotions_center: default_mood,
            tendency: Mood::neutral(),
        }
    }

    pub fn default_mood(&self) -> Mood {
        self.default_mood
    }

    /// Intensity-weighted PAD centroid of all active emotions in the latest
    /// computed vector. Falls back to the default mood when nothing is
    /// active.
    pub fn emotions_center(&self) -> Mood {
        self.emotions_center
    }

    /// Direction and magnitude of the last mood change.
    pub fn current_mood_tendency(&self) -> Mood {
        self.tendency
    }

    /// One mood tick: blend the emotion pull and the timed return into the
    /// next mood point. Continuous: with an unchanged all-baseline vector,
    /// repeated calls walk the mood back to the default within the overall
    /// return time.
    pub fn compute(&mut self, previous: Mood, emotions: &EmotionVector) -> Mood {
        // Base step: full axis range (2.0) traversed over the overall time.
        let base_step = 2.0 * self.return_period.as_secs_f32()
            / self.effective_overall_time.as_secs_f32().max(f32::EPSILON);

        let next = match Self::center_of(emotions) {
            Some((center, strongest)) => {
                self.emotions_center = center;
                // Active emotions pull harder the stronger they are.
                let pull_step = base_step * (1.0 + strongest);
                previous.step_toward(&center, pull_step)
            }
            None => {
                self.emotions_center = self.default_mood;
                previous.step_toward(&self.default_mood, base_step)
            }
        };

        self.tendency = next.delta_from(&previous);
        next
    }

    /// Intensity-weighted centroid of the active emotions, plus the peak
    /// intensity, or `None` when everything rests at baseline.
    pub fn center_of(emotions: &EmotionVector) -> Option<(Mood, f32)> {
        let mut weight_sum = 0.0f32;
        let mut p = 0.0f32;
        let mut a = 0.0f32;
        let mut d = 0.0f32;
        let mut strongest = 0.0f32;
        for e in emotions.active() {
            let w = e.intensity;
            let point = e.pad_point();
            p += point.pleasure * w;
            a += point.arousal * w;
            d += point.dominance * w;
            weight_sum += w;
            strongest = strongest.max(e.intensity);
        }
        if weight_sum <= 0.0 {
            return None;
        }
        Some((
            Mood::new(p / weight_sum, a / weight_sum, d / weight_sum),
            strongest,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thymia_core::{Emotion, EmotionType};

    fn consts() -> AffectConsts {
        AffectConsts {
            mood_return_period_ms: 500,
            mood_return_overall_time_ms: 10_000,
            mood_stability_controlled_by_neuroticism: false,
            ..Default::default()
        }
    }

    fn baseline_vector() -> EmotionVector {
        EmotionVector::from_emotions(
            EmotionType::all()
                .iter()
                .map(|&kind| Emotion::at_baseline(kind, 0.0))
                .collect(),
        )
    }

    fn joyful_vector(intensity: f32) -> EmotionVector {
        let mut v = baseline_vector();
        v.set(Emotion::new(EmotionType::Joy, intensity, 0.0, "test"));
        v
    }

    #[test]
    fn converges_to_default_with_baseline_vector() {
        let personality = Personality::default();
        let default_mood = Mood::new(0.2, -0.1, 0.3);
        let mut engine = MoodEngine::new(&personality, &consts(), default_mood);

        let mut mood = Mood::new(-1.0, 1.0, -1.0);
        // overall/period = 20 ticks traverse the full axis range.
        for _ in 0..20 {
            mood = engine.compute(mood, &baseline_vector());
        }
        assert_eq!(mood, default_mood);

        // And it stays put once arrived.
        let settled = engine.compute(mood, &baseline_vector());
        assert_eq!(settled, default_mood);
        assert_eq!(engine.current_mood_tendency(), Mood::neutral());
    }

    #[test]
    fn active_emotions_pull_toward_their_center() {
        let personality = Personality::default();
        let mut engine = MoodEngine::new(&personality, &consts(), Mood::neutral());

        let mut mood = Mood::neutral();
        for _ in 0..10 {
            mood = engine.compute(mood, &joyful_vector(0.9));
        }
        let anchor = EmotionType::Joy.pad_anchor();
        assert!(mood.pleasure > 0.0, "pleasure should rise toward joy");
        assert!(
            mood.distance(&anchor) < Mood::neutral().distance(&anchor),
            "mood should approach the joy anchor"
        );
        assert!(engine.emotions_center().distance(&anchor) < 1e-5);
    }

    #[test]
    fn tendency_reports_the_last_delta() {
        let personality = Personality::default();
        let mut engine = MoodEngine::new(&personality, &consts(), Mood::neutral());

        let before = Mood::new(-0.4, 0.0, 0.0);
        let after = engine.compute(before, &baseline_vector());
        let tendency = engine.current_mood_tendency();
        assert!((tendency.pleasure - (after.pleasure - before.pleasure)).abs() < 1e-6);
        assert!(tendency.pleasure > 0.0, "moving back toward neutral default");
    }

    #[test]
    fn neuroticism_slows_the_return_when_enabled() {
        let mut c = consts();
        c.mood_stability_controlled_by_neuroticism = true;
        let neurotic = Personality::new(0.0, 0.0, 0.0, 0.0, 1.0).unwrap();
        let stable = Personality::new(0.0, 0.0, 0.0, 0.0, -1.0).unwrap();

        let start = Mood::new(-1.0, 0.0, 0.0);
        let mut neurotic_engine = MoodEngine::new(&neurotic, &c, Mood::neutral());
        let mut stable_engine = MoodEngine::new(&stable, &c, Mood::neutral());

        let n = neurotic_engine.compute(start, &baseline_vector());
        let s = stable_engine.compute(start, &baseline_vector());
        assert!(
            s.pleasure > n.pleasure,
            "stable character returns faster: {} vs {}",
            s.pleasure,
            n.pleasure
        );
    }

    #[test]
    fn center_of_weights_by_intensity() {
        let mut v = baseline_vector();
        v.set(Emotion::new(EmotionType::Joy, 0.9, 0.0, "a"));
        v.set(Emotion::new(EmotionType::Distress, 0.1, 0.0, "b"));
        let (center, strongest) = MoodEngine::center_of(&v).unwrap();
        // Heavily joy-weighted: pleasure lands near the joy anchor.
        assert!(center.pleasure > 0.2);
        assert_eq!(strongest, 0.9);

        assert!(MoodEngine::center_of(&baseline_vector()).is_none());
    }

    #[test]
    fn compute_stays_inside_the_pad_cube() {
        let personality = Personality::default();
        let mut engine = MoodEngine::new(&personality, &consts(), Mood::new(1.0, 1.0, 1.0));
        let mut mood = Mood::new(-1.0, -1.0, -1.0);
        for _ in 0..50 {
            mood = engine.compute(mood, &joyful_vector(1.0));
            for axis in [mood.pleasure, mood.arousal, mood.dominance] {
                assert!((-1.0..=1.0).contains(&axis));
            }
        }
    }
}
