//! Emotion history: the merged running emotional state
//!
//! The history folds successive appraisal results into one authoritative
//! "current emotional state". It owns no timers and never decays on its own;
//! it changes only through [`EmotionHistory::add`] (merge) and
//! [`EmotionHistory::age`] (explicit ageing from the engine's decay pass).

use std::collections::HashMap;
use thymia_core::{Emotion, EmotionType, EmotionVector};

/// Merge policy: per type, the stronger of (stored, incoming) wins, so an
/// elicited spike stacks on top of weaker residuals instead of averaging
/// them away.
#[derive(Debug, Default, Clone)]
pub struct EmotionHistory {
    entries: HashMap<EmotionType, Emotion>,
}

impl EmotionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a newly produced vector into the running state. Only active
    /// entries (above baseline) are considered; the stronger entry wins and
    /// keeps its cause.
    pub fn add(&mut self, vector: &EmotionVector) {
        for incoming in vector.active() {
            match self.entries.get(&incoming.kind) {
                Some(stored) if stored.intensity >= incoming.intensity => {}
                _ => {
                    self.entries.insert(incoming.kind, incoming.clone());
                }
            }
        }
    }

    /// The merged state, shaped like `template`: every catalog entry is
    /// present, at baseline unless the history holds something stronger.
    /// Read-only; repeated calls return identical results until the next
    /// mutation.
    pub fn emotional_state(&self, template: &EmotionVector) -> EmotionVector {
        let mut state = template.clone();
        for stored in self.entries.values() {
            if let Some(slot) = state.get(stored.kind) {
                if stored.intensity > slot.intensity {
                    state.set(stored.clone());
                }
            }
        }
        state
    }

    /// Lower stored intensities to the decayed vector's values, evicting
    /// entries that have returned to baseline. This is the decay pass's
    /// half of the contract; without it old spikes would resurrect on the
    /// next merge.
    pub fn age(&mut self, decayed: &EmotionVector) {
        self.entries.retain(|kind, stored| {
            let Some(slot) = decayed.get(*kind) else {
                return false;
            };
            stored.intensity = stored.intensity.min(slot.intensity);
            stored.intensity > stored.baseline
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thymia_core::Emotion;

    fn template() -> EmotionVector {
        EmotionVector::from_emotions(vec![
            Emotion::at_baseline(EmotionType::Joy, 0.1),
            Emotion::at_baseline(EmotionType::Fear, 0.0),
            Emotion::at_baseline(EmotionType::Anger, 0.0),
        ])
    }

    fn spike(kind: EmotionType, intensity: f32, cause: &str) -> EmotionVector {
        let mut v = template();
        v.set(Emotion::new(kind, intensity, 0.0, cause));
        v
    }

    #[test]
    fn never_elicited_type_stays_at_baseline() {
        let mut h = EmotionHistory::new();
        h.add(&spike(EmotionType::Joy, 0.5, "gift"));
        let state = h.emotional_state(&template());
        assert_eq!(state.get(EmotionType::Fear).unwrap().intensity, 0.0);
        assert_eq!(state.get(EmotionType::Anger).unwrap().intensity, 0.0);
    }

    #[test]
    fn merge_keeps_the_stronger_entry() {
        let mut h = EmotionHistory::new();
        h.add(&spike(EmotionType::Joy, 0.3, "first"));
        h.add(&spike(EmotionType::Joy, 0.7, "second"));
        let state = h.emotional_state(&template());
        let joy = state.get(EmotionType::Joy).unwrap();
        assert_eq!(joy.intensity, 0.7);
        assert_eq!(joy.cause, "second");

        // Weaker follow-up does not erode the spike.
        h.add(&spike(EmotionType::Joy, 0.2, "third"));
        let state = h.emotional_state(&template());
        let joy = state.get(EmotionType::Joy).unwrap();
        assert_eq!(joy.intensity, 0.7);
        assert_eq!(joy.cause, "second");
    }

    #[test]
    fn emotional_state_is_repeatable() {
        let mut h = EmotionHistory::new();
        h.add(&spike(EmotionType::Fear, 0.6, "noise"));
        let a = h.emotional_state(&template());
        let b = h.emotional_state(&template());
        assert_eq!(a, b);
    }

    #[test]
    fn age_lowers_and_evicts() {
        let mut h = EmotionHistory::new();
        h.add(&spike(EmotionType::Joy, 0.8, "gift"));
        h.add(&spike(EmotionType::Fear, 0.4, "noise"));

        // Joy decayed to 0.5, fear all the way to baseline.
        let mut decayed = template();
        decayed.set(Emotion::new(EmotionType::Joy, 0.5, 0.0, "gift"));
        h.age(&decayed);

        assert_eq!(h.len(), 1);
        let state = h.emotional_state(&template());
        assert_eq!(state.get(EmotionType::Joy).unwrap().intensity, 0.5);
        assert!(!state.get(EmotionType::Fear).unwrap().is_active());

        // A spike cannot resurrect past its aged value.
        h.add(&spike(EmotionType::Joy, 0.3, "echo"));
        let state = h.emotional_state(&template());
        assert_eq!(state.get(EmotionType::Joy).unwrap().intensity, 0.5);
    }

    #[test]
    fn baseline_only_vectors_merge_to_nothing() {
        let mut h = EmotionHistory::new();
        h.add(&template());
        assert!(h.is_empty());
    }
}
