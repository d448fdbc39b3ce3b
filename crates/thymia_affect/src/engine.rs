//! Emotion appraisal engine
//!
//! Turns queued emotion eliciting conditions (EECs) into appraised emotion
//! vectors, and ages existing state through the installed decay strategy.
//! Appraisal is lazy: `add_eec` only enqueues; all computation happens in
//! `infer_emotions`.

use crate::decay::DecayFunction;
use crate::history::EmotionHistory;
use std::time::{Duration, Instant};
use thymia_core::{
    AffectConsts, Emotion, EmotionType, EmotionVector, Mood, Personality,
    PersonalityEmotionsRelations,
};

/// An emotion eliciting condition: an external appraisal outcome naming the
/// elicited category, a strength in [0, 1], and a cause for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Eec {
    pub elicited: EmotionType,
    pub strength: f32,
    pub cause: String,
}

impl Eec {
    pub fn new(elicited: EmotionType, strength: f32, cause: impl Into<String>) -> Self {
        Self {
            elicited,
            strength,
            cause: cause.into(),
        }
    }
}

/// How strongly the current mood amplifies congruent appraisals.
const MOOD_CONGRUENCE_GAIN: f32 = 0.2;

/// Mood magnitudes below this don't bias appraisal at all.
const MOOD_CONGRUENCE_FLOOR: f32 = 0.05;

pub struct EmotionEngine {
    relations: PersonalityEmotionsRelations,
    decay_fn: Box<dyn DecayFunction>,
    decay_period: Duration,
    decay_steps: u32,
    pending: Vec<Eec>,
    last_decay: Option<Instant>,
}

impl EmotionEngine {
    /// Build an engine from personality and constants, installing (and
    /// initializing) the given decay strategy.
    pub fn new(
        personality: &Personality,
        consts: &AffectConsts,
        mut decay_fn: Box<dyn DecayFunction>,
    ) -> Self {
        decay_fn.init(consts.emotion_decay_steps);
        Self {
            relations: personality
                .emotions_relations(consts.personality_emotion_influence, consts.emotion_max_baseline),
            decay_fn,
            decay_period: consts.emotion_decay_period(),
            decay_steps: consts.emotion_decay_steps.max(1),
            pending: Vec::new(),
            last_decay: None,
        }
    }

    /// Rebuild every configuration-derived field in place, keeping the
    /// installed decay strategy. Equivalent to reconstruction: the pending
    /// queue and timing accumulators are reset.
    pub fn reconfigure(&mut self, personality: &Personality, consts: &AffectConsts) {
        self.relations = personality
            .emotions_relations(consts.personality_emotion_influence, consts.emotion_max_baseline);
        self.decay_fn.init(consts.emotion_decay_steps);
        self.decay_period = consts.emotion_decay_period();
        self.decay_steps = consts.emotion_decay_steps.max(1);
        self.pending.clear();
        self.last_decay = None;
    }

    pub fn relations(&self) -> &PersonalityEmotionsRelations {
        &self.relations
    }

    /// Enqueue an elicitor. No computation happens until `infer_emotions`.
    pub fn add_eec(&mut self, eec: Eec) {
        self.pending.push(eec);
    }

    pub fn pending_eecs(&self) -> usize {
        self.pending.len()
    }

    /// Drop all queued EECs. The orchestrator calls this right after each
    /// `infer_emotions` so stale elicitors are never re-appraised.
    pub fn clear_eec(&mut self) {
        self.pending.clear();
    }

    /// Appraise every queued EEC into `fresh` and return it. Entries for
    /// types outside the vector's catalog are skipped; zero or negative
    /// strengths appraise to nothing above baseline. With an empty queue
    /// the vector is returned unchanged, so repeated calls are idempotent.
    ///
    /// The history is read-only here (the caller persists); the current
    /// mood mildly amplifies mood-congruent appraisals.
    pub fn infer_emotions(
        &self,
        mut fresh: EmotionVector,
        _history: &EmotionHistory,
        current_mood: &Mood,
    ) -> EmotionVector {
        for eec in &self.pending {
            let Some(slot) = fresh.get(eec.elicited) else {
                tracing::debug!(kind = %eec.elicited, "EEC for type outside catalog, ignoring");
                continue;
            };
            if eec.strength <= 0.0 {
                continue;
            }
            let baseline = slot.baseline;
            let influence = self.relations.influence(eec.elicited);
            let gain = 1.0
                + MOOD_CONGRUENCE_GAIN * mood_congruence(current_mood, &eec.elicited.pad_anchor());
            let intensity = (baseline
                + eec.strength.min(1.0) * influence * gain * (1.0 - baseline))
                .clamp(baseline, 1.0);
            if intensity > slot.intensity {
                fresh.set(Emotion::new(eec.elicited, intensity, baseline, eec.cause.clone()));
            }
        }
        fresh
    }

    /// Age `previous` through the decay strategy, writing results into
    /// `fresh` and lowering the history to match, then return `fresh` as
    /// the next current vector. Elapsed steps are derived from wall time
    /// since the last decay pass (at least one step per call, so a manual
    /// step always advances).
    pub fn decay(
        &mut self,
        history: &mut EmotionHistory,
        previous: &EmotionVector,
        mut fresh: EmotionVector,
    ) -> EmotionVector {
        let now = Instant::now();
        let steps = self.elapsed_steps(now);
        self.last_decay = Some(now);

        for prior in previous.iter() {
            if !prior.is_active() {
                continue;
            }
            let decayed = self
                .decay_fn
                .decay(prior.intensity, prior.baseline, steps);
            if decayed > prior.baseline {
                let mut entry =
                    Emotion::new(prior.kind, decayed, prior.baseline, prior.cause.clone());
                entry.pad = prior.pad;
                fresh.set(entry);
            }
        }

        history.age(&fresh);
        fresh
    }

    fn elapsed_steps(&self, now: Instant) -> u32 {
        let steps = match self.last_decay {
            Some(last) => {
                let elapsed = now.duration_since(last).as_secs_f64();
                (elapsed / self.decay_period.as_secs_f64()).round() as u32
            }
            None => 1,
        };
        steps.clamp(1, self.decay_steps)
    }
}

/// Cosine alignment between the mood point and an emotion's PAD anchor, in
/// [-1, 1]; zero when the mood is too faint to bias anything.
fn mood_congruence(mood: &Mood, anchor: &Mood) -> f32 {
    let mood_norm =
        (mood.pleasure.powi(2) + mood.arousal.powi(2) + mood.dominance.powi(2)).sqrt();
    let anchor_norm =
        (anchor.pleasure.powi(2) + anchor.arousal.powi(2) + anchor.dominance.powi(2)).sqrt();
    if mood_norm < MOOD_CONGRUENCE_FLOOR || anchor_norm < MOOD_CONGRUENCE_FLOOR {
        return 0.0;
    }
    let dot = mood.pleasure * anchor.pleasure
        + mood.arousal * anchor.arousal
        + mood.dominance * anchor.dominance;
    (dot / (mood_norm * anchor_norm)).clamp(-1.0, 1.0)
}
