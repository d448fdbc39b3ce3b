//! Character orchestration
//!
//! One [`CharacterManager`] per simulated character. It owns the engines,
//! the emotion history and the live vector/mood values, and runs two
//! independent periodic cycles:
//!
//! 1. **Decay cycle** — ages the current emotion vector through the decay
//!    strategy.
//! 2. **Mood cycle** — advances the PAD mood point.
//!
//! Both cycles, and every externally triggered mutation, take the same
//! per-character mutex, so a caller always observes a consistent snapshot.
//! Pausing aborts the scheduled tasks without touching state; resuming
//! installs brand-new timers, so no stale callback can fire after resume.

use crate::decay::DecayFunction;
use crate::engine::{Eec, EmotionEngine};
use crate::event::EmotionMaintenanceEvent;
use crate::history::EmotionHistory;
use crate::mood_engine::MoodEngine;
use crate::observer::{AffectSnapshot, EmotionObserver, MoodObserver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, RwLock};
use std::time::Duration;
use thymia_core::{
    AffectConsts, Emotion, EmotionType, EmotionVector, Mood, PadEmotion, Personality,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Everything the two cycles and the mutation entry points contend over.
/// Exactly one lock per character; cross-character operations never share.
struct AffectState {
    personality: Personality,
    consts: AffectConsts,
    catalog: Vec<EmotionType>,
    emotion_engine: EmotionEngine,
    mood_engine: MoodEngine,
    history: EmotionHistory,
    emotions: EmotionVector,
    default_mood: Mood,
    current_mood: Mood,
    mood_tendency: Mood,
    rng: StdRng,
}

/// Attached display sinks. Absent or disabled sinks are no-ops.
struct ObserverSet {
    emotion: RwLock<Option<Arc<dyn EmotionObserver>>>,
    mood: RwLock<Option<Arc<dyn MoodObserver>>>,
    enabled: AtomicBool,
}

impl ObserverSet {
    fn new() -> Self {
        Self {
            emotion: RwLock::new(None),
            mood: RwLock::new(None),
            enabled: AtomicBool::new(true),
        }
    }

    fn push_emotions(&self, character: &str, emotions: &EmotionVector) {
        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }
        if let Ok(guard) = self.emotion.read() {
            if let Some(sink) = guard.as_ref() {
                sink.on_emotion_changed(character, emotions);
            }
        }
    }

    fn push_mood(&self, snapshot: &AffectSnapshot) {
        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }
        if let Ok(guard) = self.mood.read() {
            if let Some(sink) = guard.as_ref() {
                sink.on_mood_changed(snapshot);
            }
        }
    }
}

pub struct CharacterManager {
    name: String,
    derived_personality: bool,
    state: Arc<Mutex<AffectState>>,
    observers: Arc<ObserverSet>,
    decay_task: StdMutex<Option<JoinHandle<()>>>,
    mood_task: StdMutex<Option<JoinHandle<()>>>,
    paused: AtomicBool,
}

impl CharacterManager {
    /// Build the manager and start both cycles. Must be called from within
    /// a Tokio runtime.
    ///
    /// `derived_personality` records whether the profile was authored or
    /// inferred from other data; the flag is carried for callers only.
    pub fn new(
        name: impl Into<String>,
        personality: Personality,
        consts: AffectConsts,
        derived_personality: bool,
        decay_fn: Box<dyn DecayFunction>,
        catalog: Vec<EmotionType>,
    ) -> Self {
        let name = name.into();
        let emotion_engine = EmotionEngine::new(&personality, &consts, decay_fn);
        let mood_engine = MoodEngine::new(&personality, &consts, personality.default_mood());
        let default_mood = personality.default_mood();
        let rng = match consts.bio_signal_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let decay_period = consts.emotion_decay_period();
        let mood_period = consts.mood_return_period();

        let mut state = AffectState {
            personality,
            consts,
            catalog,
            emotion_engine,
            mood_engine,
            history: EmotionHistory::new(),
            emotions: EmotionVector::from_emotions(Vec::new()),
            default_mood,
            current_mood: default_mood,
            mood_tendency: Mood::neutral(),
            rng,
        };
        state.emotions = fresh_vector(&state);

        let manager = Self {
            name,
            derived_personality,
            state: Arc::new(Mutex::new(state)),
            observers: Arc::new(ObserverSet::new()),
            decay_task: StdMutex::new(None),
            mood_task: StdMutex::new(None),
            paused: AtomicBool::new(false),
        };
        manager.install_cycles(decay_period, mood_period);
        manager
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_derived_personality(&self) -> bool {
        self.derived_personality
    }

    pub fn is_affect_computation_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    // ------------------------------------------------------------------
    // Cycle control
    // ------------------------------------------------------------------

    /// Pause both cycles. State is untouched; a tick already holding the
    /// lock finishes first. Idempotent.
    pub fn pause_affect_computation(&self) -> bool {
        if self.paused.swap(true, Ordering::SeqCst) {
            return true;
        }
        tracing::info!(character = %self.name, "affect computation paused");
        self.cancel_cycles();
        true
    }

    /// Resume a paused computation: rebuild the mood engine from the
    /// current configuration (the current mood is preserved) and install
    /// brand-new timers. Returns `false` as a no-op signal when the
    /// computation is not paused.
    pub async fn resume_affect_computation(&self) -> bool {
        if !self.paused.load(Ordering::SeqCst) {
            return false;
        }
        let (decay_period, mood_period) = {
            let mut st = self.state.lock().await;
            let st = &mut *st;
            st.mood_engine = MoodEngine::new(&st.personality, &st.consts, st.default_mood);
            (st.consts.emotion_decay_period(), st.consts.mood_return_period())
        };
        self.cancel_cycles();
        self.install_cycles(decay_period, mood_period);
        self.paused.store(false, Ordering::SeqCst);
        tracing::info!(character = %self.name, "affect computation resumed");
        true
    }

    /// Run one decay tick and one mood tick, in that order, while paused.
    /// Logs the resulting snapshot. Returns `false` when not paused.
    pub async fn stepwise_affect_computation(&self) -> bool {
        if !self.paused.load(Ordering::SeqCst) {
            return false;
        }
        let mut st = self.state.lock().await;
        run_decay_tick(&self.name, &mut st, &self.observers);
        run_mood_tick(&self.name, &mut st, &self.observers);
        let snapshot = snapshot_of(&self.name, &st);
        match serde_json::to_string(&snapshot) {
            Ok(json) => tracing::info!(character = %self.name, "affect step: {json}"),
            Err(e) => tracing::warn!(character = %self.name, "snapshot serialization failed: {e}"),
        }
        log_active(&self.name, &st.emotions);
        true
    }

    /// Cancel both cycles outright (shutdown path). Unlike pausing this
    /// leaves the paused flag alone.
    pub fn stop_all(&self) {
        self.cancel_cycles();
    }

    // ------------------------------------------------------------------
    // Externally triggered mutation
    // ------------------------------------------------------------------

    /// Enqueue an elicitor for the next appraisal. No computation yet.
    pub async fn add_eec(&self, eec: Eec) {
        let mut st = self.state.lock().await;
        st.emotion_engine.add_eec(eec);
    }

    pub async fn pending_eecs(&self) -> usize {
        self.state.lock().await.emotion_engine.pending_eecs()
    }

    /// Appraise all queued EECs, merge the result into the history, refresh
    /// the live vector and push to observers. Returns the freshly appraised
    /// (pre-merge) vector.
    pub async fn infer_emotions(&self) -> EmotionVector {
        let mut st = self.state.lock().await;
        let st = &mut *st;
        let fresh = fresh_vector(st);
        let result = st
            .emotion_engine
            .infer_emotions(fresh, &st.history, &st.current_mood);
        st.emotion_engine.clear_eec();
        st.history.add(&result);
        let template = fresh_vector(st);
        st.emotions = st.history.emotional_state(&template);
        self.observers.push_emotions(&self.name, &st.emotions);
        self.observers.push_mood(&snapshot_of(&self.name, st));
        result
    }

    /// Merge a biosignal-derived PAD sample into the emotional state under
    /// the `Physical` slot. While paused this is a documented no-op that
    /// returns the last known state unchanged.
    pub async fn infuse_bio_signal_emotions(&self, sample: PadEmotion) -> EmotionVector {
        let mut st = self.state.lock().await;
        let st = &mut *st;
        if self.paused.load(Ordering::SeqCst) {
            let template = fresh_vector(st);
            return st.history.emotional_state(&template);
        }
        let mut fresh = fresh_vector(st);
        let baseline = st
            .emotion_engine
            .relations()
            .baseline(EmotionType::Physical);
        fresh.set(sample.into_emotion(baseline));
        st.history.add(&fresh);
        let template = fresh_vector(st);
        st.emotions = st.history.emotional_state(&template);
        self.observers.push_emotions(&self.name, &st.emotions);
        self.observers.push_mood(&snapshot_of(&self.name, st));
        fresh
    }

    /// Handle a maintenance event from the external broadcast channel.
    /// Events for other characters are ignored. For the `Physical` slot
    /// with simulation enabled a random PAD sample stands in for sensor
    /// input; otherwise the intensity is raised to at least the baseline.
    /// Applies and is shown even while paused.
    pub async fn maintain_emotion(&self, event: &EmotionMaintenanceEvent) {
        if event.character_name != self.name {
            tracing::debug!(
                character = %self.name,
                addressed = %event.character_name,
                "maintenance event for another character, ignoring"
            );
            return;
        }
        tracing::info!(
            character = %self.name,
            kind = %event.emotion_type,
            intensity = event.intensity,
            "maintenance event"
        );
        let mut st = self.state.lock().await;
        let st = &mut *st;
        let mut fresh = fresh_vector(st);
        let Some(baseline) = fresh.get(event.emotion_type).map(|e| e.baseline) else {
            return;
        };
        let entry = if event.emotion_type == EmotionType::Physical && st.consts.simulated_bio_signals
        {
            let pad = Mood::new(
                st.rng.gen_range(-1.0..=1.0),
                st.rng.gen_range(-1.0..=1.0),
                st.rng.gen_range(-1.0..=1.0),
            );
            PadEmotion::new(pad, event.intensity, "simulated bio sensor input")
                .into_emotion(baseline)
        } else {
            Emotion::new(
                event.emotion_type,
                event.intensity.max(baseline),
                baseline,
                "user maintenance",
            )
        };
        fresh.set(entry);
        st.history.add(&fresh);
        let template = fresh_vector(st);
        st.emotions = st.history.emotional_state(&template);
        self.observers.push_emotions(&self.name, &st.emotions);
        self.observers.push_mood(&snapshot_of(&self.name, st));
    }

    // ------------------------------------------------------------------
    // Reconfiguration (cancel cycles -> mutate -> re-enable)
    // ------------------------------------------------------------------

    /// Swap the personality wholesale. Resets the history, the live vector
    /// and both moods to the new profile's defaults, and rebuilds both
    /// engines.
    pub async fn set_personality(&self, personality: Personality) {
        self.cancel_cycles();
        {
            let mut st = self.state.lock().await;
            let st = &mut *st;
            st.personality = personality;
            st.emotion_engine.reconfigure(&st.personality, &st.consts);
            st.default_mood = st.personality.default_mood();
            st.current_mood = st.default_mood;
            st.mood_tendency = Mood::neutral();
            st.history = EmotionHistory::new();
            st.mood_engine = MoodEngine::new(&st.personality, &st.consts, st.default_mood);
            st.emotions = fresh_vector(st);
            self.observers.push_emotions(&self.name, &st.emotions);
            self.observers.push_mood(&snapshot_of(&self.name, st));
        }
        self.respawn_if_active().await;
    }

    /// Swap the affect constants. Both engines are rebuilt; the live
    /// emotion vector, history and mood values persist.
    pub async fn set_affect_consts(&self, consts: AffectConsts) {
        self.cancel_cycles();
        {
            let mut st = self.state.lock().await;
            let st = &mut *st;
            st.consts = consts;
            if let Some(seed) = st.consts.bio_signal_seed {
                st.rng = StdRng::seed_from_u64(seed);
            }
            st.emotion_engine.reconfigure(&st.personality, &st.consts);
            st.mood_engine = MoodEngine::new(&st.personality, &st.consts, st.default_mood);
        }
        self.respawn_if_active().await;
    }

    /// Install a new decay strategy; the emotion engine is rebuilt around
    /// it (which initializes the strategy with the configured step count).
    pub async fn set_decay_function(&self, decay_fn: Box<dyn DecayFunction>) {
        self.cancel_cycles();
        {
            let mut st = self.state.lock().await;
            let st = &mut *st;
            st.emotion_engine = EmotionEngine::new(&st.personality, &st.consts, decay_fn);
        }
        self.respawn_if_active().await;
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Attach (or detach with `None`) the emotion display sink. The current
    /// state is pushed immediately on attach.
    pub async fn set_emotion_observer(&self, observer: Option<Arc<dyn EmotionObserver>>) {
        if let Ok(mut guard) = self.observers.emotion.write() {
            *guard = observer;
        }
        let st = self.state.lock().await;
        self.observers.push_emotions(&self.name, &st.emotions);
    }

    /// Attach (or detach with `None`) the rich status sink. The current
    /// snapshot is pushed immediately on attach.
    pub async fn set_mood_observer(&self, observer: Option<Arc<dyn MoodObserver>>) {
        if let Ok(mut guard) = self.observers.mood.write() {
            *guard = observer;
        }
        let st = self.state.lock().await;
        self.observers.push_mood(&snapshot_of(&self.name, &st));
    }

    /// Enable or disable all observer pushes without detaching the sinks.
    pub fn set_observers_enabled(&self, enabled: bool) {
        self.observers.enabled.store(enabled, Ordering::Relaxed);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub async fn current_emotions(&self) -> EmotionVector {
        self.state.lock().await.emotions.clone()
    }

    pub async fn current_mood(&self) -> Mood {
        self.state.lock().await.current_mood
    }

    pub async fn current_mood_tendency(&self) -> Mood {
        self.state.lock().await.mood_tendency
    }

    pub async fn default_mood(&self) -> Mood {
        self.state.lock().await.default_mood
    }

    pub async fn emotions_center(&self) -> Mood {
        self.state.lock().await.mood_engine.emotions_center()
    }

    pub async fn personality(&self) -> Personality {
        self.state.lock().await.personality
    }

    pub async fn affect_consts(&self) -> AffectConsts {
        self.state.lock().await.consts.clone()
    }

    pub async fn snapshot(&self) -> AffectSnapshot {
        let st = self.state.lock().await;
        snapshot_of(&self.name, &st)
    }

    /// Log every emotion currently above its baseline.
    pub async fn log_active_emotions(&self) {
        let st = self.state.lock().await;
        log_active(&self.name, &st.emotions);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn cancel_cycles(&self) {
        for task in [&self.decay_task, &self.mood_task] {
            if let Ok(mut guard) = task.lock() {
                if let Some(handle) = guard.take() {
                    handle.abort();
                }
            }
        }
    }

    fn install_cycles(&self, decay_period: Duration, mood_period: Duration) {
        if let Ok(mut guard) = self.decay_task.lock() {
            *guard = Some(spawn_decay_cycle(
                self.name.clone(),
                Arc::clone(&self.state),
                Arc::clone(&self.observers),
                decay_period,
            ));
        }
        if let Ok(mut guard) = self.mood_task.lock() {
            *guard = Some(spawn_mood_cycle(
                self.name.clone(),
                Arc::clone(&self.state),
                Arc::clone(&self.observers),
                mood_period,
            ));
        }
    }

    async fn respawn_if_active(&self) {
        if self.paused.load(Ordering::SeqCst) {
            return;
        }
        let (decay_period, mood_period) = {
            let st = self.state.lock().await;
            (st.consts.emotion_decay_period(), st.consts.mood_return_period())
        };
        self.cancel_cycles();
        self.install_cycles(decay_period, mood_period);
    }
}

impl Drop for CharacterManager {
    fn drop(&mut self) {
        self.cancel_cycles();
    }
}

// ----------------------------------------------------------------------
// Tick bodies (shared by the scheduled cycles and the manual step)
// ----------------------------------------------------------------------

/// A fresh total covering of the configured catalog, at current baselines.
fn fresh_vector(st: &AffectState) -> EmotionVector {
    let rels = st.emotion_engine.relations();
    EmotionVector::from_emotions(
        st.catalog
            .iter()
            .map(|&kind| Emotion::at_baseline(kind, rels.baseline(kind)))
            .collect(),
    )
}

fn run_decay_tick(name: &str, st: &mut AffectState, observers: &ObserverSet) {
    let fresh = fresh_vector(st);
    let decayed = {
        let AffectState {
            emotion_engine,
            history,
            emotions,
            ..
        } = st;
        emotion_engine.decay(history, emotions, fresh)
    };
    st.emotions = decayed;
    observers.push_emotions(name, &st.emotions);
}

fn run_mood_tick(name: &str, st: &mut AffectState, observers: &ObserverSet) {
    let next = {
        let AffectState {
            mood_engine,
            current_mood,
            emotions,
            ..
        } = st;
        mood_engine.compute(*current_mood, emotions)
    };
    st.current_mood = next;
    st.mood_tendency = st.mood_engine.current_mood_tendency();
    observers.push_mood(&snapshot_of(name, st));
}

fn snapshot_of(name: &str, st: &AffectState) -> AffectSnapshot {
    AffectSnapshot::new(
        name,
        st.emotions.clone(),
        st.mood_engine.emotions_center(),
        st.default_mood,
        st.current_mood,
        st.mood_tendency,
    )
}

fn log_active(name: &str, emotions: &EmotionVector) {
    let active: Vec<String> = emotions
        .active()
        .map(|e| format!("{} {:.2} ({})", e.kind, e.intensity, e.cause))
        .collect();
    if active.is_empty() {
        tracing::info!(character = %name, "no active emotions");
    } else {
        tracing::info!(character = %name, "active emotions: [{}]", active.join(", "));
    }
}

fn spawn_decay_cycle(
    name: String,
    state: Arc<Mutex<AffectState>>,
    observers: Arc<ObserverSet>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        // A late tick is skipped, never queued.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let mut st = state.lock().await;
            // A failing tick must not kill the schedule.
            let result =
                catch_unwind(AssertUnwindSafe(|| run_decay_tick(&name, &mut st, &observers)));
            if let Err(panic) = result {
                tracing::warn!(
                    character = %name,
                    "emotion decay tick failed: {}",
                    panic_message(&panic)
                );
            }
        }
    })
}

fn spawn_mood_cycle(
    name: String,
    state: Arc<Mutex<AffectState>>,
    observers: Arc<ObserverSet>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let mut st = state.lock().await;
            let result =
                catch_unwind(AssertUnwindSafe(|| run_mood_tick(&name, &mut st, &observers)));
            if let Err(panic) = result {
                tracing::warn!(
                    character = %name,
                    "mood computation tick failed: {}",
                    panic_message(&panic)
                );
            }
        }
    })
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decay::LinearDecay;
    use std::sync::atomic::AtomicUsize;
    use tokio::time::sleep;

    fn slow_consts() -> AffectConsts {
        // Periods far beyond test duration so scheduled ticks never fire.
        AffectConsts {
            emotion_decay_period_ms: 60_000,
            emotion_decay_steps: 5,
            mood_return_period_ms: 60_000,
            bio_signal_seed: Some(7),
            ..Default::default()
        }
    }

    fn manager(name: &str, consts: AffectConsts) -> CharacterManager {
        CharacterManager::new(
            name,
            Personality::default(),
            consts,
            false,
            Box::new(LinearDecay::new()),
            EmotionType::all().to_vec(),
        )
    }

    #[tokio::test]
    async fn joy_scenario_end_to_end() {
        let consts = AffectConsts {
            emotion_decay_period_ms: 100,
            emotion_decay_steps: 5,
            mood_return_period_ms: 200,
            ..Default::default()
        };
        let m = manager("scenario", consts);
        assert_eq!(m.default_mood().await, Mood::neutral());

        // Pause so only manual steps advance the computation.
        assert!(m.pause_affect_computation());

        m.add_eec(Eec::new(EmotionType::Joy, 1.0, "good news")).await;
        let appraised = m.infer_emotions().await;
        let joy = appraised.get(EmotionType::Joy).unwrap();
        assert!(joy.is_active(), "joy should be elicited above baseline");
        for e in appraised.iter().filter(|e| e.kind != EmotionType::Joy) {
            assert!(!e.is_active(), "{} should rest at baseline", e.kind);
        }

        for _ in 0..5 {
            assert!(m.stepwise_affect_computation().await);
        }
        let current = m.current_emotions().await;
        let joy = current.get(EmotionType::Joy).unwrap();
        assert_eq!(
            joy.intensity, joy.baseline,
            "joy must be back at baseline after the configured decay steps"
        );
    }

    #[tokio::test]
    async fn pause_resume_roundtrip_preserves_state() {
        let m = manager("roundtrip", slow_consts());
        m.add_eec(Eec::new(EmotionType::Hope, 0.8, "forecast")).await;
        m.infer_emotions().await;

        assert!(m.pause_affect_computation());
        let emotions_before = m.current_emotions().await;
        let mood_before = m.current_mood().await;

        assert!(m.resume_affect_computation().await);
        assert!(!m.is_affect_computation_paused());
        assert_eq!(m.current_emotions().await, emotions_before);
        assert_eq!(m.current_mood().await, mood_before);
    }

    #[tokio::test]
    async fn resume_when_active_is_a_noop() {
        let m = manager("noop", slow_consts());
        assert!(!m.resume_affect_computation().await);
        // Pausing twice is safe.
        assert!(m.pause_affect_computation());
        assert!(m.pause_affect_computation());
        assert!(m.resume_affect_computation().await);
    }

    #[tokio::test]
    async fn stepwise_requires_pause() {
        let m = manager("step", slow_consts());
        assert!(!m.stepwise_affect_computation().await);
        m.pause_affect_computation();
        assert!(m.stepwise_affect_computation().await);
    }

    #[tokio::test]
    async fn maintenance_events_filter_by_character_name() {
        let ana = manager("ana", slow_consts());
        let bo = manager("bo", slow_consts());

        let event = EmotionMaintenanceEvent::new(EmotionType::Joy, "ana", 0.9);
        ana.maintain_emotion(&event).await;
        bo.maintain_emotion(&event).await;

        assert!(ana
            .current_emotions()
            .await
            .get(EmotionType::Joy)
            .unwrap()
            .is_active());
        assert!(bo.current_emotions().await.is_all_baseline());
    }

    #[tokio::test]
    async fn maintenance_applies_even_while_paused() {
        let m = manager("held", slow_consts());
        m.pause_affect_computation();
        let event = EmotionMaintenanceEvent::new(EmotionType::Pride, "held", 0.7);
        m.maintain_emotion(&event).await;
        assert!(m
            .current_emotions()
            .await
            .get(EmotionType::Pride)
            .unwrap()
            .is_active());
    }

    #[tokio::test]
    async fn maintenance_physical_simulation_is_seeded() {
        let a = manager("twin", slow_consts());
        let b = manager("twin", slow_consts());
        let event = EmotionMaintenanceEvent::new(EmotionType::Physical, "twin", 0.8);
        a.maintain_emotion(&event).await;
        b.maintain_emotion(&event).await;

        let pa = a.current_emotions().await;
        let pb = b.current_emotions().await;
        let ea = pa.get(EmotionType::Physical).unwrap();
        let eb = pb.get(EmotionType::Physical).unwrap();
        assert!(ea.is_active());
        assert_eq!(ea.pad_point(), eb.pad_point(), "same seed, same sample");
    }

    #[tokio::test]
    async fn infuse_while_paused_returns_last_state_unchanged() {
        let m = manager("frozen", slow_consts());
        m.add_eec(Eec::new(EmotionType::Joy, 0.6, "x")).await;
        m.infer_emotions().await;
        m.pause_affect_computation();

        let before = m.current_emotions().await;
        let sample = PadEmotion::new(Mood::new(0.9, 0.9, 0.9), 1.0, "sensor");
        let returned = m.infuse_bio_signal_emotions(sample).await;

        assert_eq!(returned, before, "paused infuse returns the merged state");
        assert_eq!(m.current_emotions().await, before, "no mutation while paused");
    }

    #[tokio::test]
    async fn infuse_merges_physical_sample_when_active() {
        let m = manager("sensing", slow_consts());
        let pad = Mood::new(0.4, -0.2, 0.1);
        let returned = m
            .infuse_bio_signal_emotions(PadEmotion::new(pad, 0.8, "sensor"))
            .await;

        let physical = returned.get(EmotionType::Physical).unwrap();
        assert!(physical.is_active());
        assert_eq!(physical.pad_point(), pad);
        assert!(m
            .current_emotions()
            .await
            .get(EmotionType::Physical)
            .unwrap()
            .is_active());
    }

    #[tokio::test]
    async fn set_personality_resets_affect_state() {
        let m = manager("reborn", slow_consts());
        m.add_eec(Eec::new(EmotionType::Anger, 0.9, "insult")).await;
        m.infer_emotions().await;
        assert!(!m.current_emotions().await.is_all_baseline());

        let cheerful = Personality::new(0.2, 0.1, 0.8, 0.6, -0.4).unwrap();
        m.set_personality(cheerful).await;

        assert!(m.current_emotions().await.is_all_baseline());
        assert_eq!(m.default_mood().await, cheerful.default_mood());
        assert_eq!(m.current_mood().await, cheerful.default_mood());
    }

    #[tokio::test]
    async fn set_affect_consts_preserves_live_values() {
        let m = manager("retuned", slow_consts());
        m.add_eec(Eec::new(EmotionType::Hope, 0.8, "x")).await;
        m.infer_emotions().await;
        let before = m.current_emotions().await;
        let mood_before = m.current_mood().await;

        let mut consts = slow_consts();
        consts.emotion_decay_steps = 3;
        m.set_affect_consts(consts.clone()).await;

        assert_eq!(m.affect_consts().await, consts);
        assert_eq!(m.current_emotions().await, before);
        assert_eq!(m.current_mood().await, mood_before);
    }

    struct CountingSink {
        emotion_calls: AtomicUsize,
        mood_calls: AtomicUsize,
    }

    impl EmotionObserver for CountingSink {
        fn on_emotion_changed(&self, _character: &str, _emotions: &EmotionVector) {
            self.emotion_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl MoodObserver for CountingSink {
        fn on_mood_changed(&self, _snapshot: &AffectSnapshot) {
            self.mood_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn observers_receive_pushes_and_respect_disable() {
        let m = manager("watched", slow_consts());
        let sink = Arc::new(CountingSink {
            emotion_calls: AtomicUsize::new(0),
            mood_calls: AtomicUsize::new(0),
        });
        m.set_emotion_observer(Some(sink.clone() as Arc<dyn EmotionObserver>))
            .await;
        m.set_mood_observer(Some(sink.clone() as Arc<dyn MoodObserver>))
            .await;
        let attached = sink.emotion_calls.load(Ordering::SeqCst);
        assert!(attached >= 1, "attach pushes the current state");

        m.add_eec(Eec::new(EmotionType::Joy, 0.9, "x")).await;
        m.infer_emotions().await;
        assert!(sink.emotion_calls.load(Ordering::SeqCst) > attached);
        assert!(sink.mood_calls.load(Ordering::SeqCst) >= 1);

        m.set_observers_enabled(false);
        let frozen = sink.emotion_calls.load(Ordering::SeqCst);
        m.add_eec(Eec::new(EmotionType::Joy, 0.9, "y")).await;
        m.infer_emotions().await;
        assert_eq!(sink.emotion_calls.load(Ordering::SeqCst), frozen);
    }

    #[tokio::test]
    async fn scheduled_decay_cycle_ages_emotions() {
        let consts = AffectConsts {
            emotion_decay_period_ms: 20,
            emotion_decay_steps: 5,
            mood_return_period_ms: 20,
            ..Default::default()
        };
        let m = manager("ticking", consts);
        m.add_eec(Eec::new(EmotionType::Joy, 1.0, "spike")).await;
        m.infer_emotions().await;

        // 5 steps x 20ms = 100ms to reach baseline; leave generous slack.
        sleep(Duration::from_millis(400)).await;

        let current = m.current_emotions().await;
        assert!(
            !current.get(EmotionType::Joy).unwrap().is_active(),
            "scheduled decay should have returned joy to baseline"
        );
        // Mood was pulled while joy was active and is now returning.
        m.stop_all();
    }

    #[tokio::test]
    async fn eec_for_type_outside_catalog_is_ignored() {
        let consts = slow_consts();
        let m = CharacterManager::new(
            "narrow",
            Personality::default(),
            consts,
            false,
            Box::new(LinearDecay::new()),
            vec![EmotionType::Joy, EmotionType::Distress],
        );
        m.add_eec(Eec::new(EmotionType::Anger, 1.0, "offense")).await;
        let result = m.infer_emotions().await;
        assert!(result.is_all_baseline());
        assert_eq!(result.len(), 2);
    }
}
