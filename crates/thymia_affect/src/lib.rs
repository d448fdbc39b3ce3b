//! # Thymia Affect Engine
//!
//! The computational half of Thymia: turns elicited conditions into a
//! running emotional state and a drifting PAD mood, one character per
//! [`CharacterManager`].
//!
//! ## Architecture
//!
//! Each manager runs two background cycles, continuously:
//! 1. The **decay cycle** ages the emotion vector through the installed
//!    [`DecayFunction`].
//! 2. The **mood cycle** advances the mood point via the [`MoodEngine`].
//!
//! External elicitors enter through [`CharacterManager::add_eec`] and are
//! appraised lazily by [`CharacterManager::infer_emotions`]; biosignal
//! samples and maintenance events have their own entry points. Every state
//! change is pushed synchronously to the attached observer sinks.
//!
//! ## Exclusion model
//!
//! All shared state of one character sits behind a single mutex; cycles and
//! entry points of different characters never contend.

mod character;
mod decay;
mod engine;
mod event;
mod history;
mod mood_engine;
mod observer;

pub use character::CharacterManager;
pub use decay::{DecayFunction, ExponentialDecay, LinearDecay};
pub use engine::{Eec, EmotionEngine};
pub use event::EmotionMaintenanceEvent;
pub use history::EmotionHistory;
pub use mood_engine::MoodEngine;
pub use observer::{AffectSnapshot, EmotionObserver, MoodObserver};
