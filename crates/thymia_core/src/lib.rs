//! # Thymia Core
//!
//! The affect data model shared by every Thymia crate:
//!
//! - **Emotions** ([`EmotionType`], [`Emotion`], [`EmotionVector`]): a closed
//!   appraisal catalog with PAD anchors; state snapshots are total coverings
//!   of the configured catalog, replaced wholesale.
//! - **Mood** ([`Mood`]): a bounded Pleasure-Arousal-Dominance point with
//!   octant naming.
//! - **Personality** ([`Personality`]): Big Five traits, the trait-to-PAD
//!   default mood, and the derived per-emotion relation table.
//! - **Configuration** ([`AffectConsts`], [`ThymiaConfig`]): TOML-loadable
//!   tuning constants with env overrides.
//!
//! No computation lives here; the engines are in `thymia_affect`.

pub mod config;
pub mod emotion;
pub mod error;
pub mod mood;
pub mod personality;

pub use config::{AffectConsts, CharacterSection, ThymiaConfig};
pub use emotion::{Emotion, EmotionType, EmotionVector, PadEmotion};
pub use error::AffectError;
pub use mood::Mood;
pub use personality::{EmotionRelation, Personality, PersonalityEmotionsRelations};
