//! Library error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffectError {
    #[error("personality trait {name} out of range: {value} (expected -1.0..=1.0)")]
    TraitOutOfRange { name: &'static str, value: f32 },

    #[error("affect constant {name} out of range: {value}")]
    ConstantOutOfRange { name: &'static str, value: f64 },

    #[error("unknown emotion type: {0}")]
    UnknownEmotionType(String),
}
