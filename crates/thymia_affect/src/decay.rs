//! Emotion decay strategies
//!
//! A decay function ages an emotion's intensity toward its baseline over a
//! configured number of steps. The engine is agnostic to the installed
//! strategy; both variants here satisfy the same contract: monotone approach
//! to baseline, reaching it after at most `decay_steps` steps, and identity
//! at zero elapsed steps.

use std::num::NonZeroU32;

/// Strategy contract. `init` must be called before the first `decay`;
/// using an uninitialized function is a programming error and panics.
pub trait DecayFunction: Send + Sync {
    /// Configure the number of steps after which any intensity has reached
    /// baseline. Re-initializing replaces the step count.
    fn init(&mut self, decay_steps: u32);

    /// Decayed intensity after `steps_elapsed` steps. Stateless: the same
    /// inputs always produce the same output.
    fn decay(&self, intensity: f32, baseline: f32, steps_elapsed: u32) -> f32;
}

fn steps_or_panic(steps: Option<NonZeroU32>, which: &str) -> NonZeroU32 {
    match steps {
        Some(s) => s,
        None => panic!("{which}::decay called before init()"),
    }
}

/// Subtracts a fixed fraction of the full intensity range per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearDecay {
    steps: Option<NonZeroU32>,
}

impl LinearDecay {
    pub fn new() -> Self {
        Self { steps: None }
    }

    /// Convenience constructor that is already initialized.
    pub fn with_steps(decay_steps: u32) -> Self {
        let mut f = Self::new();
        f.init(decay_steps);
        f
    }
}

impl DecayFunction for LinearDecay {
    fn init(&mut self, decay_steps: u32) {
        self.steps = Some(NonZeroU32::new(decay_steps).unwrap_or(NonZeroU32::MIN));
    }

    fn decay(&self, intensity: f32, baseline: f32, steps_elapsed: u32) -> f32 {
        let steps = steps_or_panic(self.steps, "LinearDecay");
        if intensity <= baseline {
            return baseline;
        }
        // Full range is 1.0, so any starting intensity is back at baseline
        // after `steps` steps.
        let drop = steps_elapsed as f32 / steps.get() as f32;
        (intensity - drop).max(baseline)
    }
}

/// Geometric approach to baseline, with a snap threshold so the
/// baseline-after-`decay_steps` contract still holds exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialDecay {
    steps: Option<NonZeroU32>,
}

/// Excess below this snaps to baseline.
const SNAP_EPSILON: f32 = 0.01;

impl ExponentialDecay {
    pub fn new() -> Self {
        Self { steps: None }
    }

    pub fn with_steps(decay_steps: u32) -> Self {
        let mut f = Self::new();
        f.init(decay_steps);
        f
    }

    /// Per-step retain factor: after `steps` steps a unit excess has shrunk
    /// to `SNAP_EPSILON` and snaps.
    fn retain_per_step(steps: NonZeroU32) -> f32 {
        SNAP_EPSILON.powf(1.0 / steps.get() as f32)
    }
}

impl DecayFunction for ExponentialDecay {
    fn init(&mut self, decay_steps: u32) {
        self.steps = Some(NonZeroU32::new(decay_steps).unwrap_or(NonZeroU32::MIN));
    }

    fn decay(&self, intensity: f32, baseline: f32, steps_elapsed: u32) -> f32 {
        let steps = steps_or_panic(self.steps, "ExponentialDecay");
        if steps_elapsed == 0 {
            return intensity;
        }
        let excess = intensity - baseline;
        if excess <= 0.0 {
            return baseline;
        }
        let retained = excess * Self::retain_per_step(steps).powi(steps_elapsed as i32);
        if retained <= SNAP_EPSILON {
            baseline
        } else {
            baseline + retained
        }
    }
}
