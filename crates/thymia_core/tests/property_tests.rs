//! Property-based tests for the core affect data model.
//!
//! Verifies that derived moods and relation tables stay within documented
//! bounds for any valid personality, and that mood-space primitives never
//! leave the PAD cube.

use proptest::prelude::*;
use thymia_core::{EmotionType, Mood, Personality};

// ============================================================================
// Strategies
// ============================================================================

fn arb_personality() -> impl Strategy<Value = Personality> {
    (
        -1.0f32..=1.0,
        -1.0f32..=1.0,
        -1.0f32..=1.0,
        -1.0f32..=1.0,
        -1.0f32..=1.0,
    )
        .prop_map(|(o, c, e, a, n)| Personality::new(o, c, e, a, n).unwrap())
}

fn arb_mood() -> impl Strategy<Value = Mood> {
    (-1.0f32..=1.0, -1.0f32..=1.0, -1.0f32..=1.0).prop_map(|(p, a, d)| Mood::new(p, a, d))
}

// ============================================================================
// Personality-derived bounds
// ============================================================================

proptest! {
    /// The default mood is inside the PAD cube for any trait profile.
    #[test]
    fn default_mood_always_in_bounds(p in arb_personality()) {
        let m = p.default_mood();
        prop_assert!((-1.0..=1.0).contains(&m.pleasure));
        prop_assert!((-1.0..=1.0).contains(&m.arousal));
        prop_assert!((-1.0..=1.0).contains(&m.dominance));
    }

    /// Every relation row is bounded: influence in [0,1], baseline in
    /// [0, max_baseline], for any profile and any cap.
    #[test]
    fn relation_rows_always_bounded(
        p in arb_personality(),
        scale in 0.0f32..=1.0,
        cap in 0.0f32..=1.0,
    ) {
        let rels = p.emotions_relations(scale, cap);
        for kind in EmotionType::all() {
            let influence = rels.influence(*kind);
            let baseline = rels.baseline(*kind);
            prop_assert!((0.0..=1.0).contains(&influence), "influence {influence} for {kind}");
            prop_assert!(baseline >= 0.0 && baseline <= cap, "baseline {baseline} for {kind} (cap {cap})");
        }
    }
}

// ============================================================================
// Mood-space primitives
// ============================================================================

proptest! {
    /// lerp output never leaves the cube, for any t.
    #[test]
    fn lerp_stays_in_cube(a in arb_mood(), b in arb_mood(), t in -2.0f32..=2.0) {
        let m = a.lerp(&b, t);
        prop_assert!((-1.0..=1.0).contains(&m.pleasure));
        prop_assert!((-1.0..=1.0).contains(&m.arousal));
        prop_assert!((-1.0..=1.0).contains(&m.dominance));
    }

    /// step_toward always shrinks (or keeps) the distance to the target and
    /// never overshoots an axis.
    #[test]
    fn step_toward_contracts(from in arb_mood(), target in arb_mood(), step in 0.0f32..=2.0) {
        let next = from.step_toward(&target, step);
        prop_assert!(next.distance(&target) <= from.distance(&target) + 1e-6);
        // Axes never cross past the target.
        for (f, n, t) in [
            (from.pleasure, next.pleasure, target.pleasure),
            (from.arousal, next.arousal, target.arousal),
            (from.dominance, next.dominance, target.dominance),
        ] {
            let lo = f.min(t) - 1e-6;
            let hi = f.max(t) + 1e-6;
            prop_assert!(n >= lo && n <= hi, "axis moved outside [{lo}, {hi}]: {n}");
        }
    }

    /// The octant label never panics and the description is non-empty.
    #[test]
    fn describe_well_formed(m in arb_mood()) {
        let desc = m.describe();
        prop_assert!(!desc.is_empty());
    }
}
