//! Big Five personality profile and its derived affect tables
//!
//! Personality is the fixed disposition layer: it never changes during
//! computation, but everything downstream is parameterized by it — the
//! default mood the character returns to, and the per-emotion influence
//! factors and resting baselines used during appraisal.

use crate::emotion::EmotionType;
use crate::error::AffectError;
use crate::mood::Mood;
use serde::{Deserialize, Serialize};

/// A Big Five trait profile. Every trait lives in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    pub openness: f32,
    pub conscientiousness: f32,
    pub extraversion: f32,
    pub agreeableness: f32,
    pub neuroticism: f32,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            openness: 0.0,
            conscientiousness: 0.0,
            extraversion: 0.0,
            agreeableness: 0.0,
            neuroticism: 0.0,
        }
    }
}

impl Personality {
    pub fn new(
        openness: f32,
        conscientiousness: f32,
        extraversion: f32,
        agreeableness: f32,
        neuroticism: f32,
    ) -> Result<Self, AffectError> {
        let p = Self {
            openness,
            conscientiousness,
            extraversion,
            agreeableness,
            neuroticism,
        };
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> Result<(), AffectError> {
        for (name, value) in [
            ("openness", self.openness),
            ("conscientiousness", self.conscientiousness),
            ("extraversion", self.extraversion),
            ("agreeableness", self.agreeableness),
            ("neuroticism", self.neuroticism),
        ] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(AffectError::TraitOutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// The mood this character rests at, from the trait-to-PAD regression
    /// (Mehrabian's temperament mapping). Derived once per personality and
    /// immutable for its lifetime.
    pub fn default_mood(&self) -> Mood {
        let pleasure =
            0.21 * self.extraversion + 0.59 * self.agreeableness + 0.19 * self.neuroticism;
        let arousal =
            0.15 * self.openness + 0.30 * self.agreeableness - 0.57 * self.neuroticism;
        let dominance = 0.25 * self.openness + 0.17 * self.conscientiousness
            + 0.60 * self.extraversion
            - 0.32 * self.agreeableness;
        Mood::new(pleasure, arousal, dominance)
    }

    /// How strongly this profile disposes toward each emotion, in [-1, 1].
    /// Positive affinity means the emotion comes easily to this character.
    fn trait_affinity(&self, kind: EmotionType) -> f32 {
        let [o, c, e, a, n] = affinity_weights(kind);
        let raw = o * self.openness
            + c * self.conscientiousness
            + e * self.extraversion
            + a * self.agreeableness
            + n * self.neuroticism;
        raw.clamp(-1.0, 1.0)
    }

    /// Derive the full per-emotion relation table. `influence_scale` and
    /// `max_baseline` come from the affect constants bundle.
    pub fn emotions_relations(
        &self,
        influence_scale: f32,
        max_baseline: f32,
    ) -> PersonalityEmotionsRelations {
        let entries = EmotionType::all()
            .iter()
            .map(|&kind| {
                let affinity = self.trait_affinity(kind);
                // Appraisal gain: even counter-disposed emotions can be
                // elicited, at reduced gain.
                let influence = ((1.0 + affinity) / 2.0).clamp(0.0, 1.0);
                // Resting baseline: only positively disposed emotions
                // idle above zero.
                let baseline = (affinity.max(0.0) * influence_scale)
                    .min(max_baseline)
                    .max(0.0);
                EmotionRelation {
                    kind,
                    influence,
                    baseline,
                }
            })
            .collect();
        PersonalityEmotionsRelations {
            entries,
            max_baseline,
        }
    }
}

/// Per-trait weights [O, C, E, A, N] for each emotion's affinity row.
fn affinity_weights(kind: EmotionType) -> [f32; 5] {
    use EmotionType::*;
    match kind {
        Joy => [0.1, 0.0, 0.5, 0.3, -0.3],
        Distress => [0.0, -0.1, -0.2, 0.0, 0.6],
        Hope => [0.3, 0.1, 0.3, 0.2, -0.2],
        Fear => [0.0, -0.1, -0.3, 0.0, 0.7],
        Satisfaction => [0.1, 0.4, 0.2, 0.2, -0.2],
        Relief => [0.0, 0.0, 0.1, 0.1, 0.3],
        FearsConfirmed => [0.0, -0.1, -0.2, 0.0, 0.7],
        Disappointment => [0.0, -0.2, -0.1, 0.1, 0.5],
        HappyFor => [0.1, 0.0, 0.3, 0.6, -0.1],
        Pity => [0.2, 0.0, 0.0, 0.6, 0.1],
        Gloating => [-0.1, -0.1, 0.2, -0.6, 0.2],
        Resentment => [-0.1, 0.0, -0.1, -0.5, 0.5],
        Pride => [0.0, 0.3, 0.4, -0.1, -0.1],
        Shame => [0.0, 0.2, -0.3, 0.2, 0.6],
        Admiration => [0.4, 0.1, 0.2, 0.4, -0.1],
        Reproach => [-0.1, 0.3, 0.0, -0.4, 0.3],
        Gratification => [0.1, 0.5, 0.2, 0.0, -0.2],
        Remorse => [0.0, 0.3, -0.1, 0.3, 0.5],
        Gratitude => [0.1, 0.1, 0.2, 0.5, -0.1],
        Anger => [-0.1, -0.2, 0.1, -0.5, 0.6],
        Liking => [0.2, 0.0, 0.4, 0.4, -0.2],
        Disliking => [-0.1, 0.0, -0.1, -0.4, 0.4],
        Love => [0.2, 0.0, 0.4, 0.5, -0.2],
        Hate => [-0.2, -0.1, 0.0, -0.6, 0.5],
        Physical => [0.0, 0.0, 0.0, 0.0, 0.0],
    }
}

/// One row of the derived relation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionRelation {
    pub kind: EmotionType,
    /// Appraisal gain in [0, 1].
    pub influence: f32,
    /// Resting intensity in [0, max_baseline].
    pub baseline: f32,
}

/// Personality-derived influence factors and baselines, one row per catalog
/// entry. Read-only once built; rebuilt whenever personality or the affect
/// constants change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityEmotionsRelations {
    entries: Vec<EmotionRelation>,
    max_baseline: f32,
}

impl PersonalityEmotionsRelations {
    pub fn influence(&self, kind: EmotionType) -> f32 {
        self.entry(kind).map(|r| r.influence).unwrap_or(0.5)
    }

    pub fn baseline(&self, kind: EmotionType) -> f32 {
        self.entry(kind).map(|r| r.baseline).unwrap_or(0.0)
    }

    pub fn max_baseline(&self) -> f32 {
        self.max_baseline
    }

    pub fn entries(&self) -> &[EmotionRelation] {
        &self.entries
    }

    fn entry(&self, kind: EmotionType) -> Option<&EmotionRelation> {
        self.entries.iter().find(|r| r.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range_traits() {
        assert!(Personality::new(0.0, 0.0, 1.5, 0.0, 0.0).is_err());
        assert!(Personality::new(0.0, 0.0, 0.0, 0.0, f32::NAN).is_err());
        assert!(Personality::new(-1.0, 1.0, 0.3, -0.2, 0.9).is_ok());
    }

    #[test]
    fn default_mood_of_neutral_profile_is_neutral() {
        let mood = Personality::default().default_mood();
        assert_eq!(mood, Mood::neutral());
    }

    #[test]
    fn default_mood_stays_in_bounds_at_extremes() {
        let p = Personality::new(1.0, 1.0, 1.0, 1.0, 1.0).unwrap();
        let m = p.default_mood();
        for axis in [m.pleasure, m.arousal, m.dominance] {
            assert!((-1.0..=1.0).contains(&axis));
        }
    }

    #[test]
    fn extravert_rests_more_pleasant_than_neurotic() {
        let extravert = Personality::new(0.0, 0.0, 0.8, 0.3, -0.3).unwrap();
        let neurotic = Personality::new(0.0, 0.0, -0.2, 0.0, 0.9).unwrap();
        assert!(extravert.default_mood().pleasure > neurotic.default_mood().pleasure);
        assert!(extravert.default_mood().arousal > neurotic.default_mood().arousal);
    }

    #[test]
    fn relations_cover_whole_catalog_with_bounded_rows() {
        let p = Personality::new(0.4, -0.2, 0.7, 0.1, -0.5).unwrap();
        let rels = p.emotions_relations(0.5, 0.75);
        assert_eq!(rels.entries().len(), EmotionType::all().len());
        for row in rels.entries() {
            assert!((0.0..=1.0).contains(&row.influence), "influence {row:?}");
            assert!((0.0..=0.75).contains(&row.baseline), "baseline {row:?}");
        }
    }

    #[test]
    fn baseline_respects_max_cap() {
        // Maximally joy-disposed profile against a tight cap.
        let p = Personality::new(1.0, 0.0, 1.0, 1.0, -1.0).unwrap();
        let rels = p.emotions_relations(1.0, 0.3);
        assert!(rels.baseline(EmotionType::Joy) <= 0.3);
    }

    #[test]
    fn neurotic_profile_has_higher_fear_baseline() {
        let neurotic = Personality::new(0.0, 0.0, 0.0, 0.0, 0.9).unwrap();
        let stable = Personality::new(0.0, 0.0, 0.0, 0.0, -0.9).unwrap();
        let n = neurotic.emotions_relations(0.5, 0.75);
        let s = stable.emotions_relations(0.5, 0.75);
        assert!(n.baseline(EmotionType::Fear) > s.baseline(EmotionType::Fear));
        assert!(n.influence(EmotionType::Fear) > s.influence(EmotionType::Fear));
    }
}
