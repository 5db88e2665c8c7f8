use crate::core::normalizer::normalize_university_name;
use crate::core::scoring::{
    build_explanation, compose_score, gpa_factor, is_elite, language_factor,
};
use crate::models::{RankedMatch, RequirementSnapshot, ScoringWeights, StudentProfile};
use crate::services::requirements::RequirementStore;

/// Thresholds applied when a choice cannot be resolved in the store.
const UNRESOLVED_DEFAULTS: RequirementSnapshot = RequirementSnapshot {
    min_gpa: 3.5,
    min_ielts: 7.0,
    required_extracurriculars: 3,
};

/// Ranking orchestrator.
///
/// For each ranked choice: normalize the name, resolve its requirements
/// (falling back to defaults), score the pair, and build the explanation.
/// Results are sorted descending by score.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score every ranked choice for this student.
    ///
    /// An empty choice list yields an empty result, never an error.
    pub fn rank(&self, student: &StudentProfile, store: &RequirementStore) -> Vec<RankedMatch> {
        let gpa = student.gpa_or_default();
        let ielts = student.ielts_or_default();
        let major = student.major_category();

        let mut rankings: Vec<RankedMatch> = student
            .ranked_choices
            .iter()
            .enumerate()
            .map(|(position, choice)| {
                let canonical = normalize_university_name(choice);
                let requirement = store.resolve(&canonical);
                let snapshot = requirement
                    .map(|requirement| RequirementSnapshot {
                        min_gpa: requirement.min_gpa,
                        min_ielts: requirement.min_ielts,
                        required_extracurriculars: requirement.required_extracurriculars,
                    })
                    .unwrap_or(UNRESOLVED_DEFAULTS);

                let elite = is_elite(&canonical);
                let gpa_factor = gpa_factor(gpa, snapshot.min_gpa, elite);
                let language_factor = language_factor(ielts, snapshot.min_ielts);
                let score = compose_score(
                    &self.weights,
                    gpa_factor,
                    language_factor,
                    position,
                    elite,
                    gpa,
                    snapshot.min_gpa,
                );

                let explanation = build_explanation(
                    score,
                    position,
                    gpa,
                    ielts,
                    &snapshot,
                    requirement,
                    major,
                );

                RankedMatch {
                    university: canonical,
                    score,
                    explanation,
                    details: snapshot,
                }
            })
            .collect();

        // Sort by score (descending); ties keep their submitted order
        rankings.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        rankings
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
