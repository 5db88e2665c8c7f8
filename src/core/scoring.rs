use crate::models::{MajorCategory, RequirementSnapshot, ScoringWeights, UniversityRequirement};

/// Moderate base score every candidate starts from.
pub const BASE_SCORE: f64 = 7.0;

/// Final scores are clamped to this range and rounded to one decimal.
pub const MIN_SCORE: f64 = 3.0;
pub const MAX_SCORE: f64 = 10.0;

/// Universities held to stricter GPA standards. Detected by name substring
/// because the requirement table carries no tier column.
const ELITE_MARKERS: &[&str] = &["MIT", "Harvard", "Stanford"];

pub fn is_elite(university: &str) -> bool {
    ELITE_MARKERS
        .iter()
        .any(|marker| university.contains(marker))
}

/// Stepped GPA tolerance factor.
///
/// 1.0 when the requirement is met, then 0.8 / 0.6 / 0.3 at 0.2 and 0.5
/// below it. Elite universities halve the factor whenever the requirement
/// is missed. The steps are part of the scoring contract; do not smooth
/// them.
pub fn gpa_factor(gpa: f64, min_gpa: f64, elite: bool) -> f64 {
    let mut factor = if gpa >= min_gpa {
        1.0
    } else if gpa >= min_gpa - 0.2 {
        0.8
    } else if gpa >= min_gpa - 0.5 {
        0.6
    } else {
        0.3
    };

    if elite && gpa < min_gpa {
        factor *= 0.5;
    }

    factor
}

/// Stepped IELTS tolerance factor: 1.0 / 0.7 / 0.4 at the requirement and
/// 0.5 below it.
pub fn language_factor(ielts: f64, min_ielts: f64) -> f64 {
    if ielts >= min_ielts {
        1.0
    } else if ielts >= min_ielts - 0.5 {
        0.7
    } else {
        0.4
    }
}

/// Bonus rewarding earlier-ranked choices; decreases by 0.05 per position
/// and reaches zero from position 10.
pub fn ranking_bonus(position: usize) -> f64 {
    (0.5 - 0.05 * position as f64).max(0.0)
}

/// Compose the final match score for one (student, university) pair.
///
/// Weighted sum of the base score and both tolerance factors, plus the
/// ranking bonus, plus 0.5 for a top-three choice when both factors are at
/// least 0.7. Elite universities are capped at 6.0 when the GPA is more
/// than 0.5 below their requirement. Clamped to [3.0, 10.0] and rounded to
/// one decimal.
pub fn compose_score(
    weights: &ScoringWeights,
    gpa_factor: f64,
    language_factor: f64,
    position: usize,
    elite: bool,
    gpa: f64,
    min_gpa: f64,
) -> f64 {
    let mut score = weights.base * BASE_SCORE
        + weights.gpa * gpa_factor
        + weights.language * language_factor
        + ranking_bonus(position);

    // Top-choice bonus only when the student is mostly qualified
    if position < 3 && gpa_factor >= 0.7 && language_factor >= 0.7 {
        score += 0.5;
    }

    if elite && gpa < min_gpa - 0.5 {
        score = score.min(6.0);
    }

    round_to_tenth(score.clamp(MIN_SCORE, MAX_SCORE))
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the human-readable explanation for one scored pair.
///
/// Sentence order: rank position, score-band opener, GPA analysis, IELTS
/// analysis, optional credit-transfer line, optional extracurricular line,
/// optional additional-requirements line.
pub fn build_explanation(
    score: f64,
    position: usize,
    gpa: f64,
    ielts: f64,
    snapshot: &RequirementSnapshot,
    requirement: Option<&UniversityRequirement>,
    major: MajorCategory,
) -> String {
    let gpa_text = gpa_sentence(gpa, snapshot.min_gpa);
    let ielts_text = ielts_sentence(ielts, snapshot.min_ielts);
    let credit_text = requirement
        .map(|requirement| credit_sentence(requirement, major))
        .unwrap_or_default();
    let eca_text = requirement
        .map(|requirement| extracurricular_sentence(requirement.required_extracurriculars))
        .unwrap_or_default();

    let rank_text = format!("This university was your #{} choice. ", position + 1);

    let mut explanation = if score >= 9.0 {
        format!("{rank_text}Excellent match! {gpa_text} {ielts_text}{credit_text}{eca_text}")
    } else if score >= 8.0 {
        format!("{rank_text}Very good match. {gpa_text} {ielts_text}{credit_text}{eca_text}")
    } else if score >= 7.0 {
        format!("{rank_text}Good match. {gpa_text} {ielts_text}{credit_text}{eca_text}")
    } else if score >= 5.0 {
        format!(
            "{rank_text}Moderate match. {gpa_text} {ielts_text}{credit_text}{eca_text} You may want to consider other options."
        )
    } else {
        format!(
            "{rank_text}Low match. {gpa_text} {ielts_text}{credit_text}{eca_text} This university may be a reach for your current profile."
        )
    };

    if let Some(requirement) = requirement {
        if !requirement.additional_requirements.is_empty() {
            explanation.push_str(&format!(
                "\nAdditional Requirements: {}",
                requirement.additional_requirements
            ));
        }
    }

    explanation
}

fn gpa_sentence(gpa: f64, min_gpa: f64) -> String {
    if gpa >= min_gpa + 0.3 {
        format!(
            "Your GPA of {gpa} significantly exceeds their minimum requirement of {min_gpa}, giving you a strong academic advantage."
        )
    } else if gpa >= min_gpa {
        format!(
            "Your GPA of {gpa} meets their minimum requirement of {min_gpa}, though strengthening other parts of your application would be beneficial."
        )
    } else if gpa >= min_gpa - 0.3 {
        format!(
            "Your GPA of {gpa} is slightly below their minimum requirement of {min_gpa}. This university places high value on extracurricular activities, which could compensate for this gap."
        )
    } else {
        format!(
            "Your GPA of {gpa} is below their minimum requirement of {min_gpa}. This university has historically been very selective about GPA requirements."
        )
    }
}

fn ielts_sentence(ielts: f64, min_ielts: f64) -> String {
    if ielts >= min_ielts + 0.5 {
        format!(
            "Your IELTS score of {ielts} is well above their requirement of {min_ielts}, which will strengthen your application."
        )
    } else if ielts >= min_ielts {
        format!("Your IELTS score of {ielts} meets their minimum requirement of {min_ielts}.")
    } else {
        format!(
            "Your IELTS score of {ielts} is below their minimum requirement of {min_ielts}. Consider retaking the test or providing additional language proficiency evidence."
        )
    }
}

fn credit_sentence(requirement: &UniversityRequirement, major: MajorCategory) -> String {
    let Some(label) = major.label() else {
        return String::new();
    };
    let Some(courses) = requirement.transfer_courses(major) else {
        return String::new();
    };
    if courses.is_empty() {
        return String::new();
    }

    let count = courses.len();
    let quality = if count > 5 { "excellent" } else { "moderate" };
    format!(
        "\nCredit Transfer: This university accepts {count} {label} courses for transfer, which is {quality} for your program."
    )
}

fn extracurricular_sentence(required: u32) -> String {
    if required >= 4 {
        format!(
            "\nThis university places significant emphasis on extracurricular activities ({required} recommended), so highlight your leadership roles and community involvement."
        )
    } else if required >= 2 {
        format!(
            "\nThis university values extracurricular involvement ({required} activities recommended) alongside academic performance."
        )
    } else {
        "\nThis university focuses primarily on academic metrics, with minimal emphasis on extracurricular activities."
            .to_string()
    }
}
