use serde::{Deserialize, Serialize};

/// Admission requirements for one partner university.
///
/// Loaded once at startup from the requirements CSV and immutable for the
/// process lifetime. `name` is the canonical lookup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversityRequirement {
    pub name: String,
    pub min_gpa: f64,
    pub min_ielts: f64,
    pub required_extracurriculars: u32,
    pub engineering_transfer_courses: Vec<String>,
    pub science_transfer_courses: Vec<String>,
    pub business_transfer_courses: Vec<String>,
    pub additional_requirements: String,
}

impl UniversityRequirement {
    /// Transfer course list for a major category, if the category has one.
    pub fn transfer_courses(&self, category: MajorCategory) -> Option<&[String]> {
        match category {
            MajorCategory::Engineering => Some(&self.engineering_transfer_courses),
            MajorCategory::Science => Some(&self.science_transfer_courses),
            MajorCategory::Business => Some(&self.business_transfer_courses),
            MajorCategory::Other => None,
        }
    }
}

/// Typed student profile derived from the loose request sheet.
///
/// Numeric fields stay optional; the scorer substitutes the documented
/// defaults (GPA 3.5, IELTS 7.0) when they are missing or unparsable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub gpa: Option<f64>,
    pub ielts: Option<f64>,
    pub major: String,
    pub extracurriculars: Vec<String>,
    pub ranked_choices: Vec<String>,
}

impl StudentProfile {
    pub const DEFAULT_GPA: f64 = 3.5;
    pub const DEFAULT_IELTS: f64 = 7.0;

    pub fn gpa_or_default(&self) -> f64 {
        self.gpa.unwrap_or(Self::DEFAULT_GPA)
    }

    pub fn ielts_or_default(&self) -> f64 {
        self.ielts.unwrap_or(Self::DEFAULT_IELTS)
    }

    pub fn major_category(&self) -> MajorCategory {
        MajorCategory::from_major(&self.major)
    }
}

/// Major category resolved from the free-text major field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorCategory {
    Engineering,
    Science,
    Business,
    Other,
}

/// Ordered keyword rules for major classification. First match wins.
const MAJOR_RULES: &[(&str, MajorCategory)] = &[
    ("engineer", MajorCategory::Engineering),
    ("science", MajorCategory::Science),
    ("business", MajorCategory::Business),
    ("economics", MajorCategory::Business),
];

impl MajorCategory {
    pub fn from_major(major: &str) -> Self {
        let lower = major.to_lowercase();
        MAJOR_RULES
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or(MajorCategory::Other)
    }

    /// Discipline label used in explanation text.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            MajorCategory::Engineering => Some("engineering"),
            MajorCategory::Science => Some("science"),
            MajorCategory::Business => Some("business"),
            MajorCategory::Other => None,
        }
    }
}

/// Scored result for one (student, university) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    pub university: String,
    /// Match score in [3.0, 10.0], rounded to one decimal.
    #[serde(rename = "rank")]
    pub score: f64,
    pub explanation: String,
    pub details: RequirementSnapshot,
}

/// Read-only projection of the resolved requirement, echoed to the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequirementSnapshot {
    #[serde(rename = "minGPA")]
    pub min_gpa: f64,
    #[serde(rename = "minIELTS")]
    pub min_ielts: f64,
    #[serde(rename = "requiredExtracurriculars")]
    pub required_extracurriculars: u32,
}

/// Scoring weights for the weighted-sum match formula.
///
/// Defaults are the documented formula constants; changing them silently
/// changes scored outcomes.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub base: f64,
    pub gpa: f64,
    pub language: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 0.3,
            gpa: 4.0,
            language: 2.5,
        }
    }
}

/// Requirement context resolved for one advisory question.
///
/// Passed structured between the store, the responder, and the prompt
/// builder; it is rendered to text only at the prompt boundary.
#[derive(Debug, Clone)]
pub enum AdvisoryContext {
    /// The question names a stored university.
    University(UniversityContext),
    /// The question asks about requirements without naming a university.
    RequirementsOverview(Vec<RequirementSummary>),
    /// The question asks about credit transfer without naming a university.
    TransferPolicies,
    /// No requirement data is relevant to the question.
    Empty,
}

impl AdvisoryContext {
    pub fn university(&self) -> Option<&UniversityContext> {
        match self {
            AdvisoryContext::University(context) => Some(context),
            _ => None,
        }
    }
}

/// Requirement block for one university, scoped to what the question asked.
///
/// Transfer lists are populated only when the question mentions credit
/// transfer for that discipline.
#[derive(Debug, Clone)]
pub struct UniversityContext {
    pub name: String,
    pub min_gpa: f64,
    pub min_ielts: f64,
    pub required_extracurriculars: u32,
    pub engineering_transfer: Option<Vec<String>>,
    pub science_transfer: Option<Vec<String>>,
    pub business_transfer: Option<Vec<String>>,
    pub additional_requirements: String,
}

/// One line of the general requirements overview.
#[derive(Debug, Clone)]
pub struct RequirementSummary {
    pub name: String,
    pub min_gpa: f64,
    pub min_ielts: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_category_first_match_wins() {
        assert_eq!(
            MajorCategory::from_major("Engineering Science"),
            MajorCategory::Engineering
        );
        assert_eq!(
            MajorCategory::from_major("Computer Science"),
            MajorCategory::Science
        );
        assert_eq!(
            MajorCategory::from_major("Business Administration"),
            MajorCategory::Business
        );
        assert_eq!(MajorCategory::from_major("Economics"), MajorCategory::Business);
        assert_eq!(MajorCategory::from_major("Fine Arts"), MajorCategory::Other);
    }

    #[test]
    fn test_major_category_case_insensitive() {
        assert_eq!(
            MajorCategory::from_major("MECHANICAL ENGINEERING"),
            MajorCategory::Engineering
        );
    }

    #[test]
    fn test_student_profile_defaults() {
        let profile = StudentProfile {
            gpa: None,
            ielts: None,
            major: String::new(),
            extracurriculars: vec![],
            ranked_choices: vec![],
        };

        assert_eq!(profile.gpa_or_default(), 3.5);
        assert_eq!(profile.ielts_or_default(), 7.0);
    }

    #[test]
    fn test_default_weights_match_formula() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.base, 0.3);
        assert_eq!(weights.gpa, 4.0);
        assert_eq!(weights.language, 2.5);
    }
}
