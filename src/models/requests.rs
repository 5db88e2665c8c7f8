use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::StudentProfile;

/// Student sheet as the frontend submits it: loose, string-valued fields
/// keyed by the spreadsheet column names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentSheet {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "GPA", default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(rename = "IELTS", default, skip_serializing_if = "Option::is_none")]
    pub ielts: Option<String>,
    #[serde(rename = "Major", default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(rename = "Year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(
        rename = "Extracurriculars",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extracurriculars: Option<String>,
    #[serde(rename = "Top 10", default, skip_serializing_if = "Option::is_none")]
    pub top_choices: Option<String>,
}

impl StudentSheet {
    /// Convert the loose sheet into a typed profile.
    ///
    /// Unparsable numerics become `None` and the scorer's defaults apply.
    /// The ranked choice list accepts both `", "` and `","` separators.
    pub fn to_profile(&self) -> StudentProfile {
        StudentProfile {
            gpa: self.parsed_gpa(),
            ielts: self.parsed_ielts(),
            major: self.major.clone().unwrap_or_default(),
            extracurriculars: split_list(self.extracurriculars.as_deref().unwrap_or_default()),
            ranked_choices: split_list(self.top_choices.as_deref().unwrap_or_default()),
        }
    }

    pub fn parsed_gpa(&self) -> Option<f64> {
        self.gpa.as_deref().and_then(parse_number)
    }

    pub fn parsed_ielts(&self) -> Option<f64> {
        self.ielts.as_deref().and_then(parse_number)
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Request to score a student's ranked university choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub student: StudentSheet,
}

/// Request for one advisory chat turn
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatMessageRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    #[serde(default)]
    pub message: String,
    #[serde(
        rename = "studentProfile",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub student_profile: Option<StudentSheet>,
}
