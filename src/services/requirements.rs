use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::UniversityRequirement;

/// Errors that can occur while loading the requirement table.
///
/// Raised only when the source itself is unusable; individual bad rows are
/// skipped during load.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read requirement table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse requirement table: {0}")]
    Csv(#[from] csv::Error),
}

/// In-memory table of per-university admission requirements.
///
/// Loaded once at startup and read-only afterwards; handlers share it
/// behind an `Arc` in the application state.
#[derive(Debug, Clone, Default)]
pub struct RequirementStore {
    requirements: Vec<UniversityRequirement>,
}

/// Row shape of the requirements CSV. Headers are the spreadsheet column
/// names; course lists arrive as comma-separated strings (quoted in the
/// file to escape the embedded commas).
#[derive(Debug, Deserialize)]
struct RequirementRow {
    #[serde(rename = "University Name")]
    name: String,
    #[serde(rename = "Min GPA")]
    min_gpa: f64,
    #[serde(rename = "Min IELTS")]
    min_ielts: f64,
    #[serde(rename = "Required Extracurriculars")]
    required_extracurriculars: u32,
    #[serde(rename = "Engineering Credit Transfer", default)]
    engineering_credit_transfer: String,
    #[serde(rename = "Science Credit Transfer", default)]
    science_credit_transfer: String,
    #[serde(rename = "Business Credit Transfer", default)]
    business_credit_transfer: String,
    #[serde(rename = "Additional Requirements", default)]
    additional_requirements: String,
}

impl RequirementRow {
    fn into_requirement(self) -> UniversityRequirement {
        UniversityRequirement {
            name: self.name,
            min_gpa: self.min_gpa,
            min_ielts: self.min_ielts,
            required_extracurriculars: self.required_extracurriculars,
            engineering_transfer_courses: split_courses(&self.engineering_credit_transfer),
            science_transfer_courses: split_courses(&self.science_credit_transfer),
            business_transfer_courses: split_courses(&self.business_credit_transfer),
            additional_requirements: self.additional_requirements,
        }
    }
}

fn split_courses(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|course| !course.is_empty())
        .map(String::from)
        .collect()
}

impl RequirementStore {
    /// Load the requirement table from a CSV file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Load the requirement table from any reader.
    ///
    /// Malformed rows are skipped; blank lines are tolerated by the
    /// underlying reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut requirements = Vec::new();
        for record in csv_reader.deserialize::<RequirementRow>() {
            match record {
                Ok(row) => requirements.push(row.into_requirement()),
                Err(e) => tracing::debug!("Skipping malformed requirement row: {}", e),
            }
        }

        tracing::info!("Loaded {} university requirements", requirements.len());

        Ok(Self { requirements })
    }

    /// Build a store from already-typed requirements.
    pub fn from_requirements(requirements: Vec<UniversityRequirement>) -> Self {
        Self { requirements }
    }

    /// Empty table, used when the source cannot be read at startup.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UniversityRequirement> {
        self.requirements.iter()
    }

    /// Exact-match lookup by canonical name.
    pub fn lookup(&self, name: &str) -> Option<&UniversityRequirement> {
        self.requirements
            .iter()
            .find(|requirement| requirement.name == name)
    }

    /// Exact match first, then substring containment in either direction.
    pub fn resolve(&self, name: &str) -> Option<&UniversityRequirement> {
        self.lookup(name).or_else(|| {
            self.requirements
                .iter()
                .find(|requirement| {
                    name.contains(&requirement.name) || requirement.name.contains(name)
                })
        })
    }

    /// First university whose name appears in the question text.
    pub fn find_mentioned(&self, question: &str) -> Option<&UniversityRequirement> {
        let lower = question.to_lowercase();
        self.requirements
            .iter()
            .find(|requirement| lower.contains(&requirement.name.to_lowercase()))
    }

    /// Leading rows for the general requirements overview.
    pub fn overview(&self, count: usize) -> &[UniversityRequirement] {
        &self.requirements[..count.min(self.requirements.len())]
    }
}
