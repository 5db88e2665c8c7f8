use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::{AdvisoryContext, StudentSheet};

/// Errors that can occur when calling the text-generation service.
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the external text-generation endpoint.
///
/// One attempt per question, no retries: any failure is absorbed by the
/// caller's local template fallback. The request timeout bounds the only
/// suspending operation in the service.
pub struct GenAiClient {
    endpoint: String,
    api_key: String,
    model_id: String,
    client: Client,
}

impl GenAiClient {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(endpoint: String, api_key: String, model_id: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            model_id,
            client,
        }
    }

    /// Request a completion for the given prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let payload = serde_json::json!({
            "model_id": self.model_id,
            "input": prompt,
            "parameters": {
                "decoding_method": "greedy",
                "max_new_tokens": 500,
                "min_new_tokens": 50,
                "temperature": 0.7,
                "top_p": 0.9,
                "repetition_penalty": 1.2
            }
        });

        tracing::debug!("Requesting completion from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenAiError::ApiError(format!(
                "Generation request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let text = json
            .get("results")
            .and_then(|results| results.as_array())
            .and_then(|results| results.first())
            .and_then(|result| result.get("generated_text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| GenAiError::InvalidResponse("Missing generated_text".into()))?;

        Ok(text.to_string())
    }
}

/// Build the generation prompt from the question, the student profile, and
/// the structured requirement context.
///
/// This is the only place structured context is rendered to text.
pub fn build_prompt(
    message: &str,
    student: Option<&StudentSheet>,
    context: &AdvisoryContext,
) -> String {
    let mut prompt = format!(
        "You are an AI assistant for a university exchange program. Answer the following \
         question based on the provided context.\n\nStudent question: {message}\n\n"
    );

    if let Some(student) = student {
        let field = |value: &Option<String>| {
            value
                .clone()
                .unwrap_or_else(|| "Not provided".to_string())
        };
        prompt.push_str(&format!(
            "Student profile:\nGPA: {}\nIELTS: {}\nMajor: {}\nYear: {}\n\n",
            field(&student.gpa),
            field(&student.ielts),
            field(&student.major),
            field(&student.year),
        ));
    }

    let context_block = render_context(context);
    if !context_block.is_empty() {
        prompt.push_str(&format!(
            "Relevant university information:\n{context_block}\n"
        ));
    }

    prompt.push_str(
        "Provide a helpful, accurate response. If the student is asking about a university \
         with requirements significantly above their profile, suggest alternatives or ways \
         to strengthen their application. If specific credit transfer information is \
         requested, be precise about which courses transfer and which don't.\n\nYour response:",
    );

    prompt
}

fn render_context(context: &AdvisoryContext) -> String {
    match context {
        AdvisoryContext::University(university) => {
            let mut block = format!(
                "University: {}\nGPA Requirement: {}\nIELTS Requirement: {}\nRequired Extracurriculars: {}\n",
                university.name,
                university.min_gpa,
                university.min_ielts,
                university.required_extracurriculars
            );
            if let Some(courses) = &university.engineering_transfer {
                block.push_str(&format!(
                    "Engineering Credit Transfer: {}\n",
                    courses.join(", ")
                ));
            }
            if let Some(courses) = &university.science_transfer {
                block.push_str(&format!("Science Credit Transfer: {}\n", courses.join(", ")));
            }
            if let Some(courses) = &university.business_transfer {
                block.push_str(&format!(
                    "Business Credit Transfer: {}\n",
                    courses.join(", ")
                ));
            }
            block.push_str(&format!(
                "Additional Requirements: {}\n",
                university.additional_requirements
            ));
            block
        }
        AdvisoryContext::RequirementsOverview(summaries) => {
            let mut block =
                String::from("Here's a summary of requirements for top universities:\n");
            for summary in summaries {
                block.push_str(&format!(
                    "{}: GPA {}, IELTS {}\n",
                    summary.name, summary.min_gpa, summary.min_ielts
                ));
            }
            block
        }
        AdvisoryContext::TransferPolicies => String::from(
            "Credit transfer policies vary by university and department. Some courses may \
             not be transferable. It's important to check specific course equivalencies \
             before applying.\n",
        ),
        AdvisoryContext::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RequirementSummary, UniversityContext};

    fn university_context() -> AdvisoryContext {
        AdvisoryContext::University(UniversityContext {
            name: "Stanford University".to_string(),
            min_gpa: 3.8,
            min_ielts: 7.0,
            required_extracurriculars: 4,
            engineering_transfer: Some(vec!["ENGR 1010".to_string(), "MECH 2200".to_string()]),
            science_transfer: None,
            business_transfer: None,
            additional_requirements: "Interview required".to_string(),
        })
    }

    #[test]
    fn test_prompt_embeds_question_profile_and_context() {
        let student = StudentSheet {
            gpa: Some("3.6".to_string()),
            major: Some("Engineering".to_string()),
            ..Default::default()
        };

        let prompt = build_prompt(
            "Can I transfer engineering credits to Stanford University?",
            Some(&student),
            &university_context(),
        );

        assert!(prompt.contains(
            "Student question: Can I transfer engineering credits to Stanford University?"
        ));
        assert!(prompt.contains("GPA: 3.6"));
        assert!(prompt.contains("IELTS: Not provided"));
        assert!(prompt.contains("University: Stanford University"));
        assert!(prompt.contains("Engineering Credit Transfer: ENGR 1010, MECH 2200"));
        assert!(!prompt.contains("Science Credit Transfer"));
        assert!(prompt.ends_with("Your response:"));
    }

    #[test]
    fn test_prompt_without_profile_or_context() {
        let prompt = build_prompt("Hello", None, &AdvisoryContext::Empty);

        assert!(!prompt.contains("Student profile:"));
        assert!(!prompt.contains("Relevant university information:"));
        assert!(prompt.contains("Student question: Hello"));
    }

    #[test]
    fn test_prompt_renders_overview_context() {
        let context = AdvisoryContext::RequirementsOverview(vec![RequirementSummary {
            name: "University of Oxford".to_string(),
            min_gpa: 3.7,
            min_ielts: 7.0,
        }]);

        let prompt = build_prompt("What GPA do I need?", None, &context);
        assert!(prompt.contains("Here's a summary of requirements for top universities:"));
        assert!(prompt.contains("University of Oxford: GPA 3.7, IELTS 7"));
    }

    #[tokio::test]
    async fn test_generate_returns_generated_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generation/text")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results":[{"generated_text":"You meet the requirements."}]}"#)
            .create_async()
            .await;

        let client = GenAiClient::new(
            format!("{}/generation/text", server.url()),
            "test-key".to_string(),
            "granite-13b-instruct-v2".to_string(),
            5,
        );

        let text = client.generate("prompt").await.unwrap();
        assert_eq!(text, "You meet the requirements.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_fails_on_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generation/text")
            .with_status(503)
            .create_async()
            .await;

        let client = GenAiClient::new(
            format!("{}/generation/text", server.url()),
            "test-key".to_string(),
            "granite-13b-instruct-v2".to_string(),
            5,
        );

        assert!(matches!(
            client.generate("prompt").await,
            Err(GenAiError::ApiError(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_fails_on_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generation/text")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results":[]}"#)
            .create_async()
            .await;

        let client = GenAiClient::new(
            format!("{}/generation/text", server.url()),
            "test-key".to_string(),
            "granite-13b-instruct-v2".to_string(),
            5,
        );

        assert!(matches!(
            client.generate("prompt").await,
            Err(GenAiError::InvalidResponse(_))
        ));
    }
}
