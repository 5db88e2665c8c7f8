//! Local advisory responder: keyword-dispatched answer templates used when
//! the external text-generation service is unavailable, plus the heuristics
//! that flag answers for human follow-up.

use crate::models::{
    AdvisoryContext, RequirementSummary, StudentSheet, UniversityContext,
};
use crate::services::requirements::RequirementStore;

/// Number of universities included in the general requirements overview.
const OVERVIEW_SIZE: usize = 5;

/// Question length echoed back by the deferral template.
const ECHO_CHARS: usize = 30;

/// Topics the local responder can answer directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Requirements,
    CreditTransfer,
    Deadline,
    ImproveApplication,
    UniversityCount,
}

/// Ordered dispatch table over the lowercased question. First match wins;
/// the order is part of the contract.
const TOPIC_RULES: &[(fn(&str) -> bool, Topic)] = &[
    (mentions_requirements, Topic::Requirements),
    (mentions_transfer, Topic::CreditTransfer),
    (mentions_deadline, Topic::Deadline),
    (mentions_improvement, Topic::ImproveApplication),
    (mentions_university_count, Topic::UniversityCount),
];

fn mentions_requirements(lower: &str) -> bool {
    lower.contains("requirement") || lower.contains("gpa") || lower.contains("ielts")
}

fn mentions_transfer(lower: &str) -> bool {
    lower.contains("credit") || lower.contains("transfer")
}

fn mentions_deadline(lower: &str) -> bool {
    lower.contains("deadline")
}

fn mentions_improvement(lower: &str) -> bool {
    lower.contains("improve") && lower.contains("application")
}

fn mentions_university_count(lower: &str) -> bool {
    lower.contains("how many") && lower.contains("universit")
}

/// Classify a question against the ordered topic rules.
pub fn classify(question: &str) -> Option<Topic> {
    let lower = question.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|(predicate, _)| predicate(&lower))
        .map(|(_, topic)| *topic)
}

/// Build the requirement context for a question directly from the store.
///
/// The context stays structured end to end; it is only rendered to text at
/// the generation-prompt boundary.
pub fn build_context(question: &str, store: &RequirementStore) -> AdvisoryContext {
    let lower = question.to_lowercase();

    if let Some(requirement) = store.find_mentioned(&lower) {
        let wants_transfer = mentions_transfer(&lower);
        let discipline = |keyword: &str, courses: &[String]| {
            (wants_transfer && lower.contains(keyword)).then(|| courses.to_vec())
        };

        return AdvisoryContext::University(UniversityContext {
            name: requirement.name.clone(),
            min_gpa: requirement.min_gpa,
            min_ielts: requirement.min_ielts,
            required_extracurriculars: requirement.required_extracurriculars,
            engineering_transfer: discipline("engineer", &requirement.engineering_transfer_courses),
            science_transfer: discipline("science", &requirement.science_transfer_courses),
            business_transfer: discipline("business", &requirement.business_transfer_courses),
            additional_requirements: requirement.additional_requirements.clone(),
        });
    }

    if mentions_requirements(&lower) {
        let summaries = store
            .overview(OVERVIEW_SIZE)
            .iter()
            .map(|requirement| RequirementSummary {
                name: requirement.name.clone(),
                min_gpa: requirement.min_gpa,
                min_ielts: requirement.min_ielts,
            })
            .collect();
        return AdvisoryContext::RequirementsOverview(summaries);
    }

    if mentions_transfer(&lower) {
        return AdvisoryContext::TransferPolicies;
    }

    AdvisoryContext::Empty
}

/// Produce the local template answer for a question.
pub fn respond(
    question: &str,
    student: Option<&StudentSheet>,
    context: &AdvisoryContext,
) -> String {
    match classify(question) {
        Some(Topic::Requirements) => requirements_answer(context, student),
        Some(Topic::CreditTransfer) => transfer_answer(context),
        Some(Topic::Deadline) => deadline_answer(),
        Some(Topic::ImproveApplication) => improvement_answer(),
        Some(Topic::UniversityCount) => university_count_answer(),
        None => deferral_answer(question),
    }
}

fn requirements_answer(context: &AdvisoryContext, student: Option<&StudentSheet>) -> String {
    let Some(university) = context.university() else {
        return "Most top universities require a GPA of 3.5+ and IELTS scores of 6.5+. \
                More competitive programs like those at MIT, Stanford, and Oxford typically \
                require GPAs of 3.8+ and IELTS scores of 7.0+."
            .to_string();
    };

    let mut response = format!(
        "{} requires a minimum GPA of {} and an IELTS score of {}. ",
        university.name, university.min_gpa, university.min_ielts
    );

    if let Some(gpa) = student.and_then(StudentSheet::parsed_gpa) {
        if gpa >= university.min_gpa {
            response.push_str(&format!(
                "Your GPA of {gpa} meets or exceeds their requirement. "
            ));
        } else {
            let gap = university.min_gpa - gpa;
            response.push_str(&format!(
                "Your GPA of {gpa} is {gap:.1} points below their requirement. You may want \
                 to consider strengthening other parts of your application or looking at \
                 universities with lower GPA requirements. "
            ));
        }
    }

    if let Some(ielts) = student.and_then(StudentSheet::parsed_ielts) {
        if ielts >= university.min_ielts {
            response.push_str(&format!(
                "Your IELTS score of {ielts} meets or exceeds their requirement."
            ));
        } else {
            let gap = university.min_ielts - ielts;
            response.push_str(&format!(
                "Your IELTS score of {ielts} is {gap:.1} points below their requirement. \
                 Consider retaking the test or looking at universities with lower language \
                 requirements."
            ));
        }
    }

    response
}

fn transfer_answer(context: &AdvisoryContext) -> String {
    let Some(university) = context.university() else {
        return "Credit transfer policies vary by university and department. It's important \
                to check specific course equivalencies before applying. Most universities \
                require detailed course descriptions and syllabi for evaluation."
            .to_string();
    };

    let mut response = format!(
        "Credit transfer policies at {} vary by department. ",
        university.name
    );

    if let Some(courses) = &university.engineering_transfer {
        response.push_str(&format!(
            "For Engineering, the following courses are transferable: {}. ",
            courses.join(", ")
        ));
    }
    if let Some(courses) = &university.science_transfer {
        response.push_str(&format!(
            "For Science, the following courses are transferable: {}. ",
            courses.join(", ")
        ));
    }
    if let Some(courses) = &university.business_transfer {
        response.push_str(&format!(
            "For Business, the following courses are transferable: {}.",
            courses.join(", ")
        ));
    }

    response
}

fn deadline_answer() -> String {
    "The application deadline for the Fall 2026 exchange program is January 15, 2026. \
     For Spring 2027, the deadline is August 30, 2026. I recommend applying at least \
     2 weeks before the deadline to ensure all your documents are processed in time."
        .to_string()
}

fn improvement_answer() -> String {
    "To improve your application: 1) Maintain a strong GPA, 2) Get involved in \
     extracurricular activities relevant to your field, 3) Obtain strong recommendation \
     letters, 4) Write a compelling personal statement, and 5) Demonstrate language \
     proficiency. Would you like more specific advice on any of these areas?"
        .to_string()
}

fn university_count_answer() -> String {
    "You can apply to up to 5 universities through our exchange program. I recommend \
     selecting a mix of ambitious choices and safer options based on your academic \
     profile and preferences."
        .to_string()
}

fn deferral_answer(question: &str) -> String {
    let echo: String = question.chars().take(ECHO_CHARS).collect();
    format!(
        "I understand you're asking about {echo}... To provide you with the most accurate \
         information, I recommend checking the university's official website or contacting \
         our exchange office for specific details."
    )
}

/// Topics requiring a human advisor regardless of the generated answer.
const COMPLEX_TOPICS: &[&str] = &[
    "visa",
    "immigration",
    "work permit",
    "scholarship",
    "financial aid",
    "specific course",
    "accommodation",
    "housing",
    "deadline extension",
    "special consideration",
    "disability",
    "medical condition",
];

/// Phrases marking an uncertain answer. Matched case-sensitively against
/// the answer text as produced.
const UNCERTAINTY_MARKERS: &[&str] = &[
    "I'm not sure",
    "I don't know",
    "I'm uncertain",
    "I'd need to check",
    "contact the exchange office",
    "cannot provide specific",
];

/// Decide whether an exchange needs human follow-up.
///
/// Independent of which template (or upstream service) produced the answer.
pub fn should_flag(question: &str, answer: &str) -> bool {
    let lower_question = question.to_lowercase();

    if COMPLEX_TOPICS
        .iter()
        .any(|topic| lower_question.contains(topic))
    {
        return true;
    }

    UNCERTAINTY_MARKERS
        .iter()
        .any(|marker| answer.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UniversityRequirement;

    fn test_store() -> RequirementStore {
        RequirementStore::from_requirements(vec![
            UniversityRequirement {
                name: "Stanford University".to_string(),
                min_gpa: 3.8,
                min_ielts: 7.0,
                required_extracurriculars: 4,
                engineering_transfer_courses: vec![
                    "ENGR 1010".to_string(),
                    "MECH 2200".to_string(),
                ],
                science_transfer_courses: vec!["PHYS 1010".to_string()],
                business_transfer_courses: vec!["BUSI 1010".to_string()],
                additional_requirements: "Interview required".to_string(),
            },
            UniversityRequirement {
                name: "University of Oxford".to_string(),
                min_gpa: 3.7,
                min_ielts: 7.0,
                required_extracurriculars: 2,
                engineering_transfer_courses: vec![],
                science_transfer_courses: vec![],
                business_transfer_courses: vec![],
                additional_requirements: String::new(),
            },
        ])
    }

    fn sheet(gpa: &str, ielts: &str) -> StudentSheet {
        StudentSheet {
            gpa: Some(gpa.to_string()),
            ielts: Some(ielts.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_first_match_wins() {
        // Both "requirements" and "deadline" appear; requirements is earlier
        assert_eq!(
            classify("What are the requirements and the deadline?"),
            Some(Topic::Requirements)
        );
        assert_eq!(classify("Can I transfer credits?"), Some(Topic::CreditTransfer));
        assert_eq!(classify("When is the deadline?"), Some(Topic::Deadline));
        assert_eq!(
            classify("How can I improve my application?"),
            Some(Topic::ImproveApplication)
        );
        assert_eq!(
            classify("How many universities can I apply to?"),
            Some(Topic::UniversityCount)
        );
        assert_eq!(classify("Tell me about campus life"), None);
    }

    #[test]
    fn test_context_resolves_mentioned_university() {
        let store = test_store();
        let context = build_context("What GPA does Stanford University need?", &store);

        let university = context.university().expect("university context");
        assert_eq!(university.name, "Stanford University");
        assert_eq!(university.min_gpa, 3.8);
        // No transfer keywords in the question: no transfer lists
        assert!(university.engineering_transfer.is_none());
    }

    #[test]
    fn test_context_includes_discipline_transfer_lists_on_request() {
        let store = test_store();
        let context = build_context(
            "Can I transfer engineering credits to Stanford University?",
            &store,
        );

        let university = context.university().expect("university context");
        assert_eq!(
            university.engineering_transfer.as_deref(),
            Some(["ENGR 1010".to_string(), "MECH 2200".to_string()].as_slice())
        );
        assert!(university.science_transfer.is_none());
        assert!(university.business_transfer.is_none());
    }

    #[test]
    fn test_context_overview_without_named_university() {
        let store = test_store();
        let context = build_context("What GPA do I need?", &store);

        match context {
            AdvisoryContext::RequirementsOverview(summaries) => {
                assert_eq!(summaries.len(), 2);
                assert_eq!(summaries[0].name, "Stanford University");
            }
            other => panic!("expected overview context, got {other:?}"),
        }
    }

    #[test]
    fn test_context_transfer_policies_without_named_university() {
        let store = test_store();
        assert!(matches!(
            build_context("How does credit transfer work?", &store),
            AdvisoryContext::TransferPolicies
        ));
        assert!(matches!(
            build_context("Hello there", &store),
            AdvisoryContext::Empty
        ));
    }

    #[test]
    fn test_requirements_answer_compares_student_numbers() {
        let store = test_store();
        let context = build_context("What are the requirements for Stanford University?", &store);

        let answer = respond(
            "What are the requirements for Stanford University?",
            Some(&sheet("3.5", "7.5")),
            &context,
        );

        assert!(answer.starts_with("Stanford University requires a minimum GPA of 3.8"));
        assert!(answer.contains("Your GPA of 3.5 is 0.3 points below their requirement."));
        assert!(answer.contains("Your IELTS score of 7.5 meets or exceeds their requirement."));
    }

    #[test]
    fn test_requirements_answer_generic_without_university() {
        let store = test_store();
        let context = build_context("What GPA do I need?", &store);

        let answer = respond("What GPA do I need?", None, &context);
        assert!(answer.starts_with("Most top universities require a GPA of 3.5+"));
    }

    #[test]
    fn test_transfer_answer_lists_requested_disciplines() {
        let store = test_store();
        let question = "Can I transfer engineering credits to Stanford University?";
        let context = build_context(question, &store);

        let answer = respond(question, None, &context);
        assert!(answer.starts_with("Credit transfer policies at Stanford University"));
        assert!(answer.contains("For Engineering, the following courses are transferable: ENGR 1010, MECH 2200."));
        assert!(!answer.contains("For Science"));
    }

    #[test]
    fn test_deferral_echoes_question_prefix() {
        let question = "Is there a student union at partner campuses?";
        let answer = respond(question, None, &AdvisoryContext::Empty);
        assert!(answer.starts_with("I understand you're asking about Is there a student union at pa..."));
    }

    #[test]
    fn test_should_flag_complex_topics() {
        assert!(should_flag("What are the visa requirements?", "anything"));
        assert!(should_flag("Do you offer a scholarship?", "anything"));
        assert!(should_flag("Is campus housing available?", "anything"));
        assert!(!should_flag("What GPA do I need?", "You need a 3.5."));
    }

    #[test]
    fn test_should_flag_uncertain_answers() {
        assert!(should_flag("What GPA do I need?", "I'm not sure about that."));
        assert!(should_flag(
            "Anything else?",
            "Please contact the exchange office for details."
        ));
        assert!(!should_flag("What GPA do I need?", "A GPA of 3.5 is required."));
    }

    #[test]
    fn test_flagging_is_independent_of_template() {
        // The deferral wording ("contacting our exchange office") is not an
        // uncertainty marker; only the question can flag this exchange.
        let answer = respond("Tell me about campus life", None, &AdvisoryContext::Empty);
        assert!(!should_flag("Tell me about campus life", &answer));
        assert!(should_flag("Tell me about campus housing", &answer));
    }
}
