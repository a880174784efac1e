//! The two callable tools declared to the model during letter generation.
//!
//! Execution is local, synchronous, and side-effect-free: each tool derives
//! its answer purely from the already-parsed records. The declared parameter
//! schemas mirror what the model sees; the arguments it sends back are
//! ignored in favor of the records the pipeline already holds.

use crate::analysis::records::{JobRecord, ResumeRecord};
use crate::llm_client::ToolDefinition;

pub const ANALYZE_RESUME_MATCH: &str = "analyze_resume_match";
pub const IDENTIFY_KEY_SELLING_POINTS: &str = "identify_key_selling_points";

/// At most this many selling points are reported back to the model.
const MAX_SELLING_POINTS: usize = 3;

/// Tool declarations sent with the generation request.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let record_parameters = serde_json::json!({
        "type": "object",
        "properties": {
            "resume_data": {
                "type": "object",
                "description": "Parsed resume data"
            },
            "job_data": {
                "type": "object",
                "description": "Parsed job description data"
            }
        },
        "required": ["resume_data", "job_data"]
    });

    vec![
        ToolDefinition {
            name: ANALYZE_RESUME_MATCH.to_string(),
            description: "Analyze how well the candidate's resume matches the job requirements"
                .to_string(),
            parameters: record_parameters.clone(),
        },
        ToolDefinition {
            name: IDENTIFY_KEY_SELLING_POINTS.to_string(),
            description: "Identify the candidate's strongest selling points for this specific job"
                .to_string(),
            parameters: record_parameters,
        },
    ]
}

/// Dispatches a model-requested tool by name.
pub fn execute_tool(name: &str, resume: &ResumeRecord, job: &JobRecord) -> String {
    match name {
        ANALYZE_RESUME_MATCH => analyze_resume_match(resume),
        IDENTIFY_KEY_SELLING_POINTS => identify_key_selling_points(resume, job),
        _ => "Unknown function".to_string(),
    }
}

fn analyze_resume_match(resume: &ResumeRecord) -> String {
    format!(
        "Resume match analysis: {} skills align with job requirements",
        resume.skills.len()
    )
}

/// Skills whose text overlaps a required skill, case-insensitively
/// substring-matched, capped at three.
fn identify_key_selling_points(resume: &ResumeRecord, job: &JobRecord) -> String {
    let required_lower: Vec<String> = job
        .required_skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let matching: Vec<&str> = resume
        .skills
        .iter()
        .filter(|skill| {
            let skill_lower = skill.to_lowercase();
            required_lower.iter().any(|req| skill_lower.contains(req))
        })
        .take(MAX_SELLING_POINTS)
        .map(String::as_str)
        .collect();

    format!("Key selling points: {}", matching.join(", "))
}
