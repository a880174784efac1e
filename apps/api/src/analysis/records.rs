//! Typed records produced by the analyzers.
//!
//! Both records carry a fixed, known key set. Missing fields deserialize to
//! empty values rather than failing the whole parse; a reply that does not
//! parse at all is replaced wholesale by the matching `fallback()` record.

use serde::{Deserialize, Serialize};

/// One position held by the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

/// One education milestone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Structured extraction of a resume. Produced by the Resume Analyzer,
/// consumed only by the Letter Synthesizer. Never mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
}

impl ResumeRecord {
    /// Static placeholder substituted when the model reply cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            name: "Unknown".to_string(),
            email: "unknown@email.com".to_string(),
            phone: "Unknown".to_string(),
            location: "Unknown".to_string(),
            summary: "Professional with relevant experience".to_string(),
            skills: vec!["Various skills".to_string()],
            experience: vec![ExperienceEntry {
                title: "Professional".to_string(),
                company: "Various".to_string(),
                duration: "Recent".to_string(),
                description: "Relevant experience".to_string(),
            }],
            education: vec![EducationEntry {
                degree: "Relevant Degree".to_string(),
                institution: "University".to_string(),
                year: "Recent".to_string(),
            }],
            certifications: Vec::new(),
            achievements: Vec::new(),
        }
    }
}

/// Structured extraction of a job posting. Same lifecycle as `ResumeRecord`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    pub company_name: String,
    pub job_title: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub experience_requirements: String,
    pub education_requirements: String,
    pub key_responsibilities: Vec<String>,
    pub company_culture: String,
    pub benefits: Vec<String>,
    pub location: String,
    pub employment_type: String,
}

impl JobRecord {
    /// Static placeholder substituted when the model reply cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            company_name: "Target Company".to_string(),
            job_title: "Position".to_string(),
            required_skills: vec!["Relevant skills".to_string()],
            preferred_skills: Vec::new(),
            experience_requirements: "Relevant experience".to_string(),
            education_requirements: "Relevant education".to_string(),
            key_responsibilities: vec!["Key responsibilities".to_string()],
            company_culture: "Professional environment".to_string(),
            benefits: Vec::new(),
            location: "Location".to_string(),
            employment_type: "Full-time".to_string(),
        }
    }
}
