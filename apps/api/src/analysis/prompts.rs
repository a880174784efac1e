// All LLM prompt constants for the analysis module.

/// System prompt for resume extraction — enforces JSON-only output.
pub const RESUME_ANALYSIS_SYSTEM: &str =
    "You are a resume analysis expert. Extract information and return only valid JSON.";

/// System prompt for job-description extraction.
pub const JOB_ANALYSIS_SYSTEM: &str =
    "You are a job market analyst. Extract information and return only valid JSON.";

/// Target schema shown to the model for resume extraction. The key set must
/// stay in lockstep with `records::ResumeRecord`.
pub const RESUME_SCHEMA_TEMPLATE: &str = r#"{
  "name": "Full name",
  "email": "Email address",
  "phone": "Phone number",
  "location": "City, State/Country",
  "summary": "Professional summary or objective",
  "skills": ["skill1", "skill2", "skill3"],
  "experience": [
    {
      "title": "Job title",
      "company": "Company name",
      "duration": "Start date - End date",
      "description": "Key responsibilities and achievements"
    }
  ],
  "education": [
    {
      "degree": "Degree name",
      "institution": "School/University name",
      "year": "Graduation year"
    }
  ],
  "certifications": ["cert1", "cert2"],
  "achievements": ["achievement1", "achievement2"]
}"#;

/// Target schema shown to the model for job-description extraction. The key
/// set must stay in lockstep with `records::JobRecord`.
pub const JOB_SCHEMA_TEMPLATE: &str = r#"{
  "company_name": "Company name",
  "job_title": "Job title",
  "required_skills": ["skill1", "skill2", "skill3"],
  "preferred_skills": ["skill1", "skill2"],
  "experience_requirements": "Years of experience and level",
  "education_requirements": "Education level required",
  "key_responsibilities": ["responsibility1", "responsibility2"],
  "company_culture": "Company values and culture indicators",
  "benefits": ["benefit1", "benefit2"],
  "location": "Job location",
  "employment_type": "Full-time, Part-time, etc."
}"#;

/// Resume extraction prompt. Replace `{schema}` and `{resume_text}` before
/// sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Analyze this resume and extract the following information in JSON format:

{schema}

Resume text:
{resume_text}

Return only valid JSON, no additional text."#;

/// Job-description extraction prompt. Replace `{schema}` and `{job_description}`
/// before sending.
pub const JOB_PROMPT_TEMPLATE: &str = r#"Analyze this job description and extract the following information in JSON format:

{schema}

Job Description:
{job_description}

Return only valid JSON, no additional text."#;
