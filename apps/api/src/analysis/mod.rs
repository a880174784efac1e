//! Structured-data requesters — free text in, schema-shaped records out.
//!
//! Two instances of the same pattern: the Resume Analyzer and the
//! Job-Description Analyzer. Both prompt the model for JSON matching a fixed
//! key set, substitute a static fallback record when the reply does not
//! parse, and surface transport failures as explicit errors.

pub mod job;
pub mod prompts;
pub mod records;
pub mod resume;

use std::time::Duration;

use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Hard timeout for each structured-data request.
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The document could not be read or decoded. The message is captured
    /// text, never a panic.
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// Transport, auth, or timeout failure talking to the hosted model.
    /// Distinct from parse failures, which degrade to fallback records.
    #[error("model request failed: {0}")]
    Llm(LlmError),
}
