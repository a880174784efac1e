//! Cover-letter generation — prompt building, the tool round-trip, and the
//! orchestrating pipeline behind `POST /api/v1/cover-letter`.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod synthesizer;
pub mod tools;
