// Resume composition: the manual template and the AI drafting path.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod ai;
pub mod handlers;
pub mod manual;
pub mod prompts;

pub use ai::AiComposer;
pub use manual::build_manual_resume;
