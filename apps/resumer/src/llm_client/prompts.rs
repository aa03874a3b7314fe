// Shared prompt constants.
// The resume composer builds its user prompt in compose::prompts; this file holds
// the cross-cutting system instruction.

/// System prompt sent ahead of every resume generation request.
pub const RESUME_WRITER_SYSTEM: &str = "You are a professional resume writer.";
