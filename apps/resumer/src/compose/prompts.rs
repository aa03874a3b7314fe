// Prompt and fallback text for the composers.

use crate::models::resume::ResumeFields;

/// Shown in place of the resume when AI generation fails for any reason.
pub const AI_ERROR_TEXT: &str = "❌ Error generating resume. Check the server log.";

/// Returned by free-form drafting when the remote call fails.
pub const DRAFT_FALLBACK_TEXT: &str = "Sorry, I couldn't generate the content.";

/// Builds the user prompt for AI resume generation. Every field is embedded
/// as-is, including empty ones.
pub fn build_resume_prompt(fields: &ResumeFields) -> String {
    format!(
        "\nWrite a professional resume using the following details:\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Skills: {skills}\n\
         Experience: {experience}\n\
         Education: {education}\n    ",
        name = fields.name,
        email = fields.email,
        phone = fields.phone,
        skills = fields.skills,
        experience = fields.experience,
        education = fields.education,
    )
}
