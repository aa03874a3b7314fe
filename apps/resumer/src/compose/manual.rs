//! Manual composer: fills the fixed plain-text resume template.

use crate::models::resume::ResumeFields;

/// Formats the fields into the fixed resume template.
///
/// Layout: name header, a combined `Email: .. | Phone: ..` line, then the
/// Skills, Experience and Education sections in that order. Values are
/// substituted verbatim; empty fields leave their slot empty.
pub fn build_manual_resume(fields: &ResumeFields) -> String {
    format!(
        "\n{name}\n\
         Email: {email} | Phone: {phone}\n\
         \n\
         Skills:\n\
         {skills}\n\
         \n\
         Experience:\n\
         {experience}\n\
         \n\
         Education:\n\
         {education}\n    ",
        name = fields.name,
        email = fields.email,
        phone = fields.phone,
        skills = fields.skills,
        experience = fields.experience,
        education = fields.education,
    )
}
