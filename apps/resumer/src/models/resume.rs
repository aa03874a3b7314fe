use serde::{Deserialize, Serialize};

/// The structured form input. Every field is free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

/// Which composer produced the current resume text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSource {
    Manual,
    Ai,
}
