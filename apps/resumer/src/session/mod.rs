//! Form state holder: the single owner of fields, image and composed text.
//!
//! `AppState` keeps one `ResumeSession` behind an async mutex. Handlers lock it
//! briefly to read or write; the lock is never held across the AI request.

pub mod handlers;

use serde::Serialize;

use crate::compose::build_manual_resume;
use crate::errors::AppError;
use crate::models::image::ProfileImage;
use crate::models::resume::{ResumeFields, ResumeSource};

#[derive(Debug, Default)]
pub struct ResumeSession {
    pub fields: ResumeFields,
    pub image: Option<ProfileImage>,
    pub resume_text: String,
    pub source: Option<ResumeSource>,
    /// Single-flight guard for AI generation.
    generating: bool,
}

/// Read-only view of the session returned to the page.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub fields: ResumeFields,
    pub resume_text: String,
    pub source: Option<ResumeSource>,
    pub has_image: bool,
    pub generating: bool,
    pub can_export: bool,
}

impl ResumeSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            fields: self.fields.clone(),
            resume_text: self.resume_text.clone(),
            source: self.source,
            has_image: self.image.is_some(),
            generating: self.is_generating(),
            can_export: self.can_export(),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Export is offered only once some text has been composed.
    pub fn can_export(&self) -> bool {
        !self.resume_text.is_empty()
    }

    pub fn update_fields(&mut self, fields: ResumeFields) {
        self.fields = fields;
    }

    pub fn set_image(&mut self, image: ProfileImage) {
        self.image = Some(image);
    }

    /// Discards fields, image and text. An outstanding generation keeps its
    /// guard and will still write its result when it finishes.
    pub fn reset(&mut self) {
        let generating = self.generating;
        *self = ResumeSession {
            generating,
            ..Default::default()
        };
    }

    /// Runs the manual composer over the current fields and stores the result.
    pub fn compose_manual(&mut self) -> &str {
        self.resume_text = build_manual_resume(&self.fields);
        self.source = Some(ResumeSource::Manual);
        &self.resume_text
    }

    /// Claims the single-flight slot for an AI generation.
    ///
    /// Clears the displayed text and returns the fields to send. Fails with
    /// `Conflict` while another generation is outstanding.
    pub fn begin_generation(&mut self) -> Result<ResumeFields, AppError> {
        if self.generating {
            return Err(AppError::Conflict(
                "A resume is already being generated".to_string(),
            ));
        }
        self.generating = true;
        self.resume_text.clear();
        self.source = None;
        Ok(self.fields.clone())
    }

    /// Stores the generated text and releases the single-flight slot.
    pub fn finish_generation(&mut self, text: String) {
        self.resume_text = text;
        self.source = Some(ResumeSource::Ai);
        self.generating = false;
    }
}
