// Document export: lays out the current resume and writes it as a PDF.
// CPU-bound; handlers run `export_resume` inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod pdf;
pub mod photo;

use thiserror::Error;
use tracing::debug;

use crate::layout::{layout_resume, HeaderContent};
use crate::models::image::JpegImage;
use crate::models::resume::ResumeFields;

/// Filename used when the name field is empty.
pub const DEFAULT_FILENAME: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the exporter reads, copied out of the session so the render can
/// run off the async executor.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub fields: ResumeFields,
    pub resume_text: String,
    pub image: Option<JpegImage>,
}

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// `"{name}.pdf"`, or `resume.pdf` when the name is empty. No other sanitising.
pub fn export_filename(name: &str) -> String {
    if name.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{name}.pdf")
    }
}

/// Lays out and writes the resume document.
pub fn export_resume(request: &ExportRequest) -> Result<ExportedDocument, RenderError> {
    let fields = &request.fields;
    let pages = layout_resume(
        HeaderContent {
            name: &fields.name,
            email: &fields.email,
            phone: &fields.phone,
            has_image: request.image.is_some(),
        },
        &request.resume_text,
    );

    let title = if fields.name.is_empty() {
        "Resume"
    } else {
        fields.name.as_str()
    };
    let bytes = pdf::write_pdf(&pages, request.image.as_ref(), title)?;

    debug!(
        pages = pages.len(),
        bytes = bytes.len(),
        "Resume document written"
    );

    Ok(ExportedDocument {
        filename: export_filename(&fields.name),
        bytes,
        page_count: pages.len(),
    })
}
