//! Fixed resume page layout and body pagination.
//!
//! All positions are millimetres from the top-left corner of an A4 page; text
//! positions are baselines. The renderer converts to PDF user space.
//!
//! Page 1: optional 40mm photo top-right, bold name, email and phone lines, a
//! bold "Resume" label, then the body flowed from 60mm. Body lines that would
//! fall below the bottom limit continue on further pages starting at 20mm.

use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::wrap::wrap_text;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_LEFT_MM: f32 = 10.0;
pub const BODY_MAX_WIDTH_MM: f32 = 180.0;

pub const IMAGE_X_MM: f32 = 150.0;
pub const IMAGE_Y_MM: f32 = 10.0;
pub const IMAGE_SIZE_MM: f32 = 40.0;

const NAME_Y_MM: f32 = 20.0;
const NAME_SIZE_PT: f32 = 18.0;
const CONTACT_SIZE_PT: f32 = 12.0;
const EMAIL_Y_MM: f32 = 30.0;
const PHONE_Y_MM: f32 = 37.0;
const LABEL_Y_MM: f32 = 50.0;
const BODY_SIZE_PT: f32 = 11.0;
const BODY_TOP_MM: f32 = 60.0;
const CONTINUATION_TOP_MM: f32 = 20.0;
const BOTTOM_LIMIT_MM: f32 = 287.0;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// One run of text placed at a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub face: FontFace,
    pub size_pt: f32,
    pub x_mm: f32,
    pub y_mm: f32,
    pub text: String,
}

/// A square image slot; `y_mm` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSlot {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub texts: Vec<PlacedText>,
    pub image: Option<ImageSlot>,
}

/// Header content drawn on the first page.
#[derive(Debug, Clone, Copy)]
pub struct HeaderContent<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub has_image: bool,
}

/// Lays out the header and flows `body` across as many pages as it needs.
/// Always returns at least one page.
pub fn layout_resume(header: HeaderContent<'_>, body: &str) -> Vec<PageLayout> {
    let mut first = PageLayout {
        texts: header_texts(header),
        image: header.has_image.then_some(ImageSlot {
            x_mm: IMAGE_X_MM,
            y_mm: IMAGE_Y_MM,
            width_mm: IMAGE_SIZE_MM,
            height_mm: IMAGE_SIZE_MM,
        }),
    };

    let metrics = get_metrics(FontFace::Helvetica);
    let lines = wrap_text(body, metrics, BODY_SIZE_PT, mm_to_pt(BODY_MAX_WIDTH_MM));
    let line_height_mm = pt_to_mm(BODY_SIZE_PT * LINE_HEIGHT_FACTOR);

    let mut pages = Vec::new();
    let mut y = BODY_TOP_MM;

    for line in lines {
        // Blank lines only advance; a new page opens for the next printed line.
        if !line.is_empty() {
            if y > BOTTOM_LIMIT_MM {
                pages.push(std::mem::take(&mut first));
                y = CONTINUATION_TOP_MM;
            }
            first.texts.push(PlacedText {
                face: FontFace::Helvetica,
                size_pt: BODY_SIZE_PT,
                x_mm: MARGIN_LEFT_MM,
                y_mm: y,
                text: line,
            });
        }
        y += line_height_mm;
    }
    pages.push(first);
    pages
}

fn header_texts(header: HeaderContent<'_>) -> Vec<PlacedText> {
    let placed = |face: FontFace, size_pt: f32, y_mm: f32, text: String| PlacedText {
        face,
        size_pt,
        x_mm: MARGIN_LEFT_MM,
        y_mm,
        text,
    };

    vec![
        placed(
            FontFace::HelveticaBold,
            NAME_SIZE_PT,
            NAME_Y_MM,
            header.name.to_string(),
        ),
        placed(
            FontFace::Helvetica,
            CONTACT_SIZE_PT,
            EMAIL_Y_MM,
            format!("Email: {}", header.email),
        ),
        placed(
            FontFace::Helvetica,
            CONTACT_SIZE_PT,
            PHONE_Y_MM,
            format!("Phone: {}", header.phone),
        ),
        placed(
            FontFace::HelveticaBold,
            CONTACT_SIZE_PT,
            LABEL_Y_MM,
            "Resume".to_string(),
        ),
    ]
}
