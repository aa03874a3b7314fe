//! PDF writer: turns laid-out pages into a document with `lopdf`.
//!
//! Text uses the standard Helvetica faces (no embedding) with WinAnsiEncoding.
//! The optional photo is a single JPEG image XObject shared by reference.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::layout::font_metrics::FontFace;
use crate::layout::page::{mm_to_pt, PageLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::models::image::JpegImage;
use crate::render::RenderError;

const IMAGE_RESOURCE: &str = "Im1";
const PRODUCER: &str = concat!("resumer ", env!("CARGO_PKG_VERSION"));

/// Serializes `pages` into PDF bytes. `image` is drawn wherever a page has an
/// image slot; pages with a slot but no image leave it empty.
pub fn write_pdf(
    pages: &[PageLayout],
    image: Option<&JpegImage>,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in [FontFace::Helvetica, FontFace::HelveticaBold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }

    let mut resources = dictionary! { "Font" => fonts };
    if let Some(image) = image {
        let image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(image.width),
                "Height" => i64::from(image.height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "DCTDecode",
            },
            image.data.clone(),
        );
        let image_id = doc.add_object(image_stream);
        resources.set("XObject", dictionary! { IMAGE_RESOURCE => image_id });
    }
    let resources_id = doc.add_object(resources);

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, image.is_some());
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.0_f32.into(),
                0.0_f32.into(),
                mm_to_pt(PAGE_WIDTH_MM).into(),
                mm_to_pt(PAGE_HEIGHT_MM).into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(
            chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string(),
        ),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn page_content(page: &PageLayout, has_image: bool) -> Content {
    let page_height_pt = mm_to_pt(PAGE_HEIGHT_MM);
    let mut operations = Vec::new();

    if let (Some(slot), true) = (page.image, has_image) {
        let width = mm_to_pt(slot.width_mm);
        let height = mm_to_pt(slot.height_mm);
        let x = mm_to_pt(slot.x_mm);
        // PDF places the image by its lower-left corner.
        let y = page_height_pt - mm_to_pt(slot.y_mm + slot.height_mm);

        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![
                width.into(),
                0.0_f32.into(),
                0.0_f32.into(),
                height.into(),
                x.into(),
                y.into(),
            ],
        ));
        operations.push(Operation::new("Do", vec![IMAGE_RESOURCE.into()]));
        operations.push(Operation::new("Q", vec![]));
    }

    for text in &page.texts {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![text.face.resource_name().into(), text.size_pt.into()],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                mm_to_pt(text.x_mm).into(),
                (page_height_pt - mm_to_pt(text.y_mm)).into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&text.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    Content { operations }
}

/// Encodes text for a WinAnsiEncoding font. Latin-1 maps directly; common
/// typographic punctuation maps to its cp1252 slot; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}
