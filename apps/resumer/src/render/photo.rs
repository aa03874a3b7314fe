//! Profile image preparation: sniff, decode, centre-crop to a square, downscale
//! and re-encode as baseline JPEG so any accepted format embeds the same way.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::models::image::{JpegImage, ProfileImage};
use crate::render::RenderError;

/// Longest edge, in pixels, of the embedded copy (40mm at ~300dpi ≈ 472px).
const EMBED_MAX_PX: u32 = 480;
const JPEG_QUALITY: u8 = 88;

/// Decodes an uploaded file into its preview and embeddable forms.
pub fn prepare_profile_image(original: Bytes) -> Result<ProfileImage, RenderError> {
    let format = image::guess_format(&original)?;
    let decoded = image::load_from_memory_with_format(&original, format)?;

    let side = decoded.width().min(decoded.height());
    let x = (decoded.width() - side) / 2;
    let y = (decoded.height() - side) / 2;
    let mut square = decoded.crop_imm(x, y, side, side);
    if side > EMBED_MAX_PX {
        square = square.thumbnail(EMBED_MAX_PX, EMBED_MAX_PX);
    }

    let rgb = DynamicImage::ImageRgb8(square.to_rgb8());
    let mut data = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY))?;

    Ok(ProfileImage {
        original,
        content_type: format.to_mime_type().to_string(),
        embed: JpegImage {
            data,
            width: rgb.width(),
            height: rgb.height(),
        },
    })
}
