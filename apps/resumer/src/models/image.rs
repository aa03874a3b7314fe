use bytes::Bytes;

/// An uploaded profile picture held for the lifetime of the session.
///
/// `original` is served back unchanged for the preview; `embed` is the
/// downscaled JPEG that the exporter places on the page.
#[derive(Debug, Clone)]
pub struct ProfileImage {
    pub original: Bytes,
    pub content_type: String,
    pub embed: JpegImage,
}

/// Baseline JPEG bytes plus pixel dimensions, ready for a `DCTDecode` stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}
