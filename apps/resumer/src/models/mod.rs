pub mod image;
pub mod resume;
