// Page layout: static Helvetica metrics, greedy wrapping and the fixed
// resume page geometry with body pagination.

pub mod font_metrics;
pub mod page;
pub mod wrap;

// Re-export the public API consumed by the renderer.
pub use page::{layout_resume, HeaderContent};
