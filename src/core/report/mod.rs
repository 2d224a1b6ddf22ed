// Report module - Aligned multi-section model reports
pub mod format;
pub mod render;
pub mod table;

pub use format::{format_general, format_value, human_number};
pub use render::{build_sections, render};
pub use table::{layout, Section};
