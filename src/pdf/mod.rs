//! PDF manipulation module

pub mod assemble;
pub mod create;
pub mod merge;
pub mod metadata;
pub mod render;
mod replace;

// Re-export commonly used items
pub use assemble::{add_slipsheet, add_slipsheet_with, prepend_slipsheet};
pub use create::{generate_slipsheet, SlipsheetGenerator, SlipsheetStyle};
pub use merge::{combined_file_name, merge_double_sided, BookmarkEntry, MergeOptions, MergeReport, OutputBuilder};
pub use metadata::{count_pages, detect_orientation, is_portrait, SourceDocument};
pub use render::{Canvas, CenteredTitle, PageRenderer};
