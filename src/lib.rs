//! PDF Exhibits Library
//!
//! Tools for assembling legal exhibits:
//! - Generate "Exhibit A" style slipsheets and prepend them to documents
//! - Advance exhibit labels (`Z` → `AA`, `9` → `10`)
//! - Infer a starting label from a file name
//! - Merge documents so each one starts on an odd page when printed duplex
//!
//! # Example
//!
//! ```no_run
//! use pdf_exhibits::pdf::{merge_double_sided, MergeOptions};
//! use std::path::PathBuf;
//!
//! let options = MergeOptions::double_sided(vec![
//!     PathBuf::from("Exhibit_A.pdf"),
//!     PathBuf::from("Exhibit_B.pdf"),
//! ]);
//!
//! let report = merge_double_sided(&options).expect("Failed to merge PDFs");
//! println!("{} pages", report.page_count);
//! ```

pub mod cleanup;
pub mod error;
pub mod infer;
pub mod inputs;
pub mod label;
pub mod layout;
pub mod pdf;
pub mod sequence;

// Re-export commonly used items
pub use error::{Error, Result};
pub use label::Label;
pub use layout::Orientation;
