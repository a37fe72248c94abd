//! Guess a starting exhibit label from a file name
//!
//! Recognized forms:
//!
//! ```text
//! [marker][label]...    e.g. "Exhibit_C_contract.pdf", "Ex. 7 - invoice.pdf"
//! [label]...            e.g. "B. Lease.pdf", "12 photos.pdf"
//! ```
//!
//! where the marker is one of "Exhibit", "Exh" or "Ex" followed by an
//! optional `.`, `_` or space.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::label::Label;

/// Marker groups in priority order: candidates and whether matching is case-sensitive
const MARKERS: &[(&[&str], bool)] = &[
    (&["exhibit.", "exhibit_", "exhibit "], false),
    (&["exhibit"], false),
    (&["Exh.", "Exh ", "Exh_"], true),
    (&["ex.", "ex ", "ex_"], false),
];

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // A single letter needs a separator after it, or "Exhibit Contract" would yield "C"
        Regex::new(r"^(?:([A-Za-z])(?:[\W_]|$)|(\d+))").expect("label pattern is valid")
    })
}

/// Remove the first matching exhibit marker from the front of `name`
fn strip_marker(name: &str) -> &str {
    for (candidates, case_sensitive) in MARKERS {
        for marker in *candidates {
            let Some(head) = name.get(..marker.len()) else {
                continue;
            };
            let matched = if *case_sensitive {
                head == *marker
            } else {
                head.eq_ignore_ascii_case(marker)
            };
            if matched {
                return &name[marker.len()..];
            }
        }
    }
    name
}

/// Infer the exhibit label encoded in a file name
///
/// Fails with [`Error::LabelInference`] when no label can be found; an empty
/// label is never returned.
pub fn infer_label(filename: &str) -> Result<Label> {
    let remainder = strip_marker(filename).trim();

    let captures = label_pattern()
        .captures(remainder)
        .ok_or_else(|| Error::LabelInference(filename.to_string()))?;

    let token = captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::LabelInference(filename.to_string()))?;

    debug!(filename, token, "inferred label");
    Label::parse(token)
}

/// Infer the exhibit label from the final component of `path`
pub fn infer_label_from_path(path: &Path) -> Result<Label> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::LabelInference(path.display().to_string()))?;
    infer_label(&name)
}
