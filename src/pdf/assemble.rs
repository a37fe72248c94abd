//! Prepending a slipsheet to an existing PDF

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cleanup::CleanupRegistry;
use crate::error::Result;
use crate::label::Label;
use crate::pdf::create::SlipsheetGenerator;
use crate::pdf::merge::OutputBuilder;
use crate::pdf::metadata::SourceDocument;
use crate::pdf::replace::replace_atomically;

/// Prepend the slipsheet for `label` to `source_path`, writing `output_path`
///
/// `output_path` may equal `source_path`; it is replaced only once the merged
/// document is complete, so it never holds a partial file.
pub fn add_slipsheet(
    source_path: &Path,
    output_path: &Path,
    label: &Label,
    generator: &SlipsheetGenerator,
) -> Result<PathBuf> {
    add_slipsheet_with(source_path, output_path, label, |dir, label| {
        generator.generate(dir, label)
    })
}

/// Like [`add_slipsheet`], with a caller-supplied slipsheet factory
///
/// `generate` receives the scratch directory and the label and returns the
/// path of the slipsheet it wrote. That file is removed before returning,
/// whether or not the assembly succeeds.
pub fn add_slipsheet_with<F>(
    source_path: &Path,
    output_path: &Path,
    label: &Label,
    generate: F,
) -> Result<PathBuf>
where
    F: FnOnce(&Path, &Label) -> Result<PathBuf>,
{
    let content = SourceDocument::open(source_path)?;
    prepend_slipsheet(content, output_path, label, generate)
}

/// Prepend a slipsheet to a document that is already open
pub fn prepend_slipsheet<F>(
    content: SourceDocument,
    output_path: &Path,
    label: &Label,
    generate: F,
) -> Result<PathBuf>
where
    F: FnOnce(&Path, &Label) -> Result<PathBuf>,
{
    info!(
        %label,
        source = %content.path().display(),
        output = %output_path.display(),
        "adding exhibit slipsheet"
    );

    // Dropped on every exit path below, removing the slipsheet
    let mut registry = CleanupRegistry::new();

    replace_atomically(output_path, |scratch_dir, scratch| {
        let slipsheet = registry.register(generate(scratch_dir, label)?);

        let mut output = OutputBuilder::new();
        if let Some(title) = content.title() {
            output.set_title(title);
        }
        output.append_document(SourceDocument::open(&slipsheet)?)?;
        output.append_document(content)?;
        output.write(scratch)
    })?;

    registry.cleanup();
    Ok(output_path.to_path_buf())
}
