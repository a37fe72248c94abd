//! Writing an output through a scratch directory beside its destination

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

const SCRATCH_FILE: &str = "temp.pdf";

/// Produce `output_path` by letting `build` write a scratch file, then
/// renaming that file into place
///
/// `build` gets the scratch directory and the scratch file path. The
/// directory is created next to the destination so the rename stays on one
/// filesystem, and it is removed on every exit path. The destination is only
/// touched by the rename, so it never holds a partial file, even when `build`
/// reads it as an input.
pub(crate) fn replace_atomically<F>(output_path: &Path, build: F) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> Result<()>,
{
    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let scratch_dir = tempfile::Builder::new()
        .prefix(".exhibit-")
        .tempdir_in(parent)?;
    let scratch = scratch_dir.path().join(SCRATCH_FILE);

    build(scratch_dir.path(), &scratch)?;

    fs::rename(&scratch, output_path).map_err(|source| Error::Replace {
        path: output_path.to_path_buf(),
        source,
    })?;

    debug!(path = %output_path.display(), "moved output into place");
    Ok(())
}
