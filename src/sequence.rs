//! Exhibit sequencing: resolve labels, plan outputs, produce slipsheets
//!
//! Labels come from one of three places, in priority order: an explicit
//! starting label, inference from each input's file name, or nowhere (which
//! is an error). The whole plan is built before any file is touched, so a bad
//! label or an uninferrable file name aborts the run without partial output.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::infer::infer_label_from_path;
use crate::label::Label;
use crate::layout::Orientation;
use crate::pdf::{detect_orientation, prepend_slipsheet, SlipsheetGenerator, SlipsheetStyle, SourceDocument};

/// What the slipsheets are for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inputs {
    /// Prepend a slipsheet to each of these PDFs, in order
    Files(Vec<PathBuf>),
    /// Generate standalone slipsheets only
    Standalone { count: usize },
}

/// Options for an exhibit run
#[derive(Debug, Clone)]
pub struct ExhibitOptions {
    /// Starting label; `None` infers a label from each input file name
    pub label: Option<Label>,
    /// Slipsheet orientation; `None` follows each input's first page
    pub orientation: Option<Orientation>,
    pub inputs: Inputs,
    /// Where renamed copies and standalone slipsheets are written
    pub output_dir: PathBuf,
    pub style: SlipsheetStyle,
}

impl Default for ExhibitOptions {
    fn default() -> Self {
        Self {
            label: None,
            orientation: None,
            inputs: Inputs::Standalone { count: 1 },
            output_dir: PathBuf::from("."),
            style: SlipsheetStyle::default(),
        }
    }
}

/// One planned slipsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkUnit {
    pub label: Label,
    /// PDF the slipsheet is prepended to, if any
    pub source: Option<PathBuf>,
    pub output: PathBuf,
}

/// A finished unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhibitRecord {
    pub label: Label,
    pub source: Option<PathBuf>,
    pub output: PathBuf,
    pub orientation: Orientation,
}

/// Resolve labels and output paths for every unit of work, without any I/O
pub fn plan(options: &ExhibitOptions) -> Result<Vec<WorkUnit>> {
    match (&options.inputs, &options.label) {
        (Inputs::Files(files), _) if files.is_empty() => {
            Err(Error::MissingInput("at least one input file is required".to_string()))
        }
        (Inputs::Standalone { .. }, None) => Err(Error::MissingInput(
            "a starting label is required when no input files are given".to_string(),
        )),
        (Inputs::Standalone { count }, Some(start)) => {
            let labels = sequence(start, *count)?;
            Ok(labels
                .into_iter()
                .map(|label| WorkUnit {
                    output: options.output_dir.join(SlipsheetGenerator::file_name(&label)),
                    label,
                    source: None,
                })
                .collect())
        }
        (Inputs::Files(files), Some(start)) => {
            let labels = sequence(start, files.len())?;
            files
                .iter()
                .zip(labels)
                .map(|(file, label)| {
                    let base = base_name(file)?;
                    Ok(WorkUnit {
                        output: options.output_dir.join(format!("Ex_{}_{}", label, base)),
                        label,
                        source: Some(file.clone()),
                    })
                })
                .collect()
        }
        (Inputs::Files(files), None) => files
            .iter()
            .map(|file| {
                Ok(WorkUnit {
                    label: infer_label_from_path(file)?,
                    source: Some(file.clone()),
                    output: file.clone(),
                })
            })
            .collect(),
    }
}

/// `count` consecutive labels starting at `start`
fn sequence(start: &Label, count: usize) -> Result<Vec<Label>> {
    let mut labels = Vec::with_capacity(count);
    let mut current = start.clone();
    for i in 0..count {
        if i + 1 < count {
            let next = current.next()?;
            labels.push(std::mem::replace(&mut current, next));
        } else {
            labels.push(current.clone());
        }
    }
    Ok(labels)
}

fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::General(format!("Not a file path: {}", path.display())))
}

/// Orientation for a unit: explicit choice, else the source's first page, else portrait
fn resolve_orientation(explicit: Option<Orientation>, source: Option<&SourceDocument>) -> Result<Orientation> {
    match (explicit, source) {
        (Some(orientation), _) => Ok(orientation),
        (None, Some(doc)) => detect_orientation(doc),
        (None, None) => Ok(Orientation::Portrait),
    }
}

/// Plan and execute an exhibit run
///
/// Units are processed in order; each output is complete on disk before the
/// next unit starts, and a failure does not undo earlier units.
pub fn run(options: &ExhibitOptions) -> Result<Vec<ExhibitRecord>> {
    let units = plan(options)?;

    if options.label.is_some() && !units.is_empty() {
        fs::create_dir_all(&options.output_dir)?;
    }

    let mut records = Vec::with_capacity(units.len());
    for unit in units {
        // Opened once, for orientation and as the content that follows the slipsheet
        let content = unit.source.as_deref().map(SourceDocument::open).transpose()?;
        let orientation = resolve_orientation(options.orientation, content.as_ref())?;
        let generator = SlipsheetGenerator::new(orientation, options.style);

        match content {
            Some(content) => {
                prepend_slipsheet(content, &unit.output, &unit.label, |dir, label| {
                    generator.generate(dir, label)
                })?;
            }
            None => {
                generator.generate(&options.output_dir, &unit.label)?;
            }
        }

        info!(label = %unit.label, output = %unit.output.display(), %orientation, "exhibit written");
        records.push(ExhibitRecord {
            label: unit.label,
            source: unit.source,
            output: unit.output,
            orientation,
        });
    }

    Ok(records)
}
