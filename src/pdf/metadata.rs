//! Reading PDFs: page counts, inherited page attributes and orientation

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::layout::{Orientation, PageSize};

/// Attributes a page may inherit from its ancestors in the page tree
pub(crate) const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Rotate", b"Resources"];

/// Guard against cyclic /Parent chains in damaged files
const MAX_TREE_DEPTH: usize = 64;

/// A PDF opened for reading
#[derive(Debug)]
pub struct SourceDocument {
    path: PathBuf,
    pub(crate) doc: Document,
    /// Page object ids in page order
    pub(crate) page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Open a PDF, rejecting missing files and documents without pages
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path)?;
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

        if page_ids.is_empty() {
            return Err(Error::EmptyPdf(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            doc,
            page_ids,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Rotation of page `index` (0-based) in degrees, normalised to 0/90/180/270
    ///
    /// Returns `None` when no /Rotate is set on the page or its ancestors.
    pub fn page_rotation(&self, index: usize) -> Result<Option<i64>> {
        let page_id = self.page_id(index)?;
        let rotation = match inherited_attribute(&self.doc, page_id, b"Rotate") {
            Some(Object::Integer(degrees)) => Some(degrees),
            Some(Object::Real(degrees)) => Some(degrees as i64),
            _ => None,
        };
        Ok(rotation.map(normalise_rotation))
    }

    /// Media box of page `index` as `[llx, lly, urx, ury]`, US Letter when absent
    pub fn page_bounding_box(&self, index: usize) -> Result<[f32; 4]> {
        let page_id = self.page_id(index)?;
        Ok(media_box(&self.doc, page_id).unwrap_or_else(|| PageSize::letter().media_box()))
    }

    /// Document title from the /Info dictionary, if any
    pub fn title(&self) -> Option<String> {
        let info = match self.doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            other => other,
        };
        let title = info.as_dict().ok()?.get(b"Title").ok()?.as_str().ok()?;
        String::from_utf8(title.to_vec()).ok()
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids.get(index).copied().ok_or_else(|| {
            Error::General(format!(
                "page {} out of range ({} has {} pages)",
                index + 1,
                self.path.display(),
                self.page_ids.len()
            ))
        })
    }
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    Ok(SourceDocument::open(path)?.page_count())
}

/// Look up `key` on a page, walking up /Parent links when the page lacks it
///
/// References are resolved, so the returned object is never a bare reference
/// to another object.
pub(crate) fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node_id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_object(node_id).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(resolve(doc, value).clone());
        }
        node_id = match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => *parent,
            _ => return None,
        };
    }
    None
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn media_box(doc: &Document, page_id: ObjectId) -> Option<[f32; 4]> {
    let Object::Array(values) = inherited_attribute(doc, page_id, b"MediaBox")? else {
        return None;
    };
    let numbers: Vec<f32> = values
        .iter()
        .filter_map(|o| match resolve(doc, o) {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r as f32),
            _ => None,
        })
        .collect();
    match numbers.as_slice() {
        [llx, lly, urx, ury] => Some([*llx, *lly, *urx, *ury]),
        _ => None,
    }
}

fn normalise_rotation(degrees: i64) -> i64 {
    let normalised = degrees.rem_euclid(360);
    if normalised % 90 != 0 {
        warn!(degrees, "ignoring rotation that is not a multiple of 90");
        return 0;
    }
    normalised
}

/// Whether a page with the given rotation and unrotated box reads as portrait
///
/// A physically wide page turned a quarter turn displays as portrait, which is
/// how scanners commonly store portrait pages.
pub fn is_portrait(rotation: Option<i64>, bounding_box: [f32; 4]) -> bool {
    let [llx, lly, urx, ury] = bounding_box;
    let physically_wide = (urx - llx).abs() > (ury - lly).abs();

    match rotation.map(|r| r.rem_euclid(360)) {
        Some(90) | Some(270) => physically_wide,
        _ => !physically_wide,
    }
}

/// Orientation of the first page of `source`
pub fn detect_orientation(source: &SourceDocument) -> Result<Orientation> {
    let rotation = source.page_rotation(0)?;
    let bounding_box = source.page_bounding_box(0)?;

    let orientation = if is_portrait(rotation, bounding_box) {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    };

    debug!(
        path = %source.path().display(),
        ?rotation,
        ?bounding_box,
        %orientation,
        "detected orientation"
    );
    Ok(orientation)
}
