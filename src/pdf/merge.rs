//! PDF merging functionality using lopdf

use std::path::{Path, PathBuf};

use lopdf::{dictionary, Bookmark, Dictionary, Document, Object, ObjectId, Stream};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::layout::PageSize;
use crate::pdf::create::{info_dictionary, media_box_object};
use crate::pdf::metadata::{inherited_attribute, SourceDocument, INHERITABLE};
use crate::pdf::replace::replace_atomically;

/// Options for merging PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Input PDF file paths in the order they should be merged
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

impl MergeOptions {
    /// Merge `input_paths` into `combined-{N}-files.pdf` in the working directory
    pub fn double_sided(input_paths: Vec<PathBuf>) -> Self {
        let output_path = PathBuf::from(combined_file_name(input_paths.len()));
        Self {
            input_paths,
            output_path,
        }
    }
}

/// Default output name for a merge of `count` files
pub fn combined_file_name(count: usize) -> String {
    format!("combined-{}-files.pdf", count)
}

/// An outline entry pointing at a page of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEntry {
    pub title: String,
    /// 0-based page index in the output
    pub page_index: usize,
}

/// Summary of a finished merge
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub output_path: PathBuf,
    pub page_count: usize,
    pub bookmarks: Vec<BookmarkEntry>,
    /// Blank pages inserted after odd-length inputs
    pub blank_pages: usize,
}

/// Collects pages from several documents into one new PDF
///
/// Appended sources are consumed, so their objects stay owned by the builder
/// until [`OutputBuilder::write`] has produced the output.
#[derive(Debug)]
pub struct OutputBuilder {
    doc: Document,
    page_ids: Vec<ObjectId>,
    bookmarks: Vec<BookmarkEntry>,
    title: Option<String>,
}

impl Default for OutputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuilder {
    pub fn new() -> Self {
        Self {
            doc: Document::with_version("1.5"),
            page_ids: Vec::new(),
            bookmarks: Vec::new(),
            title: None,
        }
    }

    /// Title written to the output's /Info dictionary
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn bookmarks(&self) -> &[BookmarkEntry] {
        &self.bookmarks
    }

    /// Append every page of `source`; returns the number of pages added
    pub fn append_document(&mut self, source: SourceDocument) -> Result<usize> {
        let SourceDocument { mut doc, page_ids, .. } = source;

        // Pages lose their old ancestors below, so copy inherited attributes down first
        for &page_id in &page_ids {
            flatten_inherited_attributes(&mut doc, page_id)?;
        }

        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(self.doc.max_id + 1);
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

        for (id, object) in std::mem::take(&mut doc.objects) {
            if is_structural(&object) {
                continue;
            }
            self.doc.objects.insert(id, object);
        }
        self.doc.max_id = self.doc.max_id.max(doc.max_id);

        let added = page_ids.len();
        self.page_ids.extend(page_ids);
        Ok(added)
    }

    /// Append an empty page sized like the last page (US Letter if there is none)
    pub fn add_blank_page(&mut self) {
        let media_box = self
            .page_ids
            .last()
            .and_then(|&id| inherited_attribute(&self.doc, id, b"MediaBox"))
            .unwrap_or_else(|| media_box_object(PageSize::letter().media_box()));

        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), Vec::new()));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box,
            "Resources" => Dictionary::new(),
            "Contents" => content_id,
        });
        self.page_ids.push(page_id);
    }

    /// Record an outline entry for the page at `page_index`
    pub fn add_bookmark(&mut self, title: impl Into<String>, page_index: usize) {
        self.bookmarks.push(BookmarkEntry {
            title: title.into(),
            page_index,
        });
    }

    /// Build the page tree, outline and metadata, then save to `path`
    pub fn write(self, path: &Path) -> Result<()> {
        let Self {
            mut doc,
            page_ids,
            bookmarks,
            title,
        } = self;

        if page_ids.is_empty() {
            return Err(Error::General("No pages to write".to_string()));
        }

        let pages_id = doc.new_object_id();
        for &page_id in &page_ids {
            if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }

        let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => page_ids.len() as i64,
                "Kids" => kids,
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };

        for entry in &bookmarks {
            match page_ids.get(entry.page_index) {
                Some(&page_id) => {
                    doc.add_bookmark(
                        Bookmark::new(entry.title.clone(), [0.0, 0.0, 0.0], 0, page_id),
                        None,
                    );
                }
                None => warn!(
                    title = %entry.title,
                    page_index = entry.page_index,
                    "bookmark points past the last page, skipping"
                ),
            }
        }
        if let Some(outline_id) = doc.build_outline() {
            catalog.set("Outlines", Object::Reference(outline_id));
            catalog.set("PageMode", "UseOutlines");
        }

        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let info_id = doc.add_object(info_dictionary(title.as_deref()));
        doc.trailer.set("Info", Object::Reference(info_id));

        // Compress and save
        doc.compress();
        doc.save(path)?;

        Ok(())
    }
}

/// Catalogs, page-tree nodes and outline roots of a source are rebuilt, not copied
fn is_structural(object: &Object) -> bool {
    let Ok(dict) = object.as_dict() else {
        return false;
    };
    matches!(
        dict.get(b"Type").and_then(|t| t.as_name()),
        Ok(b"Catalog") | Ok(b"Pages") | Ok(b"Outlines")
    )
}

fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let missing: Vec<(&[u8], Object)> = {
        let page = doc.get_object(page_id)?.as_dict()?;
        INHERITABLE
            .iter()
            .filter(|key| !page.has(key))
            .filter_map(|key| inherited_attribute(doc, page_id, key).map(|value| (*key, value)))
            .collect()
    };

    if missing.is_empty() {
        return Ok(());
    }

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    for (key, value) in missing {
        page.set(key.to_vec(), value);
    }
    Ok(())
}

/// Merge PDFs so that every input starts on an odd page when printed duplex
///
/// Each input gets an outline entry titled with its path. Inputs with an odd
/// page count are followed by one blank page. The output may be one of the
/// inputs; it is replaced only once the merged document is complete.
pub fn merge_double_sided(options: &MergeOptions) -> Result<MergeReport> {
    if options.input_paths.is_empty() {
        return Err(Error::MissingInput("No input files provided".to_string()));
    }

    // Validate all input files exist before reading any of them
    for path in &options.input_paths {
        if !path.exists() {
            return Err(Error::FileNotFound(path.clone()));
        }
    }

    let mut output = OutputBuilder::new();
    let mut blank_pages = 0;

    for path in &options.input_paths {
        info!(path = %path.display(), "adding");
        let source = SourceDocument::open(path)?;
        let start = output.page_count();

        let added = output.append_document(source)?;
        info!(pages = added, "appended pages");
        output.add_bookmark(path.display().to_string(), start);

        if added % 2 != 0 {
            output.add_blank_page();
            blank_pages += 1;
        }
    }

    let page_count = output.page_count();
    let bookmarks = output.bookmarks().to_vec();

    info!(
        path = %options.output_path.display(),
        pages = page_count,
        "writing merged output"
    );
    replace_atomically(&options.output_path, |_, scratch| output.write(scratch))?;

    Ok(MergeReport {
        output_path: options.output_path.clone(),
        page_count,
        bookmarks,
        blank_pages,
    })
}
