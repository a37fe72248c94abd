//! Slipsheet creation: a single page bearing an exhibit designation

use std::path::{Path, PathBuf};

use chrono::Local;
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use tracing::debug;

use crate::error::Result;
use crate::label::Label;
use crate::layout::{Margins, Orientation, PageSize};
use crate::pdf::render::{Canvas, CenteredTitle, PageRenderer, DEFAULT_FONT_SIZE, FONT_NAME, FONT_RESOURCE};

const PRODUCER: &str = concat!("pdf-exhibits ", env!("CARGO_PKG_VERSION"));

/// Appearance of generated slipsheets
#[derive(Debug, Clone, Copy)]
pub struct SlipsheetStyle {
    /// Designation font size in points
    pub font_size: f32,
    pub margins: Margins,
}

impl Default for SlipsheetStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            margins: Margins::default(),
        }
    }
}

/// Generate a single-page PDF at `output` showing `designation`
///
/// The document title is set to `designation` as well. `renderer` draws the
/// page body; [`CenteredTitle`] is the usual choice.
pub fn generate_slipsheet<R: PageRenderer + ?Sized>(
    output: &Path,
    designation: &str,
    page_size: PageSize,
    margins: Margins,
    renderer: &R,
) -> Result<PathBuf> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FONT_NAME,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_RESOURCE => font_id },
    });

    let (width, height) = (page_size.width.pt(), page_size.height.pt());
    let mut canvas = Canvas::new(margins);
    renderer.draw(&mut canvas, width, height, designation);
    let content_id = doc.add_object(Stream::new(Dictionary::new(), canvas.into_content()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box_object(page_size.media_box()),
        "Contents" => content_id,
        "Resources" => resources_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(info_dictionary(Some(designation)));
    doc.trailer.set("Info", info_id);

    doc.compress();
    doc.save(output)?;

    debug!(path = %output.display(), designation, width, height, "generated slipsheet");
    Ok(output.to_path_buf())
}

/// /Info dictionary with producer, creation date and optional title
pub(crate) fn info_dictionary(title: Option<&str>) -> Dictionary {
    let mut info = dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(Local::now().format("D:%Y%m%d%H%M%S").to_string()),
    };
    if let Some(title) = title {
        info.set("Title", Object::string_literal(title));
    }
    info
}

/// MediaBox array, keeping whole point values as integers
pub(crate) fn media_box_object(values: [f32; 4]) -> Object {
    Object::Array(
        values
            .iter()
            .map(|&v| {
                if v.fract() == 0.0 {
                    Object::Integer(v as i64)
                } else {
                    Object::Real(v.into())
                }
            })
            .collect(),
    )
}

/// Produces `Exhibit_{label}.pdf` slipsheets on letter paper
#[derive(Debug, Clone, Copy)]
pub struct SlipsheetGenerator {
    pub orientation: Orientation,
    pub style: SlipsheetStyle,
}

impl SlipsheetGenerator {
    pub fn new(orientation: Orientation, style: SlipsheetStyle) -> Self {
        Self { orientation, style }
    }

    /// Letter portrait slipsheets with the default style
    pub fn portrait() -> Self {
        Self::new(Orientation::Portrait, SlipsheetStyle::default())
    }

    /// Letter landscape slipsheets with the default style
    pub fn landscape() -> Self {
        Self::new(Orientation::Landscape, SlipsheetStyle::default())
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::letter_for(self.orientation)
    }

    /// File name used for the slipsheet of `label`
    pub fn file_name(label: &Label) -> String {
        format!("Exhibit_{}.pdf", label)
    }

    /// Write the slipsheet for `label` into `dir`
    pub fn generate(&self, dir: &Path, label: &Label) -> Result<PathBuf> {
        let renderer = CenteredTitle {
            font_size: self.style.font_size,
        };
        generate_slipsheet(
            &dir.join(Self::file_name(label)),
            &label.designation(),
            self.page_size(),
            self.style.margins,
            &renderer,
        )
    }
}
