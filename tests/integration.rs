//! Integration tests for the exhibit library

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use tempfile::TempDir;

use pdf_exhibits::label::Label;
use pdf_exhibits::layout::Orientation;
use pdf_exhibits::pdf::{
    add_slipsheet, count_pages, detect_orientation, merge_double_sided, MergeOptions,
    SlipsheetGenerator, SourceDocument,
};
use pdf_exhibits::sequence::{run, ExhibitOptions, Inputs};

const LETTER: [i64; 4] = [0, 0, 612, 792];
const LETTER_WIDE: [i64; 4] = [0, 0, 792, 612];

/// Write a PDF with `pages` pages whose content shows `{tag}-{n}`
///
/// The media box and rotation live on the page tree node, so pages only
/// inherit them.
fn write_fixture(path: &Path, tag: &str, pages: usize, media_box: [i64; 4], rotate: Option<i64>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for n in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 400 Td ({}-{}) Tj ET", tag, n);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
        "Resources" => resources_id,
        "MediaBox" => media_box.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
    };
    if let Some(degrees) = rotate {
        pages_dict.set("Rotate", Object::Integer(degrees));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("Failed to write fixture");
}

/// Decoded content of every page, in order
fn page_contents(path: &Path) -> Vec<String> {
    let mut doc = Document::load(path).expect("Failed to load PDF");
    doc.decompress();
    doc.get_pages()
        .values()
        .map(|&id| String::from_utf8_lossy(&doc.get_page_content(id).unwrap_or_default()).into_owned())
        .collect()
}

fn label(s: &str) -> Label {
    Label::parse(s).unwrap()
}

#[test]
fn test_double_sided_padding() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut inputs = Vec::new();
    for (name, pages) in [("three", 3), ("four", 4), ("five", 5)] {
        let path = temp_dir.path().join(format!("{}.pdf", name));
        write_fixture(&path, name, pages, LETTER, None);
        inputs.push(path);
    }

    let mut options = MergeOptions::double_sided(inputs.clone());
    assert_eq!(options.output_path, Path::new("combined-3-files.pdf"));
    options.output_path = temp_dir.path().join("combined-3-files.pdf");

    let report = merge_double_sided(&options).expect("Failed to merge PDFs");

    // 3 + 1 blank + 4 + 5 + 1 blank
    assert_eq!(report.page_count, 14);
    assert_eq!(report.blank_pages, 2);
    assert_eq!(count_pages(&options.output_path).unwrap(), 14);

    let starts: Vec<usize> = report.bookmarks.iter().map(|b| b.page_index).collect();
    assert_eq!(starts, vec![0, 4, 8]);
    assert_eq!(report.bookmarks[1].title, inputs[1].display().to_string());

    let doc = Document::load(&options.output_path).unwrap();
    let root = doc.trailer.get(b"Root").and_then(Object::as_reference).unwrap();
    let catalog = doc.get_dictionary(root).unwrap();
    assert!(catalog.has(b"Outlines"), "merged PDF should carry an outline");
}

#[test]
fn test_double_sided_preserves_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("first.pdf");
    let second = temp_dir.path().join("second.pdf");
    write_fixture(&first, "first", 1, LETTER, None);
    write_fixture(&second, "second", 2, LETTER, None);

    let options = MergeOptions {
        input_paths: vec![first, second],
        output_path: temp_dir.path().join("ordered.pdf"),
    };
    merge_double_sided(&options).expect("Failed to merge PDFs");

    let contents = page_contents(&options.output_path);
    assert_eq!(contents.len(), 4);
    assert!(contents[0].contains("(first-1)"));
    assert!(!contents[1].contains("Tj"), "page 2 should be the blank pad");
    assert!(contents[2].contains("(second-1)"));
    assert!(contents[3].contains("(second-2)"));
}

#[test]
fn test_merge_onto_an_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("a.pdf");
    let second = temp_dir.path().join("b.pdf");
    write_fixture(&first, "a", 3, LETTER, None);
    write_fixture(&second, "b", 2, LETTER, None);

    let options = MergeOptions {
        input_paths: vec![first.clone(), second],
        output_path: first.clone(),
    };
    let report = merge_double_sided(&options).expect("Failed to merge PDFs");

    assert_eq!(report.page_count, 6);
    assert_eq!(count_pages(&first).unwrap(), 6);
    let contents = page_contents(&first);
    assert!(contents[0].contains("(a-1)"));
    assert!(contents[2].contains("(a-3)"));
    assert!(contents[4].contains("(b-1)"));

    // Only the two PDFs remain; the scratch directory is gone
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
}

#[test]
fn test_blank_page_matches_previous_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let wide = temp_dir.path().join("wide.pdf");
    write_fixture(&wide, "wide", 1, LETTER_WIDE, None);

    let options = MergeOptions {
        input_paths: vec![wide],
        output_path: temp_dir.path().join("padded.pdf"),
    };
    merge_double_sided(&options).expect("Failed to merge PDFs");

    let merged = SourceDocument::open(&options.output_path).unwrap();
    assert_eq!(merged.page_count(), 2);
    assert_eq!(merged.page_bounding_box(1).unwrap(), [0.0, 0.0, 792.0, 612.0]);
}

#[test]
fn test_merge_keeps_inherited_rotation() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let scan = temp_dir.path().join("scan.pdf");
    write_fixture(&scan, "scan", 2, LETTER_WIDE, Some(90));

    let options = MergeOptions {
        input_paths: vec![scan],
        output_path: temp_dir.path().join("scan-merged.pdf"),
    };
    merge_double_sided(&options).expect("Failed to merge PDFs");

    let merged = SourceDocument::open(&options.output_path).unwrap();
    assert_eq!(merged.page_rotation(1).unwrap(), Some(90));
    assert_eq!(detect_orientation(&merged).unwrap(), Orientation::Portrait);
}

#[test]
fn test_merge_unreadable_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let good = temp_dir.path().join("good.pdf");
    let bad = temp_dir.path().join("bad.pdf");
    write_fixture(&good, "good", 1, LETTER, None);
    fs::write(&bad, b"garbage").unwrap();

    let options = MergeOptions {
        input_paths: vec![good, bad],
        output_path: temp_dir.path().join("never.pdf"),
    };
    assert!(merge_double_sided(&options).is_err());
    assert!(!options.output_path.exists());
}

#[test]
fn test_orientation_detection_from_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let rotated = temp_dir.path().join("rotated.pdf");
    let flat = temp_dir.path().join("flat.pdf");
    write_fixture(&rotated, "rotated", 1, LETTER_WIDE, Some(90));
    write_fixture(&flat, "flat", 1, LETTER_WIDE, Some(0));

    let rotated = SourceDocument::open(&rotated).unwrap();
    let flat = SourceDocument::open(&flat).unwrap();
    assert_eq!(detect_orientation(&rotated).unwrap(), Orientation::Portrait);
    assert_eq!(detect_orientation(&flat).unwrap(), Orientation::Landscape);
}

#[test]
fn test_add_slipsheet_to_new_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source = temp_dir.path().join("lease.pdf");
    let output = temp_dir.path().join("Ex_A_lease.pdf");
    write_fixture(&source, "lease", 2, LETTER, None);

    add_slipsheet(&source, &output, &label("A"), &SlipsheetGenerator::portrait())
        .expect("Failed to add slipsheet");

    let contents = page_contents(&output);
    assert_eq!(contents.len(), 3);
    assert!(contents[0].contains("(Exhibit A) Tj"));
    assert!(contents[1].contains("(lease-1)"));
    assert!(contents[2].contains("(lease-2)"));

    // The source is untouched
    assert_eq!(count_pages(&source).unwrap(), 2);
}

#[test]
fn test_add_slipsheet_in_place() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source = temp_dir.path().join("Exhibit_B_invoice.pdf");
    let copy_source = temp_dir.path().join("copy.pdf");
    let copy_output = temp_dir.path().join("copy-out.pdf");
    write_fixture(&source, "invoice", 3, LETTER, None);
    write_fixture(&copy_source, "invoice", 3, LETTER, None);

    let generator = SlipsheetGenerator::portrait();
    add_slipsheet(&source, &source, &label("B"), &generator).expect("Failed to add slipsheet in place");
    add_slipsheet(&copy_source, &copy_output, &label("B"), &generator).expect("Failed to add slipsheet");

    let in_place = page_contents(&source);
    let copied = page_contents(&copy_output);
    assert_eq!(in_place.len(), 4);
    assert_eq!(in_place, copied);
    for n in 1..=3 {
        assert!(in_place[n].contains(&format!("(invoice-{})", n)));
    }

    // Nothing but the PDFs is left in the directory
    let mut names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Exhibit_B_invoice.pdf", "copy-out.pdf", "copy.pdf"]);
}

#[test]
fn test_run_standalone_slipsheets() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("slipsheets");

    let options = ExhibitOptions {
        label: Some(label("y")),
        orientation: Some(Orientation::Landscape),
        inputs: Inputs::Standalone { count: 3 },
        output_dir: out_dir.clone(),
        ..Default::default()
    };
    let records = run(&options).expect("Failed to generate slipsheets");

    let labels: Vec<String> = records.iter().map(|r| r.label.to_string()).collect();
    assert_eq!(labels, vec!["y", "z", "aa"]);
    for name in ["Exhibit_y.pdf", "Exhibit_z.pdf", "Exhibit_aa.pdf"] {
        let path = out_dir.join(name);
        let slipsheet = SourceDocument::open(&path).unwrap();
        assert_eq!(slipsheet.page_count(), 1);
        assert_eq!(detect_orientation(&slipsheet).unwrap(), Orientation::Landscape);
    }
    assert_eq!(
        SourceDocument::open(&out_dir.join("Exhibit_aa.pdf")).unwrap().title().as_deref(),
        Some("Exhibit aa")
    );
}

#[test]
fn test_run_with_explicit_label() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let wide = temp_dir.path().join("chart.pdf");
    let tall = temp_dir.path().join("memo.pdf");
    write_fixture(&wide, "chart", 1, LETTER_WIDE, None);
    write_fixture(&tall, "memo", 2, LETTER, None);
    let out_dir = temp_dir.path().join("out");

    let options = ExhibitOptions {
        label: Some(label("Z")),
        inputs: Inputs::Files(vec![wide.clone(), tall.clone()]),
        output_dir: out_dir.clone(),
        ..Default::default()
    };
    let records = run(&options).expect("Failed to run exhibits");

    assert_eq!(records[0].output, out_dir.join("Ex_Z_chart.pdf"));
    assert_eq!(records[0].orientation, Orientation::Landscape);
    assert_eq!(records[1].output, out_dir.join("Ex_AA_memo.pdf"));
    assert_eq!(records[1].orientation, Orientation::Portrait);

    let chart = page_contents(&records[0].output);
    assert!(chart[0].contains("(Exhibit Z) Tj"));
    let memo = page_contents(&records[1].output);
    assert_eq!(memo.len(), 3);
    assert!(memo[0].contains("(Exhibit AA) Tj"));

    // Auto-detected landscape slipsheet
    let chart_doc = SourceDocument::open(&records[0].output).unwrap();
    assert_eq!(chart_doc.page_bounding_box(0).unwrap(), [0.0, 0.0, 792.0, 612.0]);

    // Originals untouched
    assert_eq!(count_pages(&wide).unwrap(), 1);
    assert_eq!(count_pages(&tall).unwrap(), 2);
}

#[test]
fn test_run_with_inferred_labels() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("Exhibit_C_contract.pdf");
    let second = temp_dir.path().join("Ex. 7 - invoice.pdf");
    write_fixture(&first, "contract", 1, LETTER, None);
    write_fixture(&second, "invoice", 1, LETTER, None);

    let options = ExhibitOptions {
        inputs: Inputs::Files(vec![first.clone(), second.clone()]),
        ..Default::default()
    };
    let records = run(&options).expect("Failed to run exhibits");

    assert_eq!(records[0].output, first);
    assert_eq!(records[1].output, second);
    assert!(page_contents(&first)[0].contains("(Exhibit C) Tj"));
    assert!(page_contents(&second)[0].contains("(Exhibit 7) Tj"));
}

#[test]
fn test_run_inference_failure_touches_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let good = temp_dir.path().join("Exhibit_A.pdf");
    let bad = temp_dir.path().join("randomfile.pdf");
    write_fixture(&good, "good", 1, LETTER, None);
    write_fixture(&bad, "bad", 1, LETTER, None);

    let options = ExhibitOptions {
        inputs: Inputs::Files(vec![good.clone(), bad]),
        ..Default::default()
    };
    let result = run(&options);
    assert!(matches!(result, Err(pdf_exhibits::Error::LabelInference(_))));

    // Planning failed before the first file was rewritten
    assert_eq!(count_pages(&good).unwrap(), 1);
}

#[test]
fn test_run_missing_input_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let options = ExhibitOptions {
        label: Some(label("A")),
        orientation: Some(Orientation::Portrait),
        inputs: Inputs::Files(vec![PathBuf::from("nonexistent.pdf")]),
        output_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let result = run(&options);
    assert!(matches!(result, Err(pdf_exhibits::Error::FileNotFound(_))));
}
