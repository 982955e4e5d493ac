//! Tests for the interactive PDF exporter.

use lopdf::{Document, Object};

use super::scene_with;
use crate::config::ExportConfig;
use crate::export::formats::PdfExporter;
use crate::export::traits::{DocumentExporter, ExportOptions};
use crate::geometry::Cell;

fn render(config: &ExportConfig, annotations: &[(Cell, &str, &str)]) -> Vec<u8> {
    let (scene, image) = scene_with(config, annotations);
    PdfExporter
        .render(
            &scene,
            &image,
            &ExportOptions::with_file_name("interactive_image.pdf"),
        )
        .unwrap()
        .bytes
}

fn num(object: &Object) -> f32 {
    match object {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("expected number, got {other:?}"),
    }
}

fn first_page_annotations(doc: &Document) -> Vec<lopdf::Dictionary> {
    let pages = doc.get_pages();
    let first = pages[&1];
    let page = doc.get_dictionary(first).unwrap();
    match page.get(b"Annots") {
        Ok(Object::Array(items)) => items
            .iter()
            .map(|o| o.as_dict().unwrap().clone())
            .collect(),
        _ => Vec::new(),
    }
}

#[test]
fn test_pdf_exporter_metadata() {
    assert_eq!(PdfExporter.id(), "pdf");
    assert_eq!(PdfExporter.extension(), "pdf");
}

#[test]
fn test_link_count_matches_annotations() {
    let config = ExportConfig::default();
    for n in [0usize, 1, 3] {
        let annotations: Vec<(Cell, &str, &str)> = (0..n)
            .map(|i| (Cell::new(i as u32, 0), "t", "body text"))
            .collect();
        let bytes = render(&config, &annotations);
        let doc = Document::load_mem(&bytes).unwrap();
        let annots = first_page_annotations(&doc);
        assert_eq!(annots.len(), n);
        for annot in &annots {
            assert_eq!(annot.get(b"Subtype").unwrap().as_name().unwrap(), b"Link");
        }
    }
}

#[test]
fn test_link_rect_uses_inverted_row() {
    // 600x400 at 5x5: image fits the 487pt content box at scale 487/600,
    // cells are 120x80 px. Cell (0, 0) is the TOP-left cell, so its rect
    // must sit at the TOP of the image: rows - row - 1 = 4 cell heights
    // above the image bottom.
    let config = ExportConfig::default();
    let bytes = render(&config, &[(Cell::new(0, 0), "Entrance", "Main door")]);
    let doc = Document::load_mem(&bytes).unwrap();
    let annots = first_page_annotations(&doc);
    assert_eq!(annots.len(), 1);

    let rect = annots[0].get(b"Rect").unwrap().as_array().unwrap();
    let (rx0, ry0, rx1, ry1) = (num(&rect[0]), num(&rect[1]), num(&rect[2]), num(&rect[3]));

    let scale = 487.0_f32 / 600.0;
    assert!((rx0 - 54.0).abs() < 0.5, "left edge at margin, got {rx0}");
    assert!((rx1 - (54.0 + 120.0 * scale)).abs() < 0.5);
    assert!(((ry1 - ry0) - 80.0 * scale).abs() < 0.5, "one cell tall");
    // Bottom of the rect is 4 inverted cell heights above the image bottom
    let expected_offset = 4.0 * 80.0 * scale;
    let ry0_from_ry1 = ry1 - 80.0 * scale;
    assert!((ry0 - ry0_from_ry1).abs() < 0.01);
    assert!(
        ry0 > expected_offset,
        "top row rect must sit near the image top (ry0 = {ry0})"
    );
}

#[test]
fn test_each_link_has_a_destination() {
    let config = ExportConfig::default();
    let bytes = render(
        &config,
        &[
            (Cell::new(0, 0), "a", "first"),
            (Cell::new(1, 1), "b", "second"),
        ],
    );
    let doc = Document::load_mem(&bytes).unwrap();
    let annots = first_page_annotations(&doc);
    assert_eq!(annots.len(), 2);

    let mut dest_tops = Vec::new();
    for annot in &annots {
        let dest = annot.get(b"Dest").unwrap().as_array().unwrap();
        assert!(matches!(dest[0], Object::Reference(_)));
        assert_eq!(dest[1].as_name().unwrap(), b"XYZ");
        dest_tops.push(num(&dest[3]));
    }
    // Blocks flow downward in marker order, so destinations are distinct
    // and strictly decreasing
    assert!(dest_tops[0] > dest_tops[1]);
}

#[test]
fn test_output_is_deterministic() {
    let config = ExportConfig::default();
    let annotations = [(Cell::new(2, 3), "Spot", "Something to see here")];
    let first = render(&config, &annotations);
    let second = render(&config, &annotations);
    assert_eq!(first, second);
}

#[test]
fn test_pdf_ignores_padding() {
    // The PDF path consumes unpadded coordinates; padding must not move
    // the link rectangles
    let unpadded = render(&ExportConfig::default(), &[(Cell::new(0, 0), "t", "x")]);
    let padded_config = ExportConfig {
        padding: 30.0,
        ..Default::default()
    };
    let padded = render(&padded_config, &[(Cell::new(0, 0), "t", "x")]);

    let rect_of = |bytes: &[u8]| {
        let doc = Document::load_mem(bytes).unwrap();
        let annots = first_page_annotations(&doc);
        let rect = annots[0].get(b"Rect").unwrap().as_array().unwrap().clone();
        rect.iter().map(num).collect::<Vec<f32>>()
    };
    assert_eq!(rect_of(&unpadded), rect_of(&padded));
}
