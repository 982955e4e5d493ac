//! Tests for the interactive HTML exporter.

use super::scene_with;
use crate::config::ExportConfig;
use crate::export::formats::HtmlExporter;
use crate::export::traits::{DocumentExporter, ExportOptions};
use crate::geometry::Cell;

fn render(config: &ExportConfig, annotations: &[(Cell, &str, &str)]) -> String {
    let (scene, image) = scene_with(config, annotations);
    let artifact = HtmlExporter
        .render(
            &scene,
            &image,
            &ExportOptions::with_file_name("interactive_image.html"),
        )
        .unwrap();
    String::from_utf8(artifact.bytes).unwrap()
}

#[test]
fn test_html_exporter_metadata() {
    assert_eq!(HtmlExporter.id(), "html");
    assert_eq!(HtmlExporter.extension(), "html");
}

#[test]
fn test_example_scenario_trigger_position() {
    let config = ExportConfig::default();
    let html = render(&config, &[(Cell::new(0, 0), "Entrance", "Main door")]);

    assert!(html.contains("left:60px;top:40px"), "trigger at cell center");
    assert!(html.contains("<strong>Entrance</strong>"));
    assert!(html.contains("Main door"));
}

#[test]
fn test_padding_shifts_trigger_position() {
    let config = ExportConfig {
        padding: 30.0,
        ..Default::default()
    };
    let html = render(&config, &[(Cell::new(0, 0), "Entrance", "Main door")]);
    assert!(html.contains("left:90px;top:70px"), "padded trigger offset");
}

#[test]
fn test_trigger_and_panel_counts_match_annotations() {
    let config = ExportConfig::default();
    for n in [0usize, 1, 25] {
        let annotations: Vec<(Cell, &str, &str)> = (0..n)
            .map(|i| (Cell::new((i / 5) as u32, (i % 5) as u32), "t", "x"))
            .collect();
        let html = render(&config, &annotations);
        assert_eq!(html.matches("class=\"trigger\"").count(), n);
        assert_eq!(html.matches("class=\"popup\"").count(), n);
    }
}

#[test]
fn test_trigger_panel_pairing_by_stable_ids() {
    let config = ExportConfig::default();
    let html = render(
        &config,
        &[
            (Cell::new(2, 0), "c", "3rd"),
            (Cell::new(0, 0), "a", "1st"),
            (Cell::new(0, 1), "b", "2nd"),
        ],
    );
    // Row-major order assigns indices regardless of insertion order
    for i in 0..3 {
        assert!(html.contains(&format!("id=\"marker-{i}\"")));
        assert!(html.contains(&format!("data-panel=\"panel-{i}\"")));
        assert!(html.contains(&format!("id=\"panel-{i}\"")));
    }
    let a = html.find("<strong>a</strong>").unwrap();
    let b = html.find("<strong>b</strong>").unwrap();
    let c = html.find("<strong>c</strong>").unwrap();
    assert!(a < b && b < c, "panels follow row-major marker order");
}

#[test]
fn test_payload_is_escaped() {
    let config = ExportConfig::default();
    let html = render(
        &config,
        &[(Cell::new(0, 0), "<b>bold</b>", "a & b \"quoted\"")],
    );
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(html.contains("a &amp; b"));
    assert!(!html.contains("<b>bold</b>"));
}

#[test]
fn test_page_references_png_by_relative_name() {
    let config = ExportConfig::default();
    let html = render(&config, &[]);
    assert!(html.contains("src=\"final_image_with_icons.png\""));
    // Natural canvas size, no forced CSS width
    assert!(html.contains("width=\"600\" height=\"400\""));
    assert!(!html.contains("width: 600px"));
}
