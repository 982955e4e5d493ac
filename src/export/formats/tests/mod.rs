//! Unit tests for the document exporters.
//!
//! These verify marker/trigger parity, deterministic ordering, and the
//! coordinate conversions of each output format.

use image::{Rgba, RgbaImage};

use crate::config::{EmptyTextPolicy, ExportConfig};
use crate::export::scene::ExportScene;
use crate::geometry::{Cell, GridGeometry, GridSpec, ImageDimensions};
use crate::model::AnnotationSet;
use crate::raster::RenderedImage;

mod html_tests;
mod pdf_tests;

/// Build a 600x400, 5x5 scene with the given annotations and config.
fn scene_with(
    config: &ExportConfig,
    annotations: &[(Cell, &str, &str)],
) -> (ExportScene, RenderedImage) {
    let dims = ImageDimensions::new(600, 400).unwrap();
    let grid = GridSpec::new(5, 5);
    let geometry = GridGeometry::new(dims, grid, config.padding).unwrap();

    let mut set = AnnotationSet::new(grid, EmptyTextPolicy::Allow);
    for (cell, title, text) in annotations {
        set.add(*cell, *title, *text).unwrap();
    }

    let scene = ExportScene::build(&set, &geometry, config).unwrap();
    let base = RgbaImage::from_pixel(600, 400, Rgba([40, 80, 120, 255]));
    let rendered = RenderedImage::render(&base, &scene, None);
    (scene, rendered)
}
