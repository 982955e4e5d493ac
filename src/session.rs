//! The per-user export session: owns dimensions, grid, config, and
//! annotations, and drives the export pipeline.

use image::RgbaImage;

use crate::config::ExportConfig;
use crate::error::GridError;
use crate::export::{ExportArtifact, ExportOptions, ExportScene, ExporterRegistry};
use crate::font::LabelFont;
use crate::geometry::{Cell, GridGeometry, GridSpec, ImageDimensions};
use crate::model::{Annotation, AnnotationSet};
use crate::raster::{self, RenderedImage};

/// One user's grid annotation session.
///
/// Single-threaded and request/response shaped: an export call computes
/// geometry, layout, and serialization fully before returning. Sessions
/// share nothing; concurrent users each own their own `Session`.
#[derive(Debug)]
pub struct Session {
    dims: ImageDimensions,
    grid: GridSpec,
    config: ExportConfig,
    annotations: AnnotationSet,
    registry: ExporterRegistry,
}

impl Session {
    /// Create a session, validating the grid against the configured
    /// addressing convention and the padding value.
    pub fn new(
        dims: ImageDimensions,
        grid: GridSpec,
        config: ExportConfig,
    ) -> Result<Self, GridError> {
        config.convention.validate_grid(grid)?;
        if !config.padding.is_finite() || config.padding < 0.0 {
            return Err(GridError::InvalidPadding {
                value: config.padding,
            });
        }
        let annotations = AnnotationSet::new(grid, config.empty_text);
        Ok(Self {
            dims,
            grid,
            config,
            annotations,
            registry: ExporterRegistry::new(),
        })
    }

    /// The image dimensions this session was created with.
    pub fn dims(&self) -> ImageDimensions {
        self.dims
    }

    /// The current grid.
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// The session configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Annotate a cell; replaces any existing annotation on that cell.
    pub fn annotate(
        &mut self,
        cell: Cell,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), GridError> {
        self.annotations.add(cell, title, text)
    }

    /// Annotate a cell given its address under the session convention.
    pub fn annotate_at(
        &mut self,
        address: &str,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), GridError> {
        let cell = self.config.convention.parse(address, self.grid)?;
        self.annotate(cell, title, text)
    }

    /// Remove the annotation on a cell, if any.
    pub fn remove(&mut self, cell: Cell) -> Option<Annotation> {
        self.annotations.remove(cell)
    }

    /// The annotation set, row-major ordered.
    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Change the grid. Revalidates against the convention and discards
    /// every annotation, since old cell indices would be stale.
    pub fn set_grid(&mut self, rows: u32, cols: u32) -> Result<(), GridError> {
        let grid = GridSpec::new(rows, cols);
        self.config.convention.validate_grid(grid)?;
        self.grid = grid;
        self.annotations.reset_grid(grid);
        Ok(())
    }

    /// Format a cell's address under the session convention.
    pub fn address_of(&self, cell: Cell) -> Result<String, GridError> {
        self.config.convention.address(cell, self.grid)
    }

    fn decode(&self, image_bytes: &[u8]) -> Result<RgbaImage, GridError> {
        let decoded = image::load_from_memory(image_bytes)?.to_rgba8();
        let actual = ImageDimensions::new(decoded.width(), decoded.height())?;
        if actual != self.dims {
            return Err(GridError::DimensionMismatch {
                declared: self.dims,
                actual,
            });
        }
        Ok(decoded)
    }

    fn label_font(&self, scene: &ExportScene) -> Option<LabelFont> {
        if !scene.include_grid_overlay || scene.axis_labels.is_empty() {
            return None;
        }
        match &self.config.label_font {
            Some(bytes) => LabelFont::from_vec(bytes.clone()),
            None => LabelFont::discover(),
        }
    }

    /// Export the requested formats in one pass.
    ///
    /// Decodes the image, runs the single geometry/layout pass, renders
    /// both bitmaps once, then serializes one artifact per format id
    /// ("html", "pdf", "png"). Fails without partial results.
    pub fn export(
        &self,
        image_bytes: &[u8],
        format_ids: &[&str],
    ) -> Result<Vec<ExportArtifact>, GridError> {
        let base = self.decode(image_bytes)?;
        let geometry = GridGeometry::new(self.dims, self.grid, self.config.padding)?;
        let scene = ExportScene::build(&self.annotations, &geometry, &self.config)?;
        let font = self.label_font(&scene);
        let rendered = RenderedImage::render(&base, &scene, font.as_ref());

        let mut artifacts = Vec::with_capacity(format_ids.len());
        for id in format_ids {
            let exporter = self.registry.resolve(id)?;
            let file_name = match *id {
                "html" => self.config.names.html.clone(),
                "pdf" => self.config.names.pdf.clone(),
                _ => self.config.names.png.clone(),
            };
            let options = ExportOptions::with_file_name(file_name);
            artifacts.push(exporter.render(&scene, &rendered, &options)?);
        }
        log::info!("Exported {} artifact(s)", artifacts.len());
        Ok(artifacts)
    }

    /// Render the live preview: the padded canvas with the grid overlay
    /// forced on, as PNG bytes.
    pub fn preview_png(&self, image_bytes: &[u8]) -> Result<Vec<u8>, GridError> {
        let base = self.decode(image_bytes)?;
        let geometry = GridGeometry::new(self.dims, self.grid, self.config.padding)?;
        let mut preview_config = self.config.clone();
        preview_config.include_grid_overlay = true;
        let scene = ExportScene::build(&self.annotations, &geometry, &preview_config)?;
        let font = match &self.config.label_font {
            Some(bytes) => LabelFont::from_vec(bytes.clone()),
            None => LabelFont::discover(),
        };
        let rendered = RenderedImage::render(&base, &scene, font.as_ref());
        raster::encode_png(&rendered.canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressingConvention;
    use image::Rgba;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([100, 100, 100, 255]));
        raster::encode_png(&image).unwrap()
    }

    fn session() -> Session {
        Session::new(
            ImageDimensions::new(600, 400).unwrap(),
            GridSpec::new(5, 5),
            ExportConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_grid() {
        let err = Session::new(
            ImageDimensions::new(600, 400).unwrap(),
            GridSpec::new(1, 5),
            ExportConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GridError::GridOutOfRange { axis: "rows", .. }));
    }

    #[test]
    fn test_annotate_at_uses_session_convention() {
        let mut s = session();
        s.annotate_at("B3", "t", "x").unwrap();
        assert!(s.annotations().get(Cell::new(1, 2)).is_some());

        let config = ExportConfig {
            convention: AddressingConvention::ColLetter,
            ..Default::default()
        };
        let mut s = Session::new(
            ImageDimensions::new(600, 400).unwrap(),
            GridSpec::new(5, 5),
            config,
        )
        .unwrap();
        s.annotate_at("B3", "t", "x").unwrap();
        // Col-letter: letter = column B = 1, number 3 = row 5 - 3 = 2
        assert!(s.annotations().get(Cell::new(2, 1)).is_some());
    }

    #[test]
    fn test_set_grid_discards_annotations() {
        let mut s = session();
        s.annotate(Cell::new(4, 4), "t", "x").unwrap();
        s.set_grid(3, 3).unwrap();
        assert!(s.annotations().is_empty());
        assert!(matches!(
            s.set_grid(30, 3),
            Err(GridError::GridOutOfRange { .. })
        ));
    }

    #[test]
    fn test_export_rejects_bad_image_bytes() {
        let s = session();
        let err = s.export(b"not an image", &["html"]).unwrap_err();
        assert!(matches!(err, GridError::InvalidImage(_)));
    }

    #[test]
    fn test_export_rejects_dimension_mismatch() {
        let s = session();
        let err = s.export(&png_bytes(300, 200), &["html"]).unwrap_err();
        assert!(matches!(err, GridError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_export_rejects_unknown_format() {
        let s = session();
        let err = s.export(&png_bytes(600, 400), &["docx"]).unwrap_err();
        assert!(matches!(err, GridError::UnknownFormat { id } if id == "docx"));
    }

    #[test]
    fn test_export_produces_requested_artifacts() {
        let mut s = session();
        s.annotate(Cell::new(0, 0), "Entrance", "Main door").unwrap();
        let artifacts = s.export(&png_bytes(600, 400), &["html", "pdf", "png"]).unwrap();
        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[0].file_name, "interactive_image.html");
        assert_eq!(artifacts[1].file_name, "interactive_image.pdf");
        assert_eq!(artifacts[2].file_name, "final_image_with_icons.png");
        assert!(artifacts.iter().all(|a| !a.bytes.is_empty()));
    }

    #[test]
    fn test_preview_always_draws_overlay() {
        let s = session();
        let preview = s.preview_png(&png_bytes(600, 400)).unwrap();
        let decoded = image::load_from_memory(&preview).unwrap().to_rgba8();
        // First interior vertical grid line at x = 120
        assert_eq!(*decoded.get_pixel(120, 10), Rgba([255, 0, 0, 255]));
    }
}
