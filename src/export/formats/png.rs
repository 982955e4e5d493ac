//! PNG exporter: encodes the padded, stamped canvas.

use crate::error::GridError;
use crate::export::scene::ExportScene;
use crate::export::traits::{ArtifactKind, DocumentExporter, ExportArtifact, ExportOptions};
use crate::raster::{self, RenderedImage};

/// Stamped PNG exporter.
///
/// Markers are always stamped; whether grid lines and axis labels are
/// present was decided when the canvas was rendered, controlled by the
/// scene's `include_grid_overlay` flag.
pub struct PngExporter;

impl DocumentExporter for PngExporter {
    fn id(&self) -> &'static str {
        "png"
    }

    fn display_name(&self) -> &'static str {
        "Stamped PNG"
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Png
    }

    fn render(
        &self,
        scene: &ExportScene,
        image: &RenderedImage,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, GridError> {
        log::info!(
            "Encoding PNG canvas {}x{} (overlay: {})",
            scene.canvas_size.0,
            scene.canvas_size.1,
            scene.include_grid_overlay
        );
        Ok(ExportArtifact {
            kind: ArtifactKind::Png,
            file_name: options.file_name.clone(),
            bytes: raster::encode_png(&image.canvas)?,
        })
    }
}
