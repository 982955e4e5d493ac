//! The precomputed scene every exporter consumes.

use crate::config::ExportConfig;
use crate::error::GridError;
use crate::geometry::{AxisLabel, GridGeometry, GridLine, GridSpec, ImageDimensions};
use crate::layout::{self, Marker};
use crate::model::AnnotationSet;

/// Everything an exporter needs, computed once per export.
///
/// Geometry is resolved here (grid lines, axis labels, marker positions in
/// both coordinate systems); the exporters only serialize. No exporter may
/// derive a coordinate from raw inputs.
#[derive(Debug, Clone)]
pub struct ExportScene {
    /// Source image size in pixels (unpadded)
    pub image_size: ImageDimensions,
    /// Padded canvas size in whole pixels
    pub canvas_size: (u32, u32),
    /// Uniform padding offset
    pub padding: f32,
    /// The grid this scene was laid out for
    pub grid: GridSpec,
    /// Whether grid lines and axis labels are part of the exported canvas
    pub include_grid_overlay: bool,
    /// Interior grid line segments, padded coordinates
    pub grid_lines: Vec<GridLine>,
    /// Axis labels, padded coordinates; empty when padding is zero
    pub axis_labels: Vec<AxisLabel>,
    /// Markers in row-major annotation order
    pub markers: Vec<Marker>,
    /// File name the HTML page references the PNG artifact by
    pub png_file_name: String,
}

impl ExportScene {
    /// Lay out a scene from the session state. Runs the single marker
    /// layout pass and captures grid lines and labels alongside it.
    pub fn build(
        annotations: &AnnotationSet,
        geometry: &GridGeometry,
        config: &ExportConfig,
    ) -> Result<Self, GridError> {
        let markers = layout::build_markers(annotations, geometry, config.convention)?;
        Ok(Self {
            image_size: geometry.dims(),
            canvas_size: geometry.canvas_size(),
            padding: geometry.padding(),
            grid: geometry.grid(),
            include_grid_overlay: config.include_grid_overlay,
            grid_lines: geometry.grid_lines(),
            axis_labels: geometry.axis_labels(config.convention),
            markers,
            png_file_name: config.names.png.clone(),
        })
    }
}
