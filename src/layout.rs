//! The single marker layout pass shared by every output path.
//!
//! The raster stamp, the HTML triggers, and the PDF link rectangles all
//! consume the values computed here. Nothing downstream recomputes a
//! center or re-applies padding; the source's duplicated `x_center` /
//! `y_center` computations are collapsed into this one pass.

use crate::address::AddressingConvention;
use crate::error::GridError;
use crate::geometry::{Cell, CellBox, GridGeometry, Point};
use crate::model::AnnotationSet;

/// Vertex offsets of the fixed 10-point star marker, in pixel units
/// relative to the marker center. Unscaled; this exact shape and vertex
/// order is reproduced identically in every rendering of the marker.
pub const STAR_OFFSETS: [(f32, f32); 6] = [
    (0.0, -10.0),
    (6.0, -3.0),
    (10.0, 8.0),
    (0.0, 3.0),
    (-10.0, 8.0),
    (-6.0, -3.0),
];

/// One annotated cell resolved to pixel coordinates, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Stable per-marker identifier, the position in row-major order.
    /// HTML trigger/panel ids and PDF destinations key off this, never
    /// off coordinate strings (which can collide after rounding).
    pub index: usize,
    /// The annotated cell
    pub cell: Cell,
    /// Convention-formatted address, for display
    pub address: String,
    /// Popup title
    pub title: String,
    /// Popup body text
    pub text: String,
    /// Cell center in PADDED canvas coordinates: the PNG stamp position
    /// on the canvas and the HTML trigger position
    pub center: Point,
    /// Cell center in UNPADDED image coordinates: the stamp position on
    /// the bare image, which the PDF path embeds
    pub image_center: Point,
    /// Cell bounding box in UNPADDED image coordinates: the PDF link
    /// rectangle before unit conversion
    pub image_box: CellBox,
}

/// Build the marker list for an annotation set: one marker per annotation,
/// in the set's row-major order, with both coordinate systems resolved.
///
/// Runs exactly once per export; the padding offset between `center` and
/// `image_center` is applied here and nowhere else.
pub fn build_markers(
    annotations: &AnnotationSet,
    geometry: &GridGeometry,
    convention: AddressingConvention,
) -> Result<Vec<Marker>, GridError> {
    let grid = geometry.grid();
    let mut markers = Vec::with_capacity(annotations.len());
    for (index, annotation) in annotations.iter().enumerate() {
        let image_box = geometry.cell_box(annotation.cell)?;
        let image_center = image_box.center();
        markers.push(Marker {
            index,
            cell: annotation.cell,
            address: convention.address(annotation.cell, grid)?,
            title: annotation.title.clone(),
            text: annotation.text.clone(),
            center: geometry.padded_point(image_center),
            image_center,
            image_box,
        });
    }
    log::debug!("Laid out {} marker(s)", markers.len());
    Ok(markers)
}
