//! Raster rendering: marker stamping and padded canvas composition.
//!
//! Produces both bitmaps of an export in one pass: the bare image with
//! stars stamped (embedded into the PDF) and the padded canvas with the
//! optional grid overlay (encoded as the PNG artifact and referenced by
//! the HTML page). The canvas embeds the stamped image, so marker pixels
//! are identical in both modulo the padding offset.

use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, draw_text_mut, text_size};
use imageproc::point::Point as PixelPoint;
use imageproc::rect::Rect;

use crate::error::GridError;
use crate::export::scene::ExportScene;
use crate::font::LabelFont;
use crate::geometry::Point;
use crate::layout::STAR_OFFSETS;

/// Star fill color
const STAR_FILL: Rgba<u8> = Rgba([255, 200, 0, 255]);
/// Star outline color
const STAR_OUTLINE: Rgba<u8> = Rgba([170, 60, 0, 255]);
/// Grid overlay line color, the source's red
const GRID_LINE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
/// Grid overlay line thickness in pixels
const GRID_LINE_WIDTH: u32 = 2;
/// Canvas background behind the padded margin
const CANVAS_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Axis label color
const LABEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// The two bitmaps of one export.
pub struct RenderedImage {
    /// The decoded source image with star markers stamped at each
    /// marker's unpadded center
    pub stamped: RgbaImage,
    /// `stamped` pasted at `(padding, padding)` onto the padded canvas,
    /// with the grid overlay when the scene enables it
    pub canvas: RgbaImage,
}

impl RenderedImage {
    /// Render both bitmaps for a scene.
    ///
    /// `font` is only consulted when the overlay (with labels) is drawn;
    /// a missing font skips the labels with a warning.
    pub fn render(base: &RgbaImage, scene: &ExportScene, font: Option<&LabelFont>) -> Self {
        let mut stamped = base.clone();
        for marker in &scene.markers {
            stamp_star(&mut stamped, marker.image_center);
        }

        let (cw, ch) = scene.canvas_size;
        let mut canvas = RgbaImage::from_pixel(cw, ch, CANVAS_BACKGROUND);
        let offset = scene.padding.round() as i64;
        imageops::overlay(&mut canvas, &stamped, offset, offset);

        if scene.include_grid_overlay {
            draw_grid_overlay(&mut canvas, scene, font);
        }

        Self { stamped, canvas }
    }
}

/// Stamp the fixed star polygon centered on `center`: filled, then
/// outlined along the same vertex ring.
pub fn stamp_star(image: &mut RgbaImage, center: Point) {
    let vertices: Vec<PixelPoint<i32>> = STAR_OFFSETS
        .iter()
        .map(|&(dx, dy)| {
            PixelPoint::new(
                (center.x + dx).round() as i32,
                (center.y + dy).round() as i32,
            )
        })
        .collect();
    draw_polygon_mut(image, &vertices, STAR_FILL);
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        draw_line_segment_mut(
            image,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            STAR_OUTLINE,
        );
    }
}

fn draw_grid_overlay(canvas: &mut RgbaImage, scene: &ExportScene, font: Option<&LabelFont>) {
    for line in &scene.grid_lines {
        // Lines are axis-aligned; a 2px filled rect straddles the coordinate
        let (sx, sy) = (line.start.x, line.start.y);
        let (ex, ey) = (line.end.x, line.end.y);
        let rect = if (sx - ex).abs() < f32::EPSILON {
            Rect::at((sx.round() as i32) - 1, sy.round() as i32)
                .of_size(GRID_LINE_WIDTH, (ey - sy).round().max(1.0) as u32)
        } else {
            Rect::at(sx.round() as i32, (sy.round() as i32) - 1)
                .of_size((ex - sx).round().max(1.0) as u32, GRID_LINE_WIDTH)
        };
        imageproc::drawing::draw_filled_rect_mut(canvas, rect, GRID_LINE_COLOR);
    }

    if scene.axis_labels.is_empty() {
        return;
    }
    let Some(font) = font else {
        log::warn!("Skipping axis labels: no label font available");
        return;
    };
    let scale = (scene.padding * 0.6).clamp(10.0, 24.0);
    for label in &scene.axis_labels {
        let (tw, th) = text_size(scale, font.as_font(), &label.text);
        let x = (label.anchor.x - tw as f32 / 2.0).round() as i32;
        let y = (label.anchor.y - th as f32 / 2.0).round() as i32;
        draw_text_mut(
            canvas,
            LABEL_COLOR,
            x,
            y,
            scale,
            font.as_font(),
            &label.text,
        );
    }
}

/// Encode a bitmap as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, GridError> {
    let mut bytes = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .map_err(|e| GridError::export_failure("png", e))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_star_marks_center_pixel() {
        let mut image = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        stamp_star(&mut image, Point::new(50.0, 50.0));
        assert_eq!(*image.get_pixel(50, 50), STAR_FILL);
        // Top vertex is 10px above the center, on the outline ring
        assert_eq!(*image.get_pixel(50, 40), STAR_OUTLINE);
        // Well outside the star nothing changed
        assert_eq!(*image.get_pixel(80, 80), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_encode_png_round_trips() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        let bytes = encode_png(&image).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(*decoded.get_pixel(3, 3), Rgba([10, 20, 30, 255]));
    }
}
