//! Interactive PDF exporter built object-level with `lopdf`.
//!
//! One A4 page carries the stamped (unpadded) image scaled into a fixed
//! content box, with one link annotation per marker over its cell. Each
//! link jumps to an anchored text block below the image; blocks that do
//! not fit continue on further pages. Pixel coordinates convert to
//! points through a fixed pixels-per-inch constant and the uniform fit
//! scale; the vertical axis flips because the page origin is bottom-left,
//! expressed as the inverted row index `rows - row - 1`.

use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::error::GridError;
use crate::export::scene::ExportScene;
use crate::export::traits::{ArtifactKind, DocumentExporter, ExportArtifact, ExportOptions};
use crate::layout::Marker;
use crate::raster::RenderedImage;

/// A4 portrait page size in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
/// Page margin in points.
const MARGIN: f32 = 54.0;
/// Tallest the image may render, in points.
const MAX_IMAGE_HEIGHT: f32 = 480.0;
/// Nominal pixel density of the source image; at 72 points per inch one
/// pixel is one point before the fit scale is applied.
const PIXELS_PER_INCH: f32 = 72.0;
const POINTS_PER_INCH: f32 = 72.0;

const HEADING_SIZE: f32 = 16.0;
const BLOCK_TITLE_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;
/// Line spacing multiplier.
const LEADING: f32 = 1.35;
/// Vertical gap between annotation blocks, in points.
const BLOCK_GAP: f32 = 10.0;

/// Interactive PDF exporter.
pub struct PdfExporter;

impl DocumentExporter for PdfExporter {
    fn id(&self) -> &'static str {
        "pdf"
    }

    fn display_name(&self) -> &'static str {
        "Interactive PDF"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Pdf
    }

    fn render(
        &self,
        scene: &ExportScene,
        image: &RenderedImage,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, GridError> {
        log::info!("Rendering PDF with {} link(s)", scene.markers.len());
        let bytes = build_document(scene, image)?;
        Ok(ExportArtifact {
            kind: ArtifactKind::Pdf,
            file_name: options.file_name.clone(),
            bytes,
        })
    }
}

/// Placement of one marker's text block.
struct BlockSlot {
    /// Index into the page list
    page: usize,
    /// Top y of the block in page coordinates, also the link destination
    top: f32,
    /// Wrapped body lines
    body: Vec<String>,
}

fn name(n: &str) -> Object {
    Object::Name(n.as_bytes().to_vec())
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn block_height(body_lines: usize) -> f32 {
    BLOCK_TITLE_SIZE * LEADING + body_lines as f32 * BODY_SIZE * LEADING + BLOCK_GAP
}

/// Assign each marker's text block a page index and a top y coordinate,
/// flowing downward from `first_top` on page 0 and continuing on fresh
/// pages from the top margin.
fn place_blocks(markers: &[Marker], first_top: f32, max_chars: usize) -> Vec<BlockSlot> {
    let mut slots = Vec::with_capacity(markers.len());
    let mut page = 0usize;
    let mut cursor = first_top;
    for marker in markers {
        let body = wrap_text(&marker.text, max_chars);
        let height = block_height(body.len());
        if cursor - height < MARGIN && cursor < PAGE_HEIGHT - MARGIN {
            page += 1;
            cursor = PAGE_HEIGHT - MARGIN;
        }
        slots.push(BlockSlot {
            page,
            top: cursor,
            body,
        });
        cursor -= height;
    }
    slots
}

fn text_op(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![name(font), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn build_document(scene: &ExportScene, image: &RenderedImage) -> Result<Vec<u8>, GridError> {
    let fail = |e: &dyn std::fmt::Display| GridError::export_failure("pdf", e);

    let img_w = scene.image_size.width as f32;
    let img_h = scene.image_size.height as f32;

    // Pixel to point conversion, then a uniform scale fitting the fixed
    // content box. One combined factor maps image pixels to page points.
    let px_to_pt = POINTS_PER_INCH / PIXELS_PER_INCH;
    let content_w = PAGE_WIDTH - 2.0 * MARGIN;
    let fit = (content_w / (img_w * px_to_pt)).min(MAX_IMAGE_HEIGHT / (img_h * px_to_pt));
    let to_pt = px_to_pt * fit;

    let origin_x = MARGIN;
    let image_top = PAGE_HEIGHT - MARGIN - HEADING_SIZE * LEADING - 8.0;
    let image_bottom = image_top - img_h * to_pt;

    let max_chars = (content_w / (BODY_SIZE * 0.5)) as usize;
    let slots = place_blocks(&scene.markers, image_bottom - 24.0, max_chars);
    let page_count = slots.iter().map(|s| s.page).max().unwrap_or(0) + 1;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_ids: Vec<ObjectId> = (0..page_count).map(|_| doc.new_object_id()).collect();

    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    // The unpadded stamped bitmap travels into the PDF as a raw RGB
    // image XObject.
    let rgb = DynamicImage::ImageRgba8(image.stamped.clone()).to_rgb8();
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => scene.image_size.width as i64,
            "Height" => scene.image_size.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
        },
        rgb.into_raw(),
    ));

    // Per-page content operations.
    let mut page_ops: Vec<Vec<Operation>> = vec![Vec::new(); page_count];

    text_op(
        &mut page_ops[0],
        "F2",
        HEADING_SIZE,
        MARGIN,
        PAGE_HEIGHT - MARGIN,
        "Interactive Image",
    );
    page_ops[0].push(Operation::new("q", vec![]));
    page_ops[0].push(Operation::new(
        "cm",
        vec![
            (img_w * to_pt).into(),
            0.0_f32.into(),
            0.0_f32.into(),
            (img_h * to_pt).into(),
            origin_x.into(),
            image_bottom.into(),
        ],
    ));
    page_ops[0].push(Operation::new("Do", vec![name("Im0")]));
    page_ops[0].push(Operation::new("Q", vec![]));

    for (marker, slot) in scene.markers.iter().zip(&slots) {
        let ops = &mut page_ops[slot.page];
        let heading = if marker.title.trim().is_empty() {
            marker.address.clone()
        } else {
            format!("{} - {}", marker.address, marker.title)
        };
        let mut y = slot.top - BLOCK_TITLE_SIZE;
        text_op(ops, "F2", BLOCK_TITLE_SIZE, MARGIN, y, &heading);
        for line in &slot.body {
            y -= BODY_SIZE * LEADING;
            text_op(ops, "F1", BODY_SIZE, MARGIN, y, line);
        }
    }

    // Link annotations over the image on page 0, one per marker. The
    // rectangle is the unpadded cell box mapped through the image
    // transform; the row index inverts because the page origin is
    // bottom-left while row 0 is the top row.
    let cell_h_px = img_h / scene.grid.rows as f32;
    let mut annotations: Vec<Object> = Vec::with_capacity(scene.markers.len());
    for (marker, slot) in scene.markers.iter().zip(&slots) {
        let rx0 = origin_x + marker.image_box.x0 * to_pt;
        let rx1 = origin_x + marker.image_box.x1 * to_pt;
        let inverted_row = scene.grid.rows - marker.cell.row - 1;
        let ry0 = image_bottom + inverted_row as f32 * cell_h_px * to_pt;
        let ry1 = ry0 + cell_h_px * to_pt;
        annotations.push(Object::Dictionary(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![rx0.into(), ry0.into(), rx1.into(), ry1.into()],
            "Border" => vec![0_i64.into(), 0_i64.into(), 0_i64.into()],
            "Dest" => vec![
                Object::Reference(page_ids[slot.page]),
                name("XYZ"),
                Object::Null,
                slot.top.into(),
                Object::Null,
            ],
        }));
    }

    for (index, page_id) in page_ids.iter().enumerate() {
        let content = Content {
            operations: std::mem::take(&mut page_ops[index]),
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(|e| fail(&e))?,
        ));

        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(body_font_id));
        fonts.set("F2", Object::Reference(bold_font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        if index == 0 {
            let mut xobjects = Dictionary::new();
            xobjects.set("Im0", Object::Reference(image_id));
            resources.set("XObject", Object::Dictionary(xobjects));
        }

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0_i64.into(), 0_i64.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Dictionary(resources),
        };
        if index == 0 && !annotations.is_empty() {
            page.set("Annots", Object::Array(std::mem::take(&mut annotations)));
        }
        doc.objects.insert(*page_id, Object::Dictionary(page));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut std::io::Cursor::new(&mut bytes))
        .map_err(|e| fail(&e))?;
    Ok(bytes)
}
