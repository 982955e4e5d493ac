//! Standalone interactive HTML page exporter.
//!
//! One positioned trigger element per marker at the marker's padded
//! center, one hidden panel per marker, paired by stable per-marker ids.
//! A single mousemove handler toggles each panel based on cursor
//! containment in its trigger's bounding box. Inline CSS only; the page
//! references the exported PNG by relative file name at its natural size
//! so document coordinates equal canvas pixel coordinates.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::error::GridError;
use crate::export::scene::ExportScene;
use crate::export::traits::{ArtifactKind, DocumentExporter, ExportArtifact, ExportOptions};
use crate::raster::RenderedImage;

/// Hit box edge length in pixels, centered on the marker point.
const TRIGGER_SIZE: u32 = 20;
/// Offset of a panel from its trigger point.
const PANEL_OFFSET: f32 = 12.0;

/// Interactive HTML exporter.
pub struct HtmlExporter;

impl DocumentExporter for HtmlExporter {
    fn id(&self) -> &'static str {
        "html"
    }

    fn display_name(&self) -> &'static str {
        "Interactive HTML"
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Html
    }

    fn render(
        &self,
        scene: &ExportScene,
        _image: &RenderedImage,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, GridError> {
        log::info!(
            "Rendering HTML with {} marker(s) referencing '{}'",
            scene.markers.len(),
            scene.png_file_name
        );
        let page = build_page(scene).map_err(|e| GridError::export_failure("html", e))?;
        Ok(ExportArtifact {
            kind: ArtifactKind::Html,
            file_name: options.file_name.clone(),
            bytes: page.into_bytes(),
        })
    }
}

fn build_page(scene: &ExportScene) -> Result<String, std::fmt::Error> {
    let (canvas_w, canvas_h) = scene.canvas_size;
    let half = TRIGGER_SIZE / 2;

    let mut page = String::new();
    write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Interactive Grid Popup</title>
<style>
body {{
    font-family: Arial, sans-serif;
}}
.image-container {{
    position: relative;
    display: inline-block;
}}
.trigger {{
    position: absolute;
    width: {TRIGGER_SIZE}px;
    height: {TRIGGER_SIZE}px;
    margin-left: -{half}px;
    margin-top: -{half}px;
}}
.popup {{
    display: none;
    position: absolute;
    background-color: rgba(0, 0, 0, 0.7);
    color: #fff;
    padding: 10px;
    border-radius: 5px;
    width: 200px;
}}
.popup-visible {{
    display: block;
}}
</style>
</head>
<body>

<div class="image-container">
<img src="{src}" alt="Interactive Image" width="{canvas_w}" height="{canvas_h}">
"#,
        src = escape(scene.png_file_name.as_str()),
    )?;

    for marker in &scene.markers {
        write!(
            page,
            r#"<div class="trigger" id="marker-{i}" data-panel="panel-{i}" style="left:{x}px;top:{y}px"></div>
<div class="popup" id="panel-{i}" style="left:{px}px;top:{py}px">
<p><strong>{title}</strong></p>
<p>{text}</p>
</div>
"#,
            i = marker.index,
            x = marker.center.x,
            y = marker.center.y,
            px = marker.center.x + PANEL_OFFSET,
            py = marker.center.y + PANEL_OFFSET,
            title = escape(marker.title.as_str()),
            text = escape(marker.text.as_str()),
        )?;
    }

    page.push_str(
        r#"</div>

<script>
const container = document.querySelector('.image-container');
const triggers = document.querySelectorAll('.trigger');
container.addEventListener('mousemove', (event) => {
    triggers.forEach(trigger => {
        const rect = trigger.getBoundingClientRect();
        const panel = document.getElementById(trigger.dataset.panel);
        const inside = event.clientX >= rect.left && event.clientX <= rect.right &&
                       event.clientY >= rect.top && event.clientY <= rect.bottom;
        panel.classList.toggle('popup-visible', inside);
    });
});
</script>
</body>
</html>
"#,
    );
    Ok(page)
}
