//! Export configuration: explicit options, no ambient state.

use serde::{Deserialize, Serialize};

use crate::address::AddressingConvention;

/// Default artifact file name for the stamped PNG.
pub const DEFAULT_PNG_NAME: &str = "final_image_with_icons.png";
/// Default artifact file name for the interactive HTML page.
pub const DEFAULT_HTML_NAME: &str = "interactive_image.html";
/// Default artifact file name for the interactive PDF.
pub const DEFAULT_PDF_NAME: &str = "interactive_image.pdf";

/// What to do with an annotation whose title and text are both blank.
///
/// The source revisions disagree: some draw the star regardless of text,
/// some never create the marker. The choice is explicit here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyTextPolicy {
    /// Accept the annotation and render a marker with an empty payload.
    #[default]
    Allow,
    /// Reject the annotation with `EmptyAnnotationText`.
    Reject,
}

/// Marker shape placed at annotated cell centers.
///
/// Only the fixed 10-point star exists today; the enum keeps the shape an
/// explicit configuration value rather than an implicit constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerShape {
    /// The fixed-size 10-point star polygon, see [`crate::layout::STAR_OFFSETS`].
    #[default]
    Star,
}

/// File names for the one-artifact-per-format contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactNames {
    /// Stamped PNG file name
    pub png: String,
    /// Interactive HTML file name
    pub html: String,
    /// Interactive PDF file name
    pub pdf: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            png: DEFAULT_PNG_NAME.to_string(),
            html: DEFAULT_HTML_NAME.to_string(),
            pdf: DEFAULT_PDF_NAME.to_string(),
        }
    }
}

/// All options of one export session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Uniform pixel margin around the image, making room for axis labels
    pub padding: f32,
    /// Which addressing convention the session speaks
    pub convention: AddressingConvention,
    /// Whether grid lines and axis labels appear in the exported PNG
    /// (the live preview always shows them)
    pub include_grid_overlay: bool,
    /// Policy for blank annotations
    pub empty_text: EmptyTextPolicy,
    /// Marker shape
    pub marker: MarkerShape,
    /// Output file names
    pub names: ArtifactNames,
    /// Optional TTF/OTF bytes for axis labels; when absent a system font
    /// chain is probed and labels are skipped if nothing is found
    #[serde(skip)]
    pub label_font: Option<Vec<u8>>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            padding: 0.0,
            convention: AddressingConvention::default(),
            include_grid_overlay: false,
            empty_text: EmptyTextPolicy::default(),
            marker: MarkerShape::default(),
            names: ArtifactNames::default(),
            label_font: None,
        }
    }
}
