//! Trait definitions for document exporters.

use crate::error::GridError;
use crate::export::scene::ExportScene;
use crate::raster::RenderedImage;

/// Kind of artifact an exporter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Standalone interactive HTML page
    Html,
    /// Interactive PDF with link annotations
    Pdf,
    /// Stamped (and optionally overlaid) PNG bitmap
    Png,
}

/// One serialized export output. Generated fresh on every export request,
/// never mutated after creation.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// What kind of document this is
    pub kind: ArtifactKind,
    /// File name the artifact should be written under
    pub file_name: String,
    /// The serialized document
    pub bytes: Vec<u8>,
}

/// Options for one exporter invocation.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// File name for the produced artifact
    pub file_name: String,
}

impl ExportOptions {
    /// Options with an explicit artifact file name.
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// A renderer turning one precomputed scene into one artifact.
///
/// Exporters are pure serializers: they read the scene's coordinates
/// verbatim, never recompute geometry, and never touch the filesystem
/// (writing is [`crate::export::ExportTarget`]'s job).
pub trait DocumentExporter: Send + Sync {
    /// Unique identifier for this exporter (e.g. "html", "pdf", "png").
    fn id(&self) -> &'static str;

    /// Human-readable name for display.
    fn display_name(&self) -> &'static str;

    /// File extension this exporter produces.
    fn extension(&self) -> &'static str;

    /// The artifact kind this exporter produces.
    fn kind(&self) -> ArtifactKind;

    /// Serialize the scene into an artifact.
    fn render(
        &self,
        scene: &ExportScene,
        image: &RenderedImage,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, GridError>;
}
