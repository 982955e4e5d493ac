//! Document export: scene building, exporter trait, built-in formats,
//! and artifact writing.
//!
//! The pipeline is `ExportScene::build` (one geometry pass) followed by
//! one [`DocumentExporter::render`] per requested format, followed by a
//! single [`ExportTarget::write`]. Exporters share the scene and never
//! recompute coordinates from raw inputs.

pub mod formats;
pub mod registry;
pub mod scene;
pub mod target;
pub mod traits;

pub use registry::ExporterRegistry;
pub use scene::ExportScene;
pub use target::ExportTarget;
pub use traits::{ArtifactKind, DocumentExporter, ExportArtifact, ExportOptions};
