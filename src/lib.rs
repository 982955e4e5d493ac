//! gridnote - grid-layout and annotation-export engine.
//!
//! Converts an image, a row/column grid, and a set of annotated cells
//! into pixel geometry (grid lines, axis labels, per-cell star markers)
//! and serializes that layout into three artifacts sharing one geometry
//! pass: a stamped PNG, a standalone interactive HTML page, and an
//! interactive PDF with link annotations.

pub mod address;
pub mod config;
pub mod error;
pub mod export;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod raster;
pub mod session;

pub use address::AddressingConvention;
pub use config::{ArtifactNames, EmptyTextPolicy, ExportConfig, MarkerShape};
pub use error::GridError;
pub use export::{ArtifactKind, ExportArtifact, ExportTarget};
pub use geometry::{Cell, GridGeometry, GridSpec, ImageDimensions};
pub use model::{Annotation, AnnotationSet};
pub use session::Session;
