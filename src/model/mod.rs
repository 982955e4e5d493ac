//! Session-owned data model: annotations attached to grid cells.

mod annotation;

pub use annotation::{Annotation, AnnotationSet};
