//! Exporter registry for discovering and resolving document exporters.

use std::collections::HashMap;
use std::fmt;

use crate::error::GridError;
use crate::export::formats::{HtmlExporter, PdfExporter, PngExporter};
use crate::export::traits::DocumentExporter;

/// Registry of available exporters.
///
/// All built-in exporters are registered automatically on creation.
pub struct ExporterRegistry {
    exporters: HashMap<&'static str, Box<dyn DocumentExporter>>,
}

impl ExporterRegistry {
    /// Create a registry with the built-in HTML, PDF, and PNG exporters.
    pub fn new() -> Self {
        let mut registry = Self {
            exporters: HashMap::new(),
        };
        registry.register(Box::new(HtmlExporter));
        registry.register(Box::new(PdfExporter));
        registry.register(Box::new(PngExporter));
        registry
    }

    /// Register an exporter implementation.
    pub fn register(&mut self, exporter: Box<dyn DocumentExporter>) {
        self.exporters.insert(exporter.id(), exporter);
    }

    /// Get an exporter by its id.
    pub fn get(&self, id: &str) -> Option<&dyn DocumentExporter> {
        self.exporters.get(id).map(|e| e.as_ref())
    }

    /// Get an exporter by id, failing with `UnknownFormat`.
    pub fn resolve(&self, id: &str) -> Result<&dyn DocumentExporter, GridError> {
        self.get(id).ok_or_else(|| GridError::UnknownFormat {
            id: id.to_string(),
        })
    }

    /// All registered exporter ids.
    pub fn ids(&self) -> Vec<&'static str> {
        self.exporters.keys().copied().collect()
    }
}

impl fmt::Debug for ExporterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
