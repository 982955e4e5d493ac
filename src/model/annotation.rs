//! Annotations and the per-session annotation collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EmptyTextPolicy;
use crate::error::GridError;
use crate::geometry::{Cell, GridSpec};

/// A (title, text) payload attached to exactly one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The cell this annotation is attached to
    pub cell: Cell,
    /// Short heading shown in the popup
    pub title: String,
    /// Popup body text
    pub text: String,
}

impl Annotation {
    /// Create an annotation for a cell.
    pub fn new(cell: Cell, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            cell,
            title: title.into(),
            text: text.into(),
        }
    }

    /// Whether title and text are both empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.text.trim().is_empty()
    }
}

/// The user-chosen annotated cells for one grid.
///
/// At most one annotation per cell; `add` is a last-write-wins upsert.
/// Iteration is always row-major (row ascending, then column ascending)
/// regardless of insertion order, so exported marker ordering is
/// deterministic across runs. The `Cell` key's derived `Ord` provides
/// that order through the backing `BTreeMap`.
#[derive(Debug, Clone)]
pub struct AnnotationSet {
    grid: GridSpec,
    policy: EmptyTextPolicy,
    entries: BTreeMap<Cell, Annotation>,
}

impl AnnotationSet {
    /// Create an empty set bound to a grid and a blank-text policy.
    pub fn new(grid: GridSpec, policy: EmptyTextPolicy) -> Self {
        Self {
            grid,
            policy,
            entries: BTreeMap::new(),
        }
    }

    /// The grid this set's cells are validated against.
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Insert or replace the annotation for a cell.
    ///
    /// Fails with `OutOfRange` if the cell lies outside the grid and,
    /// under [`EmptyTextPolicy::Reject`], with `EmptyAnnotationText` when
    /// title and text are both blank.
    pub fn add(
        &mut self,
        cell: Cell,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), GridError> {
        if !self.grid.contains(cell) {
            return Err(GridError::CellOutOfRange {
                cell,
                rows: self.grid.rows,
                cols: self.grid.cols,
            });
        }
        let annotation = Annotation::new(cell, title, text);
        if self.policy == EmptyTextPolicy::Reject && annotation.is_blank() {
            return Err(GridError::EmptyAnnotationText { cell });
        }
        if self.entries.insert(cell, annotation).is_some() {
            log::debug!("Replaced annotation at ({}, {})", cell.row, cell.col);
        }
        Ok(())
    }

    /// Remove the annotation for a cell, returning it if present.
    pub fn remove(&mut self, cell: Cell) -> Option<Annotation> {
        self.entries.remove(&cell)
    }

    /// Look up the annotation for a cell.
    pub fn get(&self, cell: Cell) -> Option<&Annotation> {
        self.entries.get(&cell)
    }

    /// Iterate annotations in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.entries.values()
    }

    /// All annotations in row-major order.
    pub fn list(&self) -> Vec<&Annotation> {
        self.entries.values().collect()
    }

    /// Number of annotated cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no cell is annotated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard every annotation. Called when the grid changes, since all
    /// cells would then be keyed to stale coordinates.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Rebind the set to a new grid, discarding all annotations.
    pub fn reset_grid(&mut self, grid: GridSpec) {
        if !self.entries.is_empty() {
            log::info!(
                "Grid changed to {}x{}, discarding {} annotation(s)",
                grid.rows,
                grid.cols,
                self.entries.len()
            );
        }
        self.grid = grid;
        self.entries.clear();
    }
}
