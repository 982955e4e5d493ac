//! Error types for grid layout and export operations.

use thiserror::Error;

use crate::geometry::{Cell, ImageDimensions};

/// Errors that can occur while building grid geometry, managing
/// annotations, or exporting documents.
#[derive(Error, Debug)]
pub enum GridError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Uploaded image bytes could not be decoded
    #[error("Invalid image: {0}")]
    InvalidImage(#[from] image::ImageError),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image dimensions must both be at least one pixel
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
    },

    /// Decoded image does not match the dimensions the session was created with
    #[error(
        "Image dimension mismatch: session declares {declared}, decoded image is {actual}"
    )]
    DimensionMismatch {
        /// Dimensions the session was created with
        declared: ImageDimensions,
        /// Dimensions of the decoded image
        actual: ImageDimensions,
    },

    /// Grid axis value outside its validated bounds
    #[error("Grid {axis} count {value} outside allowed range [{min}, {max}]")]
    GridOutOfRange {
        /// Which axis violated its bounds ("rows" or "cols")
        axis: &'static str,
        /// The offending value
        value: u32,
        /// Inclusive lower bound
        min: u32,
        /// Inclusive upper bound
        max: u32,
    },

    /// Cell coordinates fall outside the current grid
    #[error("Cell ({row}, {col}) outside grid of {rows} rows x {cols} cols", row = .cell.row, col = .cell.col)]
    CellOutOfRange {
        /// The offending cell
        cell: Cell,
        /// Current row count
        rows: u32,
        /// Current column count
        cols: u32,
    },

    /// Padding must be a finite, non-negative pixel count
    #[error("Invalid padding: {value}")]
    InvalidPadding {
        /// The offending value
        value: f32,
    },

    /// Lettered axis exceeds single-letter addressing (A..Z)
    #[error("Address overflow: {cols} columns exceed single-letter addressing (max 26)")]
    AddressOverflow {
        /// Column count that overflowed the letter axis
        cols: u32,
    },

    /// Cell address string could not be parsed
    #[error("Bad cell address '{address}': {reason}")]
    BadAddress {
        /// The input that failed to parse
        address: String,
        /// Why it was rejected
        reason: String,
    },

    /// Annotation rejected because title and text are both blank
    #[error("Empty annotation text for cell ({row}, {col})", row = .cell.row, col = .cell.col)]
    EmptyAnnotationText {
        /// The cell the blank annotation targeted
        cell: Cell,
    },

    /// Requested export format is not registered
    #[error("Unknown export format: '{id}'")]
    UnknownFormat {
        /// The unrecognized format id
        id: String,
    },

    /// Downstream serialization failure while producing an artifact
    #[error("Export failure in format '{format}': {message}")]
    ExportFailure {
        /// The format that failed
        format: &'static str,
        /// Description of the failure
        message: String,
    },
}

impl GridError {
    /// Create a bad address error with a reason.
    pub fn bad_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create an export failure for a format, from any displayable cause.
    pub fn export_failure(format: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::ExportFailure {
            format,
            message: cause.to_string(),
        }
    }
}
