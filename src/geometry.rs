//! Pure grid geometry: cell boxes, cell centers, grid lines, and label anchors.
//!
//! Everything here is a deterministic function of `(ImageDimensions, GridSpec,
//! padding)`. Cell sizes are floating point and fractional boundaries are
//! preserved end-to-end; exporters consume these values verbatim and never
//! recompute them.

use serde::{Deserialize, Serialize};

use crate::address::AddressingConvention;
use crate::error::GridError;

/// Pixel size of the source image, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageDimensions {
    /// Create dimensions, rejecting zero-sized images.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }
}

impl std::fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Row and column count of the overlay grid.
///
/// Bounds depend on the addressing convention and are validated by
/// [`AddressingConvention::validate_grid`]; a `GridSpec` inside a
/// [`crate::session::Session`] has always passed that validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of rows (vertical cell count)
    pub rows: u32,
    /// Number of columns (horizontal cell count)
    pub cols: u32,
}

impl GridSpec {
    /// Create a grid spec. Range validation happens against a convention,
    /// not here, because the column bound depends on it.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Whether the cell lies inside this grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }
}

/// One grid square, addressed by zero-based (row, col).
///
/// `Ord` is derived with `row` first, so the natural key order of a
/// `BTreeMap<Cell, _>` is row-major: row ascending, then column ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based row index, top row is 0
    pub row: u32,
    /// Zero-based column index, leftmost column is 0
    pub col: u32,
}

impl Cell {
    /// Create a cell from zero-based indices.
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate (downward in image space)
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned cell bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl CellBox {
    /// Midpoint of the box.
    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }
}

/// One grid overlay line segment, in padded canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    /// Segment start
    pub start: Point,
    /// Segment end
    pub end: Point,
}

/// An axis label (letter or number) and its anchor point in padded
/// canvas coordinates. The anchor is the intended center of the text.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    /// Label text, a letter A..Z or a 1-based number
    pub text: String,
    /// Center point the text should be drawn around
    pub anchor: Point,
}

/// Grid geometry for one (dimensions, grid, padding) triple.
///
/// Provides the unpadded image coordinate system (used by the PDF path)
/// and the padded canvas coordinate system (used by the PNG canvas and
/// the HTML overlay). The two are related by a uniform `(padding,
/// padding)` offset and must never be mixed within one export.
#[derive(Debug, Clone, Copy)]
pub struct GridGeometry {
    dims: ImageDimensions,
    grid: GridSpec,
    padding: f32,
}

impl GridGeometry {
    /// Create geometry for an image, grid, and uniform padding.
    ///
    /// Padding must be finite and non-negative; grid bounds are assumed
    /// to have been validated against the session's addressing convention.
    pub fn new(dims: ImageDimensions, grid: GridSpec, padding: f32) -> Result<Self, GridError> {
        if !padding.is_finite() || padding < 0.0 {
            return Err(GridError::InvalidPadding { value: padding });
        }
        Ok(Self {
            dims,
            grid,
            padding,
        })
    }

    /// The image dimensions this geometry was built from.
    pub fn dims(&self) -> ImageDimensions {
        self.dims
    }

    /// The grid spec this geometry was built from.
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// The uniform padding offset in pixels.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Width of one cell: `imageWidth / cols`, fractional values preserved.
    pub fn cell_width(&self) -> f32 {
        self.dims.width as f32 / self.grid.cols as f32
    }

    /// Height of one cell: `imageHeight / rows`, fractional values preserved.
    pub fn cell_height(&self) -> f32 {
        self.dims.height as f32 / self.grid.rows as f32
    }

    fn check(&self, cell: Cell) -> Result<(), GridError> {
        if self.grid.contains(cell) {
            Ok(())
        } else {
            Err(GridError::CellOutOfRange {
                cell,
                rows: self.grid.rows,
                cols: self.grid.cols,
            })
        }
    }

    /// Bounding box of a cell in unpadded image coordinates.
    pub fn cell_box(&self, cell: Cell) -> Result<CellBox, GridError> {
        self.check(cell)?;
        let cw = self.cell_width();
        let ch = self.cell_height();
        Ok(CellBox {
            x0: cell.col as f32 * cw,
            y0: cell.row as f32 * ch,
            x1: (cell.col + 1) as f32 * cw,
            y1: (cell.row + 1) as f32 * ch,
        })
    }

    /// Center of a cell in unpadded image coordinates.
    pub fn cell_center(&self, cell: Cell) -> Result<Point, GridError> {
        Ok(self.cell_box(cell)?.center())
    }

    /// Shift a point from image coordinates into the padded canvas.
    pub fn padded_point(&self, p: Point) -> Point {
        Point::new(p.x + self.padding, p.y + self.padding)
    }

    /// Shift a box from image coordinates into the padded canvas.
    pub fn padded_box(&self, b: CellBox) -> CellBox {
        CellBox {
            x0: b.x0 + self.padding,
            y0: b.y0 + self.padding,
            x1: b.x1 + self.padding,
            y1: b.y1 + self.padding,
        }
    }

    /// Whole-pixel canvas size for rasterization: `image + 2 * padding`,
    /// rounded up. Only the raster path rounds; coordinates stay fractional.
    pub fn canvas_size(&self) -> (u32, u32) {
        let w = (self.dims.width as f32 + 2.0 * self.padding).ceil() as u32;
        let h = (self.dims.height as f32 + 2.0 * self.padding).ceil() as u32;
        (w, h)
    }

    /// Interior grid lines spanning the image area, in padded coordinates.
    ///
    /// `cols - 1` vertical and `rows - 1` horizontal segments; the image
    /// border itself is not drawn, matching the preview behavior.
    pub fn grid_lines(&self) -> Vec<GridLine> {
        let p = self.padding;
        let w = self.dims.width as f32;
        let h = self.dims.height as f32;
        let cw = self.cell_width();
        let ch = self.cell_height();

        let mut lines = Vec::with_capacity((self.grid.cols + self.grid.rows - 2) as usize);
        for i in 1..self.grid.cols {
            let x = p + i as f32 * cw;
            lines.push(GridLine {
                start: Point::new(x, p),
                end: Point::new(x, p + h),
            });
        }
        for i in 1..self.grid.rows {
            let y = p + i as f32 * ch;
            lines.push(GridLine {
                start: Point::new(p, y),
                end: Point::new(p + w, y),
            });
        }
        lines
    }

    /// Axis labels in padded coordinates: column labels centered above each
    /// column at `y = padding / 2`, row labels centered left of each row at
    /// `x = padding / 2`. Which axis carries letters depends on the
    /// convention. Empty when padding is zero (no room to draw them).
    pub fn axis_labels(&self, convention: AddressingConvention) -> Vec<AxisLabel> {
        if self.padding <= 0.0 {
            return Vec::new();
        }
        let p = self.padding;
        let cw = self.cell_width();
        let ch = self.cell_height();

        let mut labels = Vec::with_capacity((self.grid.cols + self.grid.rows) as usize);
        for col in 0..self.grid.cols {
            labels.push(AxisLabel {
                text: convention.column_label(col),
                anchor: Point::new(p + (col as f32 + 0.5) * cw, p / 2.0),
            });
        }
        for row in 0..self.grid.rows {
            labels.push(AxisLabel {
                text: convention.row_label(row, self.grid.rows),
                anchor: Point::new(p / 2.0, p + (row as f32 + 0.5) * ch),
            });
        }
        labels
    }
}
