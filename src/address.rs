//! Human-readable cell addressing ("B3") and its two conventions.
//!
//! The source revisions disagree on which axis carries letters and which
//! direction the numbers run, so both rules are first-class here and the
//! caller must pick one; nothing in the crate hard-codes a convention.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::geometry::{Cell, GridSpec};

/// Inclusive grid axis bounds.
pub const MIN_GRID: u32 = 2;
/// Maximum rows, and maximum columns under numeric column addressing.
pub const MAX_GRID: u32 = 20;
/// Maximum columns when each column is addressed by a single letter.
pub const MAX_LETTER_AXIS: u32 = 26;

/// The rule mapping (row, col) to an address string like "B3".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressingConvention {
    /// Letter = row (A is the top row), number = col + 1. "B3" is (1, 2).
    #[default]
    RowLetter,
    /// Letter = col (A is the leftmost column), number = rows - row:
    /// row 0 carries the largest number, Cartesian "row 1 at the bottom".
    ColLetter,
}

fn axis_letter(index: u32) -> Option<char> {
    (index < MAX_LETTER_AXIS).then(|| (b'A' + index as u8) as char)
}

impl AddressingConvention {
    /// Stable identifier matching the serde representation.
    pub fn id(&self) -> &'static str {
        match self {
            Self::RowLetter => "row-letter",
            Self::ColLetter => "col-letter",
        }
    }

    /// Validate grid bounds under this convention.
    ///
    /// Rows are always within [2, 20]. Columns are within [2, 20] under
    /// `RowLetter` and [2, 26] under `ColLetter`; more than 26 lettered
    /// columns is `AddressOverflow`, never silently clamped.
    pub fn validate_grid(&self, grid: GridSpec) -> Result<(), GridError> {
        if !(MIN_GRID..=MAX_GRID).contains(&grid.rows) {
            return Err(GridError::GridOutOfRange {
                axis: "rows",
                value: grid.rows,
                min: MIN_GRID,
                max: MAX_GRID,
            });
        }
        let max_cols = match self {
            Self::RowLetter => MAX_GRID,
            Self::ColLetter => MAX_LETTER_AXIS,
        };
        if *self == Self::ColLetter && grid.cols > MAX_LETTER_AXIS {
            return Err(GridError::AddressOverflow { cols: grid.cols });
        }
        if !(MIN_GRID..=max_cols).contains(&grid.cols) {
            return Err(GridError::GridOutOfRange {
                axis: "cols",
                value: grid.cols,
                min: MIN_GRID,
                max: max_cols,
            });
        }
        Ok(())
    }

    /// Label shown above a column in the preview and the exported overlay.
    pub fn column_label(&self, col: u32) -> String {
        match self {
            Self::RowLetter => (col + 1).to_string(),
            Self::ColLetter => axis_letter(col).map(String::from).unwrap_or_default(),
        }
    }

    /// Label shown left of a row.
    pub fn row_label(&self, row: u32, rows: u32) -> String {
        match self {
            Self::RowLetter => axis_letter(row).map(String::from).unwrap_or_default(),
            Self::ColLetter => (rows - row).to_string(),
        }
    }

    /// Format a cell as its canonical address under this convention.
    ///
    /// Fails with `AddressOverflow` if the lettered axis index is beyond
    /// 'Z' and with `CellOutOfRange` for cells outside the grid.
    pub fn address(&self, cell: Cell, grid: GridSpec) -> Result<String, GridError> {
        if !grid.contains(cell) {
            return Err(GridError::CellOutOfRange {
                cell,
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        match self {
            Self::RowLetter => {
                let letter = axis_letter(cell.row)
                    .ok_or(GridError::AddressOverflow { cols: grid.cols })?;
                Ok(format!("{}{}", letter, cell.col + 1))
            }
            Self::ColLetter => {
                let letter = axis_letter(cell.col)
                    .ok_or(GridError::AddressOverflow { cols: grid.cols })?;
                Ok(format!("{}{}", letter, grid.rows - cell.row))
            }
        }
    }

    /// Parse an address back into a cell; exact inverse of [`Self::address`]
    /// for every valid cell under the same convention. Accepts lowercase
    /// letters.
    pub fn parse(&self, address: &str, grid: GridSpec) -> Result<Cell, GridError> {
        let trimmed = address.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| GridError::bad_address(address, "empty address"))?;
        if !letter.is_ascii_alphabetic() {
            return Err(GridError::bad_address(
                address,
                "must start with a letter A-Z",
            ));
        }
        let letter_index = (letter.to_ascii_uppercase() as u8 - b'A') as u32;

        let digits = chars.as_str();
        let number: u32 = digits
            .parse()
            .map_err(|_| GridError::bad_address(address, "letter must be followed by a number"))?;
        if number == 0 {
            return Err(GridError::bad_address(address, "number is 1-based"));
        }

        let cell = match self {
            Self::RowLetter => Cell::new(letter_index, number - 1),
            Self::ColLetter => {
                if number > grid.rows {
                    return Err(GridError::bad_address(
                        address,
                        format!("row number {number} exceeds {} rows", grid.rows),
                    ));
                }
                Cell::new(grid.rows - number, letter_index)
            }
        };
        if !grid.contains(cell) {
            return Err(GridError::bad_address(
                address,
                format!(
                    "outside grid of {} rows x {} cols",
                    grid.rows, grid.cols
                ),
            ));
        }
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_letter_examples() {
        let grid = GridSpec::new(5, 5);
        let conv = AddressingConvention::RowLetter;
        assert_eq!(conv.address(Cell::new(0, 0), grid).unwrap(), "A1");
        assert_eq!(conv.address(Cell::new(1, 2), grid).unwrap(), "B3");
        assert_eq!(conv.parse("B3", grid).unwrap(), Cell::new(1, 2));
        assert_eq!(conv.parse("b3", grid).unwrap(), Cell::new(1, 2));
    }

    #[test]
    fn test_col_letter_examples() {
        let grid = GridSpec::new(5, 26);
        let conv = AddressingConvention::ColLetter;
        // Row 0 carries the largest number; "Z1" is the bottom-right cell
        assert_eq!(conv.address(Cell::new(4, 25), grid).unwrap(), "Z1");
        assert_eq!(conv.parse("Z1", grid).unwrap(), Cell::new(4, 25));
        assert_eq!(conv.address(Cell::new(0, 0), grid).unwrap(), "A5");
    }

    #[test]
    fn test_round_trip_exhaustive() {
        for conv in [
            AddressingConvention::RowLetter,
            AddressingConvention::ColLetter,
        ] {
            for (rows, cols) in [(2u32, 2u32), (5, 5), (20, 20), (3, 7)] {
                let grid = GridSpec::new(rows, cols);
                for row in 0..rows {
                    for col in 0..cols {
                        let cell = Cell::new(row, col);
                        let addr = conv.address(cell, grid).unwrap();
                        assert_eq!(
                            conv.parse(&addr, grid).unwrap(),
                            cell,
                            "round trip failed for {addr} under {:?}",
                            conv
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_col_letter_allows_26_columns() {
        let conv = AddressingConvention::ColLetter;
        assert!(conv.validate_grid(GridSpec::new(5, 26)).is_ok());
    }

    #[test]
    fn test_col_letter_overflow_at_27() {
        let conv = AddressingConvention::ColLetter;
        let err = conv.validate_grid(GridSpec::new(5, 27)).unwrap_err();
        assert!(matches!(err, GridError::AddressOverflow { cols: 27 }));
    }

    #[test]
    fn test_row_letter_cols_capped_at_20() {
        let conv = AddressingConvention::RowLetter;
        assert!(conv.validate_grid(GridSpec::new(5, 20)).is_ok());
        let err = conv.validate_grid(GridSpec::new(5, 21)).unwrap_err();
        assert!(matches!(
            err,
            GridError::GridOutOfRange { axis: "cols", value: 21, .. }
        ));
    }

    #[test]
    fn test_grid_bounds_rejected() {
        let conv = AddressingConvention::RowLetter;
        assert!(matches!(
            conv.validate_grid(GridSpec::new(1, 5)),
            Err(GridError::GridOutOfRange { axis: "rows", value: 1, .. })
        ));
        assert!(matches!(
            conv.validate_grid(GridSpec::new(21, 5)),
            Err(GridError::GridOutOfRange { axis: "rows", value: 21, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbled_input() {
        let grid = GridSpec::new(5, 5);
        let conv = AddressingConvention::RowLetter;
        assert!(matches!(
            conv.parse("", grid),
            Err(GridError::BadAddress { .. })
        ));
        assert!(matches!(
            conv.parse("3B", grid),
            Err(GridError::BadAddress { .. })
        ));
        assert!(matches!(
            conv.parse("B", grid),
            Err(GridError::BadAddress { .. })
        ));
        assert!(matches!(
            conv.parse("B0", grid),
            Err(GridError::BadAddress { .. })
        ));
        assert!(matches!(
            conv.parse("Z9", grid),
            Err(GridError::BadAddress { .. })
        ));
    }

    #[test]
    fn test_axis_label_direction() {
        // Numbers descend down the rows under col-letter
        let conv = AddressingConvention::ColLetter;
        assert_eq!(conv.row_label(0, 5), "5");
        assert_eq!(conv.row_label(4, 5), "1");
        assert_eq!(conv.column_label(0), "A");

        let conv = AddressingConvention::RowLetter;
        assert_eq!(conv.row_label(0, 5), "A");
        assert_eq!(conv.column_label(0), "1");
    }
}
