use crate::error::LldError;
use crate::core::constants::{GRID_SIZE, MAX_SECTION, SECTION_GRID};

/// Converts a section number to its `(row, col)` position in the township grid.
///
/// Row 0 is the north edge and col 0 the west edge of the township.
pub fn section_to_row_col(section: i64) -> Result<(usize, usize), LldError> {
    if !(1..=MAX_SECTION).contains(&section) {
        return Err(LldError::SectionNotInGrid(section));
    }

    SECTION_GRID
        .iter()
        .enumerate()
        .find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&s| i64::from(s) == section)
                .map(|col| (row, col))
        })
        .ok_or(LldError::SectionNotInGrid(section))
}

/// Converts a township grid position back to its section number.
///
/// Returns `None` when the position lies outside the 6x6 grid.
pub fn row_col_to_section(row: usize, col: usize) -> Option<u8> {
    if row >= GRID_SIZE || col >= GRID_SIZE {
        return None;
    }
    Some(SECTION_GRID[row][col])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_sections() -> Result<(), LldError> {
        assert_eq!(section_to_row_col(1)?, (5, 5));
        assert_eq!(section_to_row_col(6)?, (5, 0));
        assert_eq!(section_to_row_col(31)?, (0, 0));
        assert_eq!(section_to_row_col(36)?, (0, 5));
        Ok(())
    }

    #[test]
    fn test_snake_pattern() -> Result<(), LldError> {
        // Row 4 runs west to east, row 3 east to west
        assert_eq!(section_to_row_col(7)?, (4, 0));
        assert_eq!(section_to_row_col(12)?, (4, 5));
        assert_eq!(section_to_row_col(13)?, (3, 5));
        assert_eq!(section_to_row_col(18)?, (3, 0));
        assert_eq!(section_to_row_col(25)?, (1, 5));
        Ok(())
    }

    #[test]
    fn test_every_section_maps_back() -> Result<(), LldError> {
        for section in 1..=36 {
            let (row, col) = section_to_row_col(section)?;
            assert_eq!(row_col_to_section(row, col), Some(section as u8));
        }
        Ok(())
    }

    #[test]
    fn test_section_outside_grid() {
        assert_eq!(section_to_row_col(0), Err(LldError::SectionNotInGrid(0)));
        assert_eq!(section_to_row_col(37), Err(LldError::SectionNotInGrid(37)));
        assert_eq!(row_col_to_section(6, 0), None);
    }
}
