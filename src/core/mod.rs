pub mod constants;
pub mod grid;

pub use constants::{
    ALBERTA_LAT_MAX, ALBERTA_LAT_MIN, ALBERTA_LON_MAX, ALBERTA_LON_MIN, BASE_LATITUDE,
    COORDINATE_PRECISION, DEG_LAT_PER_MILE, DEG_LON_PER_MILE_AT_EQUATOR, GRID_SIZE, MAX_RANGE,
    MAX_SECTION, MAX_TOWNSHIP, MERIDIAN_LONGITUDES, MILES_PER_SECTION_SIDE,
    MILES_PER_TOWNSHIP_SIDE, SECTION_GRID,
};
pub use grid::{row_col_to_section, section_to_row_col};
