/// Latitude of the southern edge of Township 1 (the 49th parallel)
pub const BASE_LATITUDE: f64 = 49.0;

/// Degrees of latitude per statute mile
pub const DEG_LAT_PER_MILE: f64 = 1.0 / 69.054;

/// Degrees of longitude per statute mile at the equator
pub const DEG_LON_PER_MILE_AT_EQUATOR: f64 = 1.0 / 69.172;

/// Miles per side of a township (and width of a range)
pub const MILES_PER_TOWNSHIP_SIDE: f64 = 6.0;

/// Miles per side of a section
pub const MILES_PER_SECTION_SIDE: f64 = 1.0;

/// Base longitudes of the 4th, 5th and 6th meridians, in that order
pub const MERIDIAN_LONGITUDES: [f64; 3] = [-110.0, -114.0, -118.0];

/// Highest township number
pub const MAX_TOWNSHIP: i64 = 126;

/// Highest range number accepted (approximate; varies by meridian in practice)
pub const MAX_RANGE: i64 = 34;

/// Highest section number
pub const MAX_SECTION: i64 = 36;

/// Sections per township side
pub const GRID_SIZE: usize = 6;

/// Dominion Land Survey section numbering within a township.
///
/// `[row][col]` from the north-west corner: row 0 is the northernmost row,
/// col 0 the westernmost column. Section 1 sits in the south-east corner and
/// numbering snakes west, then north.
pub const SECTION_GRID: [[u8; GRID_SIZE]; GRID_SIZE] = [
    [31, 32, 33, 34, 35, 36],
    [30, 29, 28, 27, 26, 25],
    [19, 20, 21, 22, 23, 24],
    [18, 17, 16, 15, 14, 13],
    [7, 8, 9, 10, 11, 12],
    [6, 5, 4, 3, 2, 1],
];

/// Decimal places kept in output coordinates
pub const COORDINATE_PRECISION: i32 = 5;

/// Advisory Alberta bounding box
pub const ALBERTA_LAT_MIN: f64 = 49.0;
pub const ALBERTA_LAT_MAX: f64 = 60.0;
pub const ALBERTA_LON_MIN: f64 = -120.0;
pub const ALBERTA_LON_MAX: f64 = -110.0;
