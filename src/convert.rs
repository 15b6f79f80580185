//! Legal Land Description to latitude/longitude conversion.
//!
//! The centroid is found in three nested stages (township, section, quarter
//! section). Each stage works out an offset in statute miles and converts it
//! to degrees: latitude with a fixed factor, longitude with a factor scaled
//! by the cosine of the township's centre latitude.

use crate::core::{
    BASE_LATITUDE, COORDINATE_PRECISION, DEG_LAT_PER_MILE, DEG_LON_PER_MILE_AT_EQUATOR,
    GRID_SIZE, MILES_PER_SECTION_SIDE, MILES_PER_TOWNSHIP_SIDE, section_to_row_col,
};
use crate::coord::{LatLon, is_within_alberta};
use crate::error::LldError;
use crate::lld::{Lld, LldInput, Meridian, QuarterSection};
use crate::validate::{revalidate, validate};
use rayon::prelude::*;
use tracing::warn;

/// An unrounded intermediate position, with the longitude scale used to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveyPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees of longitude per mile at the township's centre latitude
    pub deg_lon_per_mile: f64,
}

impl SurveyPoint {
    /// Moves the point by `(east, north)` miles.
    fn offset_miles(&self, east: f64, north: f64) -> Self {
        Self {
            latitude: self.latitude + north * DEG_LAT_PER_MILE,
            longitude: self.longitude + east * self.deg_lon_per_mile,
            deg_lon_per_mile: self.deg_lon_per_mile,
        }
    }

    pub fn to_lat_lon(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }
}

/// Non-fatal signal that a result lies outside the advisory Alberta box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsWarning {
    /// The unrounded coordinate that fell outside the box
    pub coordinate: LatLon,
}

impl std::fmt::Display for BoundsWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Calculated coordinates ({}, {}) are outside typical Alberta bounds",
            self.coordinate.latitude, self.coordinate.longitude
        )
    }
}

/// The result of locating a validated LLD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub lld: Lld,
    /// Quarter-section centroid rounded to 5 decimal places
    pub coordinate: LatLon,
    /// Degrees of longitude per mile used for this township
    pub deg_lon_per_mile: f64,
    pub warning: Option<BoundsWarning>,
}

/// Degrees of longitude per mile at the given latitude.
///
/// # Errors
///
/// - [`LldError::LongitudeUndefined`] - The cosine of the latitude is zero
pub fn deg_lon_per_mile(latitude: f64) -> Result<f64, LldError> {
    let cos_lat = latitude.to_radians().cos();
    if cos_lat.abs() < f64::EPSILON {
        return Err(LldError::LongitudeUndefined(latitude));
    }
    Ok(DEG_LON_PER_MILE_AT_EQUATOR / cos_lat)
}

/// Centre of a township.
///
/// Townships count north from the 49th parallel and ranges count west from
/// the meridian, both in 6-mile steps.
pub fn township_centroid(
    township: u16,
    range: u8,
    meridian: Meridian,
) -> Result<SurveyPoint, LldError> {
    let half_side = MILES_PER_TOWNSHIP_SIDE / 2.0;

    let north_miles = (f64::from(township) - 1.0) * MILES_PER_TOWNSHIP_SIDE + half_side;
    let latitude = BASE_LATITUDE + north_miles * DEG_LAT_PER_MILE;

    let deg_lon_per_mile = deg_lon_per_mile(latitude)?;

    let west_miles = (f64::from(range) - 1.0) * MILES_PER_TOWNSHIP_SIDE + half_side;
    let longitude = meridian.base_longitude() - west_miles * deg_lon_per_mile;

    Ok(SurveyPoint {
        latitude,
        longitude,
        deg_lon_per_mile,
    })
}

/// Centre of a section, offset from its township's centre.
pub fn section_centroid(township: &SurveyPoint, section: u8) -> Result<SurveyPoint, LldError> {
    let (row, col) = section_to_row_col(i64::from(section))?;
    let half_township = MILES_PER_TOWNSHIP_SIDE / 2.0;

    // Offsets from the township's south-west corner; row 0 is the north edge
    let east_from_sw = (col as f64 + 0.5) * MILES_PER_SECTION_SIDE;
    let north_from_sw = ((GRID_SIZE - 1 - row) as f64 + 0.5) * MILES_PER_SECTION_SIDE;

    Ok(township.offset_miles(east_from_sw - half_township, north_from_sw - half_township))
}

/// Centre of a quarter section, offset from its section's centre.
pub fn quarter_centroid(section: &SurveyPoint, quarter: QuarterSection) -> SurveyPoint {
    let (east, north) = quarter.offset_miles();
    section.offset_miles(east * MILES_PER_SECTION_SIDE, north * MILES_PER_SECTION_SIDE)
}

/// Unrounded quarter-section centroid of a validated LLD.
pub fn centroid(lld: &Lld) -> Result<SurveyPoint, LldError> {
    revalidate(lld)?;

    let township = township_centroid(lld.township, lld.range, lld.meridian)?;
    let section = section_centroid(&township, lld.section)?;
    Ok(quarter_centroid(&section, lld.quarter_section))
}

/// Locates a validated LLD, rounding the centroid and checking the advisory bounds.
///
/// Results outside the Alberta box are still returned; they carry a
/// [`BoundsWarning`] and log a warning.
///
/// # Example
/// ```
/// use lld_rs::{Lld, locate};
///
/// # fn main() -> Result<(), lld_rs::LldError> {
/// let lld: Lld = "NE-36-87-18-W4".parse()?;
/// let conversion = locate(&lld)?;
///
/// assert_eq!(conversion.coordinate.latitude, 56.55568);
/// assert_eq!(conversion.coordinate.longitude, -112.67932);
/// assert!(conversion.warning.is_none());
/// # Ok(())
/// # }
/// ```
pub fn locate(lld: &Lld) -> Result<Conversion, LldError> {
    let point = centroid(lld)?;
    let raw = point.to_lat_lon();

    let warning = if is_within_alberta(&raw) {
        None
    } else {
        warn!(
            lld = %lld,
            latitude = raw.latitude,
            longitude = raw.longitude,
            "calculated coordinates are outside typical Alberta bounds"
        );
        Some(BoundsWarning { coordinate: raw })
    };

    Ok(Conversion {
        lld: *lld,
        coordinate: raw.rounded(COORDINATE_PRECISION),
        deg_lon_per_mile: point.deg_lon_per_mile,
        warning,
    })
}

/// Converts a raw LLD to the approximate centroid of its quarter section.
///
/// Fails on the first missing or out-of-range field.
///
/// # Example
/// ```
/// use lld_rs::{Field, LldError, LldInput, convert};
///
/// let mut input = LldInput::from_strs("NE", "36", "87", "18", "4").unwrap();
/// let coord = convert(&input).unwrap();
/// assert!((coord.latitude - 56.55568).abs() < 1e-9);
///
/// input.section = None;
/// assert_eq!(convert(&input), Err(LldError::MissingField(Field::Section)));
/// ```
pub fn convert(input: &LldInput) -> Result<LatLon, LldError> {
    let lld = validate(input)?;
    Ok(locate(&lld)?.coordinate)
}

/// Converts many inputs in parallel, preserving order.
///
/// Each result is independent; one bad input does not affect the others.
pub fn convert_batch(inputs: &[LldInput]) -> Vec<Result<LatLon, LldError>> {
    inputs.par_iter().map(convert).collect()
}
