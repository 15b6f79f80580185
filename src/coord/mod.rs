use crate::core::{ALBERTA_LAT_MAX, ALBERTA_LAT_MIN, ALBERTA_LON_MAX, ALBERTA_LON_MIN};
use geo_types::{Point, Rect, coord};
use serde::{Deserialize, Serialize};

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples, `geo_types::Point<f64>` and [`LatLon`].
/// x is longitude and y is latitude.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// A WGS84-style latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Rounds both components to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self::new(
            round_to(self.latitude, decimals),
            round_to(self.longitude, decimals),
        )
    }

    /// Returns the coordinate as a `geo_types::Point` (x = longitude).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl Coordinate for LatLon {
    fn x(&self) -> f64 {
        self.longitude
    }
    fn y(&self) -> f64 {
        self.latitude
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Rounds half away from zero to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// The advisory Alberta bounding box (x = longitude, y = latitude).
pub fn alberta_bounds() -> Rect<f64> {
    Rect::new(
        coord! { x: ALBERTA_LON_MIN, y: ALBERTA_LAT_MIN },
        coord! { x: ALBERTA_LON_MAX, y: ALBERTA_LAT_MAX },
    )
}

/// Returns true if the coordinate lies within the Alberta box, edges included.
pub fn is_within_alberta<C: Coordinate>(coord: &C) -> bool {
    let bounds = alberta_bounds();
    let (min, max) = (bounds.min(), bounds.max());
    (min.x..=max.x).contains(&coord.x()) && (min.y..=max.y).contains(&coord.y())
}
