use crate::convert::{BoundsWarning, locate};
use crate::coord::LatLon;
use crate::error::LldError;
use crate::geom::{GeometryFormat, create_rectangle, polygon_to_string};
use crate::core::{DEG_LAT_PER_MILE, MILES_PER_SECTION_SIDE};
use crate::lld::{Lld, LldInput};
use crate::validate::validate;
use geo_types::{Point, Polygon};
use geojson::{Feature, JsonObject};
use serde_json::Value;
use std::str::FromStr;

/// A located quarter section.
///
/// Holds the LLD, its approximate centroid and the idealized half-mile
/// square it covers.
///
/// # Example
///
/// ```
/// use lld_rs::Parcel;
///
/// # fn main() -> Result<(), lld_rs::LldError> {
/// let parcel: Parcel = "NE-36-87-18-W4".parse()?;
/// println!("{} is at {}", parcel.lld, parcel.center);
///
/// let polygon = parcel.to_polygon();
/// assert_eq!(polygon.exterior().coords().count(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    pub lld: Lld,
    /// Centroid rounded to 5 decimal places
    pub center: LatLon,
    /// Set when the centroid falls outside the advisory Alberta box
    pub warning: Option<BoundsWarning>,
    /// Half the parcel's east-west extent, in degrees of longitude
    half_width: f64,
    /// Half the parcel's north-south extent, in degrees of latitude
    half_height: f64,
}

impl Parcel {
    pub fn from_lld(lld: &Lld) -> Result<Self, LldError> {
        let conversion = locate(lld)?;
        let half_miles = MILES_PER_SECTION_SIDE / 4.0;

        Ok(Self {
            lld: *lld,
            center: conversion.coordinate,
            warning: conversion.warning,
            half_width: half_miles * conversion.deg_lon_per_mile,
            half_height: half_miles * DEG_LAT_PER_MILE,
        })
    }

    pub fn from_input(input: &LldInput) -> Result<Self, LldError> {
        Self::from_lld(&validate(input)?)
    }

    pub fn latitude(&self) -> f64 {
        self.center.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.center.longitude
    }

    pub fn to_point(&self) -> Point<f64> {
        self.center.to_point()
    }

    /// The quarter section as a closed rectangle in lon/lat degrees.
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_rectangle(&self.to_point(), self.half_width, self.half_height)
    }

    pub fn to_geometry_string(&self, format: GeometryFormat) -> String {
        polygon_to_string(&self.to_polygon(), format)
    }

    pub fn to_wkt(&self) -> String {
        self.to_geometry_string(GeometryFormat::Wkt)
    }

    /// A GeoJSON Feature with the parcel polygon and `lld`, `latitude`,
    /// `longitude` (and `warning`, when set) properties.
    pub fn to_geojson_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("lld".to_string(), Value::from(self.lld.to_string()));
        properties.insert("latitude".to_string(), Value::from(self.center.latitude));
        properties.insert("longitude".to_string(), Value::from(self.center.longitude));
        if let Some(warning) = &self.warning {
            properties.insert("warning".to_string(), Value::from(warning.to_string()));
        }

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.to_polygon())),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    pub fn to_geojson(&self) -> Result<String, LldError> {
        serde_json::to_string(&self.to_geojson_feature())
            .map_err(|e| LldError::IoError(e.to_string()))
    }
}

impl FromStr for Parcel {
    type Err = LldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_lld(&s.parse()?)
    }
}
