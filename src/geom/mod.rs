use geo_types::{Coord, LineString, Point, Polygon};
use wkt::ToWkt;

/// Text encodings available for geometry output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Creates an axis-aligned rectangle around a centre point.
///
/// The ring runs counter-clockwise from the south-west corner and is closed,
/// so it holds 5 coordinates.
pub fn create_rectangle(center: &Point<f64>, half_width: f64, half_height: f64) -> Polygon<f64> {
    let (x, y) = (center.x(), center.y());
    let coords = vec![
        Coord { x: x - half_width, y: y - half_height },
        Coord { x: x + half_width, y: y - half_height },
        Coord { x: x + half_width, y: y + half_height },
        Coord { x: x - half_width, y: y + half_height },
        Coord { x: x - half_width, y: y - half_height },
    ];

    Polygon::new(LineString::from(coords), vec![])
}

pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    polygon.wkt_string()
}

pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    geojson::Geometry::from(polygon).to_string()
}

/// Encodes a polygon in the requested format.
pub fn polygon_to_string(polygon: &Polygon<f64>, format: GeometryFormat) -> String {
    match format {
        GeometryFormat::Wkt => polygon_to_wkt(polygon),
        GeometryFormat::GeoJson => polygon_to_geojson(polygon),
    }
}
