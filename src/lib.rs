//! # lld-rs
//!
//! Converts Alberta Legal Land Descriptions (Dominion Land Survey quarter
//! sections) to the approximate latitude/longitude of their centroid.
//!
//! The model is an idealized grid: townships are 6 miles square counted north
//! from the 49th parallel, ranges 6 miles wide counted west from the 4th, 5th
//! or 6th meridian, sections 1 mile square in the survey's snake numbering.
//! It is not survey-grade.
//!
//! There are currently three main entry points.
//!
//! ### 1. `convert` - Single Conversions
//!
//! ```
//! use lld_rs::{LldInput, convert};
//!
//! # fn main() -> Result<(), lld_rs::LldError> {
//! let input = LldInput::from_strs("NE", "36", "87", "18", "W4")?;
//! let coord = convert(&input)?;
//! println!("{}, {}", coord.latitude, coord.longitude);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Parcel` - Quarter Section Geometry
//!
//! ```
//! use lld_rs::Parcel;
//!
//! # fn main() -> Result<(), lld_rs::LldError> {
//! let parcel: Parcel = "NE-36-87-18-W4".parse()?;
//! let polygon = parcel.to_polygon();
//! let feature = parcel.to_geojson()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToLld` - CSV File Conversion
//!
//! Convert CSV files with an LLD column to CSVs with latitude/longitude:
//!
//! ```no_run
//! use lld_rs::{CsvLldConfig, CsvToLld, GeometryFormat};
//!
//! let config = CsvLldConfig::new("LLD")
//!     .exclude(vec!["Notes".into()])
//!     .with_geometry(GeometryFormat::GeoJson);
//!
//! // Using trait method
//! "input.csv".to_lld_csv("output.csv", &config).unwrap();
//! ```
//!
//! Or use separate field columns:
//!
//! ```no_run
//! use lld_rs::{CsvLldConfig, LldColumns, csv_to_lld_csv};
//!
//! let config = CsvLldConfig::from_fields(LldColumns::default()).skip_invalid(true);
//!
//! csv_to_lld_csv("parcels.csv", "output.csv", &config).unwrap();
//! ```
//!

pub mod convert;
pub mod coord;
pub mod core;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;
pub mod lld;
pub mod parcel;
pub mod validate;

pub use convert::{
    BoundsWarning, Conversion, SurveyPoint, centroid, convert, convert_batch, deg_lon_per_mile,
    locate, quarter_centroid, section_centroid, township_centroid,
};
pub use coord::{Coordinate, LatLon, alberta_bounds, is_within_alberta, round_to};
pub use error::LldError;
pub use geom::{GeometryFormat, create_rectangle, polygon_to_geojson, polygon_to_wkt};
pub use crate::core::{
    COORDINATE_PRECISION, SECTION_GRID, row_col_to_section, section_to_row_col,
};
pub use index::{format_lld, parse_lld};
pub use io::{CsvLldConfig, CsvSummary, CsvToLld, LldColumns, LldSource, csv_to_lld_csv};
pub use lld::{Field, Lld, LldInput, Meridian, QuarterSection};
pub use parcel::Parcel;
pub use validate::{check_field, validate, validate_all};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), LldError> {
        let input = parse_lld("NE-36-87-18-W4")?;
        assert!(validate_all(&input).is_empty());

        let coord = convert(&input)?;
        assert!((coord.latitude - 56.55568).abs() < 1e-9);
        assert!((coord.longitude - -112.67932).abs() < 1e-9);

        let parcel = Parcel::from_input(&input)?;
        assert_eq!(parcel.center, coord);
        assert_eq!(parcel.lld.to_string(), "NE-36-87-18-W4");
        Ok(())
    }

    #[test]
    fn test_form_submission_workflow() {
        // A form with one missing and two out-of-range fields
        let input = LldInput {
            quarter_section: None,
            section: Some(12),
            township: Some(0),
            range: Some(35),
            meridian: Some(5),
        };

        let errors = validate_all(&input);
        let fields: Vec<Field> = errors.iter().filter_map(LldError::field).collect();
        assert_eq!(
            fields,
            vec![Field::Township, Field::Range, Field::QuarterSection]
        );

        // The library call reports only the first problem
        assert_eq!(
            convert(&input),
            Err(LldError::MissingField(Field::QuarterSection))
        );
    }

    #[test]
    fn test_every_section_distinct() -> Result<(), LldError> {
        let mut seen = Vec::new();
        for section in 1..=36u8 {
            let lld = Lld::new(QuarterSection::SW, section, 50, 10, Meridian::W5)?;
            let c = locate(&lld)?.coordinate;
            assert!(!seen.contains(&c), "section {section} collides");
            seen.push(c);
        }
        Ok(())
    }

    #[test]
    fn test_meridians_step_west() -> Result<(), LldError> {
        let w4 = convert(&parse_lld("NE-1-10-1-W4")?)?;
        let w5 = convert(&parse_lld("NE-1-10-1-W5")?)?;
        let w6 = convert(&parse_lld("NE-1-10-1-W6")?)?;

        assert!(w4.longitude > w5.longitude);
        assert!(w5.longitude > w6.longitude);
        assert_eq!(w4.latitude, w5.latitude);
        assert!(((w4.longitude - w5.longitude) - 4.0).abs() < 1e-4);
        Ok(())
    }

    #[test]
    fn test_batch_matches_single() -> Result<(), LldError> {
        let inputs: Vec<LldInput> = ["SE-22-101-7-W6", "NW-3-5-30-W4", "NE-36-126-1-W5"]
            .iter()
            .map(|s| parse_lld(s))
            .collect::<Result<_, _>>()?;

        let batch = convert_batch(&inputs);
        for (input, result) in inputs.iter().zip(batch) {
            assert_eq!(result, convert(input));
        }
        Ok(())
    }
}
