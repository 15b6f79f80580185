use crate::error::LldError;
use crate::geom::GeometryFormat;
use crate::index::parse_lld;
use crate::lld::LldInput;
use crate::parcel::Parcel;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

enum SourceIndices {
    Description(usize),
    Fields([usize; 5]),
}

/// Column names holding the five LLD fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LldColumns {
    pub quarter_section: String,
    pub section: String,
    pub township: String,
    pub range: String,
    pub meridian: String,
}

impl Default for LldColumns {
    fn default() -> Self {
        Self {
            quarter_section: "quarter_section".to_string(),
            section: "section".to_string(),
            township: "township".to_string(),
            range: "range".to_string(),
            meridian: "meridian".to_string(),
        }
    }
}

impl LldColumns {
    fn names(&self) -> [&str; 5] {
        [
            self.quarter_section.as_str(),
            self.section.as_str(),
            self.township.as_str(),
            self.range.as_str(),
            self.meridian.as_str(),
        ]
    }
}

#[derive(Debug, Clone)]
pub enum LldSource {
    /// A single column holding LLD notation such as `NE-36-87-18-W4`
    DescriptionColumn(String),
    /// Five separate field columns
    FieldColumns(LldColumns),
}

#[derive(Debug, Clone)]
pub struct CsvLldConfig {
    pub source: LldSource,
    pub exclude_columns: Vec<String>,
    pub include_geometry: Option<GeometryFormat>,
    pub skip_invalid: bool,
}

impl CsvLldConfig {
    /// Create config for a CSV with an LLD notation column.
    ///
    /// # Example
    /// ```
    /// use lld_rs::CsvLldConfig;
    ///
    /// let config = CsvLldConfig::new("lld");
    /// ```
    pub fn new(description_column: impl Into<String>) -> Self {
        Self {
            source: LldSource::DescriptionColumn(description_column.into()),
            exclude_columns: Vec::new(),
            include_geometry: None,
            skip_invalid: false,
        }
    }

    /// Create config for a CSV with one column per LLD field.
    ///
    /// # Example
    /// ```
    /// use lld_rs::{CsvLldConfig, LldColumns};
    ///
    /// let config = CsvLldConfig::from_fields(LldColumns {
    ///     quarter_section: "QS".into(),
    ///     ..LldColumns::default()
    /// });
    /// ```
    pub fn from_fields(columns: LldColumns) -> Self {
        Self {
            source: LldSource::FieldColumns(columns),
            exclude_columns: Vec::new(),
            include_geometry: None,
            skip_invalid: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    // Include the quarter-section polygon in output.
    pub fn with_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_geometry = Some(format);
        self
    }

    /// Write invalid rows with an error message instead of aborting.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

/// Row counts from a CSV conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvSummary {
    pub converted: usize,
    pub failed: usize,
    /// Converted rows that fell outside the advisory Alberta box
    pub out_of_bounds: usize,
}

pub trait CsvToLld {
    fn to_lld_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvLldConfig,
    ) -> Result<CsvSummary, LldError>;
}

impl<P: AsRef<Path>> CsvToLld for P {
    fn to_lld_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvLldConfig,
    ) -> Result<CsvSummary, LldError> {
        csv_to_lld_csv(self, output_path, config)
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, LldError> {
    if name.is_empty() {
        return Err(LldError::CsvError("Column name cannot be empty".to_string()));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LldError::CsvError(format!("Column '{}' not found", name)))
}

fn read_input(record: &csv::StringRecord, source: &SourceIndices) -> Result<LldInput, LldError> {
    let cell = |idx: usize| record.get(idx).unwrap_or_default();
    match source {
        SourceIndices::Description(idx) => parse_lld(cell(*idx)),
        SourceIndices::Fields([qs, sec, twp, rge, mer]) => {
            LldInput::from_strs(cell(*qs), cell(*sec), cell(*twp), cell(*rge), cell(*mer))
        }
    }
}

/// Converts a CSV file of LLDs to a CSV file with latitude/longitude columns.
///
/// Output columns are `latitude`, `longitude`, then `error` (when
/// `skip_invalid` is set), then `geometry` (when requested), then the input
/// columns minus the LLD source columns and any excluded ones. Rows are
/// streamed one at a time.
///
/// # Example
///
/// ```no_run
/// use lld_rs::{CsvLldConfig, GeometryFormat, csv_to_lld_csv};
///
/// let config = CsvLldConfig::new("LLD")
///     .with_geometry(GeometryFormat::Wkt)
///     .skip_invalid(true);
///
/// let summary = csv_to_lld_csv("wells.csv", "wells_located.csv", &config).unwrap();
/// println!("{} converted, {} failed", summary.converted, summary.failed);
/// ```
pub fn csv_to_lld_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvLldConfig,
) -> Result<CsvSummary, LldError> {
    let file = File::open(csv_path).map_err(|e| LldError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| LldError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        LldSource::DescriptionColumn(col) => {
            let idx = find_column(&headers, col)?;
            (SourceIndices::Description(idx), HashSet::from([idx]))
        }
        LldSource::FieldColumns(columns) => {
            let mut indices = [0usize; 5];
            for (slot, name) in indices.iter_mut().zip(columns.names()) {
                *slot = find_column(&headers, name)?;
            }
            (
                SourceIndices::Fields(indices),
                indices.iter().copied().collect(),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    // Staged next to the output; an aborted run never touches output_path
    let output_path = output_path.as_ref();
    let output_dir = match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let staging =
        NamedTempFile::new_in(output_dir).map_err(|e| LldError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(staging);

    let mut header_row: Vec<&str> = vec!["latitude", "longitude"];
    if config.skip_invalid {
        header_row.push("error");
    }
    if config.include_geometry.is_some() {
        header_row.push("geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| LldError::CsvError(e.to_string()))?;

    let mut summary = CsvSummary::default();

    for (row_idx, result) in reader.records().enumerate() {
        let row_number = row_idx + 1;
        let record = result.map_err(|e| LldError::CsvError(e.to_string()))?;

        let parcel =
            read_input(&record, &source_indices).and_then(|input| Parcel::from_input(&input));

        let mut row: Vec<String> = match parcel {
            Ok(parcel) => {
                summary.converted += 1;
                if parcel.warning.is_some() {
                    summary.out_of_bounds += 1;
                }
                let mut row = vec![
                    parcel.latitude().to_string(),
                    parcel.longitude().to_string(),
                ];
                if config.skip_invalid {
                    row.push(String::new());
                }
                if let Some(format) = config.include_geometry {
                    row.push(parcel.to_geometry_string(format));
                }
                row
            }
            Err(e) if config.skip_invalid => {
                debug!(row = row_number, error = %e, "skipping invalid LLD row");
                summary.failed += 1;
                let mut row = vec![String::new(), String::new(), e.to_string()];
                if config.include_geometry.is_some() {
                    row.push(String::new());
                }
                row
            }
            Err(e) => {
                return Err(LldError::CsvError(format!("Row {}: {}", row_number, e)));
            }
        };

        for (i, field) in record.iter().enumerate() {
            if !exclude_indices.contains(&i) {
                row.push(field.to_string());
            }
        }
        writer
            .write_record(&row)
            .map_err(|e| LldError::CsvError(e.to_string()))?;
    }

    let staging = writer
        .into_inner()
        .map_err(|e| LldError::IoError(e.to_string()))?;
    staging
        .persist(output_path)
        .map_err(|e| LldError::IoError(e.error.to_string()))?;

    info!(
        converted = summary.converted,
        failed = summary.failed,
        out_of_bounds = summary.out_of_bounds,
        "converted LLD csv"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_input(path: &Path, lines: &[&str]) -> Result<(), LldError> {
        let mut file = File::create(path).map_err(|e| LldError::IoError(e.to_string()))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| LldError::IoError(e.to_string()))?;
        }
        Ok(())
    }

    fn read_output(path: &Path) -> Result<Vec<csv::StringRecord>, LldError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| LldError::CsvError(e.to_string()))?;
        let headers = reader
            .headers()
            .map_err(|e| LldError::CsvError(e.to_string()))?
            .clone();
        let mut records = vec![headers];
        for record in reader.records() {
            records.push(record.map_err(|e| LldError::CsvError(e.to_string()))?);
        }
        Ok(records)
    }

    #[test]
    fn test_description_column() -> Result<(), LldError> {
        let dir = tempdir().map_err(|e| LldError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("wells.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["WELL_ID,LLD,Operator", "W1,NE-36-87-18-W4,Acme"])?;

        let summary = csv_to_lld_csv(&csv_path, &output_path, &CsvLldConfig::new("LLD"))?;
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 0);

        let rows = read_output(&output_path)?;
        assert_eq!(
            rows[0].iter().collect::<Vec<_>>(),
            vec!["latitude", "longitude", "WELL_ID", "Operator"]
        );
        assert_eq!(
            rows[1].iter().collect::<Vec<_>>(),
            vec!["56.55568", "-112.67932", "W1", "Acme"]
        );
        Ok(())
    }

    #[test]
    fn test_field_columns_with_geometry() -> Result<(), LldError> {
        let dir = tempdir().map_err(|e| LldError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("parcels.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ID,QS,Sec,Twp,Rge,Mer,Notes",
                "1,NE,36,87,18,W4,north",
                "2,sw,1,1,1,4,south",
            ],
        )?;

        let columns = LldColumns {
            quarter_section: "QS".into(),
            section: "Sec".into(),
            township: "Twp".into(),
            range: "Rge".into(),
            meridian: "Mer".into(),
        };
        let config = CsvLldConfig::from_fields(columns)
            .exclude(vec!["Notes".into()])
            .with_geometry(GeometryFormat::Wkt);
        csv_path.to_lld_csv(&output_path, &config)?;

        let rows = read_output(&output_path)?;
        assert_eq!(
            rows[0].iter().collect::<Vec<_>>(),
            vec!["latitude", "longitude", "geometry", "ID"]
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].get(0), Some("49.00362"));
        assert!(rows[1].get(2).is_some_and(|g| g.starts_with("POLYGON")));
        Ok(())
    }

    #[test]
    fn test_invalid_row_aborts() -> Result<(), LldError> {
        let dir = tempdir().map_err(|e| LldError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("bad.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["LLD", "NE-36-87-18-W4", "NE-37-87-18-W4"])?;

        let result = csv_to_lld_csv(&csv_path, &output_path, &CsvLldConfig::new("LLD"));
        match result {
            Err(LldError::CsvError(msg)) => {
                assert!(msg.starts_with("Row 2"));
                assert!(msg.contains("37"));
            }
            other => panic!("Expected CsvError, got {:?}", other),
        }
        assert!(!output_path.exists());
        Ok(())
    }

    #[test]
    fn test_failed_run_keeps_previous_output() -> Result<(), LldError> {
        let dir = tempdir().map_err(|e| LldError::IoError(e.to_string()))?;
        let good_path = dir.path().join("good.csv");
        let bad_path = dir.path().join("bad.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&good_path, &["LLD", "NE-36-87-18-W4"])?;
        write_input(&bad_path, &["LLD", "SW-1-1-1-W4", "NE-36-87-18-W9"])?;

        let config = CsvLldConfig::new("LLD");
        csv_to_lld_csv(&good_path, &output_path, &config)?;
        assert!(csv_to_lld_csv(&bad_path, &output_path, &config).is_err());

        let records = read_output(&output_path)?;
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][0], "56.55568");

        let leftovers = std::fs::read_dir(dir.path())
            .map_err(|e| LldError::IoError(e.to_string()))?
            .count();
        assert_eq!(leftovers, 3);
        Ok(())
    }

    #[test]
    fn test_skip_invalid_records_error() -> Result<(), LldError> {
        let dir = tempdir().map_err(|e| LldError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("mixed.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &["LLD", "NE-36-87-18-W4", "NE-36-87", "NE-36-126-34-W6"],
        )?;

        let config = CsvLldConfig::new("LLD").skip_invalid(true);
        let summary = csv_to_lld_csv(&csv_path, &output_path, &config)?;
        assert_eq!(
            summary,
            CsvSummary {
                converted: 2,
                failed: 1,
                out_of_bounds: 1
            }
        );

        let rows = read_output(&output_path)?;
        assert_eq!(
            rows[0].iter().collect::<Vec<_>>(),
            vec!["latitude", "longitude", "error"]
        );
        assert_eq!(rows[1].get(2), Some(""));
        assert_eq!(rows[2].get(0), Some(""));
        assert!(rows[2].get(2).is_some_and(|e| e.contains("Parse error")));
        Ok(())
    }

    #[test]
    fn test_missing_column() -> Result<(), LldError> {
        let dir = tempdir().map_err(|e| LldError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["ID,Description", "1,NE-36-87-18-W4"])?;

        let result = csv_to_lld_csv(&csv_path, &output_path, &CsvLldConfig::new("LLD"));
        assert!(matches!(result, Err(LldError::CsvError(_))));

        let result = csv_to_lld_csv(&csv_path, &output_path, &CsvLldConfig::new(""));
        assert!(matches!(result, Err(LldError::CsvError(_))));
        Ok(())
    }
}
