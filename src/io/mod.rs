pub mod csv;

pub use csv::{CsvLldConfig, CsvSummary, CsvToLld, LldColumns, LldSource, csv_to_lld_csv};
