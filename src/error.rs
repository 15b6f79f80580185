use crate::lld::Field;

/// Error type for lld-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LldError {
    /// A required LLD field was not supplied.
    MissingField(Field),
    /// The meridian is not one of 4, 5 or 6.
    InvalidMeridian(i64),
    /// The township is outside 1-126.
    InvalidTownship(i64),
    /// The range is outside 1-34.
    InvalidRange(i64),
    /// The section is outside 1-36.
    InvalidSection(i64),
    /// The quarter section label is not NE, NW, SE or SW.
    InvalidQuarterSection(String),
    /// The section has no position in the township grid.
    SectionNotInGrid(i64),
    /// Longitude scale is undefined at this latitude (cosine is zero).
    LongitudeUndefined(f64),
    /// Failed to parse an LLD or one of its fields from text.
    ParseError(String),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or writing error.
    CsvError(String),
}

impl LldError {
    /// The input field this error concerns, or `None` for general errors.
    pub fn field(&self) -> Option<Field> {
        match self {
            LldError::MissingField(field) => Some(*field),
            LldError::InvalidMeridian(_) => Some(Field::Meridian),
            LldError::InvalidTownship(_) => Some(Field::Township),
            LldError::InvalidRange(_) => Some(Field::Range),
            LldError::InvalidSection(_) | LldError::SectionNotInGrid(_) => Some(Field::Section),
            LldError::InvalidQuarterSection(_) => Some(Field::QuarterSection),
            LldError::LongitudeUndefined(_)
            | LldError::ParseError(_)
            | LldError::IoError(_)
            | LldError::CsvError(_) => None,
        }
    }
}

impl std::fmt::Display for LldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LldError::MissingField(field) => write!(f, "Incomplete LLD: {} is required", field),
            LldError::InvalidMeridian(m) => {
                write!(f, "Invalid meridian: {}. Must be 4, 5, or 6", m)
            }
            LldError::InvalidTownship(t) => {
                write!(f, "Invalid township: {}. Must be between 1 and 126", t)
            }
            LldError::InvalidRange(r) => {
                write!(f, "Invalid range: {}. Must be between 1 and 34 (approx)", r)
            }
            LldError::InvalidSection(s) => {
                write!(f, "Invalid section: {}. Must be between 1 and 36", s)
            }
            LldError::InvalidQuarterSection(q) => {
                write!(f, "Invalid quarter section: '{}'. Must be NE, NW, SE, or SW", q)
            }
            LldError::SectionNotInGrid(s) => {
                write!(f, "Invalid grid position: section {} not found in township grid", s)
            }
            LldError::LongitudeUndefined(lat) => {
                write!(f, "Longitude undefined at latitude {}", lat)
            }
            LldError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            LldError::IoError(msg) => write!(f, "IO error: {}", msg),
            LldError::CsvError(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for LldError {}
