use crate::core::MERIDIAN_LONGITUDES;
use crate::error::LldError;
use crate::index::{format_lld, parse_lld};
use crate::validate::validate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the four quadrants of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuarterSection {
    NE,
    NW,
    SE,
    SW,
}

impl QuarterSection {
    pub const ALL: [QuarterSection; 4] = [
        QuarterSection::NE,
        QuarterSection::NW,
        QuarterSection::SE,
        QuarterSection::SW,
    ];

    /// Offset of the quarter's centre from the section centre, in `(east, north)` miles.
    pub fn offset_miles(&self) -> (f64, f64) {
        match self {
            QuarterSection::NE => (0.25, 0.25),
            QuarterSection::NW => (-0.25, 0.25),
            QuarterSection::SE => (0.25, -0.25),
            QuarterSection::SW => (-0.25, -0.25),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuarterSection::NE => "NE",
            QuarterSection::NW => "NW",
            QuarterSection::SE => "SE",
            QuarterSection::SW => "SW",
        }
    }
}

impl std::fmt::Display for QuarterSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuarterSection {
    type Err = LldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NE" => Ok(QuarterSection::NE),
            "NW" => Ok(QuarterSection::NW),
            "SE" => Ok(QuarterSection::SE),
            "SW" => Ok(QuarterSection::SW),
            _ => Err(LldError::InvalidQuarterSection(s.to_string())),
        }
    }
}

/// Reference meridian from which ranges are counted westward.
///
/// Serialized as its number (4, 5 or 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Meridian {
    W4,
    W5,
    W6,
}

impl Meridian {
    pub fn number(&self) -> u8 {
        match self {
            Meridian::W4 => 4,
            Meridian::W5 => 5,
            Meridian::W6 => 6,
        }
    }

    /// Longitude of the meridian line in degrees (negative is west).
    pub fn base_longitude(&self) -> f64 {
        match self {
            Meridian::W4 => MERIDIAN_LONGITUDES[0],
            Meridian::W5 => MERIDIAN_LONGITUDES[1],
            Meridian::W6 => MERIDIAN_LONGITUDES[2],
        }
    }
}

impl TryFrom<i64> for Meridian {
    type Error = LldError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Meridian::W4),
            5 => Ok(Meridian::W5),
            6 => Ok(Meridian::W6),
            _ => Err(LldError::InvalidMeridian(value)),
        }
    }
}

impl TryFrom<u8> for Meridian {
    type Error = LldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Meridian::try_from(i64::from(value))
    }
}

impl From<Meridian> for u8 {
    fn from(meridian: Meridian) -> Self {
        meridian.number()
    }
}

impl std::fmt::Display for Meridian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W{}", self.number())
    }
}

impl FromStr for Meridian {
    type Err = LldError;

    /// Accepts `4`, `W4` or `W4M`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Meridian::try_from(parse_meridian_number(s)?)
    }
}

/// Strips the optional `W` prefix and `M` suffix from a meridian token.
pub(crate) fn parse_meridian_number(s: &str) -> Result<i64, LldError> {
    let upper = s.trim().to_ascii_uppercase();
    let digits = upper.strip_prefix('W').unwrap_or(&upper);
    let digits = digits.strip_suffix('M').unwrap_or(digits);
    digits
        .parse()
        .map_err(|_| LldError::ParseError(format!("Invalid meridian: '{}'", s.trim())))
}

/// The five components of an LLD, used to tag validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    QuarterSection,
    Section,
    Township,
    Range,
    Meridian,
}

impl Field {
    /// Fields in the order the validator checks them.
    pub const CHECK_ORDER: [Field; 5] = [
        Field::Meridian,
        Field::Township,
        Field::Range,
        Field::Section,
        Field::QuarterSection,
    ];
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::QuarterSection => "quarter section",
            Field::Section => "section",
            Field::Township => "township",
            Field::Range => "range",
            Field::Meridian => "meridian",
        };
        f.write_str(name)
    }
}

/// Raw, possibly incomplete LLD as collected from a form, a CSV row or a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LldInput {
    #[serde(default, alias = "quarterSection")]
    pub quarter_section: Option<String>,
    #[serde(default)]
    pub section: Option<i64>,
    #[serde(default)]
    pub township: Option<i64>,
    #[serde(default)]
    pub range: Option<i64>,
    #[serde(default)]
    pub meridian: Option<i64>,
}

impl LldInput {
    /// Builds an input from five text fields.
    ///
    /// Blank fields become absent and the quarter section is stored uppercase.
    /// Numeric fields that are not integers are a `ParseError`; the meridian
    /// also accepts `W4`/`W4M` notation.
    ///
    /// # Example
    /// ```
    /// use lld_rs::LldInput;
    ///
    /// # fn main() -> Result<(), lld_rs::LldError> {
    /// let input = LldInput::from_strs("NE", "36", "87", "18", "W4")?;
    /// assert_eq!(input.meridian, Some(4));
    ///
    /// let partial = LldInput::from_strs("NE", "", "87", "18", "4")?;
    /// assert_eq!(partial.section, None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_strs(
        quarter_section: &str,
        section: &str,
        township: &str,
        range: &str,
        meridian: &str,
    ) -> Result<Self, LldError> {
        let quarter_section = quarter_section.trim();
        let meridian = meridian.trim();

        Ok(Self {
            quarter_section: (!quarter_section.is_empty())
                .then(|| quarter_section.to_ascii_uppercase()),
            section: parse_optional_int(section, Field::Section)?,
            township: parse_optional_int(township, Field::Township)?,
            range: parse_optional_int(range, Field::Range)?,
            meridian: if meridian.is_empty() {
                None
            } else {
                Some(parse_meridian_number(meridian)?)
            },
        })
    }

    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::QuarterSection => self
                .quarter_section
                .as_deref()
                .is_some_and(|q| !q.trim().is_empty()),
            Field::Section => self.section.is_some(),
            Field::Township => self.township.is_some(),
            Field::Range => self.range.is_some(),
            Field::Meridian => self.meridian.is_some(),
        }
    }
}

fn parse_optional_int(s: &str, field: Field) -> Result<Option<i64>, LldError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| LldError::ParseError(format!("Invalid {}: '{}'", field, trimmed)))
}

impl From<&Lld> for LldInput {
    fn from(lld: &Lld) -> Self {
        Self {
            quarter_section: Some(lld.quarter_section.to_string()),
            section: Some(i64::from(lld.section)),
            township: Some(i64::from(lld.township)),
            range: Some(i64::from(lld.range)),
            meridian: Some(i64::from(lld.meridian.number())),
        }
    }
}

/// A validated Legal Land Description.
///
/// # Example
///
/// ```
/// use lld_rs::{Lld, Meridian, QuarterSection};
///
/// # fn main() -> Result<(), lld_rs::LldError> {
/// let lld = Lld::new(QuarterSection::NE, 36, 87, 18, Meridian::W4)?;
/// assert_eq!(lld.to_string(), "NE-36-87-18-W4");
///
/// let parsed: Lld = "ne 36 87 18 w4m".parse()?;
/// assert_eq!(parsed, lld);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lld {
    pub quarter_section: QuarterSection,
    /// Section within the township (1-36)
    pub section: u8,
    /// Township counted north from the 49th parallel (1-126)
    pub township: u16,
    /// Range counted west from the meridian (1-34)
    pub range: u8,
    pub meridian: Meridian,
}

impl Lld {
    /// Creates a validated LLD, failing on the first out-of-range field.
    pub fn new(
        quarter_section: QuarterSection,
        section: u8,
        township: u16,
        range: u8,
        meridian: Meridian,
    ) -> Result<Self, LldError> {
        let lld = Self {
            quarter_section,
            section,
            township,
            range,
            meridian,
        };
        validate(&LldInput::from(&lld))
    }
}

impl TryFrom<&LldInput> for Lld {
    type Error = LldError;

    fn try_from(input: &LldInput) -> Result<Self, Self::Error> {
        validate(input)
    }
}

impl std::fmt::Display for Lld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_lld(self))
    }
}

impl FromStr for Lld {
    type Err = LldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(&parse_lld(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_section_from_str() -> Result<(), LldError> {
        assert_eq!("ne".parse::<QuarterSection>()?, QuarterSection::NE);
        assert_eq!(" SW ".parse::<QuarterSection>()?, QuarterSection::SW);
        assert!(matches!(
            "N".parse::<QuarterSection>(),
            Err(LldError::InvalidQuarterSection(_))
        ));
        Ok(())
    }

    #[test]
    fn test_quarter_offsets_are_quarter_mile() {
        for qs in QuarterSection::ALL {
            let (east, north) = qs.offset_miles();
            assert_eq!(east.abs(), 0.25);
            assert_eq!(north.abs(), 0.25);
        }
    }

    #[test]
    fn test_meridian_notation() -> Result<(), LldError> {
        assert_eq!("4".parse::<Meridian>()?, Meridian::W4);
        assert_eq!("w5".parse::<Meridian>()?, Meridian::W5);
        assert_eq!("W6M".parse::<Meridian>()?, Meridian::W6);
        assert_eq!("W7".parse::<Meridian>(), Err(LldError::InvalidMeridian(7)));
        assert!(matches!(
            "West".parse::<Meridian>(),
            Err(LldError::ParseError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_meridian_base_longitudes() {
        assert_eq!(Meridian::W4.base_longitude(), -110.0);
        assert_eq!(Meridian::W5.base_longitude(), -114.0);
        assert_eq!(Meridian::W6.base_longitude(), -118.0);
    }

    #[test]
    fn test_meridian_serializes_as_number() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Meridian::W5)?, "5");
        assert_eq!(serde_json::from_str::<Meridian>("6")?, Meridian::W6);
        assert!(serde_json::from_str::<Meridian>("7").is_err());
        Ok(())
    }

    #[test]
    fn test_input_from_strs_blank_and_garbage() -> Result<(), LldError> {
        let input = LldInput::from_strs(" ", "", "87", " 18 ", "")?;
        assert_eq!(input.quarter_section, None);
        assert_eq!(input.section, None);
        assert_eq!(input.township, Some(87));
        assert_eq!(input.range, Some(18));
        assert!(!input.is_present(Field::Meridian));

        let input = LldInput::from_strs(" nW ", "3", "87", "18", "w4m")?;
        assert_eq!(input.quarter_section.as_deref(), Some("NW"));
        assert_eq!(input.meridian, Some(4));

        let err = LldInput::from_strs("NE", "3a", "87", "18", "4");
        assert!(matches!(err, Err(LldError::ParseError(_))));
        Ok(())
    }

    #[test]
    fn test_input_deserializes_camel_case_form() -> Result<(), serde_json::Error> {
        let json = r#"{"quarterSection":"NE","section":null,"township":87,"range":18,"meridian":4}"#;
        let input: LldInput = serde_json::from_str(json)?;
        assert_eq!(input.quarter_section.as_deref(), Some("NE"));
        assert_eq!(input.section, None);
        Ok(())
    }

    #[test]
    fn test_lld_new_rejects_out_of_range() {
        assert_eq!(
            Lld::new(QuarterSection::NE, 37, 87, 18, Meridian::W4),
            Err(LldError::InvalidSection(37))
        );
        assert_eq!(
            Lld::new(QuarterSection::NE, 1, 0, 18, Meridian::W4),
            Err(LldError::InvalidTownship(0))
        );
    }
}
