use crate::error::LldError;
use crate::lld::{Lld, LldInput, parse_meridian_number};

/// Formats an LLD in its canonical `QS-SEC-TWP-RGE-WM` notation.
///
/// # Format
///
/// | Position | Field           | Example |
/// |----------|-----------------|---------|
/// | 1        | Quarter section | `NE`    |
/// | 2        | Section         | `36`    |
/// | 3        | Township        | `87`    |
/// | 4        | Range           | `18`    |
/// | 5        | Meridian        | `W4`    |
///
/// # Example
/// ```
/// use lld_rs::{Lld, Meridian, QuarterSection, format_lld};
///
/// # fn main() -> Result<(), lld_rs::LldError> {
/// let lld = Lld::new(QuarterSection::SW, 1, 1, 1, Meridian::W5)?;
/// assert_eq!(format_lld(&lld), "SW-1-1-1-W5");
/// # Ok(())
/// # }
/// ```
pub fn format_lld(lld: &Lld) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        lld.quarter_section, lld.section, lld.township, lld.range, lld.meridian
    )
}

/// Parses LLD notation into a raw [`LldInput`].
///
/// Tokens may be separated by `-`, `/` or whitespace, in any case, and the
/// meridian may be written `4`, `W4` or `W4M`. Only the shape is checked
/// here; value ranges are left to validation.
///
/// # Errors
///
/// - [`LldError::ParseError`] - Wrong number of tokens or a non-numeric field
pub fn parse_lld(text: &str) -> Result<LldInput, LldError> {
    let tokens: Vec<&str> = text
        .split(|c: char| c == '-' || c == '/' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let [quarter_section, section, township, range, meridian] = tokens.as_slice() else {
        return Err(LldError::ParseError(format!(
            "Expected 5 parts (QS-SEC-TWP-RGE-MER), found {} in '{}'",
            tokens.len(),
            text.trim()
        )));
    };

    let input = LldInput::from_strs(quarter_section, section, township, range, "")?;
    Ok(LldInput {
        meridian: Some(parse_meridian_number(meridian)?),
        ..input
    })
}
