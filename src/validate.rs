//! Input validation for Legal Land Descriptions.
//!
//! Both entry points run the same per-value checks. [`validate_all`]
//! collects every violation for interactive forms through [`check_field`];
//! [`validate`] stops at the first one for library callers.

use crate::error::LldError;
use crate::core::{MAX_RANGE, MAX_SECTION, MAX_TOWNSHIP, section_to_row_col};
use crate::lld::{Field, Lld, LldInput, Meridian, QuarterSection};

pub fn check_meridian(meridian: i64) -> Result<Meridian, LldError> {
    Meridian::try_from(meridian)
}

pub fn check_township(township: i64) -> Result<u16, LldError> {
    if !(1..=MAX_TOWNSHIP).contains(&township) {
        return Err(LldError::InvalidTownship(township));
    }
    Ok(township as u16)
}

pub fn check_range(range: i64) -> Result<u8, LldError> {
    if !(1..=MAX_RANGE).contains(&range) {
        return Err(LldError::InvalidRange(range));
    }
    Ok(range as u8)
}

/// Checks the section is 1-36 and has a position in the township grid.
pub fn check_section(section: i64) -> Result<u8, LldError> {
    if !(1..=MAX_SECTION).contains(&section) {
        return Err(LldError::InvalidSection(section));
    }
    section_to_row_col(section)?;
    Ok(section as u8)
}

pub fn check_quarter_section(label: &str) -> Result<QuarterSection, LldError> {
    label.parse()
}

/// Checks a single field of the input: presence first, then domain.
pub fn check_field(input: &LldInput, field: Field) -> Result<(), LldError> {
    let missing = LldError::MissingField(field);
    match field {
        Field::Meridian => check_meridian(input.meridian.ok_or(missing)?).map(|_| ()),
        Field::Township => check_township(input.township.ok_or(missing)?).map(|_| ()),
        Field::Range => check_range(input.range.ok_or(missing)?).map(|_| ()),
        Field::Section => check_section(input.section.ok_or(missing)?).map(|_| ()),
        Field::QuarterSection => {
            if !input.is_present(Field::QuarterSection) {
                return Err(missing);
            }
            check_quarter_section(input.quarter_section.as_deref().unwrap_or_default())
                .map(|_| ())
        }
    }
}

/// Collects one error per violated field, in check order.
///
/// An empty result means the input is convertible.
///
/// # Example
/// ```
/// use lld_rs::{Field, LldInput, validate_all};
///
/// let input = LldInput {
///     quarter_section: Some("NE".into()),
///     section: None,
///     township: Some(127),
///     range: Some(18),
///     meridian: Some(4),
/// };
/// let errors = validate_all(&input);
/// let fields: Vec<_> = errors.iter().filter_map(|e| e.field()).collect();
/// assert_eq!(fields, vec![Field::Township, Field::Section]);
/// ```
pub fn validate_all(input: &LldInput) -> Vec<LldError> {
    Field::CHECK_ORDER
        .iter()
        .filter_map(|&field| check_field(input, field).err())
        .collect()
}

/// Validates the input and builds an [`Lld`], failing on the first violation.
///
/// Every field must be present before any domain check runs.
pub fn validate(input: &LldInput) -> Result<Lld, LldError> {
    let (meridian, township, range, section, label) = (
        required(input.meridian, Field::Meridian),
        required(input.township, Field::Township),
        required(input.range, Field::Range),
        required(input.section, Field::Section),
        required(
            input
                .quarter_section
                .as_deref()
                .filter(|_| input.is_present(Field::QuarterSection)),
            Field::QuarterSection,
        ),
    );
    let (meridian, township, range, section, label) =
        (meridian?, township?, range?, section?, label?);

    // Fields are built in check order so the first violation wins
    Ok(Lld {
        meridian: check_meridian(meridian)?,
        township: check_township(township)?,
        range: check_range(range)?,
        section: check_section(section)?,
        quarter_section: check_quarter_section(label)?,
    })
}

fn required<T>(value: Option<T>, field: Field) -> Result<T, LldError> {
    value.ok_or(LldError::MissingField(field))
}

/// Re-checks an already constructed [`Lld`] before computing with it.
pub(crate) fn revalidate(lld: &Lld) -> Result<(), LldError> {
    check_township(i64::from(lld.township))?;
    check_range(i64::from(lld.range))?;
    check_section(i64::from(lld.section))?;
    Ok(())
}
