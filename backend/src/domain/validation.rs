//! Field rules shared by the entity constructors.
//!
//! Lengths count Unicode scalar values. Whitespace-only strings count as
//! empty for required fields. NUL characters are rejected everywhere since
//! PostgreSQL text columns cannot store them.

/// Maximum length of person and amenity names.
pub const NAME_MAX: usize = 50;
/// Maximum length of a place title.
pub const TITLE_MAX: usize = 100;
/// Maximum length of free text (place descriptions, review bodies).
pub const TEXT_MAX: usize = 1000;

/// A single-field validation failure that adapters can report structurally.
pub trait FieldViolation: std::fmt::Display {
    /// Name of the offending field as it appears in request payloads.
    fn field(&self) -> &'static str;

    /// Stable machine-readable rule identifier, e.g. `required` or `too_long`.
    fn code(&self) -> &'static str;
}

/// Outcome of a text length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextViolation {
    Required,
    TooLong { max: usize },
    Nul,
}

pub(crate) fn check_required_text(value: &str, max: usize) -> Result<(), TextViolation> {
    if value.trim().is_empty() {
        return Err(TextViolation::Required);
    }
    check_optional_text(value, max)
}

pub(crate) fn check_optional_text(value: &str, max: usize) -> Result<(), TextViolation> {
    if value.contains('\0') {
        return Err(TextViolation::Nul);
    }
    if value.chars().count() > max {
        return Err(TextViolation::TooLong { max });
    }
    Ok(())
}

pub(crate) fn check_range(value: f64, min: f64, max: f64) -> bool {
    value.is_finite() && (min..=max).contains(&value)
}

/// Keep the first occurrence of each element, preserving order.
pub(crate) fn dedup_preserving_order<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
