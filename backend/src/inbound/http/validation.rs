//! Shared parsing helpers for inbound HTTP adapters.
//!
//! Payload shape problems (missing fields, numbers of the wrong kind) are
//! reported here as `InvalidRequest`. Identifiers that are not UUIDs cannot
//! name a stored record, so they are reported as `NotFound` with the same
//! message a lookup miss would produce.

use serde_json::{Number, json};

use crate::domain::{Error, IdValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidNumber,
    NotInteger,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::NotInteger => "not_integer",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

/// Parse an identifier taken from the request path or body.
pub(crate) fn parse_id<I>(raw: String, not_found: &str) -> Result<I, Error>
where
    I: TryFrom<String, Error = IdValidationError>,
{
    I::try_from(raw).map_err(|_| Error::not_found(not_found))
}

/// Parse a required reference held in the request body.
pub(crate) fn parse_reference<I>(
    raw: Option<String>,
    field: FieldName,
    not_found: &str,
) -> Result<I, Error>
where
    I: TryFrom<String, Error = IdValidationError>,
{
    let raw = raw.ok_or_else(|| missing_field_error(field))?;
    parse_id(raw, not_found)
}

pub(crate) fn parse_reference_list<I>(values: Vec<String>, not_found: &str) -> Result<Vec<I>, Error>
where
    I: TryFrom<String, Error = IdValidationError>,
{
    values
        .into_iter()
        .map(|value| parse_id(value, not_found))
        .collect()
}

/// Read a JSON number as `f64`. Integers and floats are both accepted.
pub(crate) fn number_as_f64(value: &Number, field: FieldName) -> Result<f64, Error> {
    value.as_f64().ok_or_else(|| {
        field_error(
            field,
            ErrorCode::InvalidNumber,
            format!("{} must be a number", field.as_str()),
        )
    })
}

pub(crate) fn required_f64(value: Option<Number>, field: FieldName) -> Result<f64, Error> {
    let value = value.ok_or_else(|| missing_field_error(field))?;
    number_as_f64(&value, field)
}

pub(crate) fn optional_f64(value: Option<Number>, field: FieldName) -> Result<Option<f64>, Error> {
    value
        .map(|value| number_as_f64(&value, field))
        .transpose()
}

/// Read a JSON number that must be an integer, such as a rating.
///
/// Unsigned values beyond `i64` saturate; the domain range check rejects
/// them with its usual message.
pub(crate) fn number_as_integer(value: &Number, field: FieldName) -> Result<i64, Error> {
    if let Some(value) = value.as_i64() {
        return Ok(value);
    }
    if value.is_u64() {
        return Ok(i64::MAX);
    }
    Err(field_error(
        field,
        ErrorCode::NotInteger,
        format!("{} must be an integer", field.as_str()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, UserId};
    use rstest::rstest;

    const RATING: FieldName = FieldName::new("rating");
    const PRICE: FieldName = FieldName::new("price");

    fn number(raw: &str) -> Number {
        serde_json::from_str(raw).expect("valid JSON number")
    }

    #[rstest]
    #[case("5", 5)]
    #[case("-3", -3)]
    #[case("18446744073709551615", i64::MAX)]
    fn integer_ratings_are_accepted(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(number_as_integer(&number(raw), RATING).expect("integer"), expected);
    }

    #[rstest]
    #[case("4.5")]
    #[case("5.0")]
    fn fractional_ratings_are_rejected(#[case] raw: &str) {
        let err = number_as_integer(&number(raw), RATING).expect_err("not an integer");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "rating must be an integer");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "rating", "code": "not_integer"}))
        );
    }

    #[rstest]
    fn prices_accept_integers_and_floats() {
        assert_eq!(required_f64(Some(number("100")), PRICE).expect("int"), 100.0);
        assert_eq!(required_f64(Some(number("0.01")), PRICE).expect("float"), 0.01);
    }

    #[rstest]
    fn missing_price_is_reported_by_name() {
        let err = required_f64(None, PRICE).expect_err("missing");
        assert_eq!(err.message(), "missing required field: price");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "price", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn malformed_ids_are_not_found(#[case] raw: &str) {
        let err = parse_id::<UserId>(raw.to_owned(), "User not found").expect_err("malformed");
        assert_eq!(err.code(), DomainCode::NotFound);
        assert_eq!(err.message(), "User not found");
    }

    #[rstest]
    fn missing_reference_is_invalid_request() {
        let err = parse_reference::<UserId>(None, FieldName::new("owner_id"), "Owner not found")
            .expect_err("missing");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
    }

    #[rstest]
    fn reference_lists_fail_on_first_malformed_entry() {
        let ids = vec![UserId::random().to_string(), "nope".to_owned()];
        let err = parse_reference_list::<UserId>(ids, "Amenity not found").expect_err("malformed");
        assert_eq!(err.message(), "Amenity not found");
    }
}
