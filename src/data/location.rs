use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::Coordinate;

/// Why a `location` cell could not be turned into a [`Coordinate`].
#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("location is empty")]
    Empty,
    #[error("location is not valid JSON: {0}")]
    Syntax(String),
    #[error("location is not an array")]
    NotAnArray,
    #[error("location has {0} components, need at least 2")]
    TooShort(usize),
    #[error("location component {0} is not a number")]
    NotANumber(usize),
}

/// Parse a string-encoded pair such as `[40.5, 30.2]` or `['40', '30']`.
///
/// Single quotes are accepted in place of double quotes. Arrays longer than
/// two (end locations carry a height) keep the first two components.
pub fn parse_location(text: &str) -> Result<Coordinate, LocationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LocationError::Empty);
    }

    let normalised = text.replace('\'', "\"");
    let value: JsonValue =
        serde_json::from_str(&normalised).map_err(|e| LocationError::Syntax(e.to_string()))?;

    let items = value.as_array().ok_or(LocationError::NotAnArray)?;
    let numbers = items
        .iter()
        .enumerate()
        .take(2)
        .map(|(i, v)| json_number(v).ok_or(LocationError::NotANumber(i)))
        .collect::<Result<Vec<f64>, _>>()?;

    match numbers.as_slice() {
        [x, y] => Ok(Coordinate::new(*x, *y)),
        _ => Err(LocationError::TooShort(items.len())),
    }
}

/// Build a coordinate from already-numeric components (Parquet lists,
/// JSON arrays).
pub fn location_from_numbers(values: &[f64]) -> Result<Coordinate, LocationError> {
    match values {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coordinate::new(*x, *y)),
        [x, _, ..] if !x.is_finite() => Err(LocationError::NotANumber(0)),
        [_, _, ..] => Err(LocationError::NotANumber(1)),
        _ => Err(LocationError::TooShort(values.len())),
    }
}

/// Apply the origin fallback. The flag is `true` when the fallback was used.
pub fn or_origin(parsed: Result<Coordinate, LocationError>) -> (Coordinate, bool) {
    match parsed {
        Ok(c) => (c, false),
        Err(e) => {
            log::debug!("Defaulting shot location to origin: {e}");
            (Coordinate::ORIGIN, true)
        }
    }
}

// Quoted numbers ("40") show up when the single-quote form wraps each value.
pub(crate) fn json_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_double_quoted_pair() {
        assert_eq!(parse_location("[40, 30]"), Ok(Coordinate::new(40.0, 30.0)));
        assert_eq!(
            parse_location(" [108.2, 37.9] "),
            Ok(Coordinate::new(108.2, 37.9))
        );
    }

    #[test]
    fn parses_single_quoted_values() {
        assert_eq!(
            parse_location("['40', '30']"),
            Ok(Coordinate::new(40.0, 30.0))
        );
    }

    #[test]
    fn keeps_first_two_of_three_components() {
        assert_eq!(
            parse_location("[120.0, 38.5, 1.2]"),
            Ok(Coordinate::new(120.0, 38.5))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(parse_location(""), Err(LocationError::Empty));
        assert_eq!(parse_location("{\"x\": 1}"), Err(LocationError::NotAnArray));
        assert_eq!(parse_location("[1]"), Err(LocationError::TooShort(1)));
        assert_eq!(parse_location("[1, \"abc\"]"), Err(LocationError::NotANumber(1)));
        assert!(matches!(parse_location("[1, 2"), Err(LocationError::Syntax(_))));
        assert!(matches!(parse_location("nan"), Err(LocationError::Syntax(_))));
    }

    #[test]
    fn malformed_locations_fall_back_to_exact_origin() {
        for bad in ["", "[", "[1]", "None", "['a', 'b']", "[null, 3]"] {
            let (c, defaulted) = or_origin(parse_location(bad));
            assert_eq!(c, Coordinate::ORIGIN, "input {bad:?}");
            assert!(defaulted);
        }
        let (c, defaulted) = or_origin(parse_location("[40, 30]"));
        assert_eq!(c, Coordinate::new(40.0, 30.0));
        assert!(!defaulted);
    }

    #[test]
    fn numeric_components() {
        assert_eq!(
            location_from_numbers(&[100.0, 20.0]),
            Ok(Coordinate::new(100.0, 20.0))
        );
        assert_eq!(location_from_numbers(&[1.0]), Err(LocationError::TooShort(1)));
        assert_eq!(
            location_from_numbers(&[f64::NAN, 1.0]),
            Err(LocationError::NotANumber(0))
        );
    }
}
