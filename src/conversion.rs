//! Literal value conversion.
//!
//! The parser hands over literal tokens as text; these helpers turn them into
//! numbers. Failures carry the offending text and where it was found so the
//! editor can mark the spot and carry on.

use thiserror::Error;

use crate::base::LineCol;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A literal that could not be converted.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The literal was empty or only whitespace.
    #[error("couldn't convert empty string to {target} at {at}")]
    Empty { target: &'static str, at: LineCol },

    /// The literal was present but not a valid number of the target type.
    #[error("couldn't convert '{text}' to {target} at {at}")]
    Invalid {
        text: String,
        target: &'static str,
        at: LineCol,
        #[source]
        source: BoxError,
    },
}

impl ConversionError {
    pub fn empty(target: &'static str, at: LineCol) -> Self {
        Self::Empty { target, at }
    }

    pub fn invalid(
        text: impl Into<String>,
        target: &'static str,
        at: LineCol,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Invalid {
            text: text.into(),
            target,
            at,
            source: source.into(),
        }
    }

    /// Where the bad literal was.
    pub fn location(&self) -> LineCol {
        match self {
            Self::Empty { at, .. } | Self::Invalid { at, .. } => *at,
        }
    }
}

fn non_empty<'t>(text: &'t str, target: &'static str, at: LineCol) -> Result<&'t str, ConversionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::empty(target, at));
    }
    Ok(trimmed)
}

/// Convert a `float` literal. Accepts `inf` and `nan` as protobuf does.
pub fn float_value(text: &str, at: LineCol) -> Result<f32, ConversionError> {
    let literal = non_empty(text, "float", at)?;
    literal
        .parse::<f32>()
        .map_err(|e| ConversionError::invalid(text, "float", at, e))
}

/// Convert a `double` literal.
pub fn double_value(text: &str, at: LineCol) -> Result<f64, ConversionError> {
    let literal = non_empty(text, "double", at)?;
    literal
        .parse::<f64>()
        .map_err(|e| ConversionError::invalid(text, "double", at, e))
}

/// Convert a signed decimal integer literal.
pub fn long_value(text: &str, at: LineCol) -> Result<i64, ConversionError> {
    let literal = non_empty(text, "long", at)?;
    literal
        .parse::<i64>()
        .map_err(|e| ConversionError::invalid(text, "long", at, e))
}

/// Convert a hexadecimal literal such as `0x1F` or `-0X1f`.
pub fn hex_value(text: &str, at: LineCol) -> Result<i64, ConversionError> {
    let literal = non_empty(text, "hex", at)?;
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let Some(digits) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    else {
        return Err(ConversionError::invalid(
            text,
            "hex",
            at,
            "missing 0x prefix",
        ));
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConversionError::invalid(
            text,
            "hex",
            at,
            "expected hexadecimal digits after 0x",
        ));
    }
    let magnitude =
        u64::from_str_radix(digits, 16).map_err(|e| ConversionError::invalid(text, "hex", at, e))?;
    let value = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    value.ok_or_else(|| ConversionError::invalid(text, "hex", at, "out of range for a 64-bit integer"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn at() -> LineCol {
        LineCol::new(3, 7)
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_empty_float_is_reported_as_empty(#[case] input: &str) {
        let err = float_value(input, at()).unwrap_err();
        assert!(matches!(err, ConversionError::Empty { .. }));
        assert_eq!(err.to_string(), "couldn't convert empty string to float at 4:8");
    }

    #[test]
    fn test_invalid_float_names_the_text() {
        let err = float_value("1.2.3", at()).unwrap_err();
        assert!(matches!(err, ConversionError::Invalid { .. }));
        assert_eq!(err.to_string(), "couldn't convert '1.2.3' to float at 4:8");
        assert_eq!(err.location(), at());
    }

    #[rstest]
    #[case("1.5", 1.5)]
    #[case(" -2e3 ", -2000.0)]
    #[case("0", 0.0)]
    fn test_float_values(#[case] input: &str, #[case] expected: f32) {
        assert_eq!(float_value(input, at()).unwrap(), expected);
    }

    #[test]
    fn test_float_special_values() {
        assert!(float_value("inf", at()).unwrap().is_infinite());
        assert!(float_value("nan", at()).unwrap().is_nan());
    }

    #[test]
    fn test_double_and_long() {
        assert_eq!(double_value("0.25", at()).unwrap(), 0.25);
        assert_eq!(long_value("-42", at()).unwrap(), -42);
        assert!(matches!(long_value("4.2", at()), Err(ConversionError::Invalid { .. })));
        assert!(matches!(long_value(" ", at()), Err(ConversionError::Empty { .. })));
    }

    #[rstest]
    #[case("0x1F", 31)]
    #[case("0Xff", 255)]
    #[case("-0x10", -16)]
    #[case("0x7fffffffffffffff", i64::MAX)]
    #[case("-0x8000000000000000", i64::MIN)]
    fn test_hex_values(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(hex_value(input, at()).unwrap(), expected);
    }

    #[rstest]
    #[case("0x-5")]
    #[case("0x+5")]
    #[case("-0x-8000000000000000")]
    #[case("0x8000000000000000")]
    #[case("-0x8000000000000001")]
    #[case("0x")]
    #[case("0x1g")]
    fn test_malformed_hex_is_invalid(#[case] input: &str) {
        let err = hex_value(input, at()).unwrap_err();
        assert!(matches!(err, ConversionError::Invalid { .. }));
        assert_eq!(err.location(), at());
    }

    #[test]
    fn test_hex_requires_prefix() {
        let err = hex_value("1F", at()).unwrap_err();
        assert_eq!(err.to_string(), "couldn't convert '1F' to hex at 4:8");
    }
}
