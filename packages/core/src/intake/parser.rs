use exoscope_types::regex::Regex;
use std::sync::LazyLock;

use crate::error::FormatError;
use crate::features::{FeatureKind, FeatureVector};

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n, ]+").expect("separator pattern is valid"));

/// Parses one number the way a form field is read: surrounding whitespace is
/// ignored and only finite values are accepted.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Splits `text` on runs of newlines, commas and spaces and reads exactly
/// `kind.arity()` numbers out of it. Any deviation rejects the whole text.
pub fn parse_vector(text: &str, kind: FeatureKind) -> Result<FeatureVector, FormatError> {
    let expected = kind.arity();
    let tokens: Vec<&str> = SEPARATORS
        .split(text)
        .filter(|token| !token.trim().is_empty())
        .collect();

    if tokens.len() != expected {
        return Err(FormatError::WrongCount {
            expected,
            found: tokens.len(),
        });
    }

    let mut values = Vec::with_capacity(expected);
    for (position, token) in tokens.iter().enumerate() {
        match parse_number(token) {
            Some(value) => values.push(value),
            None => {
                return Err(FormatError::NotNumeric {
                    expected,
                    position,
                    token: token.to_string(),
                });
            }
        }
    }

    Ok(FeatureVector::new_unchecked(kind, values))
}
