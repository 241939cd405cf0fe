//! Numeric form input handling
//!
//! Every numeric finding field is optional. Text typed into a field is
//! cleaned (currency symbol, thousands separators, percent sign), parsed and
//! range checked here, so that nothing invalid ever reaches the summary
//! calculator.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::constants::limits;
use crate::core::error::{Result, TetReportError};

/// Kind of numeric field, which decides the accepted range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Naira amount, zero or more
    Amount,
    /// Percentage between 0 and 100 inclusive
    Percent,
}

impl NumericKind {
    fn check_range(self, value: f64) -> std::result::Result<f64, String> {
        match self {
            NumericKind::Amount if value < limits::MIN_AMOUNT => {
                Err("amount cannot be negative".to_string())
            }
            NumericKind::Percent
                if !(limits::MIN_PERCENTAGE..=limits::MAX_PERCENTAGE).contains(&value) =>
            {
                Err("percentage must be between 0 and 100".to_string())
            }
            _ => Ok(value),
        }
    }
}

/// What to do with a value that cannot be parsed or is out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Refuse the edit; the field keeps its previous value
    #[default]
    Reject,
    /// Accept the edit as a blank field and log a warning
    Coerce,
}

impl CoercionPolicy {
    /// Parse `raw` for `field`, applying this policy to invalid input
    pub fn apply(self, field: &str, raw: &str, kind: NumericKind) -> Result<Option<f64>> {
        match (self, parse_numeric(field, raw, kind)) {
            (_, Ok(value)) => Ok(value),
            (CoercionPolicy::Reject, Err(err)) => Err(err),
            (CoercionPolicy::Coerce, Err(err)) => {
                warn!("{err}; treating the field as blank");
                Ok(None)
            }
        }
    }
}

/// Strip the decorations a user may type around a number
fn clean_numeric_text(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_currency = trimmed
        .strip_prefix('₦')
        .or_else(|| trimmed.strip_prefix("NGN"))
        .or_else(|| trimmed.strip_prefix("ngn"))
        .unwrap_or(trimmed);
    let without_percent = without_currency
        .trim()
        .strip_suffix('%')
        .unwrap_or(without_currency.trim());

    without_percent
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect()
}

/// Parse a raw form value into an optional number.
///
/// Blank input yields `Ok(None)`. Non-numeric, non-finite and out of range
/// input yields [`TetReportError::InvalidNumber`].
pub fn parse_numeric(field: &str, raw: &str, kind: NumericKind) -> Result<Option<f64>> {
    let cleaned = clean_numeric_text(raw);
    if cleaned.is_empty() {
        return Ok(None);
    }

    let invalid = |reason: String| TetReportError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
        reason,
    };

    let value: f64 = cleaned
        .parse()
        .map_err(|_| invalid("not a number".to_string()))?;
    if !value.is_finite() {
        return Err(invalid("not a finite number".to_string()));
    }

    kind.check_range(value).map(Some).map_err(invalid)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Null(()),
    Other(serde::de::IgnoredAny),
}

fn lenient<'de, D>(deserializer: D, kind: NumericKind) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => match kind.check_range(n) {
            Ok(n) if n.is_finite() => Some(n),
            Ok(_) => None,
            Err(reason) => {
                warn!("Coercing stored value {n} to blank: {reason}");
                None
            }
        },
        RawNumber::Text(text) => parse_numeric("stored field", &text, kind).unwrap_or_else(|err| {
            warn!("{err}; treating the field as blank");
            None
        }),
        RawNumber::Null(()) => None,
        RawNumber::Other(_) => {
            warn!("Stored value is not a number; treating the field as blank");
            None
        }
    };
    Ok(value)
}

/// Serde helper reading a stored amount, coercing anything invalid to blank
pub fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, NumericKind::Amount)
}

/// Serde helper reading a stored percentage, coercing anything invalid to blank
pub fn lenient_percent<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, NumericKind::Percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_blank_is_none() {
        assert_eq!(parse_numeric("x", "", NumericKind::Amount).unwrap(), None);
        assert_eq!(parse_numeric("x", "   ", NumericKind::Percent).unwrap(), None);
        assert_eq!(parse_numeric("x", "₦", NumericKind::Amount).unwrap(), None);
    }

    #[test]
    fn test_parse_numeric_strips_decorations() {
        assert_eq!(
            parse_numeric("approved_cost", "₦1,250,000", NumericKind::Amount).unwrap(),
            Some(1_250_000.0)
        );
        assert_eq!(
            parse_numeric("approved_cost", "NGN 2_000.50", NumericKind::Amount).unwrap(),
            Some(2_000.5)
        );
        assert_eq!(
            parse_numeric("disbursed", " 45.5% ", NumericKind::Percent).unwrap(),
            Some(45.5)
        );
    }

    #[test]
    fn test_parse_numeric_rejects_text() {
        let err = parse_numeric("completion", "half", NumericKind::Percent).unwrap_err();
        match err {
            TetReportError::InvalidNumber { field, value, .. } => {
                assert_eq!(field, "completion");
                assert_eq!(value, "half");
            }
            other => panic!("Expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_numeric_rejects_non_finite() {
        assert!(parse_numeric("x", "NaN", NumericKind::Amount).is_err());
        assert!(parse_numeric("x", "inf", NumericKind::Amount).is_err());
    }

    #[test]
    fn test_parse_numeric_range_checks() {
        assert!(parse_numeric("x", "-1", NumericKind::Amount).is_err());
        assert!(parse_numeric("x", "100.1", NumericKind::Percent).is_err());
        assert!(parse_numeric("x", "-0.5", NumericKind::Percent).is_err());
        assert_eq!(
            parse_numeric("x", "100", NumericKind::Percent).unwrap(),
            Some(100.0)
        );
        assert_eq!(parse_numeric("x", "0", NumericKind::Percent).unwrap(), Some(0.0));
    }

    #[test]
    fn test_policy_reject_propagates_error() {
        let result = CoercionPolicy::Reject.apply("disbursed", "abc", NumericKind::Percent);
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_coerce_blanks_invalid_input() {
        let result = CoercionPolicy::Coerce.apply("disbursed", "abc", NumericKind::Percent);
        assert_eq!(result.unwrap(), None);

        let result = CoercionPolicy::Coerce.apply("disbursed", "40", NumericKind::Percent);
        assert_eq!(result.unwrap(), Some(40.0));
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_amount")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "lenient_percent")]
        percent: Option<f64>,
    }

    #[test]
    fn test_lenient_deserialization() {
        let row: Row = serde_json::from_str(r#"{"amount": "1,000", "percent": 40}"#).unwrap();
        assert_eq!(row.amount, Some(1000.0));
        assert_eq!(row.percent, Some(40.0));

        let row: Row = serde_json::from_str(r#"{"amount": null, "percent": "oops"}"#).unwrap();
        assert_eq!(row.amount, None);
        assert_eq!(row.percent, None);

        let row: Row = serde_json::from_str(r#"{"amount": -5, "percent": 150}"#).unwrap();
        assert_eq!(row.amount, None);
        assert_eq!(row.percent, None);

        let row: Row = serde_json::from_str(r#"{"amount": true}"#).unwrap();
        assert_eq!(row.amount, None);
        assert_eq!(row.percent, None);
    }

    #[test]
    fn test_lenient_deserialization_blanks_structured_values() {
        let row: Row =
            serde_json::from_str(r#"{"amount": {"value": 1000}, "percent": [40]}"#).unwrap();
        assert_eq!(row.amount, None);
        assert_eq!(row.percent, None);
    }
}
