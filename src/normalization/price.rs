use anyhow::{anyhow, Result};
use bigdecimal::BigDecimal;
use serde_json::Value;
use std::str::FromStr;

/// Parse a catalog price given either as a JSON number or a numeric string.
///
/// Strings may carry surrounding whitespace or a leading currency symbol
/// (`"$59.99"`, `"₹ 4,899"`); thousands separators are dropped.
pub fn parse_decimal(value: &Value) -> Result<BigDecimal> {
    match value {
        Value::Number(n) => BigDecimal::from_str(&n.to_string())
            .map_err(|e| anyhow!("invalid numeric price {n}: {e}")),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '-' && c != '.')
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                return Err(anyhow!("empty price string {s:?}"));
            }
            BigDecimal::from_str(&cleaned).map_err(|e| anyhow!("invalid price string {s:?}: {e}"))
        }
        other => Err(anyhow!("unsupported price value {other}")),
    }
}

/// Like [`parse_decimal`] but maps a missing or `null` value to `None`.
pub fn parse_optional_decimal(value: Option<&Value>) -> Result<Option<BigDecimal>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse_decimal(v).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_strings() {
        assert_eq!(parse_decimal(&json!(59.99)).unwrap(), BigDecimal::from_str("59.99").unwrap());
        assert_eq!(parse_decimal(&json!(4899)).unwrap(), BigDecimal::from(4899));
        assert_eq!(parse_decimal(&json!(" 12.50 ")).unwrap(), BigDecimal::from_str("12.5").unwrap());
    }

    #[test]
    fn strips_currency_and_separators() {
        assert_eq!(parse_decimal(&json!("$1,299.00")).unwrap(), BigDecimal::from(1299));
        assert_eq!(parse_decimal(&json!("₹ 4,899")).unwrap(), BigDecimal::from(4899));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_decimal(&json!("free")).is_err());
        assert!(parse_decimal(&json!(true)).is_err());
        assert!(parse_decimal(&json!("")).is_err());
    }

    #[test]
    fn optional_maps_null_to_none() {
        assert_eq!(parse_optional_decimal(None).unwrap(), None);
        assert_eq!(parse_optional_decimal(Some(&Value::Null)).unwrap(), None);
        assert!(parse_optional_decimal(Some(&json!(10))).unwrap().is_some());
    }
}
