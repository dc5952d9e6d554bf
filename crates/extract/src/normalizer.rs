use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::error::ExtractionError;
use crate::schema::{FinancialSnapshot, Metric};

/// Digits with optional `,` thousands grouping, fraction and exponent.
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+|\d{1,3}(?:,\d{3})+)(?:\.\d+)?(?:[eE][+-]?\d+)?$")
        .expect("numeric pattern is valid")
});

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Validate a decoded payload and coerce it into aligned numeric series.
///
/// `years` is mandatory. Each metric is optional, but when present it must be
/// an array of exactly `years.len()` numeric values. Misaligned series are
/// rejected, never truncated or padded.
pub fn normalize_snapshot(payload: &Value) -> Result<FinancialSnapshot, ExtractionError> {
    let record = payload
        .as_object()
        .ok_or_else(|| ExtractionError::MalformedPayload("payload is not a JSON object".into()))?;

    let years = normalize_years(record)?;

    let mut snapshot = FinancialSnapshot {
        years,
        revenue: None,
        assets: None,
        liabilities: None,
        equity: None,
    };

    for metric in Metric::ALL {
        if let Some(values) = normalize_series(record, metric, snapshot.years.len())? {
            snapshot.set_series(metric, values);
        }
    }

    tracing::debug!(
        periods = snapshot.years.len(),
        metrics = ?snapshot.present_metrics(),
        "normalized snapshot"
    );
    Ok(snapshot)
}

fn normalize_years(record: &Map<String, Value>) -> Result<Vec<String>, ExtractionError> {
    let items = match record.get("years") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ExtractionError::schema("years", "expected an array")),
        None => return Err(ExtractionError::schema("years", "missing")),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let label = match item {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => String::new(),
            };
            if label.is_empty() {
                Err(ExtractionError::schema(
                    "years",
                    format!("entry {} is not a period label", i),
                ))
            } else {
                Ok(label)
            }
        })
        .collect()
}

fn normalize_series(
    record: &Map<String, Value>,
    metric: Metric,
    expected_len: usize,
) -> Result<Option<Vec<f64>>, ExtractionError> {
    let field = metric.field();

    let items = match record.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ExtractionError::schema(field, "expected an array")),
    };

    if items.len() != expected_len {
        return Err(ExtractionError::schema(
            field,
            format!("expected {} values, got {}", expected_len, items.len()),
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            coerce_number(item).ok_or_else(|| {
                ExtractionError::schema(field, format!("entry {} is not numeric: {}", i, item))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Numbers pass through; numeric-looking strings are coerced.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

/// Parse strings like `"1,200"`, `"$ 3.5"`, `"-€40"` or `"(250)"`.
fn parse_numeric_str(s: &str) -> Option<f64> {
    let s = s.trim();

    // Accounting notation for negatives.
    let (mut negative, s) = match s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => (false, s),
    };

    let s = match s.strip_prefix('-') {
        Some(rest) => {
            negative = !negative;
            rest
        }
        None => s.strip_prefix('+').unwrap_or(s),
    };

    let digits = s.trim_start_matches(CURRENCY_SYMBOLS).trim_start();
    if !NUMERIC.is_match(digits) {
        return None;
    }

    let value: f64 = digits.replace(',', "").parse().ok()?;
    let value = if negative { -value } else { value };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_snapshot() {
        let payload = json!({
            "years": ["2023", "2024"],
            "revenue": [100, 150],
            "assets": [500.5, 620],
            "liabilities": [300, 310],
            "equity": [200.5, 310]
        });
        let snapshot = normalize_snapshot(&payload).unwrap();
        assert_eq!(snapshot.years, vec!["2023", "2024"]);
        assert_eq!(snapshot.revenue, Some(vec![100.0, 150.0]));
        assert_eq!(snapshot.assets, Some(vec![500.5, 620.0]));
        assert_eq!(snapshot.liabilities, Some(vec![300.0, 310.0]));
        assert_eq!(snapshot.equity, Some(vec![200.5, 310.0]));
    }

    #[test]
    fn test_absent_metrics_stay_absent() {
        let payload = json!({"years": ["2023", "2024"], "revenue": [100, 150]});
        let snapshot = normalize_snapshot(&payload).unwrap();
        assert_eq!(snapshot.revenue, Some(vec![100.0, 150.0]));
        assert!(snapshot.assets.is_none());
        assert!(snapshot.liabilities.is_none());
        assert!(snapshot.equity.is_none());
    }

    #[test]
    fn test_null_metric_is_absent() {
        let payload = json!({"years": ["2024"], "equity": null, "assets": [1]});
        let snapshot = normalize_snapshot(&payload).unwrap();
        assert!(snapshot.equity.is_none());
        assert_eq!(snapshot.assets, Some(vec![1.0]));
    }

    #[test]
    fn test_length_mismatch_names_field() {
        let payload = json!({
            "years": ["2023", "2024"],
            "assets": [10, 20],
            "liabilities": [5]
        });
        let err = normalize_snapshot(&payload).unwrap_err();
        assert_eq!(err.field(), Some("liabilities"));
    }

    #[test]
    fn test_longer_series_is_rejected_not_truncated() {
        let payload = json!({"years": ["2023"], "revenue": [1, 2, 3]});
        let err = normalize_snapshot(&payload).unwrap_err();
        assert_eq!(err.field(), Some("revenue"));
    }

    #[test]
    fn test_missing_years() {
        let payload = json!({"revenue": [1, 2]});
        let err = normalize_snapshot(&payload).unwrap_err();
        assert_eq!(err.field(), Some("years"));
    }

    #[test]
    fn test_years_not_array() {
        let payload = json!({"years": "2023-2024"});
        let err = normalize_snapshot(&payload).unwrap_err();
        assert_eq!(err.field(), Some("years"));
    }

    #[test]
    fn test_numeric_years_become_labels() {
        let payload = json!({"years": [2023, " 2024 "], "equity": [1, 2]});
        let snapshot = normalize_snapshot(&payload).unwrap();
        assert_eq!(snapshot.years, vec!["2023", "2024"]);
    }

    #[test]
    fn test_numeric_strings_coerced() {
        let payload = json!({
            "years": ["2022", "2023", "2024", "2025"],
            "revenue": ["1,200", "$ 3.5", "-€40", "(250)"]
        });
        let snapshot = normalize_snapshot(&payload).unwrap();
        assert_eq!(snapshot.revenue, Some(vec![1200.0, 3.5, -40.0, -250.0]));
    }

    #[test]
    fn test_non_numeric_value_fails_field() {
        let payload = json!({
            "years": ["2023", "2024"],
            "revenue": [1, 2],
            "assets": [10, "n/a"]
        });
        let err = normalize_snapshot(&payload).unwrap_err();
        assert_eq!(err.field(), Some("assets"));
    }

    #[test]
    fn test_series_not_array() {
        let payload = json!({"years": ["2023"], "equity": 42});
        let err = normalize_snapshot(&payload).unwrap_err();
        assert_eq!(err.field(), Some("equity"));
    }

    #[test]
    fn test_coerce_rejects_junk() {
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!("12abc")), None);
        assert_eq!(coerce_number(&json!("1,20")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("")), None);
        assert_eq!(coerce_number(&json!("1.5e3")), Some(1500.0));
    }
}
