// ==========================================
// IWS BDE Plattform - field coercion
// ==========================================
// Converts raw CSV cell text into typed field values. Pure functions; an
// empty or absent cell means "no value", a malformed one fails the import
// with row and field context.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;
use chrono::{NaiveDate, NaiveDateTime};

/// Tokens accepted as "true" (case-insensitive)
const TRUTHY_TOKENS: [&str; 5] = ["true", "1", "yes", "ja", "y"];

/// Accepted timestamp layouts (ISO 8601, `T` or space separated)
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn cell<'a>(record: &'a RawRecord, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Optional text field: empty or absent becomes None
pub fn optional_text(record: &RawRecord, field: &str) -> Option<String> {
    cell(record, field).map(|v| v.to_string())
}

/// Required text field: empty or absent fails the import
pub fn required_text(record: &RawRecord, field: &'static str, row: usize) -> ImportResult<String> {
    cell(record, field)
        .map(|v| v.to_string())
        .ok_or(ImportError::MissingField { row, field })
}

/// Boolean field: empty falls back to the supplied default, a token from
/// the truthy set parses to true, any other non-empty token to false.
pub fn parse_bool(record: &RawRecord, field: &str, default: bool) -> bool {
    match cell(record, field) {
        None => default,
        Some(raw) => TRUTHY_TOKENS.contains(&raw.to_lowercase().as_str()),
    }
}

/// Integer field: empty becomes None, a malformed literal fails the import
pub fn parse_int(record: &RawRecord, field: &'static str, row: usize) -> ImportResult<Option<i64>> {
    match cell(record, field) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|e| ImportError::TypeConversionError {
                row,
                field,
                message: format!("'{}': {}", raw, e),
            }),
    }
}

/// Integer field constrained to >= 0
pub fn parse_non_negative_int(
    record: &RawRecord,
    field: &'static str,
    row: usize,
) -> ImportResult<Option<i64>> {
    match parse_int(record, field, row)? {
        Some(value) if value < 0 => Err(ImportError::NegativeValueError {
            row,
            field,
            value: value as f64,
        }),
        other => Ok(other),
    }
}

/// Float field: empty becomes None, a malformed literal fails the import
pub fn parse_float(
    record: &RawRecord,
    field: &'static str,
    row: usize,
) -> ImportResult<Option<f64>> {
    match cell(record, field) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|e| ImportError::TypeConversionError {
                row,
                field,
                message: format!("'{}': {}", raw, e),
            }),
    }
}

/// Float field constrained to >= 0
pub fn parse_non_negative_float(
    record: &RawRecord,
    field: &'static str,
    row: usize,
) -> ImportResult<Option<f64>> {
    match parse_float(record, field, row)? {
        Some(value) if value < 0.0 => Err(ImportError::NegativeValueError { row, field, value }),
        other => Ok(other),
    }
}

/// ISO date field (YYYY-MM-DD)
pub fn parse_date(
    record: &RawRecord,
    field: &'static str,
    row: usize,
) -> ImportResult<Option<NaiveDate>> {
    match cell(record, field) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| ImportError::TypeConversionError {
                row,
                field,
                message: format!("'{}': {}", raw, e),
            }),
    }
}

/// ISO timestamp field
pub fn parse_datetime(
    record: &RawRecord,
    field: &'static str,
    row: usize,
) -> ImportResult<Option<NaiveDateTime>> {
    match cell(record, field) {
        None => Ok(None),
        Some(raw) => {
            for format in DATETIME_FORMATS {
                if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
                    return Ok(Some(ts));
                }
            }
            Err(ImportError::TypeConversionError {
                row,
                field,
                message: format!("'{}' is not an ISO 8601 timestamp", raw),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(field: &str, value: &str) -> RawRecord {
        let mut map = RawRecord::new();
        map.insert(field.to_string(), value.to_string());
        map
    }

    #[test]
    fn test_bool_truthy_tokens() {
        for token in ["true", "TRUE", "1", "yes", "Ja", "y", "Y"] {
            assert!(parse_bool(&record("active", token), "active", false), "{token}");
        }
    }

    #[test]
    fn test_bool_unrecognized_tokens_are_false() {
        for token in ["false", "0", "no", "nein", "maybe", "x"] {
            assert!(!parse_bool(&record("active", token), "active", true), "{token}");
        }
    }

    #[test]
    fn test_bool_empty_uses_default() {
        assert!(parse_bool(&record("active", ""), "active", true));
        assert!(!parse_bool(&RawRecord::new(), "active", false));
    }

    #[test]
    fn test_required_text() {
        assert_eq!(
            required_text(&record("code", " M-01 "), "code", 2).unwrap(),
            "M-01"
        );
        assert!(matches!(
            required_text(&record("code", "  "), "code", 2),
            Err(ImportError::MissingField { row: 2, field: "code" })
        ));
    }

    #[test]
    fn test_int_parsing() {
        assert_eq!(parse_int(&record("quantity", "250"), "quantity", 2).unwrap(), Some(250));
        assert_eq!(parse_int(&record("quantity", ""), "quantity", 2).unwrap(), None);
        assert!(parse_int(&record("quantity", "abc"), "quantity", 2).is_err());
        assert!(parse_non_negative_int(&record("quantity", "-3"), "quantity", 2).is_err());
    }

    #[test]
    fn test_float_parsing() {
        assert_eq!(
            parse_float(&record("minutes", "12.5"), "minutes", 3).unwrap(),
            Some(12.5)
        );
        assert!(parse_float(&record("minutes", "12,5"), "minutes", 3).is_err());
        assert!(parse_non_negative_float(&record("minutes", "-0.5"), "minutes", 3).is_err());
    }

    #[test]
    fn test_date_parsing() {
        assert_eq!(
            parse_date(&record("due_date", "2026-04-15"), "due_date", 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 15)
        );
        assert!(parse_date(&record("due_date", "15.04.2026"), "due_date", 2).is_err());
    }

    #[test]
    fn test_datetime_parsing_accepts_t_and_space() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 3)
            .unwrap()
            .and_hms_opt(6, 30, 0);
        assert_eq!(
            parse_datetime(&record("start_time", "2026-02-03T06:30:00"), "start_time", 2).unwrap(),
            expected
        );
        assert_eq!(
            parse_datetime(&record("start_time", "2026-02-03 06:30"), "start_time", 2).unwrap(),
            expected
        );
        assert!(parse_datetime(&record("start_time", "03.02.2026 06:30"), "start_time", 2).is_err());
    }
}
