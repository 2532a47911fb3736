//! Tests for cell value coercion

use crate::parser::{CellValue, ValueCoercer};

#[test]
fn test_missing_tokens() {
    let coercer = ValueCoercer::default();

    for token in ["", "N/A", "NA", "-", "nan"] {
        assert_eq!(coercer.classify(token), CellValue::MissingToken, "{token:?}");
        assert_eq!(coercer.coerce(token), None);
    }
}

#[test]
fn test_tokens_match_after_trimming() {
    let coercer = ValueCoercer::default();

    assert_eq!(coercer.classify("  -  "), CellValue::MissingToken);
    assert_eq!(coercer.classify("   "), CellValue::MissingToken);
}

#[test]
fn test_tokens_are_case_sensitive() {
    let coercer = ValueCoercer::default();

    assert_eq!(coercer.classify("n/a"), CellValue::Unparseable);
    assert_eq!(coercer.coerce("n/a"), None);
}

#[test]
fn test_thousands_separators_stripped() {
    let coercer = ValueCoercer::default();

    assert_eq!(coercer.coerce("1,234.5"), Some(1234.5));
    assert_eq!(coercer.coerce("12,345,678"), Some(12_345_678.0));
    assert_eq!(coercer.coerce(" 42 "), Some(42.0));
}

#[test]
fn test_non_numeric_is_unparseable() {
    let coercer = ValueCoercer::default();

    assert_eq!(coercer.classify("abc"), CellValue::Unparseable);
    assert_eq!(coercer.coerce("abc"), None);
    assert_eq!(coercer.coerce("12abc"), None);
}

#[test]
fn test_non_finite_numbers_rejected() {
    let coercer = ValueCoercer::default();

    assert_eq!(coercer.classify("inf"), CellValue::Unparseable);
    assert_eq!(coercer.classify("NaN"), CellValue::Unparseable);
    assert_eq!(coercer.classify("-infinity"), CellValue::Unparseable);
}

#[test]
fn test_negative_and_zero_values() {
    let coercer = ValueCoercer::default();

    assert_eq!(coercer.coerce("0"), Some(0.0));
    assert_eq!(coercer.coerce("-15.25"), Some(-15.25));
}

#[test]
fn test_custom_token_set() {
    let coercer = ValueCoercer::new(&["x", "..", ""]);

    assert_eq!(coercer.classify(".."), CellValue::MissingToken);
    // "-" is no longer a token, and it is not a number either
    assert_eq!(coercer.classify("-"), CellValue::Unparseable);
}
