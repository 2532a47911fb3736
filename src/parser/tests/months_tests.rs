//! Tests for month header resolution

use crate::parser::MonthLabelResolver;
use chrono::NaiveDate;

fn ymd(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

#[test]
fn test_abbreviated_month() {
    let resolver = MonthLabelResolver::default();

    assert_eq!(resolver.resolve("2025May"), Some(ymd(2025, 5)));
    assert_eq!(resolver.resolve("2024Jan"), Some(ymd(2024, 1)));
    assert_eq!(resolver.resolve("1999Dec"), Some(ymd(1999, 12)));
}

#[test]
fn test_full_month_name() {
    let resolver = MonthLabelResolver::default();

    assert_eq!(resolver.resolve("2025August"), Some(ymd(2025, 8)));
    assert_eq!(resolver.resolve("2020February"), Some(ymd(2020, 2)));
    assert_eq!(resolver.resolve("2021September"), Some(ymd(2021, 9)));
}

#[test]
fn test_surrounding_whitespace_ignored() {
    let resolver = MonthLabelResolver::default();

    assert_eq!(resolver.resolve(" 2025Mar "), Some(ymd(2025, 3)));
}

#[test]
fn test_unknown_month_unresolved() {
    let resolver = MonthLabelResolver::default();

    assert_eq!(resolver.resolve("2025Foo"), None);
    assert_eq!(resolver.resolve("2025Augu"), None);
}

#[test]
fn test_malformed_labels_unresolved() {
    let resolver = MonthLabelResolver::default();

    assert_eq!(resolver.resolve("Data Series"), None);
    assert_eq!(resolver.resolve(""), None);
    assert_eq!(resolver.resolve("May2025"), None);
    assert_eq!(resolver.resolve("25May"), None);
    assert_eq!(resolver.resolve("2025-05"), None);
    assert_eq!(resolver.resolve("2025 May"), None);
}
