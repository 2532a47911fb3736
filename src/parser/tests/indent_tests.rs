//! Tests for indentation depth detection

use crate::parser::IndentClassifier;

#[test]
fn test_unindented_label_is_root() {
    let label = IndentClassifier::default().classify("Total");
    assert_eq!(label.level, 0);
    assert_eq!(label.name, "Total");
}

#[test]
fn test_four_spaces_per_level() {
    let classifier = IndentClassifier::default();

    assert_eq!(classifier.classify("    Europe").level, 1);
    assert_eq!(classifier.classify("        Germany").level, 2);
    assert_eq!(classifier.classify("        Germany").name, "Germany");
}

#[test]
fn test_partial_space_groups_round_down() {
    let classifier = IndentClassifier::default();

    assert_eq!(classifier.classify("   Asia").level, 0);
    assert_eq!(classifier.classify("       Japan").level, 1);
}

#[test]
fn test_tabs_count_as_full_levels() {
    let classifier = IndentClassifier::default();

    assert_eq!(classifier.classify("\tEurope").level, 1);
    assert_eq!(classifier.classify("\t\tGermany").level, 2);
    // Tabs and spaces combine
    assert_eq!(classifier.classify("\t    Berlin").level, 2);
}

#[test]
fn test_trailing_whitespace_removed_from_name() {
    let label = IndentClassifier::default().classify("    Oceania  \t");
    assert_eq!(label.level, 1);
    assert_eq!(label.name, "Oceania");
}

#[test]
fn test_blank_labels() {
    let classifier = IndentClassifier::default();

    assert!(classifier.classify("").is_blank());
    assert!(classifier.classify("        ").is_blank());
    assert!(classifier.classify("\t\t").is_blank());
    assert!(!classifier.classify("  x").is_blank());
}

#[test]
fn test_custom_indent_width() {
    let classifier = IndentClassifier::new(2);

    assert_eq!(classifier.classify("  Europe").level, 1);
    assert_eq!(classifier.classify("      Paris").level, 3);
}

#[test]
fn test_non_breaking_space_adds_no_depth() {
    let label = IndentClassifier::default().classify("\u{a0}\u{a0}\u{a0}\u{a0}Europe");
    assert_eq!(label.level, 0);
    assert_eq!(label.name, "Europe");
}
