//! Tests for label escaping
//!
//! Fixed examples pin the behavior of each stage; the property tests cover
//! arbitrary input.

use proptest::prelude::*;
use tikz_export::escape_text;

#[test]
fn test_plain_text_is_unchanged() {
    assert_eq!(escape_text("Temperature (K)"), "Temperature (K)");
    assert_eq!(escape_text(""), "");
}

#[test]
fn test_symbols_become_math() {
    assert_eq!(escape_text("Δt"), r"${\Delta}$t");
    assert_eq!(escape_text("αβ"), r"${\alpha}{\beta}$");
}

#[test]
fn test_exponent_notation() {
    assert_eq!(escape_text("10^5"), "${10^{5}}$");
}

#[test]
fn test_simple_scripts() {
    assert_eq!(escape_text("x_a"), "$x_a$");
    assert_eq!(escape_text("x^2"), "$x^2$");
}

#[test]
fn test_braced_scripts() {
    assert_eq!(escape_text("e^{ix}"), "$e^{ix}$");
}

#[test]
fn test_structural_characters_are_escaped() {
    assert_eq!(escape_text("v_max"), r"v\_max");
    assert_eq!(escape_text("{set}"), r"\{set\}");
}

#[test]
fn test_backslashes_are_doubled() {
    assert_eq!(escape_text(r"C:\data"), r"C:\\data");
}

#[test]
fn test_non_ascii_is_transliterated() {
    assert_eq!(escape_text("Größe"), "Grosse");
    assert!(escape_text("café").is_ascii());
}

proptest! {
    #[test]
    fn prop_output_is_ascii(input in "\\PC*") {
        prop_assert!(escape_text(&input).is_ascii());
    }

    #[test]
    fn prop_text_without_markup_is_unchanged(input in "[a-zA-Z0-9 .,:;()+=-]*") {
        prop_assert_eq!(escape_text(&input), input);
    }

    #[test]
    fn prop_plain_braces_are_escaped(input in "[a-z {}]*") {
        let expected = input.replace('{', r"\{").replace('}', r"\}");
        prop_assert_eq!(escape_text(&input), expected);
    }
}
