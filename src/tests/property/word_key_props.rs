//! Property-based tests for word keys and tokenization
//!
//! Tests invariants:
//! - normalize is idempotent
//! - font case does not change identity
//! - tokenize yields trimmed, non-empty tokens

use proptest::prelude::*;

use crate::core::spelling::word::{tokenize, WordKey};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Devanagari, Latin and whitespace mixed together
fn arb_text() -> impl Strategy<Value = String> {
    "[ \t\nक-हा-ौa-zA-Z/;\\]]{0,16}"
}

fn arb_font() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("UNICODE".to_string()),
        Just("preeti".to_string()),
        Just(" Kantipur ".to_string()),
        "[a-zA-Z ]{0,10}",
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(text in arb_text(), font in arb_font()) {
        let once = WordKey::normalize(&text, &font);
        let twice = WordKey::normalize(once.text(), once.font());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_font_case_is_irrelevant(text in arb_text(), font in arb_font()) {
        prop_assert_eq!(
            WordKey::normalize(&text, &font.to_lowercase()),
            WordKey::normalize(&text, &font.to_uppercase())
        );
    }

    #[test]
    fn prop_tokens_are_trimmed_and_non_empty(text in arb_text()) {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token.trim(), token.as_str());
            prop_assert!(!token.contains(' '));
            prop_assert!(!token.contains('\n'));
        }
    }
}
