//! Suggestion model
//!
//! A `Suggestion` is the cached outcome of verifying one word. The remote
//! service describes the same outcome as a `SayakSuggestion` record.

use serde::{Deserialize, Serialize};

use super::word::{FontWord, WordKey};

/// Verified outcome for a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub is_wrong: bool,
    /// Replacement candidates, best first
    pub candidates: Vec<String>,
}

impl Suggestion {
    pub fn new(is_wrong: bool, candidates: Vec<String>) -> Self {
        Self {
            is_wrong,
            candidates,
        }
    }

    /// Sentinel for "not resolved yet". Indistinguishable by value from a
    /// wrong word without candidates; callers tell them apart by the key.
    pub fn unknown() -> Self {
        Self::new(true, Vec::new())
    }

    /// A correct word needs no candidates
    pub fn correct() -> Self {
        Self::new(false, Vec::new())
    }
}

/// Three-way cache lookup result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalStatus {
    Absent,
    PresentCorrect,
    PresentWrong,
}

impl LocalStatus {
    pub fn is_present(&self) -> bool {
        !matches!(self, LocalStatus::Absent)
    }
}

// ============================================================================
// Remote Record
// ============================================================================

/// Per-word record returned by the remote suggestion service.
///
/// Text fields arrive percent-encoded; call [`SayakSuggestion::decoded`]
/// before using them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SayakSuggestion {
    #[serde(default)]
    pub word_info: FontWord,
    #[serde(default = "default_wrong")]
    pub wrong_word: bool,
    #[serde(default)]
    pub suggestions_list: Vec<String>,
}

fn default_wrong() -> bool {
    true
}

impl SayakSuggestion {
    pub fn new(word_info: FontWord, wrong_word: bool, suggestions_list: Vec<String>) -> Self {
        Self {
            word_info,
            wrong_word,
            suggestions_list,
        }
    }

    /// A record missing its word text or its font carries no verdict
    pub fn is_empty(&self) -> bool {
        self.word_info.key().is_empty()
    }

    pub fn is_genuine(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_correct_word(&self) -> bool {
        !self.wrong_word
    }

    pub fn decoded(&self) -> Self {
        Self::new(
            self.word_info.decoded(),
            self.wrong_word,
            self.suggestions_list
                .iter()
                .map(|s| super::word::decode_component(s))
                .collect(),
        )
    }

    pub fn to_suggestion(&self) -> Suggestion {
        Suggestion::new(self.wrong_word, self.suggestions_list.clone())
    }
}

// ============================================================================
// Verdicts
// ============================================================================

/// Answer of a single-word verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordVerdict {
    pub is_correct: bool,
    /// Set when the remote service could not answer; the verdict is then
    /// the fail-open default.
    pub failure: Option<super::protocol::ServiceFailure>,
}

impl WordVerdict {
    pub fn correct() -> Self {
        Self {
            is_correct: true,
            failure: None,
        }
    }

    pub fn wrong() -> Self {
        Self {
            is_correct: false,
            failure: None,
        }
    }

    pub fn from_status(status: LocalStatus) -> Option<Self> {
        match status {
            LocalStatus::Absent => None,
            LocalStatus::PresentCorrect => Some(Self::correct()),
            LocalStatus::PresentWrong => Some(Self::wrong()),
        }
    }

    pub fn degraded(failure: super::protocol::ServiceFailure) -> Self {
        Self {
            is_correct: true,
            failure: Some(failure),
        }
    }
}

/// One entry of a batch verification, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedWord {
    pub word: FontWord,
    pub is_correct: bool,
}

impl VerifiedWord {
    pub fn key(&self) -> WordKey {
        self.word.key()
    }
}
