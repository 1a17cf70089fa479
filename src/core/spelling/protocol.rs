//! Remote suggestion protocol
//!
//! Request envelopes and response classification for the Sayak spelling
//! service. Transport lives in [`super::remote`]; this module only shapes
//! and interprets JSON.

use serde::{Deserialize, Serialize};

use super::suggestion::SayakSuggestion;
use super::word::FontWord;
use crate::config::ServiceConfig;

/// Request method of the spelling action
pub const ACTION_SPELL_CHECK: &str = "spellcheck";

/// Default language tag
pub const DEFAULT_LANGUAGE: &str = "np";

/// Word used to check account eligibility
pub const ELIGIBILITY_WORD: &str = "कामाडौँ";

const MESSAGE_SERVICE_NOT_AVAILABLE: &str =
    "Sorry, The remote spelling service is currently unavailable, please try after sometime.";

// ============================================================================
// Spellcheck Request
// ============================================================================

/// Inner parameters of a spellcheck request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellParams {
    pub lang: String,
    pub words: Vec<FontWord>,
}

/// Envelope posted to the spelling endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingRequest {
    pub request_method: String,
    pub spell_params: SpellParams,
    pub token: String,
}

impl SpellingRequest {
    /// Build a spellcheck request; word text is percent-encoded here
    pub fn spellcheck(language: &str, words: &[FontWord]) -> Self {
        Self {
            request_method: ACTION_SPELL_CHECK.to_string(),
            spell_params: SpellParams {
                lang: language.to_string(),
                words: words.iter().map(FontWord::encoded).collect(),
            },
            token: String::new(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.spell_params.words.len()
    }
}

// ============================================================================
// Service Failure
// ============================================================================

/// Why the service refused to produce suggestions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FailureReason {
    RedirectToRegistration,
    RedirectToServiceRenew,
    RedirectToServicePayment,
    ServiceNotAvailable,
    Other(String),
}

impl From<String> for FailureReason {
    fn from(id: String) -> Self {
        match id.as_str() {
            "REDIRECT_TO_REGISTRATION" => FailureReason::RedirectToRegistration,
            "REDIRECT_TO_SERVICE_RENEW" => FailureReason::RedirectToServiceRenew,
            "REDIRECT_TO_SERVICE_PAYMENT" => FailureReason::RedirectToServicePayment,
            "SERVICE_NOT_AVAILABLE" => FailureReason::ServiceNotAvailable,
            _ => FailureReason::Other(id),
        }
    }
}

impl From<FailureReason> for String {
    fn from(reason: FailureReason) -> Self {
        reason.as_str().to_string()
    }
}

impl FailureReason {
    pub fn as_str(&self) -> &str {
        match self {
            FailureReason::RedirectToRegistration => "REDIRECT_TO_REGISTRATION",
            FailureReason::RedirectToServiceRenew => "REDIRECT_TO_SERVICE_RENEW",
            FailureReason::RedirectToServicePayment => "REDIRECT_TO_SERVICE_PAYMENT",
            FailureReason::ServiceNotAvailable => "SERVICE_NOT_AVAILABLE",
            FailureReason::Other(id) => id,
        }
    }
}

impl Default for FailureReason {
    fn default() -> Self {
        FailureReason::Other(String::new())
    }
}

/// Service-level failure envelope `{ status, messageId, message }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFailure {
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "messageId", default)]
    pub reason: FailureReason,
    #[serde(default)]
    pub message: String,
}

fn default_status() -> String {
    "false".to_string()
}

/// Where to send the user and what to tell them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    pub url: String,
    pub message: String,
}

impl ServiceFailure {
    pub fn new(reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            status: default_status(),
            reason,
            message: message.into(),
        }
    }

    /// Timeout, refused connection or non-2xx answer
    pub fn unavailable() -> Self {
        Self::new(
            FailureReason::ServiceNotAvailable,
            MESSAGE_SERVICE_NOT_AVAILABLE,
        )
    }

    pub fn is_unavailable(&self) -> bool {
        self.reason == FailureReason::ServiceNotAvailable
    }

    pub fn is_failed_status(&self) -> bool {
        self.status == "false" || self.status == "fail"
    }

    /// Build the user-facing prompt for this failure
    pub fn remediation(&self, config: &ServiceConfig) -> Remediation {
        match &self.reason {
            FailureReason::RedirectToRegistration => {
                let url = config.payment_url();
                Remediation {
                    message: format!(
                        "Your device has not been registered yet for Nepali Spelling Service!\nGoto Sayak Registration Page: {}",
                        url
                    ),
                    url,
                }
            }
            FailureReason::RedirectToServiceRenew => {
                let url = config.renew_url();
                Remediation {
                    message: format!(
                        "Nepali Spelling Service license expired!\nGoto Sayak Renew/Payment Page: {}",
                        url
                    ),
                    url,
                }
            }
            FailureReason::RedirectToServicePayment => {
                let url = config.renew_url();
                Remediation {
                    message: format!(
                        "Nepali Spelling Service trial is over!\nGoto Sayak Renew/Payment Page: {}",
                        url
                    ),
                    url,
                }
            }
            _ => {
                let url = config.contact_url.clone();
                Remediation {
                    message: format!(
                        "Unable to make spelling suggestions.\nGoto Sayak contact page: {} \n({})",
                        url, self.message
                    ),
                    url,
                }
            }
        }
    }
}

impl std::fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.reason.as_str(), self.message)
    }
}

// ============================================================================
// Batch Response
// ============================================================================

/// Result of one batched remote verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// One record per requested word, in request order (decoded). May be
    /// shorter than the request; missing positions fail open.
    Suggestions(Vec<SayakSuggestion>),
    ServiceFailure(ServiceFailure),
}

impl BatchOutcome {
    /// Record at `index`, if the service sent a genuine one
    pub fn genuine_at(&self, index: usize) -> Option<&SayakSuggestion> {
        match self {
            BatchOutcome::Suggestions(records) => {
                records.get(index).filter(|record| record.is_genuine())
            }
            BatchOutcome::ServiceFailure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ServiceFailure> {
        match self {
            BatchOutcome::ServiceFailure(failure) => Some(failure),
            BatchOutcome::Suggestions(_) => None,
        }
    }
}

/// Classify a response body: array payload ⇒ per-word records, object
/// payload ⇒ failure envelope.
///
/// Anything else, including records that do not deserialize, degrades to an
/// empty suggestion list, which the caller treats as "correct, no
/// suggestions" for every word.
pub fn parse_batch_response(body: &str) -> BatchOutcome {
    let parsed = serde_json::from_str::<serde_json::Value>(body).and_then(|value| match value {
        serde_json::Value::Object(_) => {
            serde_json::from_value::<ServiceFailure>(value).map(BatchOutcome::ServiceFailure)
        }
        value => serde_json::from_value::<Vec<SayakSuggestion>>(value).map(|records| {
            BatchOutcome::Suggestions(records.iter().map(SayakSuggestion::decoded).collect())
        }),
    });

    parsed.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unparseable spelling response, failing open");
        BatchOutcome::Suggestions(Vec::new())
    })
}

// ============================================================================
// Word Dump
// ============================================================================

/// "Add to dictionary" submission of a user-suggested word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDumpRequest {
    pub client_key: String,
    pub word: String,
    pub font: String,
}

impl WordDumpRequest {
    pub fn new(
        client_key: impl Into<String>,
        word: impl Into<String>,
        font: impl Into<String>,
    ) -> Self {
        Self {
            client_key: client_key.into(),
            word: word.into(),
            font: font.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "@context": "http://semantro.com/",
            "@type": "SayakMutation",
            "actionName": "dumpPluginSuggestedWord",
            "data": {
                "@context": "http://semantro.com/",
                "@type": "WordPlugin",
                "wordPluginId": self.client_key,
                "hasUsedWordPlugin": {
                    "@context": "http://semantro.com/",
                    "@type": "WordPluginUseLog",
                    "description": "SUGGESTEDWORDFROMPLUGIN",
                    "sameAs": self.word,
                    "disambiguatingDescription": self.font,
                }
            }
        })
    }
}

/// Answer to a word dump
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordDumpResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl WordDumpResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unparseable word dump response");
            Self::empty()
        })
    }
}
