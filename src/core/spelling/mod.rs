//! Spelling Verification Module
//!
//! Decides whether Nepali words (Unicode or legacy-font encoded) are spelled
//! correctly, combining a write-once local cache with a remote suggestion
//! service that is queried in batches.
//!
//! # Module Structure
//!
//! - `word`: Word identity (`WordKey`, `FontWord`), encoding helpers, tokenizer
//! - `suggestion`: Cached verdicts and remote suggestion records
//! - `cache`: Write-once suggestion cache and ignore set
//! - `protocol`: Wire types for the remote service and failure remediation
//! - `provider`: `SuggestionProvider` trait
//! - `remote`: HTTP provider (`SayakClient`)
//! - `demo`: Offline provider backed by a small built-in dictionary
//! - `service`: `SpellingService`, the decision engine
//! - `scheduler`: Single-flight background scan passes

pub mod cache;
pub mod demo;
pub mod error;
pub mod protocol;
pub mod provider;
pub mod remote;
pub mod scheduler;
pub mod service;
pub mod suggestion;
pub mod word;

// Re-export commonly used types
pub use cache::LocalCache;
pub use demo::DemoProvider;
pub use error::{Result, SpellError, TransportError};
pub use protocol::{
    BatchOutcome, FailureReason, Remediation, ServiceFailure, SpellingRequest, WordDumpRequest,
    WordDumpResponse,
};
pub use provider::SuggestionProvider;
pub use remote::SayakClient;
pub use scheduler::{ScanReport, ScanScheduler};
pub use service::{BatchVerification, Eligibility, SpellingService};
pub use suggestion::{LocalStatus, SayakSuggestion, Suggestion, VerifiedWord, WordVerdict};
pub use word::{is_formatted_nepali, tokenize, Encoding, FontWord, WordKey, UNICODE};
