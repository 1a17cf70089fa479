//! Remote suggestion provider seam
//!
//! The service only needs three things from the outside world: batch
//! verification, word dumps and an availability check. Implementations must
//! bound every call by a timeout and must not return errors; transport
//! trouble is reported as `ServiceFailure::unavailable()`.

use async_trait::async_trait;

use super::protocol::{BatchOutcome, WordDumpResponse};
use super::word::FontWord;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Short identifier used in logs
    fn id(&self) -> String;

    /// Verify `words` in one exchange. On success the records follow the
    /// order of `words`.
    async fn verify_batch(&self, words: Vec<FontWord>) -> BatchOutcome;

    /// Submit a user-suggested word for inclusion in the remote dictionary
    async fn dump_word(&self, word: FontWord) -> WordDumpResponse;

    /// Lightweight reachability check
    async fn is_available(&self) -> bool;
}
