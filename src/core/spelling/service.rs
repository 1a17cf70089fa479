//! Spelling Service
//!
//! Decision engine behind the editor integration. Each word goes through
//! the ignore-set, then the session cache, and only then the remote
//! provider; remote answers are written through to the cache before they
//! are returned.
//!
//! When the provider cannot answer, words are reported correct and nothing
//! is cached (fail-open). A spurious underline is more disruptive to the
//! writer than a missed one.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::cache::LocalCache;
use super::protocol::{BatchOutcome, ServiceFailure, WordDumpResponse, ELIGIBILITY_WORD};
use super::provider::SuggestionProvider;
use super::suggestion::{LocalStatus, Suggestion, VerifiedWord, WordVerdict};
use super::word::{FontWord, WordKey};

/// Ordered result of a batch verification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchVerification {
    /// One entry per input word, in input order
    pub results: Vec<VerifiedWord>,
    /// Set when the remote call for the cache misses failed
    pub failure: Option<ServiceFailure>,
}

impl BatchVerification {
    pub fn wrong_words(&self) -> impl Iterator<Item = &VerifiedWord> {
        self.results.iter().filter(|r| !r.is_correct)
    }
}

/// Result of the account eligibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub eligible: bool,
    pub failure: Option<ServiceFailure>,
}

/// Spelling verification service for one editing session
pub struct SpellingService {
    cache: RwLock<LocalCache>,
    provider: Arc<dyn SuggestionProvider>,
}

impl SpellingService {
    pub fn new(provider: Arc<dyn SuggestionProvider>) -> Self {
        Self::with_cache(provider, LocalCache::new())
    }

    pub fn with_cache(provider: Arc<dyn SuggestionProvider>, cache: LocalCache) -> Self {
        tracing::info!(provider = %provider.id(), "Spelling service created");
        Self {
            cache: RwLock::new(cache),
            provider,
        }
    }

    pub fn provider_id(&self) -> String {
        self.provider.id()
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Decide whether a single word is spelled correctly.
    ///
    /// Only a cache miss reaches the provider. A failed remote call yields a
    /// correct verdict carrying the failure so the caller can prompt the user.
    pub async fn is_correct_word(&self, text: &str, font: &str) -> WordVerdict {
        let key = WordKey::normalize(text, font);
        if key.is_empty() {
            return WordVerdict::correct();
        }

        {
            let cache = self.cache.read().await;
            if cache.is_ignored(&key) {
                return WordVerdict::correct();
            }
            if let Some(verdict) = WordVerdict::from_status(cache.status(&key)) {
                return verdict;
            }
        }

        let outcome = self.provider.verify_batch(vec![key.to_font_word()]).await;

        if let Some(record) = outcome.genuine_at(0) {
            let mut cache = self.cache.write().await;
            cache.put(key.clone(), record.to_suggestion());
            return Self::settled_verdict(&cache, &key);
        }

        match outcome {
            BatchOutcome::ServiceFailure(failure) => {
                tracing::warn!(word = %key, reason = %failure, "Verification degraded");
                WordVerdict::degraded(failure)
            }
            BatchOutcome::Suggestions(_) => {
                tracing::debug!(word = %key, "No verdict returned, assuming correct");
                WordVerdict::correct()
            }
        }
    }

    /// Verify a list of words with at most one remote call.
    ///
    /// Cache hits and ignored words resolve locally; the remaining words are
    /// de-duplicated by key and sent together. Output order always matches
    /// input order.
    pub async fn verify_many(&self, words: &[FontWord]) -> BatchVerification {
        let mut resolved: Vec<(usize, VerifiedWord)> = Vec::with_capacity(words.len());
        let mut misses: Vec<(usize, FontWord, WordKey)> = Vec::new();

        {
            let cache = self.cache.read().await;
            for (index, word) in words.iter().enumerate() {
                let key = word.key();
                let status = if key.is_empty() || cache.is_ignored(&key) {
                    LocalStatus::PresentCorrect
                } else {
                    cache.status(&key)
                };

                match status {
                    LocalStatus::Absent => misses.push((index, word.clone(), key)),
                    status => resolved.push((
                        index,
                        VerifiedWord {
                            word: word.clone(),
                            is_correct: status == LocalStatus::PresentCorrect,
                        },
                    )),
                }
            }
        }

        let hits = resolved.len();
        let mut failure = None;

        if !misses.is_empty() {
            let mut seen = HashSet::new();
            let miss_keys: Vec<WordKey> = misses
                .iter()
                .filter(|(_, _, key)| seen.insert(key.clone()))
                .map(|(_, _, key)| key.clone())
                .collect();

            let outcome = self
                .provider
                .verify_batch(miss_keys.iter().map(WordKey::to_font_word).collect())
                .await;

            if let BatchOutcome::Suggestions(records) = &outcome {
                if records.len() != miss_keys.len() {
                    tracing::warn!(
                        requested = miss_keys.len(),
                        received = records.len(),
                        "Spelling response length mismatch"
                    );
                }
            }

            // All write-through for this response happens under one guard
            let verdicts: HashMap<WordKey, bool> = {
                let mut cache = self.cache.write().await;
                for (position, key) in miss_keys.iter().enumerate() {
                    if let Some(record) = outcome.genuine_at(position) {
                        cache.put(key.clone(), record.to_suggestion());
                    }
                }
                miss_keys
                    .iter()
                    .map(|key| (key.clone(), Self::settled_verdict(&cache, key).is_correct))
                    .collect()
            };

            for (index, word, key) in misses {
                let is_correct = verdicts.get(&key).copied().unwrap_or(true);
                resolved.push((index, VerifiedWord { word, is_correct }));
            }

            if let BatchOutcome::ServiceFailure(f) = outcome {
                tracing::warn!(words = miss_keys.len(), reason = %f, "Batch verification degraded");
                failure = Some(f);
            }

            tracing::debug!(
                total = words.len(),
                hits,
                remote = miss_keys.len(),
                "Batch verified"
            );
        }

        resolved.sort_by_key(|(index, _)| *index);

        BatchVerification {
            results: resolved.into_iter().map(|(_, verified)| verified).collect(),
            failure,
        }
    }

    /// Verdict for a key whose remote answer (if any) is already applied.
    /// Keys that are still absent fail open.
    fn settled_verdict(cache: &LocalCache, key: &WordKey) -> WordVerdict {
        if cache.is_ignored(key) {
            return WordVerdict::correct();
        }
        WordVerdict::from_status(cache.status(key)).unwrap_or_else(WordVerdict::correct)
    }

    // ========================================================================
    // Cache Queries
    // ========================================================================

    /// Cached candidates for a word; never goes remote
    pub async fn get_suggestions(&self, text: &str, font: &str) -> Vec<String> {
        let key = WordKey::normalize(text, font);
        self.cache.read().await.get(&key).candidates
    }

    /// Cache status with ignored words reported as correct
    pub async fn locally_available_status(&self, text: &str, font: &str) -> LocalStatus {
        let key = WordKey::normalize(text, font);
        let cache = self.cache.read().await;
        if cache.is_ignored(&key) {
            LocalStatus::PresentCorrect
        } else {
            cache.status(&key)
        }
    }

    pub async fn is_locally_present_error(&self, text: &str, font: &str) -> bool {
        self.locally_available_status(text, font).await == LocalStatus::PresentWrong
    }

    pub async fn total_entries(&self) -> usize {
        self.cache.read().await.entry_count()
    }

    /// Ignored words as `FONT_text`, sorted
    pub async fn ignored_words(&self) -> Vec<String> {
        let cache = self.cache.read().await;
        let mut keys: Vec<&WordKey> = cache.ignored_keys().collect();
        keys.sort();
        keys.into_iter().map(ToString::to_string).collect()
    }

    // ========================================================================
    // User Actions
    // ========================================================================

    /// Treat a word as correct for the rest of the session. Any cached
    /// verdict is evicted so a later un-ignore verifies it afresh.
    pub async fn ignore_word(&self, text: &str, font: &str) {
        let key = WordKey::normalize(text, font);
        let mut cache = self.cache.write().await;
        cache.add_ignored(key.clone());
        cache.remove_suggestion(&key);
        tracing::debug!(word = %key, "Word ignored");
    }

    /// Remove a word from the ignore-set
    pub async fn unignore_word(&self, text: &str, font: &str) -> bool {
        let key = WordKey::normalize(text, font);
        self.cache.write().await.remove_ignored(&key)
    }

    /// Record an accepted replacement as correct so it is not flagged again
    /// in the same pass.
    pub async fn add_correction_to_cache(&self, text: &str, font: &str) {
        let key = WordKey::normalize(text, font);
        self.cache
            .write()
            .await
            .put(key, Suggestion::correct());
    }

    /// Submit a word to the remote dictionary and ignore it locally
    pub async fn add_to_dictionary(&self, text: &str, font: &str) -> WordDumpResponse {
        let key = WordKey::normalize(text, font);
        let response = self.provider.dump_word(key.to_font_word()).await;
        if response.is_success() {
            tracing::info!(word = %key, "Word submitted to dictionary");
        } else {
            tracing::warn!(word = %key, status = %response.status, "Word submission not accepted");
        }
        self.ignore_word(text, font).await;
        response
    }

    // ========================================================================
    // Service Health
    // ========================================================================

    pub async fn is_service_available(&self) -> bool {
        self.provider.is_available().await
    }

    /// Check the account with a known word; the cache is left untouched
    pub async fn check_eligibility(&self) -> Eligibility {
        let outcome = self
            .provider
            .verify_batch(vec![FontWord::unicode(ELIGIBILITY_WORD)])
            .await;

        if outcome.genuine_at(0).is_some() {
            return Eligibility {
                eligible: true,
                failure: None,
            };
        }

        let failure = match outcome {
            BatchOutcome::ServiceFailure(failure) => failure,
            BatchOutcome::Suggestions(_) => ServiceFailure::unavailable(),
        };
        Eligibility {
            eligible: false,
            failure: Some(failure),
        }
    }
}
