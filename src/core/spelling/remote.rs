//! Sayak HTTP Provider
//!
//! Talks to the remote spelling service over HTTP. Every call is bounded by
//! the configured timeout and every transport problem is converted to
//! `ServiceFailure::unavailable()` here, so nothing above this layer ever
//! sees a network error.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use super::error::{Result, SpellError, TransportError};
use super::protocol::{
    parse_batch_response, BatchOutcome, ServiceFailure, SpellingRequest, WordDumpRequest,
    WordDumpResponse,
};
use super::provider::SuggestionProvider;
use super::word::FontWord;
use crate::config::ServiceConfig;

/// HTTP client for the Sayak spelling service
pub struct SayakClient {
    config: ServiceConfig,
    client: Client,
}

impl SayakClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        if config.timeout_ms == 0 {
            return Err(SpellError::ConfigError(
                "service.timeout_ms must be greater than zero".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// POST a JSON body and return the response text
    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> std::result::Result<String, TransportError> {
        let resp = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.config.timeout_ms))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.text()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.config.timeout_ms))
    }
}

#[async_trait]
impl SuggestionProvider for SayakClient {
    fn id(&self) -> String {
        "sayak".to_string()
    }

    async fn verify_batch(&self, words: Vec<FontWord>) -> BatchOutcome {
        let request = SpellingRequest::spellcheck(&self.config.language, &words);
        let start = Instant::now();

        match self.post_json(&self.config.remote_url, &request).await {
            Ok(body) => {
                tracing::debug!(
                    words = request.word_count(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Spelling batch answered"
                );
                parse_batch_response(&body)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    words = request.word_count(),
                    "Spelling service unreachable"
                );
                BatchOutcome::ServiceFailure(ServiceFailure::unavailable())
            }
        }
    }

    async fn dump_word(&self, word: FontWord) -> WordDumpResponse {
        let request = WordDumpRequest::new(&self.config.client_key, word.text, word.font);

        match self
            .post_json(&self.config.user_suggestion_url, &request.to_json())
            .await
        {
            Ok(body) => WordDumpResponse::parse(&body),
            Err(e) => {
                tracing::warn!(error = %e, "Word dump failed");
                WordDumpResponse::empty()
            }
        }
    }

    async fn is_available(&self) -> bool {
        match self.client.get(&self.config.ping_url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!(
                    error = %TransportError::from_reqwest(e, self.config.timeout_ms),
                    "Spelling service ping failed"
                );
                false
            }
        }
    }
}
