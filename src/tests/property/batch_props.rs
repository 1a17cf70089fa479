//! Property-based tests for batch verification
//!
//! Tests invariants:
//! - verify_many returns the input words in input order
//! - cache misses go out in a single call with unique keys
//! - a one-word batch agrees with the single-word path

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use tokio::runtime::Runtime;

use crate::core::spelling::service::SpellingService;
use crate::core::spelling::word::{FontWord, UNICODE};
use crate::tests::mocks::RecordingProvider;

const WRONG: &[(&str, &str)] = &[("रामरो", UNICODE), ("धाना", UNICODE), ("/fd/f]", "KANTIPUR")];

/// Words drawn from a small pool so batches contain duplicates and hits
fn arb_word() -> impl Strategy<Value = FontWord> {
    prop_oneof![
        Just(FontWord::unicode("क")),
        Just(FontWord::unicode("रामरो")),
        Just(FontWord::unicode(" रामरो ")),
        Just(FontWord::unicode("धाना")),
        Just(FontWord::unicode("नेपाल")),
        Just(FontWord::unicode("")),
        Just(FontWord::new("/fd/f]", "kantipur")),
        Just(FontWord::new("/fd/f]", "PREETI")),
    ]
}

async fn scripted_provider() -> Arc<RecordingProvider> {
    let provider = Arc::new(RecordingProvider::new());
    for (text, font) in WRONG {
        provider.set_wrong(text, font, &[]).await;
    }
    provider
}

proptest! {
    #[test]
    fn prop_batch_preserves_order(
        warm in prop::collection::vec(arb_word(), 0..4),
        batch in prop::collection::vec(arb_word(), 0..12),
    ) {
        let rt = Runtime::new().unwrap();
        let (returned, requests) = rt.block_on(async {
            let provider = scripted_provider().await;
            let service = SpellingService::new(provider.clone());
            for word in &warm {
                service.is_correct_word(&word.text, &word.font).await;
            }
            let before = provider.batch_count();

            let result = service.verify_many(&batch).await;
            let words: Vec<FontWord> = result.results.into_iter().map(|r| r.word).collect();
            let requests = provider.requests().await.split_off(before as usize);
            (words, requests)
        });

        prop_assert_eq!(returned, batch);

        prop_assert!(requests.len() <= 1);
        if let Some(request) = requests.first() {
            let unique: HashSet<_> = request.iter().map(FontWord::key).collect();
            prop_assert_eq!(unique.len(), request.len());
        }
    }

    #[test]
    fn prop_batch_matches_single(word in arb_word()) {
        let rt = Runtime::new().unwrap();
        let (single, batch) = rt.block_on(async {
            let provider = scripted_provider().await;
            let single = SpellingService::new(provider.clone())
                .is_correct_word(&word.text, &word.font)
                .await;
            let batch = SpellingService::new(provider)
                .verify_many(std::slice::from_ref(&word))
                .await;
            (single.is_correct, batch.results[0].is_correct)
        });

        prop_assert_eq!(single, batch);
    }
}
