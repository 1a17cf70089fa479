//! Offline demo provider
//!
//! Serves a handful of known misspellings from memory so the engine can be
//! exercised without the remote service. Listed words are wrong and come
//! with their candidates; everything else is reported correct.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use super::protocol::{BatchOutcome, ServiceFailure, WordDumpResponse};
use super::provider::SuggestionProvider;
use super::suggestion::SayakSuggestion;
use super::word::{FontWord, WordKey, UNICODE};

const KANTIPUR: &str = "KANTIPUR";

fn unicode_entries() -> Vec<(&'static str, [&'static str; 12])> {
    vec![
        ("गरिसकको", ["गरिसकेको", "गरिसेकको", "गरिसके", "गरिसकी", "गरिसक्नको", "गरिसकेकको", "गरिसकिएको", "गरिसकेकोछ", "गरिससकेको", "गरिसकियो", "गरिसक्दो", "गरिसकेकै"]),
        ("रामरो", ["रामरज", "रामको", "रामरथ", "रामो", "चामर", "समरो", "रमरम", "कामर", "पामर", "राखर", "रामरोशन", "रामरोहन"]),
        ("धमिल", ["धमिलै", "धमिलो", "दमित", "मिल", "दमकल", "दलिल", "नमिल", "तमिल", "धमेल", "धमला", "अमल", "कमल"]),
        ("कमसलल", ["कमसल", "कमसलको", "कमला", "कमली", "कमलले", "कमलो", "कमाल", "कमल", "कमले", "कमलै", "कमसँग", "कमसित"]),
        ("धाना", ["दाना", "धान", "थाना", "धनका", "धनाइ", "धापा", "धामा", "धागा", "धनदा", "गाना", "घाना", "काना"]),
    ]
}

fn kantipur_entries() -> Vec<(&'static str, [&'static str; 12])> {
    vec![
        ("ul;s]sf]", ["l;s]sf]", "gl;s]sf]", "al;s]sf]", "/l;ssf]", "uO;ss]sf]", "vl;;s]sf]", "uln;s]sf]", "ul/;s]sf]", "ul9;s]sf]", "ul8;s]sf]", "l´s]sf]", "gl;s]sf"]),
        ("/fd/f]", ["/fd/h", "/fdsf]", "/fd/y", "/fdf]", "rfd/", ";d/f]", "/d/d", "sfd/", "kfd/", "/fv/", "/fd/f]zg", "/fd/f]xg"]),
        ("wldn", ["wldn}", "wldnf]", "bldt", "ldn", "bdsn", "blnn", "gldn", "tldn", "wd]n", "wdnf", "cdn", "sdn"]),
        ("sd;nn", ["sd;n", "sd;nsf]", "sdnf", "sdnL", "sdnn]", "sdnf]", "sdfn", "sdn", "sdn]", "sdn}", "sd;“u", "sdl;t"]),
        ("wfgf", ["bfgf", "wfg", "yfgf", "wgsf", "wgfO", "wfkf", "wfdf", "wfuf", "wgbf", "ufgf", "3fgf", "sfgf"]),
    ]
}

/// In-memory provider backed by the demo dictionary
pub struct DemoProvider {
    misspellings: HashMap<WordKey, Vec<String>>,
    failure: Option<ServiceFailure>,
    batch_calls: AtomicU32,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoProvider {
    pub fn new() -> Self {
        let mut misspellings = HashMap::new();
        for (font, entries) in [(UNICODE, unicode_entries()), (KANTIPUR, kantipur_entries())] {
            for (word, candidates) in entries {
                misspellings.insert(
                    WordKey::normalize(word, font),
                    candidates.iter().map(|c| c.to_string()).collect(),
                );
            }
        }

        Self {
            misspellings,
            failure: None,
            batch_calls: AtomicU32::new(0),
        }
    }

    /// Answer every batch with the given service failure
    pub fn with_failure(mut self, failure: ServiceFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Number of `verify_batch` calls served so far
    pub fn batch_calls(&self) -> u32 {
        self.batch_calls.load(Ordering::SeqCst)
    }

    fn record_for(&self, word: &FontWord) -> SayakSuggestion {
        match self.misspellings.get(&word.key()) {
            Some(candidates) => SayakSuggestion::new(word.clone(), true, candidates.clone()),
            None => SayakSuggestion::new(word.clone(), false, Vec::new()),
        }
    }
}

#[async_trait]
impl SuggestionProvider for DemoProvider {
    fn id(&self) -> String {
        "demo".to_string()
    }

    async fn verify_batch(&self, words: Vec<FontWord>) -> BatchOutcome {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = &self.failure {
            return BatchOutcome::ServiceFailure(failure.clone());
        }

        BatchOutcome::Suggestions(words.iter().map(|w| self.record_for(w)).collect())
    }

    async fn dump_word(&self, word: FontWord) -> WordDumpResponse {
        WordDumpResponse {
            status: "success".to_string(),
            message: format!("Recorded '{}' for review", word.text),
        }
    }

    async fn is_available(&self) -> bool {
        self.failure.is_none()
    }
}
