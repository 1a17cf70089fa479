//! Word identity and encoding detection
//!
//! A word is only meaningful together with the font it is typed in: legacy
//! Nepali fonts (Preeti, Kantipur, ...) reuse Latin code points for
//! Devanagari glyphs, so the same bytes mean different words in different
//! fonts. Unicode Devanagari text is tagged with the [`UNICODE`] sentinel.

use serde::{Deserialize, Serialize};

/// Font tag for text encoded in the Unicode Devanagari block
pub const UNICODE: &str = "UNICODE";

/// Legacy fonts (plus the Unicode sentinel) recognised as Nepali
pub const NEPALI_FONTS: &[&str] = &[
    "KANTIPUR",
    "PREETI",
    "PCS NEPALI",
    "HIMALB",
    "AAKRITI",
    "AALEKH",
    "GANESS",
    "NAVJEEVAN",
    UNICODE,
];

/// Share of Devanagari/punctuation characters needed to call a word Unicode
const UNICODE_THRESHOLD: f32 = 0.95;

/// Punctuation commonly found inside Nepali sentences
const NEPALI_PUNCTUATION: &[char] = &[',', ';', ':', '?', '!', '"', '—', '-'];

/// Characters that separate words in extracted document text
const WORD_DELIMITERS: &[char] = &['\r', '\n', ' ', '\t', '\u{8}', '\u{b}'];

// ============================================================================
// Word Key
// ============================================================================

/// Normalized cache identity of a word: trimmed text plus uppercased font tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordKey {
    text: String,
    font: String,
}

impl WordKey {
    /// Build a key from raw text and font tag
    pub fn normalize(text: &str, font: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            font: font.trim().to_uppercase(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    /// A key with no text or no font never denotes a word
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() || self.font.is_empty()
    }

    pub fn to_font_word(&self) -> FontWord {
        FontWord::new(self.text.clone(), self.font.clone())
    }
}

impl std::fmt::Display for WordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.font, self.text)
    }
}

// ============================================================================
// Font Word
// ============================================================================

/// A word together with the font (or encoding) it is written in.
///
/// This is also the `wordInfo` shape of the remote protocol.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FontWord {
    #[serde(rename = "wordText", default)]
    pub text: String,
    #[serde(rename = "fontName", default)]
    pub font: String,
}

impl FontWord {
    pub fn new(text: impl Into<String>, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
        }
    }

    /// A word in Unicode Devanagari
    pub fn unicode(text: impl Into<String>) -> Self {
        Self::new(text, UNICODE)
    }

    /// Tag a word the way the document layer sees it: Unicode when the text
    /// itself is Devanagari, otherwise the uppercased font it is set in.
    pub fn resolve(text: &str, font: &str) -> Self {
        let text = text.trim();
        match classify_encoding(text) {
            Some(Encoding::Unicode) => Self::unicode(text),
            _ => Self::new(text, font.trim().to_uppercase()),
        }
    }

    pub fn key(&self) -> WordKey {
        WordKey::normalize(&self.text, &self.font)
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Percent-encode the text for the wire
    pub fn encoded(&self) -> Self {
        Self::new(urlencoding::encode(&self.text).into_owned(), self.font.clone())
    }

    /// Reverse of [`FontWord::encoded`]; undecodable text is kept as-is
    pub fn decoded(&self) -> Self {
        Self::new(decode_component(&self.text), self.font.clone())
    }
}

/// Decode a form-style percent-encoded component (`+` means space)
pub(crate) fn decode_component(text: &str) -> String {
    let spaced = text.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.to_string(),
    }
}

// ============================================================================
// Encoding Detection
// ============================================================================

/// How a word's characters should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Unicode Devanagari block
    Unicode,
    /// Private single-byte encoding of a legacy font
    LegacyFont,
}

/// True for code points in the Devanagari block (U+0900..=U+097F)
pub fn is_devanagari(ch: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&ch)
}

/// Punctuation tolerated inside Unicode words
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || NEPALI_PUNCTUATION.contains(&ch)
        || ('\u{2010}'..='\u{2027}').contains(&ch)
        || ('\u{2030}'..='\u{205E}').contains(&ch)
}

/// Classify a word by its characters.
///
/// Returns `None` for empty or whitespace-only text, which is not a word.
pub fn classify_encoding(text: &str) -> Option<Encoding> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let total = text.chars().count();
    let devanagari = text
        .chars()
        .filter(|&ch| is_devanagari(ch) || is_punctuation(ch))
        .count();

    if total as f32 * UNICODE_THRESHOLD <= devanagari as f32 {
        Some(Encoding::Unicode)
    } else {
        Some(Encoding::LegacyFont)
    }
}

/// Check whether a font name is one of the known Nepali fonts
pub fn is_nepali_font(font: &str) -> bool {
    let font = font.trim().to_uppercase();
    NEPALI_FONTS.contains(&font.as_str())
}

/// A word is worth verifying when it is Devanagari or set in a Nepali font
pub fn is_formatted_nepali(text: &str, font: &str) -> bool {
    classify_encoding(text) == Some(Encoding::Unicode) || is_nepali_font(font)
}

/// Split extracted document text into word candidates
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(WORD_DELIMITERS)
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
