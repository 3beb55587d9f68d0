use crate::Result;
use anyhow::Context;
use regex::Regex;

/// Minimum length a motivation must keep after normalization
pub const MIN_CONTENT_LEN: usize = 3;

/// Words that carry no motivation on their own; only the first occurrence of each is removed
const FILLER_WORDS: [&str; 2] = ["debug", "fix"];

/// Characters stripped during normalization. Tabs and newlines are kept.
const STRIPPED_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[]^_`{|}~ \\";

/// Heuristic gate against empty or boilerplate motivation sections
#[derive(Debug, Clone)]
pub struct ContentValidator {
    image_tag: Regex,
    min_len: usize,
}

impl ContentValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            image_tag: Regex::new(r"(?i)<img.*>").context("Failed to compile image tag regex")?,
            min_len: MIN_CONTENT_LEN,
        })
    }

    /// Strip filler words, collapse image tags to `img` and drop punctuation and spaces
    pub fn normalize(&self, body: &str) -> String {
        let mut text = body.to_string();
        for word in FILLER_WORDS {
            text = text.replacen(word, "", 1);
        }

        self.image_tag
            .replace_all(&text, "img")
            .chars()
            .filter(|c| !STRIPPED_CHARS.contains(*c))
            .collect()
    }

    /// Whether enough text remains after normalization.
    ///
    /// Length is counted in UTF-16 code units, so a character outside the
    /// Basic Multilingual Plane (most emoji) counts twice.
    pub fn is_valid(&self, body: &str) -> bool {
        self.normalize(body).encode_utf16().count() >= self.min_len
    }
}
