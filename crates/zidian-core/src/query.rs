use std::fmt;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Local validation failures. They never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("请输入一个汉字")]
    EmptyInput,

    /// Carries the grapheme count that was rejected
    #[error("请输入单个汉字")]
    InvalidLength(usize),
}

/// A validated single-character query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Validate raw input text.
    ///
    /// Input is NFC-composed, then counted in extended grapheme clusters, so
    /// an ideographic variation sequence or an emoji with a modifier is one
    /// character. Whitespace-only input is empty; any other input must be
    /// exactly one grapheme, surrounding whitespace included.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        let composed: String = text.nfc().collect();

        if composed.trim().is_empty() {
            return Err(QueryError::EmptyInput);
        }

        let count = composed.graphemes(true).count();
        if count != 1 {
            return Err(QueryError::InvalidLength(count));
        }

        Ok(Self(composed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
