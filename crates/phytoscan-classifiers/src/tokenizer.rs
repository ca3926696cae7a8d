//! Ingredient list tokenizer

use phytoscan_core::{Error, Result, Token};
use regex::Regex;
use std::sync::OnceLock;

/// Separators between ingredients on a label: commas, semicolons,
/// newlines, or a run of two or more whitespace characters (OCR renders
/// column gaps that way).
const SEPARATOR_PATTERN: &str = r"[,;\n]|\s{2,}";

/// Splits raw OCR text into normalized candidate tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    separators: Regex,
}

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Result<Self> {
        Ok(Self {
            separators: Regex::new(SEPARATOR_PATTERN).map_err(|e| {
                Error::internal(format!("Failed to compile separator regex: {}", e))
            })?,
        })
    }

    /// Process-wide tokenizer instance
    pub fn shared() -> &'static Tokenizer {
        static SHARED: OnceLock<Tokenizer> = OnceLock::new();
        SHARED.get_or_init(Tokenizer::default)
    }

    /// Split `text` into trimmed, lowercased, non-empty tokens in input order
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.separators
            .split(text)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| Token::new(piece.to_lowercase()))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new().expect("Failed to create tokenizer")
    }
}
