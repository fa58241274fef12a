use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// A word in the bank: the characters plus their pinyin reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub hanzi: String,
    pub pinyin: String,
}

/// The client refuses to start with fewer words than this, so the server
/// never ships a smaller bank.
pub const MIN_BANK_SIZE: usize = 50;

static BANK_JSON: &str = include_str!("../../data/words.json");

#[derive(Debug, Error)]
pub enum BankError {
    #[error("word bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("word bank too small: {0} entries, need at least {MIN_BANK_SIZE}")]
    TooSmall(usize),
}

/// The static word bank, parsed once and shared.
#[derive(Clone)]
pub struct WordBank {
    words: Arc<Vec<WordEntry>>,
}

impl WordBank {
    /// The bank compiled into the binary.
    pub fn embedded() -> Result<Self, BankError> {
        Self::from_json(BANK_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, BankError> {
        let words: Vec<WordEntry> = serde_json::from_str(raw)?;
        if words.len() < MIN_BANK_SIZE {
            return Err(BankError::TooSmall(words.len()));
        }
        Ok(Self {
            words: Arc::new(words),
        })
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
