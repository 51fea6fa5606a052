use crate::listing::Listing;
use crate::ranking::{count_frequencies, top_n, WordCount};
use crate::tokenizer::{StopWords, Tokenizer};
use serde::{Deserialize, Serialize};

/// Number of words reported per shop
pub const DEFAULT_TOP_N: usize = 5;

/// Result of analyzing a single shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopAnalysis {
    pub shop: String,
    /// `None` when the shop could not be found
    pub top_words: Option<Vec<WordCount>>,
}

impl ShopAnalysis {
    pub fn found(shop: impl Into<String>, top_words: Vec<WordCount>) -> Self {
        Self {
            shop: shop.into(),
            top_words: Some(top_words),
        }
    }

    pub fn not_found(shop: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            top_words: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.top_words.is_some()
    }
}

/// Turns a shop's listings into its most frequent meaningful words
pub struct ShopAnalyzer {
    tokenizer: Tokenizer,
    top_n: usize,
}

impl ShopAnalyzer {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            tokenizer: Tokenizer::new(stop_words),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn analyze(&self, shop_name: &str, listings: &[Listing]) -> Vec<WordCount> {
        let tokens = self.tokenizer.analyze(listings, shop_name);
        let frequencies = count_frequencies(&tokens);

        tracing::debug!(
            shop = shop_name,
            listings = listings.len(),
            tokens = tokens.len(),
            distinct = frequencies.len(),
            "analyzed shop listings"
        );

        top_n(&frequencies, self.top_n)
    }
}

impl Default for ShopAnalyzer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}
