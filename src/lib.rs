// Re-export main components
pub mod analyzer;
pub mod api;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod listing;
pub mod ranking;
pub mod source;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{ShopAnalysis, ShopAnalyzer, DEFAULT_TOP_N};
pub use config::Config;
pub use console::Console;
pub use engine::Engine;
pub use error::SourceError;
pub use listing::Listing;
pub use ranking::{count_frequencies, top_n, WordCount};
pub use source::{EtsyClient, InMemorySource, ListingSource};
pub use tokenizer::{normalize, StopWords, Tokenizer};

// Re-export error types
pub use anyhow::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_workflow() -> Result<()> {
        let source = InMemorySource::new().with_shop(
            "PegandAwl",
            vec![
                Listing::new("Leather Journal", "A hand-bound leather journal."),
                Listing::with_title("Leather Satchel"),
                Listing::default(),
            ],
        );
        let engine = Engine::new(source, ShopAnalyzer::new(StopWords::from_words(["a"])));

        let analyses = engine.analyze_shops(["PegandAwl", "Nowhere"]).await?;

        assert_eq!(analyses.len(), 2);
        assert_eq!(
            analyses[0].top_words.as_deref().map(|w| w[0].clone()),
            Some(WordCount::new("LEATHER", 3))
        );
        assert!(!analyses[1].is_found());

        Ok(())
    }
}
