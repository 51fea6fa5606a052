use crate::analyzer::{ShopAnalysis, ShopAnalyzer};
use crate::error::SourceError;
use crate::source::ListingSource;

/// Fetches listings and runs the word-frequency analysis for each shop
pub struct Engine<S> {
    source: S,
    analyzer: ShopAnalyzer,
}

impl<S: ListingSource> Engine<S> {
    pub fn new(source: S, analyzer: ShopAnalyzer) -> Self {
        Self { source, analyzer }
    }

    pub fn analyzer(&self) -> &ShopAnalyzer {
        &self.analyzer
    }

    /// Analyze one shop.
    ///
    /// Unknown shops and server-side failures yield a not-found analysis;
    /// only connectivity failures are returned as errors.
    pub async fn analyze_shop(&self, shop: &str) -> Result<ShopAnalysis, SourceError> {
        match self.source.fetch_active_listings(shop).await {
            Ok(listings) => {
                let top_words = self.analyzer.analyze(shop, &listings);
                Ok(ShopAnalysis::found(shop, top_words))
            }
            Err(SourceError::NotFound { .. }) => Ok(ShopAnalysis::not_found(shop)),
            Err(err @ SourceError::Upstream { .. }) => {
                tracing::warn!(shop, error = %err, "treating listing API failure as not found");
                Ok(ShopAnalysis::not_found(shop))
            }
            Err(err) => Err(err),
        }
    }

    /// Analyze shops in order, stopping only on a connectivity failure
    pub async fn analyze_shops<I, T>(&self, shops: I) -> Result<Vec<ShopAnalysis>, SourceError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut analyses = Vec::new();
        for shop in shops {
            analyses.push(self.analyze_shop(shop.as_ref()).await?);
        }
        Ok(analyses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Listing;
    use crate::ranking::WordCount;
    use crate::source::InMemorySource;
    use crate::tokenizer::StopWords;

    fn engine(source: InMemorySource) -> Engine<InMemorySource> {
        Engine::new(source, ShopAnalyzer::new(StopWords::from_words(["A", "FOR"])))
    }

    fn mug_shop() -> InMemorySource {
        InMemorySource::new().with_shop(
            "shop1",
            vec![Listing::new("Blue Mug", "A blue mug for coffee")],
        )
    }

    #[tokio::test]
    async fn test_analyze_shop() -> anyhow::Result<()> {
        let engine = engine(mug_shop());

        let analysis = engine.analyze_shop("shop1").await?;
        assert_eq!(analysis.shop, "shop1");
        assert_eq!(
            analysis.top_words,
            Some(vec![
                WordCount::new("BLUE", 2),
                WordCount::new("MUG", 2),
                WordCount::new("COFFEE", 1),
            ])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found_continues() -> anyhow::Result<()> {
        let engine = engine(mug_shop());

        let analyses = engine.analyze_shops(["ghost", "shop1"]).await?;
        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0], ShopAnalysis::not_found("ghost"));
        assert!(analyses[1].is_found());
        Ok(())
    }

    struct FailingApi;

    impl ListingSource for FailingApi {
        async fn fetch_active_listings(&self, shop: &str) -> Result<Vec<Listing>, SourceError> {
            Err(SourceError::Upstream {
                shop: shop.to_string(),
                status: 500,
            })
        }
    }

    #[tokio::test]
    async fn test_server_error_is_not_found() -> anyhow::Result<()> {
        let engine = Engine::new(FailingApi, ShopAnalyzer::default());
        assert_eq!(
            engine.analyze_shop("shop1").await?,
            ShopAnalysis::not_found("shop1")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_connectivity_propagates() {
        let engine = engine(mug_shop().fail_next(1));

        let err = engine.analyze_shops(vec!["shop1".to_string()]).await.unwrap_err();
        assert!(err.is_connectivity());
        assert!(engine.analyze_shop("shop1").await.is_ok());
    }
}
