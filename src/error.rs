use thiserror::Error;

/// Failures reported by a listing source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The shop does not exist or has no active listings
    #[error("shop '{shop}' not found")]
    NotFound { shop: String },

    /// The listing API answered with a server error
    #[error("listing API returned status {status} for shop '{shop}'")]
    Upstream { shop: String, status: u16 },

    /// The listing API could not be reached
    #[error("cannot reach listing API: {0}")]
    Connectivity(String),
}

impl SourceError {
    pub fn not_found(shop: &str) -> Self {
        Self::NotFound {
            shop: shop.to_string(),
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}
