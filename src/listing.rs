use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Listing represents one active catalog item of a shop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

/// Non-string values count as an absent field
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

impl Listing {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
        }
    }

    /// Text fields that are present, title first
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        self.title
            .as_deref()
            .into_iter()
            .chain(self.description.as_deref())
    }
}

/// Body of the active-listings endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingsPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Vec<Listing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize() -> anyhow::Result<()> {
        let page: ListingsPage = serde_json::from_str(
            r#"{"count": 3, "results": [
                {"title": "Blue Mug", "description": "A blue mug", "listing_id": 1},
                {"title": "Oak Spoon"},
                {"title": null, "description": null}
            ]}"#,
        )?;

        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[1].description, None);
        assert_eq!(page.results[2].text_fields().count(), 0);
        Ok(())
    }

    #[test]
    fn test_wrongly_typed_fields_are_absent() -> anyhow::Result<()> {
        let page: ListingsPage = serde_json::from_str(
            r#"{"results": [
                {"title": "Blue Mug"},
                {"title": 42, "description": ["tea", "cup"]},
                {"title": {"en": "Red Mug"}, "description": "Red clay"}
            ]}"#,
        )?;

        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0], Listing::with_title("Blue Mug"));
        assert_eq!(page.results[1], Listing::default());
        assert_eq!(page.results[2], Listing::with_description("Red clay"));
        Ok(())
    }

    #[test]
    fn test_text_fields_order() {
        let listing = Listing::new("Title", "Body");
        let fields: Vec<&str> = listing.text_fields().collect();
        assert_eq!(fields, vec!["Title", "Body"]);
    }
}
