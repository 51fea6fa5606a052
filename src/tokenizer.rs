use crate::listing::Listing;
use serde::Deserialize;
use std::collections::HashSet;

lazy_static::lazy_static! {
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = {
        [
            "A", "ABOUT", "ABOVE", "AFTER", "AGAIN", "ALL", "AM", "AN", "AND", "ANY",
            "ARE", "AS", "AT", "BE", "BECAUSE", "BEEN", "BEFORE", "BEING", "BELOW",
            "BETWEEN", "BOTH", "BUT", "BY", "CAN", "COULD", "DID", "DO", "DOES", "DOING",
            "DOWN", "DURING", "EACH", "FEW", "FOR", "FROM", "FURTHER", "HAD", "HAS",
            "HAVE", "HAVING", "HE", "HER", "HERE", "HERS", "HIM", "HIS", "HOW", "I",
            "IF", "IN", "INTO", "IS", "IT", "ITS", "ITSELF", "JUST", "ME", "MORE",
            "MOST", "MY", "NO", "NOR", "NOT", "OF", "OFF", "ON", "ONCE", "ONLY", "OR",
            "OTHER", "OUR", "OURS", "OUT", "OVER", "OWN", "SAME", "SHE", "SHOULD", "SO",
            "SOME", "SUCH", "THAN", "THAT", "THE", "THEIR", "THEM", "THEN", "THERE",
            "THESE", "THEY", "THIS", "THOSE", "THROUGH", "TO", "TOO", "UNDER", "UNTIL",
            "UP", "VERY", "WAS", "WE", "WERE", "WHAT", "WHEN", "WHERE", "WHICH",
            "WHILE", "WHO", "WHOM", "WHY", "WILL", "WITH", "WOULD", "YOU", "YOUR",
            "YOURS",
        ]
        .iter()
        .copied()
        .collect()
    };
}

/// One `STOP_WORDS` config entry: a bare word, or a `[term, replacement]` pair
/// rewritten in the upper-cased text before it is split.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StopWordEntry {
    Word(String),
    Replace(String, String),
}

/// Upper-cased stop words and text replacement rules
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
    replacements: Vec<(String, String)>,
}

impl StopWords {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in English list, used when the config carries none
    pub fn english() -> Self {
        Self {
            words: ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            replacements: Vec::new(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_uppercase()).collect(),
            replacements: Vec::new(),
        }
    }

    pub fn from_entries(entries: &[StopWordEntry]) -> Self {
        let mut stop_words = Self::empty();
        for entry in entries {
            match entry {
                StopWordEntry::Word(word) => {
                    stop_words.words.insert(word.to_uppercase());
                }
                StopWordEntry::Replace(term, replacement) => {
                    // Empty terms would match between every character
                    if !term.is_empty() {
                        stop_words
                            .replacements
                            .push((term.to_uppercase(), replacement.to_uppercase()));
                    }
                }
            }
        }
        stop_words
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Apply replacement rules to already upper-cased text
    fn rewrite(&self, text: String) -> String {
        self.replacements
            .iter()
            .fold(text, |text, (term, replacement)| text.replace(term, replacement))
    }
}

/// Strip every character that is not an ASCII letter
pub fn normalize(token: &str) -> String {
    token.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic())
}

pub struct Tokenizer {
    stop_words: StopWords,
}

impl Tokenizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Upper-case and whitespace-split one text field
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.stop_words
            .rewrite(text.to_uppercase())
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Tokens of every present title and description
    pub fn extract(&self, listings: &[Listing]) -> Vec<String> {
        listings
            .iter()
            .flat_map(Listing::text_fields)
            .flat_map(|text| self.tokenize(text))
            .collect()
    }

    /// Strip non-letters, except from the shop's own name
    pub fn clean_filter(&self, tokens: Vec<String>, shop_name: &str) -> Vec<String> {
        let shop_token = shop_name.to_uppercase();
        tokens
            .into_iter()
            .filter_map(|token| {
                if is_alphabetic(&token) || token == shop_token {
                    Some(token)
                } else {
                    Some(normalize(&token)).filter(|t| !t.is_empty())
                }
            })
            .collect()
    }

    /// Remove stopwords
    pub fn stopword_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Full analysis pipeline
    pub fn analyze(&self, listings: &[Listing], shop_name: &str) -> Vec<String> {
        let tokens = self.extract(listings);
        let tokens = self.clean_filter(tokens, shop_name);
        self.stopword_filter(tokens)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}
