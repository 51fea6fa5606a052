use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Token occurrence counts
pub type WordCounts = HashMap<String, usize>;

/// A token with its frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Count occurrences of each distinct token
pub fn count_frequencies<S: AsRef<str>>(tokens: &[S]) -> WordCounts {
    let mut frequencies = HashMap::new();
    for token in tokens {
        *frequencies.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    frequencies
}

/// Highest count first, ties by word ascending
fn rank_order(a: &WordCount, b: &WordCount) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
}

/// Select up to `n` most frequent tokens.
///
/// Returns fewer than `n` entries when the map has fewer distinct keys.
pub fn top_n(counts: &WordCounts, n: usize) -> Vec<WordCount> {
    let mut ranked: Vec<WordCount> = counts
        .iter()
        .map(|(word, &count)| WordCount::new(word.as_str(), count))
        .collect();

    if n < ranked.len() {
        ranked.select_nth_unstable_by(n, rank_order);
        ranked.truncate(n);
    }
    ranked.sort_by(rank_order);

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> WordCounts {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_count_frequencies() {
        let tokens = ["BLUE", "MUG", "BLUE", "MUG", "COFFEE"];
        let frequencies = count_frequencies(&tokens);

        assert_eq!(frequencies.len(), 3);
        assert_eq!(frequencies["BLUE"], 2);
        assert_eq!(frequencies["COFFEE"], 1);
        assert_eq!(frequencies.values().sum::<usize>(), tokens.len());
    }

    #[test]
    fn test_count_empty() {
        let tokens: [&str; 0] = [];
        assert!(count_frequencies(&tokens).is_empty());
    }

    #[test]
    fn test_top_n_tie_break() {
        let ranked = top_n(&counts(&[("MUG", 2), ("COFFEE", 1), ("BLUE", 2)]), 5);
        assert_eq!(
            ranked,
            vec![
                WordCount::new("BLUE", 2),
                WordCount::new("MUG", 2),
                WordCount::new("COFFEE", 1),
            ]
        );
    }

    #[test]
    fn test_top_n_truncates() {
        let map = counts(&[
            ("OAK", 7),
            ("ASH", 3),
            ("ELM", 3),
            ("FIR", 9),
            ("YEW", 1),
            ("BOX", 3),
            ("PINE", 2),
        ]);
        let ranked = top_n(&map, 5);

        let words: Vec<&str> = ranked.iter().map(|wc| wc.word.as_str()).collect();
        assert_eq!(words, vec!["FIR", "OAK", "ASH", "BOX", "ELM"]);
        for pair in ranked.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        for wc in &ranked {
            assert_eq!(map[&wc.word], wc.count);
        }
    }

    #[test]
    fn test_top_n_underflow() {
        let ranked = top_n(&counts(&[("MUG", 4), ("TEA", 1)]), 5);
        assert_eq!(ranked.len(), 2);
        assert!(top_n(&WordCounts::new(), 5).is_empty());
        assert!(top_n(&counts(&[("MUG", 4)]), 0).is_empty());
    }
}
