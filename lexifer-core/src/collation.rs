//! Custom letter order
//!
//! A [`Collation`] is built from the user's `letters:` line. It splits words
//! into graphemes (longest match first, so `ch` wins over `c`), maps each
//! grapheme to its position in the declared order and compares words by
//! those rank sequences.

use crate::error::{ConfigError, ConfigResult, UnknownGraphemeError};
use std::cmp::Ordering;
use std::collections::HashMap;

/// User-defined grapheme inventory and sort order
#[derive(Debug, Clone)]
pub struct Collation {
    /// Graphemes in declared order; index is the rank
    graphemes: Vec<String>,
    /// Graphemes by descending length, ties in declared order
    by_length: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl Collation {
    /// Build from graphemes in sort order
    pub fn new<I, S>(graphemes: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let graphemes: Vec<String> = graphemes.into_iter().map(Into::into).collect();

        let mut ranks = HashMap::with_capacity(graphemes.len());
        for (rank, grapheme) in graphemes.iter().enumerate() {
            if grapheme.is_empty() {
                return Err(ConfigError::EmptyGrapheme);
            }
            if ranks.insert(grapheme.clone(), rank).is_some() {
                return Err(ConfigError::DuplicateGrapheme(grapheme.clone()));
            }
        }

        // Stable sort keeps declared order among equal lengths
        let mut by_length = graphemes.clone();
        by_length.sort_by_key(|g| std::cmp::Reverse(g.chars().count()));

        Ok(Self {
            graphemes,
            by_length,
            ranks,
        })
    }

    /// Build from a whitespace-separated order such as `"a b ch c d"`
    pub fn from_order(order: &str) -> ConfigResult<Self> {
        Self::new(order.split_whitespace())
    }

    /// Graphemes in declared order
    pub fn graphemes(&self) -> &[String] {
        &self.graphemes
    }

    /// Whether `grapheme` is part of the inventory
    pub fn contains(&self, grapheme: &str) -> bool {
        self.ranks.contains_key(grapheme)
    }

    fn longest_match(&self, rest: &str) -> Option<&str> {
        self.by_length
            .iter()
            .find(|g| rest.starts_with(g.as_str()))
            .map(String::as_str)
    }

    /// Split `word` into known graphemes
    ///
    /// Fails on the first character that does not start any grapheme.
    pub fn tokenize<'w>(&self, word: &'w str) -> Result<Vec<&'w str>, UnknownGraphemeError> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        while pos < word.len() {
            let rest = &word[pos..];
            let len = self
                .longest_match(rest)
                .map(str::len)
                .ok_or_else(|| UnknownGraphemeError {
                    word: word.to_string(),
                })?;
            tokens.push(&rest[..len]);
            pos += len;
        }
        Ok(tokens)
    }

    /// Split `word` into graphemes, passing unknown characters through as
    /// single-character units
    pub fn split(&self, word: &str) -> Vec<String> {
        let mut units = Vec::new();
        let mut rest = word;
        while let Some(ch) = rest.chars().next() {
            let len = self
                .longest_match(rest)
                .map_or(ch.len_utf8(), str::len);
            units.push(rest[..len].to_string());
            rest = &rest[len..];
        }
        units
    }

    /// Rank sequence of `word`
    pub fn rank(&self, word: &str) -> Result<Vec<usize>, UnknownGraphemeError> {
        Ok(self
            .tokenize(word)?
            .into_iter()
            .map(|token| self.ranks[token])
            .collect())
    }

    /// Inverse of [`rank`](Self::rank); out-of-range ranks are skipped
    pub fn render(&self, ranks: &[usize]) -> String {
        ranks
            .iter()
            .filter_map(|&rank| self.graphemes.get(rank))
            .map(String::as_str)
            .collect()
    }

    /// Compare two words under this order
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering, UnknownGraphemeError> {
        Ok(self.rank(a)?.cmp(&self.rank(b)?))
    }

    /// Sort words under this order
    pub fn sort<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<String>, UnknownGraphemeError> {
        let mut ranked = words
            .iter()
            .map(|w| self.rank(w.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        ranked.sort();
        Ok(ranked.iter().map(|r| self.render(r)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Collation {
        Collation::from_order("a b ch c").unwrap()
    }

    #[test]
    fn test_longest_match_wins() {
        assert_eq!(order().tokenize("cha").unwrap(), ["ch", "a"]);
        assert_eq!(order().tokenize("cab").unwrap(), ["c", "a", "b"]);
    }

    #[test]
    fn test_ranks_follow_declared_order() {
        let c = order();
        assert_eq!(c.rank("cha").unwrap(), vec![2, 0]);
        assert_eq!(c.rank("ab").unwrap(), vec![0, 1]);
        assert_eq!(c.rank("c").unwrap(), vec![3]);
    }

    #[test]
    fn test_compare() {
        let c = order();
        assert_eq!(c.compare("ch", "c").unwrap(), Ordering::Less);
        assert_eq!(c.compare("cha", "ca").unwrap(), Ordering::Less);
        assert_eq!(c.compare("a", "ab").unwrap(), Ordering::Less);
        assert_eq!(c.compare("ba", "ba").unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_sort() {
        let sorted = order().sort(&["cha", "ab", "ba", "ca"]).unwrap();
        assert_eq!(sorted, ["ab", "ba", "cha", "ca"]);
    }

    #[test]
    fn test_unknown_grapheme() {
        let err = order().tokenize("ax").unwrap_err();
        assert_eq!(err.word, "ax");
        assert!(order().sort(&["ab", "zz"]).is_err());
    }

    #[test]
    fn test_render() {
        let c = order();
        assert_eq!(c.render(&[2, 0, 1]), "chab");
        assert_eq!(c.render(&[]), "");
    }

    #[test]
    fn test_lenient_split() {
        assert_eq!(order().split("chxa"), ["ch", "x", "a"]);
        assert_eq!(order().split(""), Vec::<String>::new());
    }

    #[test]
    fn test_multibyte_graphemes() {
        let c = Collation::from_order("a ŋ ŋg ʃ").unwrap();
        assert_eq!(c.tokenize("aŋga").unwrap(), ["a", "ŋg", "a"]);
        assert_eq!(c.split("ʃé"), ["ʃ", "é"]);
    }

    #[test]
    fn test_invalid_orders() {
        assert!(matches!(
            Collation::from_order("a b a"),
            Err(ConfigError::DuplicateGrapheme(g)) if g == "a"
        ));
        assert!(matches!(
            Collation::new(["a", ""]),
            Err(ConfigError::EmptyGrapheme)
        ));
    }
}
