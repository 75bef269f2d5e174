//! Post-processing of raw words
//!
//! A word first goes through the optional sound-change stage (metathesis
//! and assimilation over its graphemes), then through every filter in
//! declaration order. A filter that introduces the reject marker ends the
//! pipeline at once.

use crate::collation::Collation;
use crate::error::{ConfigError, ConfigResult};
use crate::phonology::Assimilator;
use regex::Regex;
use std::borrow::Cow;

/// In-band marker that discards a word
pub const REJECT_MARKER: &str = "REJECT";

/// Replacement that deletes every match
pub const DELETE_MARKER: &str = "!";

/// Result of running a word through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The transformed word
    Accepted(String),
    /// A filter produced the reject marker
    Rejected,
}

impl FilterOutcome {
    /// The word, if it survived
    pub fn accepted(self) -> Option<String> {
        match self {
            FilterOutcome::Accepted(word) => Some(word),
            FilterOutcome::Rejected => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, FilterOutcome::Rejected)
    }
}

/// One pattern to replacement rewrite
#[derive(Debug, Clone)]
pub struct Filter {
    pattern: String,
    replacement: String,
    regex: Regex,
    expansion: String,
}

impl Filter {
    /// Compile a filter
    ///
    /// `replacement` may use `\1`-style group references. The delete marker
    /// `!` removes every match.
    pub fn new(pattern: &str, replacement: &str) -> ConfigResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        let replacement = if replacement == DELETE_MARKER {
            String::new()
        } else {
            replacement.to_string()
        };
        let expansion = translate_replacement(&replacement);
        Ok(Self {
            pattern: pattern.to_string(),
            replacement,
            regex,
            expansion,
        })
    }

    /// A filter that rejects any word matching `pattern`
    pub fn reject(pattern: &str) -> ConfigResult<Self> {
        Self::new(pattern, REJECT_MARKER)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replacement as written, empty for deletions
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Rewrite every match in `word`
    pub fn apply<'w>(&self, word: &'w str) -> Cow<'w, str> {
        self.regex.replace_all(word, self.expansion.as_str())
    }
}

/// Convert `\N` group references to `${N}` and escape literal `$`
fn translate_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    while let Some(d) = chars.next_if(|c| c.is_ascii_digit()) {
                        out.push(d);
                    }
                    out.push('}');
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            },
            other => out.push(other),
        }
    }
    out
}

/// Ordered filter list
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    filters: Vec<Filter>,
}

impl FilterPipeline {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run `word` through sound changes and filters
    ///
    /// Sound changes need the grapheme segmentation of a collation and are
    /// skipped when either part is missing.
    pub fn apply(
        &self,
        word: &str,
        collation: Option<&Collation>,
        assimilator: Option<&Assimilator>,
    ) -> FilterOutcome {
        let mut word = match (collation, assimilator) {
            (Some(collation), Some(assimilator)) => {
                let mut units = collation.split(word);
                assimilator.apply(&mut units);
                units.concat()
            }
            _ => word.to_string(),
        };

        for filter in &self.filters {
            if let Cow::Owned(rewritten) = filter.apply(&word) {
                word = rewritten;
            }
            if word.contains(REJECT_MARKER) {
                return FilterOutcome::Rejected;
            }
        }
        FilterOutcome::Accepted(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonology::{FeatureTable, Notation};

    fn pipeline(filters: &[(&str, &str)]) -> FilterPipeline {
        FilterPipeline::new(
            filters
                .iter()
                .map(|(p, r)| Filter::new(p, r).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_filters_apply_in_order() {
        let p = pipeline(&[("a", "b"), ("b", "c")]);
        assert_eq!(p.apply("aba", None, None), FilterOutcome::Accepted("ccc".into()));
        let p = pipeline(&[("b", "c"), ("a", "b")]);
        assert_eq!(p.apply("aba", None, None), FilterOutcome::Accepted("bcb".into()));
    }

    #[test]
    fn test_reject_after_earlier_rewrite() {
        let p = pipeline(&[("a", "b"), ("b", "REJECT")]);
        assert_eq!(p.apply("a", None, None), FilterOutcome::Rejected);
    }

    #[test]
    fn test_reject_stops_pipeline() {
        let p = pipeline(&[("x", "REJECT"), ("REJECT", "fine")]);
        assert!(p.apply("axa", None, None).is_rejected());
        assert_eq!(
            p.apply("aa", None, None).accepted().as_deref(),
            Some("aa")
        );
    }

    #[test]
    fn test_delete_marker() {
        let p = pipeline(&[("h", "!")]);
        assert_eq!(p.apply("haha", None, None), FilterOutcome::Accepted("aa".into()));
        assert_eq!(p.filters()[0].replacement(), "");
    }

    #[test]
    fn test_regex_patterns_and_groups() {
        let p = pipeline(&[(r"([aeiou])h([aeiou])", r"\1\2"), ("^s", "z")]);
        assert_eq!(p.apply("saha", None, None), FilterOutcome::Accepted("zaa".into()));
    }

    #[test]
    fn test_dollar_is_literal() {
        let p = pipeline(&[("a", "$x")]);
        assert_eq!(p.apply("ba", None, None), FilterOutcome::Accepted("b$x".into()));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            Filter::new("(", "x"),
            Err(ConfigError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_sound_changes_run_before_filters() {
        let collation = Collation::from_order("a n m p").unwrap();
        let assimilator =
            Assimilator::new(FeatureTable::standard(Notation::Ipa).unwrap(), true, false);
        let p = pipeline(&[("np", "REJECT")]);
        assert_eq!(
            p.apply("anpa", Some(&collation), Some(&assimilator)),
            FilterOutcome::Accepted("ampa".into())
        );
        // Without a collation nothing is assimilated
        assert!(p.apply("anpa", None, Some(&assimilator)).is_rejected());
    }

    #[test]
    fn test_translate_replacement() {
        assert_eq!(translate_replacement(r"\1x\12"), "${1}x${12}");
        assert_eq!(translate_replacement("a$b"), "a$$b");
        assert_eq!(translate_replacement(r"\\"), r"\");
    }

    #[test]
    fn test_metathesis_runs_before_assimilation() {
        let collation = Collation::from_order("a m n").unwrap();
        let table = FeatureTable::standard(Notation::Ipa).unwrap();
        let both = Assimilator::new(table.clone(), true, true);
        let p = FilterPipeline::default();

        // n m swaps to m n, then m takes the place of the following n
        assert_eq!(
            p.apply("anma", Some(&collation), Some(&both)),
            FilterOutcome::Accepted("anna".into())
        );

        let assimilation_only = Assimilator::new(table, true, false);
        assert_eq!(
            p.apply("anma", Some(&collation), Some(&assimilation_only)),
            FilterOutcome::Accepted("amma".into())
        );
    }
}
