//! Sound system and word generation
//!
//! A [`SoundSystem`] is assembled once through [`SoundSystemBuilder`] and is
//! read-only afterwards. All randomness comes from the caller's RNG.

use crate::collation::Collation;
use crate::error::{ConfigError, ConfigResult, Result, UnknownGraphemeError};
use crate::filter::{Filter, FilterOutcome, FilterPipeline, REJECT_MARKER};
use crate::phonology::{Assimilator, FeatureTable, Notation};
use crate::rule::{PhonemeClasses, Rule};
use crate::selector::WeightedSelector;
use rand::Rng;
use std::collections::HashSet;

/// Default chance, in percent, that an optional rule position is included
pub const DEFAULT_RANDOM_RATE: u8 = 10;

/// Attempts allowed per requested word
pub const ATTEMPTS_PER_WORD: usize = 3;

/// Most words reserved up front; larger requests grow as words arrive
const PREALLOCATE_LIMIT: usize = 1024;

/// Phoneme classes, rules, filters and sort order
#[derive(Debug, Clone)]
pub struct SoundSystem {
    classes: PhonemeClasses,
    class_order: Vec<char>,
    rules: WeightedSelector<Rule>,
    filters: FilterPipeline,
    collation: Option<Collation>,
    assimilator: Option<Assimilator>,
    random_rate: u8,
}

impl SoundSystem {
    /// Start assembling a sound system
    pub fn builder() -> SoundSystemBuilder {
        SoundSystemBuilder::default()
    }

    /// Phoneme classes by name
    pub fn classes(&self) -> &PhonemeClasses {
        &self.classes
    }

    /// Class names in declaration order
    pub fn class_names(&self) -> &[char] {
        &self.class_order
    }

    pub fn rules(&self) -> &WeightedSelector<Rule> {
        &self.rules
    }

    pub fn filters(&self) -> &FilterPipeline {
        &self.filters
    }

    pub fn collation(&self) -> Option<&Collation> {
        self.collation.as_ref()
    }

    pub fn assimilator(&self) -> Option<&Assimilator> {
        self.assimilator.as_ref()
    }

    pub fn random_rate(&self) -> u8 {
        self.random_rate
    }

    /// Compile a rule against this system's classes
    pub fn compile_rule(&self, text: &str) -> ConfigResult<Rule> {
        Ok(Rule::parse(text, |c| self.classes.contains_key(&c))?)
    }

    /// Expand one rule into a phoneme sequence
    pub fn run_rule<R: Rng + ?Sized>(&self, rule: &Rule, rng: &mut R) -> Result<Vec<String>> {
        rule.expand(&self.classes, self.random_rate, rng)
    }

    /// Run a raw word through sound changes and filters
    pub fn apply_filters(&self, word: &str) -> FilterOutcome {
        self.filters
            .apply(word, self.collation.as_ref(), self.assimilator.as_ref())
    }

    /// Generate one candidate word, which may be rejected
    pub fn generate_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<FilterOutcome> {
        let rule = self.rules.select(rng);
        let phonemes = self.run_rule(rule, rng)?;
        Ok(self.apply_filters(&phonemes.concat()))
    }

    /// Generate up to `n` distinct words using the thread-local RNG
    pub fn generate(&self, n: usize, unsorted: bool) -> Result<Vec<String>> {
        self.generate_with(n, unsorted, &mut rand::thread_rng())
    }

    /// Generate up to `n` distinct words
    ///
    /// Every candidate, accepted or not, uses up one of `3 * n` attempts, so
    /// fewer than `n` words can come back. Unless `unsorted` is set, words
    /// are ordered by the collation when there is one and by plain string
    /// order otherwise.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        n: usize,
        unsorted: bool,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        let budget = n.saturating_mul(ATTEMPTS_PER_WORD);
        let reserve = n.min(PREALLOCATE_LIMIT);
        let mut words: Vec<String> = Vec::with_capacity(reserve);
        let mut seen: HashSet<String> = HashSet::with_capacity(reserve);
        let mut attempts = 0;
        let mut rejected = 0;

        while words.len() < n && attempts < budget {
            attempts += 1;
            let word = match self.generate_one(rng)? {
                FilterOutcome::Accepted(word) => word,
                FilterOutcome::Rejected => {
                    rejected += 1;
                    log::trace!("candidate rejected on attempt {attempts}");
                    continue;
                }
            };
            if let Some(collation) = &self.collation {
                collation.tokenize(&word)?;
            }
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }

        log::debug!(
            "generated {} of {} words in {} attempts ({} rejected, {} duplicates)",
            words.len(),
            n,
            attempts,
            rejected,
            attempts - rejected - words.len()
        );

        if !unsorted {
            words = self.sort(words)?;
        }
        Ok(words)
    }

    /// Order words by the collation, or by string order without one
    pub fn sort(
        &self,
        mut words: Vec<String>,
    ) -> std::result::Result<Vec<String>, UnknownGraphemeError> {
        match &self.collation {
            Some(collation) => collation.sort(&words),
            None => {
                words.sort();
                Ok(words)
            }
        }
    }
}

/// Builder for [`SoundSystem`]
///
/// Everything is validated in [`build`](Self::build); the setters only
/// record values. Classes may be declared after the rules that use them.
#[derive(Debug, Default, Clone)]
pub struct SoundSystemBuilder {
    classes: Vec<(String, Vec<(String, f64)>)>,
    rules: Vec<(String, f64)>,
    filters: Vec<(String, String)>,
    letters: Option<Vec<String>>,
    random_rate: Option<u32>,
    notation: Option<Notation>,
    assimilations: bool,
    coronal_metathesis: bool,
}

impl SoundSystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a phoneme class; redeclaring a name replaces it
    pub fn class<N, I, P>(mut self, name: N, members: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (P, f64)>,
        P: Into<String>,
    {
        let name = name.into();
        let members = members.into_iter().map(|(p, w)| (p.into(), w)).collect();
        match self.classes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = members,
            None => self.classes.push((name, members)),
        }
        self
    }

    /// Add a word-shape rule
    pub fn rule(mut self, text: impl Into<String>, weight: f64) -> Self {
        self.rules.push((text.into(), weight));
        self
    }

    /// Append a filter; `!` as replacement deletes matches
    pub fn filter(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.filters.push((pattern.into(), replacement.into()));
        self
    }

    /// Append a filter rejecting every word that matches `pattern`
    pub fn reject(self, pattern: impl Into<String>) -> Self {
        self.filter(pattern, REJECT_MARKER)
    }

    /// Set the grapheme sort order
    pub fn letters<I, S>(mut self, graphemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.letters = Some(graphemes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the percentage chance of including optional positions
    pub fn random_rate(mut self, rate: u32) -> Self {
        self.random_rate = Some(rate);
        self
    }

    /// Choose the notation of the feature table
    pub fn notation(mut self, notation: Notation) -> Self {
        self.notation = Some(notation);
        self
    }

    /// Enable voice and nasal assimilation
    pub fn std_assimilations(mut self) -> Self {
        self.assimilations = true;
        self
    }

    /// Enable coronal metathesis
    pub fn coronal_metathesis(mut self) -> Self {
        self.coronal_metathesis = true;
        self
    }

    /// Whether a sort order has been set
    pub fn has_letters(&self) -> bool {
        self.letters.is_some()
    }

    /// Whether any sound change has been requested
    pub fn wants_sound_changes(&self) -> bool {
        self.assimilations || self.coronal_metathesis
    }

    /// Validate and assemble
    ///
    /// Sound changes need a sort order to segment words; without `letters`
    /// they stay disabled.
    pub fn build(self) -> ConfigResult<SoundSystem> {
        let random_rate = match self.random_rate {
            None => DEFAULT_RANDOM_RATE,
            Some(rate) => u8::try_from(rate)
                .ok()
                .filter(|r| *r <= 100)
                .ok_or(ConfigError::InvalidRandomRate(rate))?,
        };

        let mut classes = PhonemeClasses::with_capacity(self.classes.len());
        let mut class_order = Vec::with_capacity(self.classes.len());
        for (name, members) in self.classes {
            let key = class_name(&name)?;
            if members.is_empty() {
                return Err(ConfigError::Empty(format!("phoneme class {name}")));
            }
            classes.insert(key, WeightedSelector::new(members)?);
            class_order.push(key);
        }

        if self.rules.is_empty() {
            return Err(ConfigError::NoRules);
        }
        let rules = self
            .rules
            .iter()
            .map(|(text, weight)| {
                Rule::parse(text, |c| classes.contains_key(&c)).map(|rule| (rule, *weight))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let rules = WeightedSelector::new(rules)?;

        let filters = self
            .filters
            .iter()
            .map(|(pattern, replacement)| Filter::new(pattern, replacement))
            .collect::<ConfigResult<Vec<_>>>()?;

        let collation = self.letters.map(Collation::new).transpose()?;

        let assimilator = if self.assimilations || self.coronal_metathesis {
            let notation = self.notation.ok_or(ConfigError::MissingNotation)?;
            let table = FeatureTable::standard(notation)?;
            Some(Assimilator::new(
                table,
                self.assimilations,
                self.coronal_metathesis,
            ))
        } else {
            None
        };

        Ok(SoundSystem {
            classes,
            class_order,
            rules,
            filters: FilterPipeline::new(filters),
            collation,
            assimilator,
            random_rate,
        })
    }
}

fn class_name(name: &str) -> ConfigResult<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '?' && c != '!' => Ok(c),
        _ => Err(ConfigError::InvalidClassName(name.to_string())),
    }
}
