//! Word-shape rules
//!
//! A rule such as `CV?CV!` is compiled once against the known phoneme
//! classes into a list of [`Step`]s. Each character is either a class
//! reference or a literal; a following `?` makes it optional and a
//! following `!` forbids repeating the phoneme emitted just before it.

use crate::error::{GenerateError, Result, RuleError};
use crate::selector::WeightedSelector;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Phoneme classes by their one-character name
pub type PhonemeClasses = HashMap<char, WeightedSelector<String>>;

/// Redraws allowed for a `!` step before giving up
pub const MAX_DISTINCT_DRAWS: usize = 10_000;

const OPTIONAL: char = '?';
const DISTINCT: char = '!';

/// A single rule position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Drawn from the named class
    Class(char),
    /// Emitted as written
    Literal(char),
}

/// What the interpreter does at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Always emitted
    Emit(Unit),
    /// Emitted with probability `random_rate / 100`
    Optional(Unit),
    /// Drawn from the class until it differs from the previous phoneme
    Distinct(char),
}

/// A compiled word-shape rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    text: String,
    steps: Vec<Step>,
}

impl Rule {
    /// Compile `text`, treating characters for which `is_class` holds as
    /// class references
    pub fn parse(text: &str, is_class: impl Fn(char) -> bool) -> std::result::Result<Self, RuleError> {
        let chars: Vec<char> = text.chars().collect();
        let mut steps = Vec::with_capacity(chars.len());

        for (i, &ch) in chars.iter().enumerate() {
            if ch == OPTIONAL || ch == DISTINCT {
                continue;
            }
            let unit = if is_class(ch) {
                Unit::Class(ch)
            } else {
                Unit::Literal(ch)
            };

            match chars.get(i + 1) {
                Some(&OPTIONAL) => steps.push(Step::Optional(unit)),
                Some(&DISTINCT) => {
                    // Look past an optional marker to the real previous token
                    let previous = match i.checked_sub(1).map(|p| chars[p]) {
                        Some(OPTIONAL) => i.checked_sub(2).map(|p| chars[p]),
                        other => other,
                    };
                    if previous != Some(ch) {
                        return Err(RuleError::NotDuplicate {
                            rule: text.to_string(),
                        });
                    }
                    match unit {
                        Unit::Class(name) => steps.push(Step::Distinct(name)),
                        Unit::Literal(_) => {
                            return Err(RuleError::NotAClass {
                                rule: text.to_string(),
                            })
                        }
                    }
                }
                _ => steps.push(Step::Emit(unit)),
            }
        }

        Ok(Self {
            text: text.to_string(),
            steps,
        })
    }

    /// The rule as written
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Expand into one phoneme sequence
    ///
    /// `random_rate` is the percentage chance that an optional step is
    /// included.
    pub fn expand<R: Rng + ?Sized>(
        &self,
        classes: &PhonemeClasses,
        random_rate: u8,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        let mut out: Vec<String> = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            match *step {
                Step::Emit(unit) => out.push(resolve(unit, classes, rng)),
                Step::Optional(unit) => {
                    if rng.gen_range(0..100u8) < random_rate {
                        out.push(resolve(unit, classes, rng));
                    }
                }
                Step::Distinct(name) => {
                    let phoneme = self.draw_distinct(name, out.last(), classes, rng)?;
                    out.push(phoneme);
                }
            }
        }

        Ok(out)
    }

    fn draw_distinct<R: Rng + ?Sized>(
        &self,
        name: char,
        previous: Option<&String>,
        classes: &PhonemeClasses,
        rng: &mut R,
    ) -> Result<String> {
        let Some(class) = classes.get(&name) else {
            return Ok(name.to_string());
        };
        for _ in 0..MAX_DISTINCT_DRAWS {
            let candidate = class.select(rng);
            if previous != Some(candidate) {
                return Ok(candidate.clone());
            }
        }
        Err(GenerateError::RepeatLimit {
            rule: self.text.clone(),
            attempts: MAX_DISTINCT_DRAWS,
        })
    }
}

fn resolve<R: Rng + ?Sized>(unit: Unit, classes: &PhonemeClasses, rng: &mut R) -> String {
    match unit {
        Unit::Class(name) => match classes.get(&name) {
            Some(class) => class.select(rng).clone(),
            None => name.to_string(),
        },
        Unit::Literal(ch) => ch.to_string(),
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
