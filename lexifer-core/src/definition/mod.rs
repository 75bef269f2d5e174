//! Definition file loader
//!
//! Reads the line-oriented sound-system description and assembles a
//! [`SoundSystem`]. A short example:
//!
//! ```text
//! # Two-class language
//! with: std-ipa-features std-assimilations
//! letters: a i u m n p t k
//! C = p t k m n
//! V = a:3 i:2 u:1
//! $S = CV
//! words: $S $S$S $SN
//! reject: ii uu
//! filter: aa > a; nm > m
//! ```

pub mod weights;

use crate::error::DefinitionError;
use crate::phonology::Notation;
use crate::sound_system::{SoundSystem, SoundSystemBuilder};
use rand::Rng;
use std::path::Path;

pub use weights::{natural_weights, rule_weight};

type Result<T> = std::result::Result<T, DefinitionError>;

/// A loaded definition
#[derive(Debug, Clone)]
pub struct Definition {
    /// The assembled sound system
    pub system: SoundSystem,
    /// Graphemes from `letters:`, empty when absent
    pub letters: Vec<String>,
    /// Value of `number of words:`, if given
    pub word_count: Option<usize>,
    /// Non-fatal problems found while loading
    pub warnings: Vec<String>,
}

impl Definition {
    /// Parse definition text
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_with(source, &mut rand::thread_rng())
    }

    /// Parse definition text, drawing natural-weight jitter from `rng`
    pub fn parse_with<R: Rng + ?Sized>(source: &str, rng: &mut R) -> Result<Self> {
        Parser::new(rng).run(source)
    }

    /// Read and parse a definition file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with(path, &mut rand::thread_rng())
    }

    /// Read and parse a definition file, drawing jitter from `rng`
    pub fn from_file_with<R: Rng + ?Sized>(path: impl AsRef<Path>, rng: &mut R) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with(&source, rng)
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(before, _)| before).trim()
}

struct Parser<'r, R: ?Sized> {
    rng: &'r mut R,
    builder: SoundSystemBuilder,
    macros: Vec<(String, String)>,
    letters: Vec<String>,
    phonemes: Vec<String>,
    word_count: Option<usize>,
}

impl<'r, R: Rng + ?Sized> Parser<'r, R> {
    fn new(rng: &'r mut R) -> Self {
        Self {
            rng,
            builder: SoundSystemBuilder::new(),
            macros: Vec::new(),
            letters: Vec::new(),
            phonemes: Vec::new(),
            word_count: None,
        }
    }

    fn run(mut self, source: &str) -> Result<Definition> {
        let lines: Vec<&str> = source.lines().collect();
        let mut index = 0;

        while index < lines.len() {
            let number = index + 1;
            let line = strip_comment(lines[index]);
            index += 1;
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix("with:") {
                self.options(rest, number)?;
            } else if let Some(rest) = line.strip_prefix("random-rate:") {
                let rate: u32 = rest.trim().parse().map_err(|_| parse_error(number, line))?;
                self.update(|b| b.random_rate(rate));
            } else if let Some(rest) = line.strip_prefix("filter:") {
                self.filters(rest, number)?;
            } else if let Some(rest) = line.strip_prefix("reject:") {
                for pattern in rest.split_whitespace() {
                    self.update(|b| b.reject(pattern));
                }
            } else if let Some(rest) = line.strip_prefix("words:") {
                self.words(rest);
            } else if let Some(rest) = line.strip_prefix("letters:") {
                self.letters = rest.split_whitespace().map(str::to_string).collect();
                let letters = self.letters.clone();
                self.update(|b| b.letters(letters));
            } else if let Some(rest) = line.strip_prefix("number of words:") {
                let count: usize = rest.trim().parse().map_err(|_| parse_error(number, line))?;
                self.word_count = Some(count);
            } else if line.starts_with('%') {
                index = self.cluster_field(line, &lines, index)?;
            } else if line.contains('=') {
                self.class_or_macro(line, number)?;
            } else {
                return Err(parse_error(number, line));
            }
        }

        self.finish()
    }

    fn update(&mut self, edit: impl FnOnce(SoundSystemBuilder) -> SoundSystemBuilder) {
        let builder = std::mem::take(&mut self.builder);
        self.builder = edit(builder);
    }

    fn options(&mut self, rest: &str, line: usize) -> Result<()> {
        for option in rest.split_whitespace() {
            match option {
                "std-ipa-features" => self.update(|b| b.notation(Notation::Ipa)),
                "std-digraph-features" => self.update(|b| b.notation(Notation::Digraph)),
                "std-assimilations" => self.update(SoundSystemBuilder::std_assimilations),
                "coronal-metathesis" => self.update(SoundSystemBuilder::coronal_metathesis),
                other => {
                    return Err(DefinitionError::UnknownOption {
                        line,
                        option: other.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    fn filters(&mut self, rest: &str, line: usize) -> Result<()> {
        for entry in rest.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (pattern, replacement) = entry
                .split_once('>')
                .ok_or_else(|| parse_error(line, entry))?;
            self.add_filter(pattern.trim(), replacement.trim());
        }
        Ok(())
    }

    fn add_filter(&mut self, pattern: &str, replacement: &str) {
        self.update(|b| b.filter(pattern, replacement));
    }

    fn words(&mut self, rest: &str) {
        let mut expanded = rest.to_string();
        for (name, value) in &self.macros {
            expanded = expanded.replace(name.as_str(), value);
        }
        for (k, rule) in expanded.split_whitespace().enumerate() {
            self.update(|b| b.rule(rule, rule_weight(k)));
        }
    }

    fn class_or_macro(&mut self, line: &str, number: usize) -> Result<()> {
        let (name, values) = line
            .split_once('=')
            .ok_or_else(|| parse_error(number, line))?;
        let (name, values) = (name.trim(), values.trim());
        if values.contains('=') || name.is_empty() {
            return Err(parse_error(number, line));
        }

        if name.starts_with('$') {
            self.macros.push((name.to_string(), values.to_string()));
            return Ok(());
        }

        let items: Vec<&str> = values.split_whitespace().collect();
        let members = if values.contains(':') {
            items
                .iter()
                .map(|item| {
                    item.split_once(':')
                        .and_then(|(p, w)| w.parse::<f64>().ok().map(|w| (p.to_string(), w)))
                        .ok_or_else(|| DefinitionError::Weight {
                            line: number,
                            item: item.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            natural_weights(&items, &mut *self.rng)
        };

        self.phonemes
            .extend(members.iter().map(|(phoneme, _)| phoneme.clone()));
        self.update(|b| b.class(name, members));
        Ok(())
    }

    /// Consume a cluster field starting at `header`; returns the index of the
    /// first line after it
    fn cluster_field(&mut self, header: &str, lines: &[&str], mut index: usize) -> Result<usize> {
        let columns: Vec<&str> = header.split_whitespace().skip(1).collect();

        while index < lines.len() {
            let raw = lines[index];
            let number = index + 1;
            index += 1;
            // A truly blank line ends the field
            if raw.trim_end_matches('\r').is_empty() {
                break;
            }
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }

            let mut row = line.split_whitespace();
            let Some(first) = row.next() else {
                continue;
            };
            let results: Vec<&str> = row.collect();
            if results.len() != columns.len() {
                return Err(DefinitionError::ClusterRow {
                    line: number,
                    expected: columns.len(),
                    found: results.len(),
                });
            }
            for (second, result) in columns.iter().zip(results) {
                let cluster = format!("{first}{second}");
                match result {
                    "+" => {}
                    "-" => self.update(|b| b.reject(cluster)),
                    replacement => self.add_filter(&cluster, replacement),
                }
            }
        }

        Ok(index)
    }

    fn finish(self) -> Result<Definition> {
        let mut warnings = Vec::new();

        if self.builder.wants_sound_changes() && !self.builder.has_letters() {
            warnings.push(
                "without 'letters:' cannot apply assimilations or coronal metathesis".to_string(),
            );
        }

        if !self.letters.is_empty() {
            let mut missing: Vec<&str> = Vec::new();
            for phoneme in &self.phonemes {
                if !self.letters.contains(phoneme) && !missing.contains(&phoneme.as_str()) {
                    missing.push(phoneme);
                }
            }
            if !missing.is_empty() {
                warnings.push(format!(
                    "a phoneme class contains '{}' missing from 'letters'; strange word shapes are likely to result",
                    missing.join(" ")
                ));
            }
        }

        for warning in &warnings {
            log::warn!("{warning}");
        }

        Ok(Definition {
            system: self.builder.build()?,
            letters: self.letters,
            word_count: self.word_count,
            warnings,
        })
    }
}

fn parse_error(line: usize, text: &str) -> DefinitionError {
    DefinitionError::Parse {
        line,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::filter::FilterOutcome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn parse(source: &str) -> Result<Definition> {
        Definition::parse_with(source, &mut ChaCha8Rng::seed_from_u64(17))
    }

    #[test]
    fn test_minimal_definition() {
        let def = parse("V = a i u\nwords: V\n").unwrap();
        assert_eq!(def.system.class_names(), ['V']);
        assert_eq!(def.system.rules().len(), 1);
        assert!(def.letters.is_empty());
        assert!(def.warnings.is_empty());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let def = parse("# header\n\nC = p t # stops\nwords: C # one\n").unwrap();
        assert_eq!(def.system.classes()[&'C'].len(), 2);
    }

    #[test]
    fn test_explicit_weights() {
        let def = parse("V = a:3 i:1\nwords: V\n").unwrap();
        let weights: Vec<f64> = def.system.classes()[&'V'].entries().map(|(_, w)| w).collect();
        assert_eq!(weights, [3.0, 1.0]);
    }

    #[test]
    fn test_mixed_weights_rejected() {
        assert!(matches!(
            parse("V = a:3 i\nwords: V\n"),
            Err(DefinitionError::Weight { line: 1, .. })
        ));
        assert!(matches!(
            parse("V = a:x\nwords: V\n"),
            Err(DefinitionError::Weight { .. })
        ));
    }

    #[test]
    fn test_macros_expand_in_words() {
        let def = parse("C = p\nV = a\n$S = CV\nwords: $S$S $S\n").unwrap();
        let rules: Vec<&str> = def.system.rules().keys().map(|r| r.text()).collect();
        assert_eq!(rules, ["CVCV", "CV"]);
        let weights: Vec<f64> = def.system.rules().entries().map(|(_, w)| w).collect();
        assert!((weights[0] - 10.0).abs() < 1e-12);
        assert!(weights[1] < weights[0]);
    }

    #[test]
    fn test_filters_and_rejects() {
        let def = parse("V = a\nwords: V\nfilter: a > e; e > i;\nreject: ii\n").unwrap();
        let filters = def.system.filters().filters();
        assert_eq!(filters.len(), 3);
        assert_eq!(filters[0].pattern(), "a");
        assert_eq!(filters[1].replacement(), "i");
        assert_eq!(filters[2].replacement(), "REJECT");
        assert_eq!(def.system.apply_filters("a"), FilterOutcome::Accepted("i".into()));
        assert!(def.system.apply_filters("ii").is_rejected());
    }

    #[test]
    fn test_cluster_field() {
        let source = "\
C = p t
words: CC
% p t
p - +
t + d

reject: x
";
        let def = parse(source).unwrap();
        let filters: Vec<(&str, &str)> = def
            .system
            .filters()
            .filters()
            .iter()
            .map(|f| (f.pattern(), f.replacement()))
            .collect();
        assert_eq!(filters, [("pp", "REJECT"), ("tt", "d"), ("x", "REJECT")]);
    }

    #[test]
    fn test_cluster_row_width() {
        let source = "C = p t\nwords: CC\n% p t\np - + -\n";
        assert!(matches!(
            parse(source),
            Err(DefinitionError::ClusterRow { line: 4, expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_options() {
        let def = parse(
            "with: std-digraph-features std-assimilations coronal-metathesis\n\
             letters: a n ng k\nV = a\nN = n\nK = k\nwords: VNKV\n",
        )
        .unwrap();
        let assimilator = def.system.assimilator().unwrap();
        assert_eq!(assimilator.table().notation(), Notation::Digraph);
        assert!(assimilator.assimilates());
        assert!(assimilator.metathesizes());
        assert!(def.warnings.is_empty());
    }

    #[test]
    fn test_unknown_option() {
        assert!(matches!(
            parse("with: fancy\nV = a\nwords: V\n"),
            Err(DefinitionError::UnknownOption { line: 1, .. })
        ));
    }

    #[test]
    fn test_random_rate_and_word_count() {
        let def = parse("random-rate: 35\nnumber of words: 40\nV = a\nwords: V\n").unwrap();
        assert_eq!(def.system.random_rate(), 35);
        assert_eq!(def.word_count, Some(40));
        assert!(parse("random-rate: often\nV = a\nwords: V\n").is_err());
    }

    #[test]
    fn test_unparseable_line() {
        assert!(matches!(
            parse("V = a\nwords: V\nnonsense here\n"),
            Err(DefinitionError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_assimilation_without_letters_warns() {
        let def = parse("with: std-ipa-features std-assimilations\nV = a\nwords: V\n").unwrap();
        assert_eq!(def.warnings.len(), 1);
        assert!(def.warnings[0].contains("letters"));
    }

    #[test]
    fn test_missing_letters_warns() {
        let def = parse("letters: a p\nC = p t k\nV = a\nwords: CV\n").unwrap();
        assert_eq!(def.warnings.len(), 1);
        assert!(def.warnings[0].contains("'t k'"));
    }

    #[test]
    fn test_config_errors_surface() {
        assert!(matches!(
            parse("V = a\n"),
            Err(DefinitionError::Config(ConfigError::NoRules))
        ));
        assert!(matches!(
            parse("V = a\nwords: aV!\n"),
            Err(DefinitionError::Config(ConfigError::Rule(_)))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.def");
        std::fs::write(&path, "V = a\nwords: V\n").unwrap();
        let def = Definition::from_file_with(&path, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        assert_eq!(def.system.rules().len(), 1);

        let missing = Definition::from_file(dir.path().join("absent.def"));
        assert!(matches!(missing, Err(DefinitionError::Io { .. })));
    }
}
