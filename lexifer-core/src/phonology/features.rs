//! Phoneme feature table
//!
//! The standard table is embedded as TOML and resolved into one notation
//! when loaded. Every [`FeatureTable`] is an owned value; nothing here is
//! cached process-wide.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const STANDARD_TABLE: &str = include_str!("../../configs/features/standard.toml");

/// Spelling used for phonemes in the feature table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notation {
    /// IPA symbols (`ʃ`, `ŋ`, `tɬ`)
    Ipa,
    /// ASCII digraphs (`sh`, `ng`, `tl`)
    Digraph,
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipa" => Ok(Notation::Ipa),
            "digraph" => Ok(Notation::Digraph),
            other => Err(format!("unknown notation: {other}")),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Ipa => write!(f, "ipa"),
            Notation::Digraph => write!(f, "digraph"),
        }
    }
}

/// Voicing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Voicing {
    Voiced,
    Voiceless,
}

/// Place of articulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Place {
    Bilabial,
    Labiodental,
    Alveolar,
    Postalveolar,
    Retroflex,
    Velar,
    Uvular,
}

/// Manner of articulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Manner {
    Stop,
    Fricative,
    Sibilant,
    Affricate,
    LateralFricative,
    LateralAffricate,
    Nasal,
}

impl fmt::Display for Voicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Voicing::Voiced => "voiced",
            Voicing::Voiceless => "voiceless",
        })
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Place::Bilabial => "bilabial",
            Place::Labiodental => "labiodental",
            Place::Alveolar => "alveolar",
            Place::Postalveolar => "postalveolar",
            Place::Retroflex => "retroflex",
            Place::Velar => "velar",
            Place::Uvular => "uvular",
        })
    }
}

impl fmt::Display for Manner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Manner::Stop => "stop",
            Manner::Fricative => "fricative",
            Manner::Sibilant => "sibilant",
            Manner::Affricate => "affricate",
            Manner::LateralFricative => "lateral fricative",
            Manner::LateralAffricate => "lateral affricate",
            Manner::Nasal => "nasal",
        })
    }
}

/// One phoneme with its features, spelled in the table's notation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhonemeFeatures {
    pub symbol: String,
    pub voicing: Voicing,
    pub place: Place,
    pub manner: Manner,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[allow(dead_code)]
    metadata: Metadata,
    phonemes: Vec<PhonemeEntry>,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    #[allow(dead_code)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct PhonemeEntry {
    ipa: String,
    digraph: String,
    voicing: Voicing,
    place: Place,
    manner: Manner,
}

/// Read-only phoneme feature lookup
#[derive(Debug, Clone)]
pub struct FeatureTable {
    notation: Notation,
    entries: Vec<PhonemeFeatures>,
}

impl FeatureTable {
    /// Load the standard consonant table in the given notation
    pub fn standard(notation: Notation) -> ConfigResult<Self> {
        Self::from_toml(STANDARD_TABLE, notation)
    }

    /// Load a table from TOML text
    pub fn from_toml(source: &str, notation: Notation) -> ConfigResult<Self> {
        let file: TableFile = toml::from_str(source)
            .map_err(|e| ConfigError::FeatureTable(format!("failed to parse table: {e}")))?;

        let entries = file
            .phonemes
            .into_iter()
            .map(|entry| PhonemeFeatures {
                symbol: match notation {
                    Notation::Ipa => entry.ipa,
                    Notation::Digraph => entry.digraph,
                },
                voicing: entry.voicing,
                place: entry.place,
                manner: entry.manner,
            })
            .collect();

        Ok(Self { notation, entries })
    }

    /// Notation the table was loaded in
    pub fn notation(&self) -> Notation {
        self.notation
    }

    /// All entries in table order
    pub fn entries(&self) -> &[PhonemeFeatures] {
        &self.entries
    }

    /// Features of `symbol`; the first matching entry wins
    pub fn get(&self, symbol: &str) -> Option<&PhonemeFeatures> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    /// First phoneme matching every given feature
    pub fn find(
        &self,
        voicing: Option<Voicing>,
        place: Place,
        manner: Manner,
    ) -> Option<&PhonemeFeatures> {
        self.entries.iter().find(|e| {
            e.place == place && e.manner == manner && voicing.map_or(true, |v| e.voicing == v)
        })
    }
}
