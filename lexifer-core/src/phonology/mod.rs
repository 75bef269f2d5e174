//! Phonological features and sound changes
//!
//! The feature table is an explicit value owned by whoever applies the
//! sound changes. Its spellings must use the same notation as the sort
//! order, otherwise lookups simply miss and the word is left unchanged.

pub mod assimilation;
pub mod features;

pub use assimilation::Assimilator;
pub use features::{FeatureTable, Manner, Notation, PhonemeFeatures, Place, Voicing};
