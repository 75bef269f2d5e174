//! Word generation for constructed languages
//!
//! A sound system is a set of weighted phoneme classes, weighted word-shape
//! rules and an ordered list of rewrite filters. Words are drawn by picking
//! a rule, expanding it into phonemes, and passing the result through
//! optional sound changes (assimilation, coronal metathesis) and the filters.
//!
//! # Architecture
//!
//! - **Selection**: [`WeightedSelector`] and the [`Rule`] interpreter
//! - **Rewriting**: [`FilterPipeline`] and the [`phonology`] engine
//! - **Ordering**: [`Collation`] for custom alphabetical order
//! - **Assembly**: [`SoundSystem`] built directly or from a [`Definition`]
//!
//! # Example
//!
//! ```rust
//! use lexifer_core::SoundSystem;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let system = SoundSystem::builder()
//!     .class("C", [("p", 1.0), ("t", 1.0), ("k", 1.0)])
//!     .class("V", [("a", 2.0), ("i", 1.0)])
//!     .rule("CV", 2.0)
//!     .rule("CVCV", 1.0)
//!     .reject("pp")
//!     .build()
//!     .unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let words = system.generate_with(10, false, &mut rng).unwrap();
//! assert!(words.len() <= 10);
//! ```

pub mod collation;
pub mod definition;
pub mod error;
pub mod filter;
pub mod phonology;
pub mod rule;
pub mod selector;
pub mod sound_system;
pub mod text;

pub use collation::Collation;
pub use definition::Definition;
pub use error::{
    ConfigError, DefinitionError, GenerateError, Result, RuleError, UnknownGraphemeError,
};
pub use filter::{Filter, FilterOutcome, FilterPipeline};
pub use phonology::{Assimilator, FeatureTable, Notation};
pub use rule::Rule;
pub use selector::WeightedSelector;
pub use sound_system::{SoundSystem, SoundSystemBuilder};
