//! Pairwise sound changes over a tokenized word
//!
//! Each sweep visits adjacent pairs once, left to right. The sweeps model a
//! single historical pass, so applying one twice can change the word again.

use super::features::{FeatureTable, Manner, Place};

/// Assimilation and metathesis over a fixed feature table
#[derive(Debug, Clone)]
pub struct Assimilator {
    table: FeatureTable,
    assimilate: bool,
    metathesize: bool,
}

impl Assimilator {
    /// Create an assimilator; either switch may be off
    pub fn new(table: FeatureTable, assimilate: bool, metathesize: bool) -> Self {
        Self {
            table,
            assimilate,
            metathesize,
        }
    }

    /// The feature table in use
    pub fn table(&self) -> &FeatureTable {
        &self.table
    }

    /// Whether voice and nasal assimilation run
    pub fn assimilates(&self) -> bool {
        self.assimilate
    }

    /// Whether coronal metathesis runs
    pub fn metathesizes(&self) -> bool {
        self.metathesize
    }

    /// Voice assimilation of `a` before `b`
    ///
    /// Applies only when both share place and a non-nasal manner and differ
    /// in voicing; `a` takes `b`'s voicing.
    pub fn voice_assimilate<'a>(&'a self, a: &'a str, b: &str) -> &'a str {
        let (Some(fa), Some(fb)) = (self.table.get(a), self.table.get(b)) else {
            return a;
        };
        if fa.place != fb.place
            || fa.manner != fb.manner
            || fb.manner == Manner::Nasal
            || fa.voicing == fb.voicing
        {
            return a;
        }
        self.table
            .find(Some(fb.voicing), fa.place, fa.manner)
            .map_or(a, |p| p.symbol.as_str())
    }

    /// Nasal assimilation of `a` before `b`
    ///
    /// A nasal `a` becomes the nasal at `b`'s place of articulation.
    pub fn nasal_assimilate<'a>(&'a self, a: &'a str, b: &str) -> &'a str {
        let (Some(fa), Some(fb)) = (self.table.get(a), self.table.get(b)) else {
            return a;
        };
        if fa.manner != Manner::Nasal {
            return a;
        }
        self.table
            .find(None, fb.place, Manner::Nasal)
            .map_or(a, |p| p.symbol.as_str())
    }

    /// Whether the pair `(a, b)` undergoes coronal metathesis
    ///
    /// True when `a` is alveolar and `b` is a velar or bilabial stop or
    /// nasal of the same manner as `a`.
    pub fn metathesis_applies(&self, a: &str, b: &str) -> bool {
        let (Some(fa), Some(fb)) = (self.table.get(a), self.table.get(b)) else {
            return false;
        };
        fa.place == Place::Alveolar
            && matches!(fb.place, Place::Velar | Place::Bilabial)
            && matches!(fb.manner, Manner::Stop | Manner::Nasal)
            && fa.manner == fb.manner
    }

    /// One left-to-right assimilation sweep: voice, then nasal, per pair
    pub fn apply_assimilations(&self, units: &mut [String]) {
        for i in 0..units.len().saturating_sub(1) {
            let next = &units[i + 1];
            let voiced = self.voice_assimilate(&units[i], next);
            let replaced = self.nasal_assimilate(voiced, next).to_string();
            units[i] = replaced;
        }
    }

    /// One left-to-right metathesis sweep; each swap is visible to the next
    /// pair
    pub fn apply_coronal_metathesis(&self, units: &mut [String]) {
        for i in 0..units.len().saturating_sub(1) {
            if self.metathesis_applies(&units[i], &units[i + 1]) {
                units.swap(i, i + 1);
            }
        }
    }

    /// Run the enabled sweeps: metathesis first, then assimilation
    pub fn apply(&self, units: &mut [String]) {
        if self.metathesize {
            self.apply_coronal_metathesis(units);
        }
        if self.assimilate {
            self.apply_assimilations(units);
        }
    }
}
