//! Weighted random choice over a fixed set of keys
//!
//! Keys and weights are stored as parallel arrays in insertion order so that
//! a draw is a single linear walk with no allocation.

use crate::error::{ConfigError, ConfigResult};
use rand::Rng;

/// Weighted random selector
///
/// Built once from `(key, weight)` pairs; every weight must be finite and
/// strictly positive. Adding the same key twice keeps its first position and
/// the last weight.
#[derive(Debug, Clone)]
pub struct WeightedSelector<K> {
    keys: Vec<K>,
    weights: Vec<f64>,
    total: f64,
}

impl<K: PartialEq + ToString> WeightedSelector<K> {
    /// Create a selector from `(key, weight)` pairs
    pub fn new<I>(entries: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut keys: Vec<K> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();

        for (key, weight) in entries {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigError::InvalidWeight {
                    key: key.to_string(),
                    weight,
                });
            }
            match keys.iter().position(|k| *k == key) {
                Some(index) => weights[index] = weight,
                None => {
                    keys.push(key);
                    weights.push(weight);
                }
            }
        }

        if keys.is_empty() {
            return Err(ConfigError::Empty("weighted selector".to_string()));
        }

        let total: f64 = weights.iter().sum();
        if !total.is_finite() {
            return Err(ConfigError::WeightOverflow);
        }
        Ok(Self {
            keys,
            weights,
            total,
        })
    }
}

impl<K> WeightedSelector<K> {
    /// Draw one key
    ///
    /// A uniform value in `[0, total)` is walked against the running sum of
    /// weights. Rounding can leave the draw at or past the final sum, in
    /// which case the last key is returned.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> &K {
        let pick = rng.gen_range(0.0..self.total);
        let mut acc = 0.0;
        for (key, weight) in self.keys.iter().zip(&self.weights) {
            acc += weight;
            if pick < acc {
                return key;
            }
        }
        // Non-empty by construction
        &self.keys[self.keys.len() - 1]
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// `(key, weight)` pairs in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&K, f64)> {
        self.keys.iter().zip(self.weights.iter().copied())
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; a selector cannot be built empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'a, K> IntoIterator for &'a WeightedSelector<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_overflowing_total_rejected() {
        let result = WeightedSelector::new([("a", 1e308), ("b", 1e308)]);
        assert!(matches!(result, Err(ConfigError::WeightOverflow)));

        let near_limit = WeightedSelector::new([("a", 1e308), ("b", 1e307)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..100 {
            near_limit.select(&mut rng);
        }
    }

    fn selector(entries: &[(&str, f64)]) -> ConfigResult<WeightedSelector<String>> {
        WeightedSelector::new(entries.iter().map(|(k, w)| (k.to_string(), *w)))
    }

    #[test]
    fn test_rejects_non_positive_weights() {
        assert!(matches!(
            selector(&[("a", 1.0), ("b", 0.0)]),
            Err(ConfigError::InvalidWeight { .. })
        ));
        assert!(matches!(
            selector(&[("a", -2.5)]),
            Err(ConfigError::InvalidWeight { .. })
        ));
        assert!(matches!(
            selector(&[("a", f64::NAN)]),
            Err(ConfigError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(selector(&[]), Err(ConfigError::Empty(_))));
    }

    #[test]
    fn test_single_key_always_selected() {
        let sel = selector(&[("only", 0.3)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(sel.select(&mut rng), "only");
        }
    }

    #[test]
    fn test_skewed_weights_converge() {
        let sel = selector(&[("a", 1000.0), ("b", 1.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws = 100_000;
        let hits = (0..draws).filter(|_| sel.select(&mut rng) == "a").count();
        let ratio = hits as f64 / draws as f64;
        let expected = 1000.0 / 1001.0;
        assert!((ratio - expected).abs() < 0.005, "ratio {ratio}");
    }

    #[test]
    fn test_even_weights_split() {
        let sel = selector(&[("x", 1.0), ("y", 1.0), ("z", 2.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let draws = 40_000;
        let z = (0..draws).filter(|_| sel.select(&mut rng) == "z").count();
        let ratio = z as f64 / draws as f64;
        assert!((ratio - 0.5).abs() < 0.02, "ratio {ratio}");
    }

    #[test]
    fn test_keys_in_insertion_order() {
        let sel = selector(&[("k", 1.0), ("a", 2.0), ("t", 3.0)]).unwrap();
        let keys: Vec<&String> = sel.keys().collect();
        assert_eq!(keys, ["k", "a", "t"]);
        assert_eq!(sel.len(), 3);
        assert!((sel.total_weight() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_key_keeps_position_last_weight() {
        let sel = selector(&[("a", 1.0), ("b", 1.0), ("a", 5.0)]).unwrap();
        let entries: Vec<(&String, f64)> = sel.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "a");
        assert_eq!(entries[0].1, 5.0);
    }
}
