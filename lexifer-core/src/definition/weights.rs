//! Default weights for classes and rules

use rand::Rng;

/// Jitter band, in percent, applied to natural weights
const JITTER_PERCENT: f64 = 10.0;

/// Move `value` by up to half of `percent` percent either way
fn jitter<R: Rng + ?Sized>(value: f64, percent: f64, rng: &mut R) -> f64 {
    let band = value * (percent / 100.0);
    value + rng.gen::<f64>() * band - band / 2.0
}

/// Natural-frequency weights for phonemes listed most common first
///
/// Follows the Gusein-Zade distribution: the i-th of n phonemes gets
/// `(ln(n + 1) - ln(i + 1)) / n`, lightly jittered.
pub fn natural_weights<S, R>(phonemes: &[S], rng: &mut R) -> Vec<(String, f64)>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let n = phonemes.len() as f64;
    phonemes
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let base = ((n + 1.0).ln() - (i as f64 + 1.0).ln()) / n;
            (p.as_ref().to_string(), jitter(base, JITTER_PERCENT, rng))
        })
        .collect()
}

/// Weight of the `index`-th rule on a `words:` line
pub fn rule_weight(index: usize) -> f64 {
    10.0 / ((index + 1) as f64).powf(0.9)
}
