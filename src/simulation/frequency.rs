//! Baseline statistics tracker.
//!
//! Follows one pocket across a run of spins and, after each spin,
//! reports the running hit count, relative frequency, and mean,
//! population variance and standard deviation of the outcomes so far.
//! Updates are incremental (Welford), O(1) per spin.

use crate::types::{FrequencyRecord, Pocket};
use crate::wheel::SpinSource;

/// Running estimators for a single baseline run.
#[derive(Debug, Clone)]
pub struct FrequencyTracker {
    target: Pocket,
    count: u64,
    hits: u64,
    mean: f64,
    /// Sum of squared deviations from the running mean.
    m2: f64,
}

impl FrequencyTracker {
    pub fn new(target: Pocket) -> Self {
        Self {
            target,
            count: 0,
            hits: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Fold one outcome in and return the record for the prefix so far.
    pub fn observe(&mut self, outcome: Pocket) -> FrequencyRecord {
        self.count += 1;
        if outcome == self.target {
            self.hits += 1;
        }

        let x = outcome as f64;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);

        let n = self.count as f64;
        let variance = (self.m2 / n).max(0.0);
        let relative_frequency = self.hits as f64 / n;

        FrequencyRecord {
            round: self.count as usize,
            outcome,
            hits: self.hits,
            relative_frequency,
            relative_frequency_pct: relative_frequency * 100.0,
            mean: self.mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }
}

/// Spin `trials` times and track `target`.
pub fn run_frequency<S: SpinSource>(source: &mut S, trials: usize, target: Pocket) -> Vec<FrequencyRecord> {
    let mut tracker = FrequencyTracker::new(target);
    (0..trials).map(|_| tracker.observe(source.spin())).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{ScriptedWheel, Wheel};

    /// Straight recomputation over a prefix, independent of the tracker.
    fn brute_force(prefix: &[Pocket], target: Pocket) -> (u64, f64, f64, f64) {
        let n = prefix.len() as f64;
        let hits = prefix.iter().filter(|&&p| p == target).count() as u64;
        let mean = prefix.iter().map(|&p| p as f64).sum::<f64>() / n;
        let var = prefix.iter().map(|&p| (p as f64 - mean).powi(2)).sum::<f64>() / n;
        (hits, hits as f64 / n, mean, var)
    }

    #[test]
    fn test_matches_brute_force_on_every_prefix() {
        let outcomes = Wheel::seeded(3).spins(500);
        let mut wheel = ScriptedWheel::new(outcomes.clone());
        let records = run_frequency(&mut wheel, outcomes.len(), 17);

        for (k, rec) in records.iter().enumerate() {
            let (hits, rel, mean, var) = brute_force(&outcomes[..=k], 17);
            assert_eq!(rec.round, k + 1);
            assert_eq!(rec.outcome, outcomes[k]);
            assert_eq!(rec.hits, hits);
            assert!((rec.relative_frequency - rel).abs() < 1e-12);
            assert!((rec.relative_frequency_pct - rel * 100.0).abs() < 1e-9);
            assert!((rec.mean - mean).abs() < 1e-9, "mean at {k}");
            assert!((rec.variance - var).abs() < 1e-7, "variance at {k}");
            assert!((rec.std_dev - var.sqrt()).abs() < 1e-7);
        }
    }

    #[test]
    fn test_single_outcome() {
        let mut t = FrequencyTracker::new(8);
        let r = t.observe(8);
        assert_eq!(r.hits, 1);
        assert_eq!(r.relative_frequency, 1.0);
        assert_eq!(r.mean, 8.0);
        assert_eq!(r.variance, 0.0);
        assert_eq!(r.std_dev, 0.0);
    }

    #[test]
    fn test_known_small_sequence() {
        let mut wheel = ScriptedWheel::new(vec![0, 36, 0, 36]);
        let records = run_frequency(&mut wheel, 4, 0);
        let last = records.last().unwrap();
        assert_eq!(last.hits, 2);
        assert_eq!(last.relative_frequency, 0.5);
        assert_eq!(last.mean, 18.0);
        assert_eq!(last.variance, 324.0);
        assert_eq!(last.std_dev, 18.0);
    }

    #[test]
    fn test_converges_towards_expected_values() {
        let mut wheel = Wheel::seeded(2024);
        let records = run_frequency(&mut wheel, 200_000, 8);
        let last = records.last().unwrap();
        assert!((last.mean - 18.0).abs() < 0.2, "mean {}", last.mean);
        assert!((last.variance - 114.0).abs() < 2.0, "variance {}", last.variance);
        assert!((last.std_dev - 10.677).abs() < 0.1, "std {}", last.std_dev);
        assert!((last.relative_frequency - 1.0 / 37.0).abs() < 0.002, "freq {}", last.relative_frequency);
    }
}
