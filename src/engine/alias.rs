use std::collections::VecDeque;

use rand::Rng;

use crate::error::DrillError;

/// Walker/Vose alias table: O(n) construction, O(1) weighted draws.
#[derive(Clone, Debug)]
pub struct AliasTable {
    probability: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasTable {
    /// Build a table from non-negative weights. Weights need not sum to one.
    pub fn new(weights: &[f64]) -> Result<Self, DrillError> {
        for (index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(DrillError::InvalidWeight { index, weight });
            }
        }

        let max = weights.iter().copied().fold(0.0, f64::max);

        if max <= 0.0 {
            return Err(DrillError::EmptyDistribution);
        }

        // Relative to the largest weight the sum stays finite.
        let total: f64 = weights.iter().map(|w| w / max).sum();
        let n = weights.len();
        let mut scaled: Vec<f64> = weights
            .iter()
            .map(|w| w / max / total * n as f64)
            .collect();
        let mut probability = vec![0.0; n];
        let mut alias = vec![0; n];

        let mut poor = VecDeque::new();
        let mut rich = VecDeque::new();

        for (index, &p) in scaled.iter().enumerate() {
            if p < 1.0 {
                poor.push_back(index);
            } else {
                rich.push_back(index);
            }
        }

        while let (Some(&small), Some(&large)) = (poor.front(), rich.front()) {
            poor.pop_front();
            rich.pop_front();

            probability[small] = scaled[small];
            alias[small] = large;

            scaled[large] = (scaled[large] + scaled[small]) - 1.0;

            if scaled[large] < 1.0 {
                poor.push_back(large);
            } else {
                rich.push_back(large);
            }
        }

        // Whatever is left only differs from 1.0 by rounding error.
        for index in rich.into_iter().chain(poor) {
            probability[index] = 1.0;
            alias[index] = index;
        }

        Ok(Self { probability, alias })
    }

    /// Draw one index with probability proportional to its weight.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let column = rng.gen_range(0..self.probability.len());
        let u: f64 = rng.gen_range(0.0..1.0);

        if u < self.probability[column] {
            column
        } else {
            self.alias[column]
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn frequencies(weights: &[f64], draws: usize, seed: u64) -> Vec<f64> {
        let table = AliasTable::new(weights).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut tally = vec![0usize; weights.len()];

        for _ in 0..draws {
            tally[table.sample(&mut rng)] += 1;
        }

        tally.iter().map(|&c| c as f64 / draws as f64).collect()
    }

    #[test]
    fn test_frequencies_match_pdf() {
        let pdf = [0.1, 0.2, 0.7];
        let freq = frequencies(&pdf, 100_000, 1953);

        for (i, (&f, &p)) in freq.iter().zip(&pdf).enumerate() {
            assert!((f - p).abs() / p < 0.05, "index {i}: got {f}, expected {p}");
        }
    }

    #[test]
    fn test_unnormalized_weights() {
        let weights = [1.0, 3.0, 1.0, 3.0];
        let freq = frequencies(&weights, 100_000, 7);
        let total: f64 = weights.iter().sum();

        for (&f, &w) in freq.iter().zip(&weights) {
            let p = w / total;
            assert!((f - p).abs() / p < 0.05, "got {f}, expected {p}");
        }
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let freq = frequencies(&[0.0, 1.0, 0.0, 2.0], 20_000, 11);
        assert_eq!(freq[0], 0.0);
        assert_eq!(freq[2], 0.0);
    }

    #[test]
    fn test_single_item() {
        let table = AliasTable::new(&[0.25]).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(table.sample(&mut rng), 0);
        }
        assert_eq!(table.probability.len(), 1);
    }

    #[test]
    fn test_huge_weights_keep_proportions() {
        let weights = [f64::MAX, f64::MAX, 1.0];
        let table = AliasTable::new(&weights).unwrap();
        assert!(table.probability[2] < 1e-300);

        let freq = frequencies(&weights, 30_000, 5);
        assert_eq!(freq[2], 0.0);
        assert!((freq[0] - 0.5).abs() < 0.025, "got {}", freq[0]);
    }

    #[test]
    fn test_columns_are_probabilities() {
        let weights: Vec<f64> = (1..=50).map(|i| (i as f64).sqrt()).collect();
        let table = AliasTable::new(&weights).unwrap();
        assert!(table.probability.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert!(table.alias.iter().all(|&a| a < weights.len()));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(AliasTable::new(&[]).unwrap_err(), DrillError::EmptyDistribution);
        assert_eq!(
            AliasTable::new(&[0.0, 0.0]).unwrap_err(),
            DrillError::EmptyDistribution
        );
        assert_eq!(
            AliasTable::new(&[1.0, -0.5]).unwrap_err(),
            DrillError::InvalidWeight {
                index: 1,
                weight: -0.5
            }
        );
        assert!(AliasTable::new(&[1.0, f64::NAN]).is_err());
    }
}
