use rand::{prelude::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

/// Seeded random source threaded through construction and mutation,
/// so runs are reproducible from a single seed.
#[derive(Debug)]
pub struct NeatRng {
    pub small: SmallRng,
    weight_distribution: Uniform<f64>,
}

impl NeatRng {
    pub fn new(seed: u64, weight_range: f64) -> Self {
        Self {
            small: SmallRng::seed_from_u64(seed),
            weight_distribution: Uniform::new_inclusive(-weight_range, weight_range),
        }
    }

    pub fn gamble(&mut self, chance: f64) -> bool {
        self.small.gen::<f64>() < chance
    }

    /// fresh or rerolled connection weight, uniform over the configured range
    pub fn weight(&mut self) -> f64 {
        self.weight_distribution.sample(&mut self.small)
    }

    /// initial input node value
    pub fn node_value(&mut self) -> f64 {
        self.small.gen::<f64>() * 2.0 - 1.0
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.small.gen_range(0..len)
    }
}
