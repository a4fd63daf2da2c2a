//! Seeded random workload generation.
//!
//! Each tick in `[0, horizon)` gets an arrival with probability
//! `arrival_probability`; each arrival draws a burst uniformly from
//! `[min_burst, max_burst]`. The same seed always yields the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ProcessDescriptor, ProcessId, Ticks};

/// Bernoulli-arrival workload generator.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadGenerator {
    /// Ticks over which arrivals are drawn.
    pub horizon: Ticks,
    /// Per-tick arrival probability (0.0..=1.0).
    pub arrival_probability: f64,
    pub min_burst: Ticks,
    pub max_burst: Ticks,
    pub seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator with the given seed and moderate defaults.
    pub fn new(seed: u64) -> Self {
        Self {
            horizon: 20,
            arrival_probability: 0.3,
            min_burst: 1,
            max_burst: 8,
            seed,
        }
    }

    pub fn with_horizon(mut self, horizon: Ticks) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_arrival_probability(mut self, p: f64) -> Self {
        self.arrival_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_burst_range(mut self, min_burst: Ticks, max_burst: Ticks) -> Self {
        self.min_burst = min_burst.max(1);
        self.max_burst = max_burst.max(self.min_burst);
        self
    }

    /// Draws a workload. Never empty: if no tick produced an arrival, a single
    /// process arrives at tick 0.
    pub fn generate(&self) -> Vec<ProcessDescriptor> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let min_burst = self.min_burst.max(1);
        let max_burst = self.max_burst.max(min_burst);
        let mut processes = Vec::new();

        for t in 0..self.horizon.max(0) {
            if rng.random::<f64>() < self.arrival_probability {
                let burst = rng.random_range(min_burst..=max_burst);
                let id = (processes.len() + 1) as ProcessId;
                processes.push(ProcessDescriptor::new(id, t, burst));
            }
        }

        if processes.is_empty() {
            let burst = rng.random_range(min_burst..=max_burst);
            processes.push(ProcessDescriptor::new(1, 0, burst));
        }

        processes
    }
}
