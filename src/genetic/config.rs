//! Genetic algorithm configuration.

use crate::error::{Result, TspError};

/// Genetic Algorithm configuration
///
/// ```
/// use tsp_genetic::genetic::GAConfig;
///
/// let config = GAConfig::default()
///     .with_generations(10)
///     .with_population_size(8)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GAConfig {
    /// Number of generations evaluated
    pub generations: usize,
    /// Tours per generation
    pub population_size: usize,
    /// Probability of swapping two cities of each child (0.0 to 1.0)
    pub mutation_rate: f64,
    /// Tours drawn per tournament, a third of the population when `None`
    pub tournament_size: Option<usize>,
    /// Evaluate fitness on the rayon thread pool
    pub parallel: bool,
    /// Random seed, drawn from entropy when `None`
    pub seed: Option<u64>,
}

impl Default for GAConfig {
    fn default() -> Self {
        GAConfig {
            generations: 5,
            population_size: 6,
            mutation_rate: 0.3,
            tournament_size: None,
            parallel: false,
            seed: None,
        }
    }
}

impl GAConfig {
    pub fn new(generations: usize, population_size: usize, mutation_rate: f64) -> Self {
        GAConfig {
            generations,
            population_size,
            mutation_rate,
            ..Default::default()
        }
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_tournament_size(mut self, n: usize) -> Self {
        self.tournament_size = Some(n);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter is in range
    pub fn validate(&self) -> Result<()> {
        if self.generations == 0 {
            return Err(TspError::InvalidConfig("generations must be at least 1".into()));
        }
        if self.population_size == 0 {
            return Err(TspError::InvalidConfig("population_size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::InvalidConfig(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.tournament_size == Some(0) {
            return Err(TspError::InvalidConfig("tournament_size must be at least 1".into()));
        }
        Ok(())
    }
}
