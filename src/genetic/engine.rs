//! Evolutionary loop for the TSP.
//!
//! Generation 0 is made of random tours. Each of the `generations` iterations
//! evaluates and reports the current generation, then breeds it into the
//! next: `population_size` children from tournament-selected parents,
//! followed by a mutation pass over all children. The last bred generation is
//! evaluated once more and its best tour is the result; it is not reported.

use super::config::GAConfig;
use super::fitness::{best_index, evaluate};
use super::observer::{GenerationObserver, GenerationReport, Silent};
use super::operators::{crossover, generate_initial_population, mutate};
use super::selection::{sample_size, select_parent};
use crate::error::{Result, TspError};
use crate::instance::{City, DistanceTable};
use crate::solution::Solution;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Genetic Algorithm implementation
pub struct GeneticAlgorithm<'t, C: City> {
    config: GAConfig,
    table: &'t DistanceTable<C>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl<'t, C: City> GeneticAlgorithm<'t, C> {
    pub fn new(table: &'t DistanceTable<C>, config: GAConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng = ChaCha8Rng::seed_from_u64(seed);

        GeneticAlgorithm {
            config,
            table,
            rng,
            seed,
        }
    }

    pub fn config(&self) -> &GAConfig {
        &self.config
    }

    /// Seed actually used by the random source
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the genetic algorithm without reporting
    pub fn run(&mut self) -> Result<Solution<C>> {
        self.run_with_observer(&mut Silent)
    }

    /// Run the genetic algorithm, reporting every evaluated generation
    pub fn run_with_observer<O>(&mut self, observer: &mut O) -> Result<Solution<C>>
    where
        O: GenerationObserver<C> + ?Sized,
    {
        self.check_preconditions()?;
        let start = Instant::now();

        let mut population =
            generate_initial_population(self.table.cities(), self.config.population_size, &mut self.rng);

        for generation in 1..=self.config.generations {
            let fitness = evaluate(self.table, &population, self.config.parallel)?;
            let best = self.fittest_index(&fitness)?;

            observer.on_generation(&GenerationReport {
                generation,
                tours: &population,
                fitness: &fitness,
                best_index: best,
            });

            population = self.breed(&population)?;
        }

        // The last bred generation is evaluated but not reported
        let fitness = evaluate(self.table, &population, self.config.parallel)?;
        let best = self.fittest_index(&fitness)?;
        let cost = fitness[best];
        let tour = population.swap_remove(best);

        log::debug!(
            "[GA] Finished {} generations in {:.3}s, best cost {:.3}",
            self.config.generations,
            start.elapsed().as_secs_f64(),
            cost
        );

        Ok(Solution {
            tour,
            cost,
            algorithm: "GeneticAlgorithm".to_string(),
            generations: self.config.generations,
            population_size: self.config.population_size,
            mutation_rate: self.config.mutation_rate,
            seed: self.seed,
            computation_time: start.elapsed().as_secs_f64(),
        })
    }

    fn fittest_index(&self, fitness: &[f64]) -> Result<usize> {
        best_index(fitness).ok_or_else(|| TspError::InvalidConfig("empty population".into()))
    }

    fn check_preconditions(&self) -> Result<()> {
        self.config.validate()?;
        if self.table.len() < 2 {
            return Err(TspError::TooFewCities(self.table.len()));
        }
        if !self.table.is_complete() {
            log::warn!(
                "[GA] Distance table is missing {} pair(s); tours crossing them will fail",
                self.table.missing_pairs().len()
            );
        }
        Ok(())
    }

    /// Build the next generation: all children first, then a mutation pass
    fn breed(&mut self, population: &[Vec<C>]) -> Result<Vec<Vec<C>>> {
        let k = sample_size(self.config.population_size, self.config.tournament_size);

        let mut children = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let parent_a = select_parent(population, self.table, k, &mut self.rng)?;
            let parent_b = select_parent(population, self.table, k, &mut self.rng)?;
            children.push(crossover(parent_a, parent_b, &mut self.rng)?);
        }

        Ok(children
            .into_iter()
            .map(|child| mutate(child, self.config.mutation_rate, &mut self.rng))
            .collect())
    }
}

/// Run the genetic algorithm with an entropy-seeded random source.
///
/// Returns the best tour of the final generation and its cost.
pub fn run<C: City>(
    generations: usize,
    population_size: usize,
    mutation_rate: f64,
    table: &DistanceTable<C>,
) -> Result<(Vec<C>, f64)> {
    let config = GAConfig::new(generations, population_size, mutation_rate);
    let solution = GeneticAlgorithm::new(table, config).run()?;
    Ok((solution.tour, solution.cost))
}
