//! Solution representation for the genetic TSP solver.
//!
//! A [`Solution`] is the value returned by a run: the best tour of the final
//! generation, its cost, and some bookkeeping about the run that produced it.

use crate::instance::{City, DistanceTable};
use serde::Serialize;
use std::collections::HashSet;

/// Best tour found by a run
#[derive(Debug, Clone, Serialize)]
pub struct Solution<C: City> {
    /// Cities in visiting order
    pub tour: Vec<C>,
    /// Open-path cost of the tour
    pub cost: f64,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Number of generations evaluated
    pub generations: usize,
    /// Tours per generation
    pub population_size: usize,
    /// Mutation probability used for every child
    pub mutation_rate: f64,
    /// Seed of the random source
    pub seed: u64,
    /// Computation time in seconds
    pub computation_time: f64,
}

impl<C: City> Solution<C> {
    /// Recompute the tour cost against a table
    pub fn validate(&mut self, table: &DistanceTable<C>) -> crate::Result<()> {
        self.cost = table.tour_cost(&self.tour)?;
        Ok(())
    }

    /// Check that the tour visits every city of the table exactly once
    pub fn is_complete(&self, table: &DistanceTable<C>) -> bool {
        is_permutation_of(&self.tour, table.cities())
    }

    /// Tour rendered as `a -> b -> c`
    pub fn route(&self) -> String {
        format_tour(&self.tour)
    }
}

impl<C: City> std::fmt::Display for Solution<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Generations: {}", self.generations)?;
        writeln!(f, "  Population: {}", self.population_size)?;
        writeln!(f, "  Mutation rate: {}", self.mutation_rate)?;
        writeln!(f, "  Seed: {}", self.seed)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        writeln!(f, "  Tour: {}", self.route())
    }
}

/// Whether `tour` contains every city in `cities` exactly once and nothing else
pub fn is_permutation_of<C: City>(tour: &[C], cities: &[C]) -> bool {
    if tour.len() != cities.len() {
        return false;
    }

    let expected: HashSet<&C> = cities.iter().collect();
    let mut seen: HashSet<&C> = HashSet::with_capacity(tour.len());
    tour.iter().all(|city| expected.contains(city) && seen.insert(city))
}

pub fn format_tour<C: City>(tour: &[C]) -> String {
    tour.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
