//! Parameter sweeps over generation count and population size.
//!
//! Genetic runs are stochastic, so one run says little about a setting. A
//! [`Sweep`] repeats the algorithm several times for every point of a
//! `(generations, population_size)` grid, records each run and aggregates
//! the costs per grid point.

use crate::error::Result;
use crate::genetic::{GAConfig, GeneticAlgorithm};
use crate::instance::{City, DistanceTable};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Result of a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRecord {
    pub generations: usize,
    pub population_size: usize,
    pub mutation_rate: f64,
    /// Run number within its grid point
    pub run: usize,
    pub seed: u64,
    pub cost: f64,
    /// Computation time in seconds
    pub time: f64,
    pub tour: String,
}

/// Aggregated statistics for one grid point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepStatistics {
    pub generations: usize,
    pub population_size: usize,
    pub runs: usize,
    pub avg_cost: f64,
    pub std_cost: f64,
    pub best_cost: f64,
    pub worst_cost: f64,
    pub avg_time: f64,
    pub best_tour: String,
}

/// Sweep configuration
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Generation counts to try
    pub generations: Vec<usize>,
    /// Population sizes to try
    pub populations: Vec<usize>,
    pub mutation_rate: f64,
    /// Runs per grid point
    pub runs: usize,
    /// Run `i` of a grid point is seeded with `base_seed + i`
    pub base_seed: u64,
    /// Spread runs over the rayon thread pool
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            generations: vec![4, 8, 10],
            populations: vec![6, 8],
            mutation_rate: 0.3,
            runs: 2,
            base_seed: 0,
            parallel: true,
        }
    }
}

impl SweepConfig {
    /// Total number of runs in the sweep
    pub fn total_runs(&self) -> usize {
        self.generations.len() * self.populations.len() * self.runs
    }
}

/// Parameter sweep engine
pub struct Sweep {
    config: SweepConfig,
    results: Vec<SweepRecord>,
}

impl Sweep {
    pub fn new(config: SweepConfig) -> Self {
        Sweep {
            config,
            results: Vec::new(),
        }
    }

    /// Run every grid point; `on_run` is called after each finished run
    pub fn run<C, F>(&mut self, table: &DistanceTable<C>, on_run: F) -> Result<()>
    where
        C: City,
        F: Fn(&SweepRecord) + Sync,
    {
        let mut jobs = Vec::with_capacity(self.config.total_runs());
        for &generations in &self.config.generations {
            for &population_size in &self.config.populations {
                for run in 0..self.config.runs {
                    jobs.push((generations, population_size, run));
                }
            }
        }

        log::info!(
            "Running sweep: {} grid point(s) x {} run(s)",
            self.config.generations.len() * self.config.populations.len(),
            self.config.runs
        );

        let config = &self.config;
        let run_job = |&(generations, population_size, run): &(usize, usize, usize)| -> Result<SweepRecord> {
            let record = run_once(table, config, generations, population_size, run)?;
            on_run(&record);
            Ok(record)
        };

        let records: Result<Vec<SweepRecord>> = if self.config.parallel {
            jobs.par_iter().map(run_job).collect()
        } else {
            jobs.iter().map(run_job).collect()
        };

        self.results.extend(records?);
        Ok(())
    }

    pub fn results(&self) -> &[SweepRecord] {
        &self.results
    }

    /// Best single run recorded so far
    pub fn best(&self) -> Option<&SweepRecord> {
        self.results.iter().min_by_key(|r| OrderedFloat(r.cost))
    }

    /// Statistics per grid point, cheapest average first
    pub fn compute_statistics(&self) -> Vec<SweepStatistics> {
        let mut groups: HashMap<(usize, usize), Vec<&SweepRecord>> = HashMap::new();
        for record in &self.results {
            groups
                .entry((record.generations, record.population_size))
                .or_default()
                .push(record);
        }

        let mut statistics: Vec<SweepStatistics> = groups
            .into_iter()
            .map(|((generations, population_size), records)| {
                let costs: Vec<f64> = records.iter().map(|r| r.cost).collect();
                let times: Vec<f64> = records.iter().map(|r| r.time).collect();
                let best = records
                    .iter()
                    .min_by_key(|r| OrderedFloat(r.cost))
                    .map(|r| r.tour.clone())
                    .unwrap_or_default();

                SweepStatistics {
                    generations,
                    population_size,
                    runs: records.len(),
                    avg_cost: costs.iter().mean(),
                    std_cost: costs.iter().population_std_dev(),
                    best_cost: costs.iter().cloned().fold(f64::INFINITY, f64::min),
                    worst_cost: costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                    avg_time: times.iter().mean(),
                    best_tour: best,
                }
            })
            .collect();

        statistics.sort_by_key(|s| (OrderedFloat(s.avg_cost), s.generations, s.population_size));
        statistics
    }

    /// Plain-text summary of the sweep
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("========== Sweep Report ==========\n\n");
        report.push_str(&format!(
            "{:>11} {:>10} {:>5} {:>9} {:>8} {:>8} {:>8} {:>10}\n",
            "Generations", "Population", "Runs", "Avg cost", "Std", "Best", "Worst", "Avg time"
        ));

        for s in self.compute_statistics() {
            report.push_str(&format!(
                "{:>11} {:>10} {:>5} {:>9.2} {:>8.2} {:>8.2} {:>8.2} {:>9.4}s\n",
                s.generations,
                s.population_size,
                s.runs,
                s.avg_cost,
                s.std_cost,
                s.best_cost,
                s.worst_cost,
                s.avg_time
            ));
        }

        if let Some(best) = self.best() {
            report.push_str(&format!(
                "\nBest run: {},{} (seed {}) | Tour: {} | Cost: {:.2}\n",
                best.generations, best.population_size, best.seed, best.tour, best.cost
            ));
        }

        report
    }

    /// Export every run to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for record in &self.results {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Export per-grid-point statistics to CSV
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for stats in self.compute_statistics() {
            writer.serialize(&stats)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn run_once<C: City>(
    table: &DistanceTable<C>,
    config: &SweepConfig,
    generations: usize,
    population_size: usize,
    run: usize,
) -> Result<SweepRecord> {
    let seed = config.base_seed.wrapping_add(run as u64);
    let ga_config = GAConfig::new(generations, population_size, config.mutation_rate).with_seed(seed);
    let solution = GeneticAlgorithm::new(table, ga_config).run()?;

    log::debug!(
        "{},{} run {}: cost {:.2}",
        generations,
        population_size,
        run,
        solution.cost
    );

    Ok(SweepRecord {
        generations,
        population_size,
        mutation_rate: config.mutation_rate,
        run,
        seed,
        cost: solution.cost,
        time: solution.computation_time,
        tour: solution.route(),
    })
}
