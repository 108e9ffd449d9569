//! Per-generation reporting.
//!
//! After each generation is evaluated the engine hands a [`GenerationReport`]
//! to a [`GenerationObserver`]. Reporting never influences the search.

use crate::instance::City;
use crate::solution::format_tour;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;

/// Snapshot of one evaluated generation
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a, C: City> {
    /// 1-based generation number
    pub generation: usize,
    pub tours: &'a [Vec<C>],
    /// Cost of each tour, aligned with `tours`
    pub fitness: &'a [f64],
    /// Index of the cheapest tour
    pub best_index: usize,
}

impl<'a, C: City> GenerationReport<'a, C> {
    pub fn best_tour(&self) -> &'a [C] {
        &self.tours[self.best_index]
    }

    pub fn best_cost(&self) -> f64 {
        self.fitness[self.best_index]
    }
}

/// Receives a report for every evaluated generation
pub trait GenerationObserver<C: City> {
    fn on_generation(&mut self, report: &GenerationReport<'_, C>);
}

impl<C: City, F> GenerationObserver<C> for F
where
    F: FnMut(&GenerationReport<C>),
{
    fn on_generation(&mut self, report: &GenerationReport<'_, C>) {
        self(report)
    }
}

/// Observer that ignores every report
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl<C: City> GenerationObserver<C> for Silent {
    fn on_generation(&mut self, _report: &GenerationReport<'_, C>) {}
}

/// Writes a summary line per generation through the `log` facade.
///
/// Full tour and cost listings go to the `debug` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl<C: City> GenerationObserver<C> for LogObserver {
    fn on_generation(&mut self, report: &GenerationReport<'_, C>) {
        log::info!(
            "[GA] Gen {}  Best cost {:.3}  Tour {}",
            report.generation,
            report.best_cost(),
            format_tour(report.best_tour())
        );

        if log::log_enabled!(log::Level::Debug) {
            let tours: Vec<String> = report.tours.iter().map(|t| format_tour(t)).collect();
            log::debug!("[GA] Gen {} tours: {:?}", report.generation, tours);
            log::debug!("[GA] Gen {} costs: {:?}", report.generation, report.fitness);
        }
    }
}

/// Summary statistics of one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub population_size: usize,
    pub best_cost: f64,
    pub worst_cost: f64,
    pub mean_cost: f64,
    pub std_cost: f64,
    pub best_tour: String,
}

impl GenerationStats {
    pub fn from_report<C: City>(report: &GenerationReport<'_, C>) -> Self {
        let worst_cost = report
            .fitness
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);

        GenerationStats {
            generation: report.generation,
            population_size: report.tours.len(),
            best_cost: report.best_cost(),
            worst_cost,
            mean_cost: report.fitness.iter().mean(),
            std_cost: report.fitness.iter().population_std_dev(),
            best_tour: format_tour(report.best_tour()),
        }
    }
}

/// Keeps a [`GenerationStats`] row per generation
#[derive(Debug, Default, Clone)]
pub struct HistoryRecorder {
    pub history: Vec<GenerationStats>,
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best cost of each generation, in order
    pub fn best_costs(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.best_cost).collect()
    }

    /// Export the history to CSV
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for stats in &self.history {
            writer.serialize(stats)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl<C: City> GenerationObserver<C> for HistoryRecorder {
    fn on_generation(&mut self, report: &GenerationReport<'_, C>) {
        self.history.push(GenerationStats::from_report(report));
    }
}
