//! Genetic Algorithm for the TSP.
//!
//! Tours are plain `Vec<C>` permutations of the table's cities. The loop in
//! [`GeneticAlgorithm`] uses:
//! - random shuffles for the seed generation,
//! - tournament selection over a third of the population,
//! - a segment-preserving crossover that fills the rest from the second parent,
//! - swap mutation applied to each child with a fixed probability.

mod config;
mod engine;
pub mod fitness;
pub mod observer;
pub mod operators;
pub mod selection;

pub use config::GAConfig;
pub use engine::{run, GeneticAlgorithm};
pub use observer::{
    GenerationObserver, GenerationReport, GenerationStats, HistoryRecorder, LogObserver, Silent,
};
