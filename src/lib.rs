//! TSP Genetic Solver Library
//!
//! A genetic algorithm heuristic for the Traveling Salesman Problem over a
//! symmetric distance table. Tours are costed as open paths: the cost of a
//! tour is the sum of the costs of its consecutive city pairs.
//!
//! # Features
//!
//! - Distance tables over any hashable city label, built in code or loaded
//!   from an edge-list file
//! - Random seeding, tournament selection, segment-preserving crossover and
//!   swap mutation, all driven by an explicit random source
//! - Per-generation reporting through [`genetic::GenerationObserver`]
//! - Parameter sweeps with CSV export
//!
//! # Example
//!
//! ```
//! use tsp_genetic::instance::DistanceTable;
//! use tsp_genetic::genetic::{GAConfig, GeneticAlgorithm};
//!
//! let mut table = DistanceTable::new();
//! table.set_cost('A', 'B', 1.0).unwrap();
//! table.set_cost('B', 'C', 1.0).unwrap();
//! table.set_cost('A', 'C', 5.0).unwrap();
//!
//! let config = GAConfig::new(10, 6, 0.3).with_seed(42);
//! let solution = GeneticAlgorithm::new(&table, config).run().unwrap();
//!
//! assert!(solution.cost >= 2.0);
//! println!("Solution cost: {:.2}", solution.cost);
//! ```

pub mod error;
pub mod instance;
pub mod solution;
pub mod genetic;
pub mod benchmark;

pub use error::{Result, TspError};
pub use instance::{City, DistanceTable};
pub use solution::Solution;
