use tsp_genetic::genetic::operators::{crossover, generate_initial_population, mutate};
use tsp_genetic::genetic::{GAConfig, GenerationReport, GeneticAlgorithm, HistoryRecorder};
use tsp_genetic::instance::{seed_table, DistanceTable};
use tsp_genetic::solution::is_permutation_of;
use tsp_genetic::TspError;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn seeded_single_tour_matches_manual_sum() {
    let table = seed_table().unwrap();

    for seed in 0..5 {
        let mut reported = None;
        let solution = GeneticAlgorithm::new(&table, GAConfig::new(1, 1, 0.0).with_seed(seed))
            .run_with_observer(&mut |r: &GenerationReport<String>| {
                reported = Some((r.tours[0].clone(), r.fitness[0]));
            })
            .unwrap();

        let (tour, cost) = reported.unwrap();
        let mut manual = 0.0;
        for i in 0..tour.len() - 1 {
            manual += table.cost(&tour[i], &tour[i + 1]).unwrap();
        }

        assert_eq!(cost, manual);
        assert!(solution.is_complete(&table));
        assert_eq!(solution.cost, table.tour_cost(&solution.tour).unwrap());
    }
}

#[test]
fn triangle_optimum_is_two() {
    let mut table = DistanceTable::new();
    table.set_cost("A", "B", 1.0).unwrap();
    table.set_cost("B", "C", 1.0).unwrap();
    table.set_cost("A", "C", 5.0).unwrap();

    for seed in [1, 2, 3] {
        let mut history = HistoryRecorder::new();
        let solution = GeneticAlgorithm::new(&table, GAConfig::new(25, 30, 0.1).with_seed(seed))
            .run_with_observer(&mut history)
            .unwrap();

        assert!(history.best_costs().iter().all(|&c| c >= 2.0));
        assert_eq!(solution.cost, 2.0);
        assert_eq!(solution.tour[1], "B");
    }
}

#[test]
fn operators_preserve_permutations_over_many_generations() {
    let table = seed_table().unwrap();
    let cities = table.cities().to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let mut population = generate_initial_population(&cities, 10, &mut rng);
    for _ in 0..50 {
        population = population
            .iter()
            .zip(population.iter().rev())
            .map(|(a, b)| {
                let child = crossover(a, b, &mut rng).unwrap();
                mutate(child, 0.5, &mut rng)
            })
            .collect();

        assert_eq!(population.len(), 10);
        assert!(population.iter().all(|t| is_permutation_of(t, &cities)));
    }
}

#[test]
fn table_file_round_trip_through_engine() {
    let path = std::env::temp_dir().join("tsp_genetic_e2e_table.txt");
    std::fs::write(
        &path,
        "# four cities on a line\nw x 1\nx y 1\ny z 1\nw y 2\nx z 2\nw z 3\n",
    )
    .unwrap();

    let table = DistanceTable::<String>::from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(table.cities(), &["w", "x", "y", "z"]);
    let solution = GeneticAlgorithm::new(&table, GAConfig::new(30, 20, 0.3).with_seed(5))
        .run()
        .unwrap();

    assert!(solution.is_complete(&table));
    assert!(solution.cost >= 3.0);
}

#[test]
fn missing_file_is_io_error() {
    let result = DistanceTable::<String>::from_file("/nonexistent/tsp/table.txt");
    assert!(matches!(result, Err(TspError::Io(_))));
}
