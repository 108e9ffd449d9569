//! Tournament selection of parents.
//!
//! A parent is the fittest tour of a small random sample drawn with
//! replacement. Only the sampled tours are costed, so a selection never needs
//! a sort of the whole generation.

use super::fitness::{best_index, evaluate};
use crate::error::{Result, TspError};
use crate::instance::{City, DistanceTable};
use rand::Rng;

/// Number of tours drawn per tournament.
///
/// Defaults to a third of the population, and is never below one.
pub fn sample_size(population_size: usize, tournament_size: Option<usize>) -> usize {
    tournament_size.unwrap_or(population_size / 3).max(1)
}

/// Draw `sample_size` tours uniformly with replacement and return the fittest
pub fn select_parent<'a, C: City, R: Rng>(
    generation: &'a [Vec<C>],
    table: &DistanceTable<C>,
    sample_size: usize,
    rng: &mut R,
) -> Result<&'a [C]> {
    if generation.is_empty() {
        return Err(TspError::InvalidConfig("cannot select from an empty generation".into()));
    }

    let sample: Vec<&'a [C]> = (0..sample_size.max(1))
        .map(|_| generation[rng.gen_range(0..generation.len())].as_slice())
        .collect();

    fittest(&sample, table)
}

/// Lowest-cost tour of `sample`, the earliest one on ties
pub fn fittest<'a, C: City>(sample: &[&'a [C]], table: &DistanceTable<C>) -> Result<&'a [C]> {
    let fitness = evaluate(table, sample, false)?;
    best_index(&fitness)
        .map(|idx| sample[idx])
        .ok_or_else(|| TspError::InvalidConfig("empty tournament sample".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn triangle() -> DistanceTable<char> {
        DistanceTable::from_edges([('A', 'B', 1.0), ('B', 'C', 1.0), ('A', 'C', 5.0)]).unwrap()
    }

    fn generation() -> Vec<Vec<char>> {
        vec![
            vec!['A', 'C', 'B'], // 6
            vec!['A', 'B', 'C'], // 2
            vec!['B', 'A', 'C'], // 6
            vec!['C', 'B', 'A'], // 2
            vec!['C', 'A', 'B'], // 6
            vec!['B', 'C', 'A'], // 6
        ]
    }

    #[test]
    fn test_sample_size() {
        assert_eq!(sample_size(1, None), 1);
        assert_eq!(sample_size(2, None), 1);
        assert_eq!(sample_size(6, None), 2);
        assert_eq!(sample_size(10, None), 3);
        assert_eq!(sample_size(10, Some(7)), 7);
        assert_eq!(sample_size(10, Some(0)), 1);
    }

    #[test]
    fn test_fittest_of_full_generation_is_best() {
        let table = triangle();
        let population = generation();
        let sample: Vec<&[char]> = population.iter().map(|t| t.as_slice()).collect();

        // Two tours cost 2; the first one in sample order wins
        assert_eq!(fittest(&sample, &table).unwrap(), &['A', 'B', 'C']);
    }

    #[test]
    fn test_selected_parent_is_never_worse_than_worst() {
        let table = triangle();
        let population = generation();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let worst = 6.0;

        let k = sample_size(population.len(), None);

        for _ in 0..200 {
            let parent = select_parent(&population, &table, k, &mut rng).unwrap();
            assert!(population.iter().any(|t| t.as_slice() == parent));
            assert!(table.tour_cost(parent).unwrap() <= worst);
        }
    }

    #[test]
    fn test_large_tournament_favours_fit_tours() {
        let table = triangle();
        let population = generation();
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        let fit = (0..200)
            .filter(|_| {
                let parent = select_parent(&population, &table, 12, &mut rng).unwrap();
                table.tour_cost(parent).unwrap() == 2.0
            })
            .count();
        // P(no cost-2 tour among 12 draws) = (2/3)^12, about 0.8%
        assert!(fit > 180);
    }

    #[test]
    fn test_select_from_empty_generation_fails() {
        let table = triangle();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let empty: Vec<Vec<char>> = Vec::new();
        assert!(select_parent(&empty, &table, 1, &mut rng).is_err());
    }
}
