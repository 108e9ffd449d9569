//! Fitness evaluation: the open-path cost of each tour, lower is fitter.

use crate::error::Result;
use crate::instance::{City, DistanceTable};
use ordered_float::OrderedFloat;
use rayon::prelude::*;

/// Cost of every tour in `tours`, aligned by index.
///
/// With `parallel` set the tours are costed on the rayon thread pool. Both
/// paths return the same vector. Any missing cost fails the whole evaluation.
pub fn evaluate<C: City, T: AsRef<[C]> + Sync>(
    table: &DistanceTable<C>,
    tours: &[T],
    parallel: bool,
) -> Result<Vec<f64>> {
    if parallel {
        tours
            .par_iter()
            .map(|tour| table.tour_cost(tour.as_ref()))
            .collect()
    } else {
        tours
            .iter()
            .map(|tour| table.tour_cost(tour.as_ref()))
            .collect()
    }
}

/// Index of the lowest cost; the first one wins ties
pub fn best_index(fitness: &[f64]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .min_by_key(|(_, &cost)| OrderedFloat(cost))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;

    fn square() -> DistanceTable<u8> {
        DistanceTable::from_edges([
            (0, 1, 1.0),
            (1, 2, 2.0),
            (2, 3, 3.0),
            (3, 0, 4.0),
            (0, 2, 5.0),
            (1, 3, 6.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_evaluate_sequential_and_parallel_agree() {
        let table = square();
        let tours = vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0], vec![0, 2, 1, 3]];

        let seq = evaluate(&table, &tours, false).unwrap();
        let par = evaluate(&table, &tours, true).unwrap();

        assert_eq!(seq, vec![6.0, 6.0, 13.0]);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_evaluate_propagates_missing_cost() {
        let mut table = DistanceTable::new();
        table.set_cost(0u8, 1, 1.0).unwrap();
        table.set_cost(1, 2, 1.0).unwrap();

        let tours = vec![vec![0, 1, 2], vec![1, 0, 2]];
        assert!(matches!(
            evaluate(&table, &tours, false),
            Err(TspError::MissingCost { .. })
        ));
        assert!(evaluate(&table, &tours, true).is_err());
    }

    #[test]
    fn test_best_index_first_occurrence() {
        assert_eq!(best_index(&[4.0, 2.0, 3.0, 2.0]), Some(1));
        assert_eq!(best_index(&[1.0]), Some(0));
        assert_eq!(best_index(&[]), None);
    }
}
