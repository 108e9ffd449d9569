//! Permutation operators used to seed and breed tours.
//!
//! - [`generate_initial_population`]: independent random shuffles of the cities
//! - [`crossover`]: segment from one parent, remaining cities in the other
//!   parent's order
//! - [`mutate`]: swap two positions with a given probability
//!
//! Crossover and mutation both draw their positions from [`generate_bounds`],
//! which keeps the disturbed span to at most half the tour.
//!
//! Every operator takes the random source explicitly.

use crate::error::{Result, TspError};
use crate::instance::City;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Rejected draws tolerated before [`generate_bounds`] clamps its first draw
pub const MAX_BOUND_RETRIES: usize = 64;

/// Draw two positions `low < high` inside a sequence of length `len`.
///
/// `low` is drawn from `[0, len - 2]` and `high` from `[low + 1, len - 1]`.
/// While the span `high - low` exceeds `len / 2` both are redrawn, `low`
/// this time from the full `[0, len - 1]` range (a draw of `len - 1` leaves no
/// room for `high` and is discarded). After [`MAX_BOUND_RETRIES`] rejected
/// draws the first draw is clamped to a span of `len / 2`.
///
/// # Panics
/// Panics if `len < 2`.
pub fn generate_bounds<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    assert!(len >= 2, "bounds need a sequence of at least 2 elements");

    let max_span = len / 2;
    let first_low = rng.gen_range(0..=len - 2);
    let first_high = rng.gen_range(first_low + 1..=len - 1);

    if first_high - first_low <= max_span {
        return (first_low, first_high);
    }

    for _ in 0..MAX_BOUND_RETRIES {
        let low = rng.gen_range(0..len);
        if low == len - 1 {
            continue;
        }
        let high = rng.gen_range(low + 1..len);
        if high - low <= max_span {
            return (low, high);
        }
    }

    (first_low, first_low + max_span)
}

/// Build the seed generation: `population_size` random orderings of `cities`.
///
/// Tours are drawn independently and may repeat.
pub fn generate_initial_population<C: City, R: Rng>(
    cities: &[C],
    population_size: usize,
    rng: &mut R,
) -> Vec<Vec<C>> {
    (0..population_size)
        .map(|_| {
            let mut tour = cities.to_vec();
            tour.shuffle(rng);
            tour
        })
        .collect()
}

/// Combine two parents into one child.
///
/// The child keeps `parent_a` at positions `[low, high]`; the other positions
/// are filled, front to back, with the cities of `parent_b` that are not yet
/// in the child, in `parent_b`'s order.
pub fn crossover<C: City, R: Rng>(
    parent_a: &[C],
    parent_b: &[C],
    rng: &mut R,
) -> Result<Vec<C>> {
    if parent_a.len() != parent_b.len() {
        return Err(TspError::MalformedParents);
    }
    let (low, high) = generate_bounds(parent_a.len(), rng);
    crossover_segment(parent_a, parent_b, low, high)
}

/// Crossover with an explicit inherited segment `[low, high]`
pub fn crossover_segment<C: City>(
    parent_a: &[C],
    parent_b: &[C],
    low: usize,
    high: usize,
) -> Result<Vec<C>> {
    let n = parent_a.len();
    if parent_b.len() != n || low > high || high >= n {
        return Err(TspError::MalformedParents);
    }

    let in_a: HashSet<&C> = parent_a.iter().collect();
    let mut child: Vec<Option<C>> = vec![None; n];
    let mut placed: HashSet<&C> = HashSet::with_capacity(n);

    for i in low..=high {
        child[i] = Some(parent_a[i].clone());
        placed.insert(&parent_a[i]);
    }

    let mut remaining = (0..low).chain(high + 1..n);
    let mut open = n - (high - low + 1);

    for city in parent_b {
        if open == 0 {
            break;
        }
        if !in_a.contains(city) {
            return Err(TspError::MalformedParents);
        }
        if placed.insert(city) {
            match remaining.next() {
                Some(pos) => child[pos] = Some(city.clone()),
                None => return Err(TspError::MalformedParents),
            }
            open -= 1;
        }
    }

    child
        .into_iter()
        .collect::<Option<Vec<C>>>()
        .ok_or(TspError::MalformedParents)
}

/// Swap two positions of `tour` with probability `mutation_rate`.
///
/// One uniform draw in `[0, 1)` decides whether the mutation happens, so a
/// rate of `0.0` never mutates and a rate of `1.0` always does.
pub fn mutate<C, R: Rng>(mut tour: Vec<C>, mutation_rate: f64, rng: &mut R) -> Vec<C> {
    if rng.gen::<f64>() < mutation_rate {
        let (low, high) = generate_bounds(tour.len(), rng);
        tour.swap(low, high);
    }
    tour
}
