//! Module for building and querying symmetric distance tables.
//!
//! A [`DistanceTable`] maps unordered pairs of distinct cities to a travel cost.
//! Tables are filled once through [`DistanceTable::set_cost`] (or loaded from an
//! edge-list file) and are read-only while the genetic algorithm runs.

use crate::error::{Result, TspError};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;

/// Identifier of a city.
///
/// Any cloneable, hashable and printable label works: `char`, `usize`, `String`...
pub trait City: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync {}

impl<T> City for T where T: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync {}

/// Symmetric table of travel costs between cities
#[derive(Debug, Clone)]
pub struct DistanceTable<C: City> {
    /// Cities in first-insertion order
    cities: Vec<C>,
    /// Position of each city in `cities`
    index: HashMap<C, usize>,
    /// Pairwise costs, `None` where no cost has been registered
    costs: Vec<Vec<Option<f64>>>,
}

impl<C: City> DistanceTable<C> {
    /// Create an empty table
    pub fn new() -> Self {
        DistanceTable {
            cities: Vec::new(),
            index: HashMap::new(),
            costs: Vec::new(),
        }
    }

    /// Build a table from `(city, other_city, cost)` triples
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, C, f64)>,
    {
        let mut table = DistanceTable::new();
        for (a, b, cost) in edges {
            table.set_cost(a, b, cost)?;
        }
        Ok(table)
    }

    /// Register the cost between two cities, in both directions.
    ///
    /// Unknown cities are added to the table. Setting an existing pair again
    /// overwrites the previous cost.
    pub fn set_cost(&mut self, city: C, other: C, cost: f64) -> Result<()> {
        if city == other {
            return Err(TspError::SelfDistance(city.to_string()));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(TspError::InvalidCost {
                from: city.to_string(),
                to: other.to_string(),
                cost,
            });
        }

        let i = self.intern(city);
        let j = self.intern(other);
        self.costs[i][j] = Some(cost);
        self.costs[j][i] = Some(cost);
        Ok(())
    }

    fn intern(&mut self, city: C) -> usize {
        if let Some(&idx) = self.index.get(&city) {
            return idx;
        }

        let idx = self.cities.len();
        self.cities.push(city.clone());
        self.index.insert(city, idx);

        for row in &mut self.costs {
            row.push(None);
        }
        self.costs.push(vec![None; idx + 1]);
        idx
    }

    /// Cities in the order they were first added
    pub fn cities(&self) -> &[C] {
        &self.cities
    }

    /// Number of cities
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn contains(&self, city: &C) -> bool {
        self.index.contains_key(city)
    }

    fn position(&self, city: &C) -> Result<usize> {
        self.index
            .get(city)
            .copied()
            .ok_or_else(|| TspError::UnknownCity(city.to_string()))
    }

    /// Cost of travelling between two cities
    #[inline]
    pub fn cost(&self, from: &C, to: &C) -> Result<f64> {
        let i = self.position(from)?;
        let j = self.position(to)?;
        self.costs[i][j].ok_or_else(|| TspError::MissingCost {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Cost of an ordered path.
    ///
    /// Sums the cost of every consecutive pair. The path is open: no leg from
    /// the last city back to the first is added.
    pub fn tour_cost(&self, tour: &[C]) -> Result<f64> {
        let mut cost = 0.0;
        for pair in tour.windows(2) {
            cost += self.cost(&pair[0], &pair[1])?;
        }
        Ok(cost)
    }

    /// Pairs of distinct cities with no registered cost
    pub fn missing_pairs(&self) -> Vec<(C, C)> {
        let n = self.cities.len();
        let mut missing = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                if self.costs[i][j].is_none() {
                    missing.push((self.cities[i].clone(), self.cities[j].clone()));
                }
            }
        }
        missing
    }

    /// Whether every pair of distinct cities has a cost
    pub fn is_complete(&self) -> bool {
        self.missing_pairs().is_empty()
    }
}

impl<C: City> Default for DistanceTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceTable<String> {
    /// Parse an edge list with one `CITY_A CITY_B COST` entry per line.
    ///
    /// Blank lines and anything after `#` are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = DistanceTable::new();

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 3 {
                return Err(TspError::Parse {
                    line: lineno + 1,
                    message: format!("expected `CITY CITY COST`, got {:?}", line),
                });
            }

            let cost: f64 = parts[2].parse().map_err(|_| TspError::Parse {
                line: lineno + 1,
                message: format!("invalid cost {:?}", parts[2]),
            })?;

            table.set_cost(parts[0].to_string(), parts[1].to_string(), cost)?;
        }

        Ok(table)
    }

    /// Load an edge-list table from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

impl FromStr for DistanceTable<String> {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Prints every registered cost, one row per city.
impl<C: City> fmt::Display for DistanceTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, city) in self.cities.iter().enumerate() {
            let entries: Vec<String> = self.costs[i]
                .iter()
                .enumerate()
                .filter_map(|(j, cost)| {
                    cost.map(|c| format!("[{} -> {} : {}]", city, self.cities[j], c))
                })
                .collect();
            writeln!(f, "{}", entries.join(" "))?;
        }
        Ok(())
    }
}

/// The 9-city table shipped with the solver as its default instance
pub fn seed_table() -> Result<DistanceTable<String>> {
    const EDGES: [(u8, u8, f64); 36] = [
        (1, 2, 2.0), (1, 3, 11.0), (1, 4, 3.0), (1, 5, 18.0), (1, 6, 14.0),
        (1, 7, 20.0), (1, 8, 12.0), (1, 9, 5.0),
        (2, 3, 13.0), (2, 4, 10.0), (2, 5, 5.0), (2, 6, 3.0), (2, 7, 8.0),
        (2, 8, 20.0), (2, 9, 17.0),
        (3, 4, 5.0), (3, 5, 19.0), (3, 6, 21.0), (3, 7, 2.0), (3, 8, 5.0),
        (3, 9, 8.0),
        (4, 5, 6.0), (4, 6, 4.0), (4, 7, 12.0), (4, 8, 15.0), (4, 9, 1.0),
        (5, 6, 12.0), (5, 7, 6.0), (5, 8, 9.0), (5, 9, 7.0),
        (6, 7, 19.0), (6, 8, 7.0), (6, 9, 4.0),
        (7, 8, 21.0), (7, 9, 13.0),
        (8, 9, 6.0),
    ];

    DistanceTable::from_edges(
        EDGES
            .iter()
            .map(|&(a, b, cost)| (a.to_string(), b.to_string(), cost)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistanceTable<char> {
        DistanceTable::from_edges([('A', 'B', 1.0), ('B', 'C', 1.0), ('A', 'C', 5.0)]).unwrap()
    }

    #[test]
    fn test_cost_is_symmetric() {
        let table = triangle();
        assert_eq!(table.cost(&'A', &'C').unwrap(), 5.0);
        assert_eq!(table.cost(&'C', &'A').unwrap(), 5.0);
    }

    #[test]
    fn test_cities_in_insertion_order() {
        let mut table = DistanceTable::new();
        table.set_cost("x", "z", 1.0).unwrap();
        table.set_cost("y", "x", 2.0).unwrap();
        assert_eq!(table.cities(), &["x", "z", "y"]);
    }

    #[test]
    fn test_set_cost_overwrites() {
        let mut table = triangle();
        table.set_cost('C', 'A', 7.0).unwrap();
        assert_eq!(table.cost(&'A', &'C').unwrap(), 7.0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_rejects_self_distance_and_bad_cost() {
        let mut table = DistanceTable::new();
        assert!(matches!(table.set_cost(1, 1, 3.0), Err(TspError::SelfDistance(_))));
        assert!(matches!(table.set_cost(1, 2, -1.0), Err(TspError::InvalidCost { .. })));
        assert!(matches!(table.set_cost(1, 2, f64::NAN), Err(TspError::InvalidCost { .. })));
        assert!(table.is_empty());
    }

    #[test]
    fn test_tour_cost_is_open_path() {
        let table = triangle();
        assert_eq!(table.tour_cost(&['A', 'B', 'C']).unwrap(), 2.0);
        assert_eq!(table.tour_cost(&['B', 'A', 'C']).unwrap(), 6.0);
        assert_eq!(table.tour_cost(&['A']).unwrap(), 0.0);
    }

    #[test]
    fn test_reversed_tour_has_same_cost() {
        let table = seed_table().unwrap();
        let tour: Vec<String> = "386942175".chars().map(String::from).collect();
        let mut reversed = tour.clone();
        reversed.reverse();
        assert_eq!(
            table.tour_cost(&tour).unwrap(),
            table.tour_cost(&reversed).unwrap()
        );
    }

    #[test]
    fn test_missing_cost_fails() {
        let mut table = DistanceTable::new();
        table.set_cost('A', 'B', 1.0).unwrap();
        table.set_cost('B', 'C', 1.0).unwrap();

        assert!(matches!(
            table.tour_cost(&['A', 'C', 'B']),
            Err(TspError::MissingCost { .. })
        ));
        assert!(matches!(table.cost(&'A', &'Z'), Err(TspError::UnknownCity(_))));
        assert_eq!(table.missing_pairs(), vec![('A', 'C')]);
        assert!(!table.is_complete());
    }

    #[test]
    fn test_seed_table() {
        let table = seed_table().unwrap();
        assert_eq!(table.len(), 9);
        assert!(table.is_complete());
        assert_eq!(table.cost(&"1".to_string(), &"9".to_string()).unwrap(), 5.0);
        assert_eq!(table.cost(&"8".to_string(), &"9".to_string()).unwrap(), 6.0);
        // 5 + 7 + 4 + 1 + 10 + 2 + 20 + 6
        let tour: Vec<String> = "386942175".chars().map(String::from).collect();
        assert_eq!(table.tour_cost(&tour).unwrap(), 55.0);
    }

    #[test]
    fn test_parse_edge_list() {
        let text = "# triangle\nA B 1\n\nB C 1.5  # inline\nA C 5\n";
        let table: DistanceTable<String> = text.parse().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.cost(&"C".to_string(), &"B".to_string()).unwrap(), 1.5);
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = DistanceTable::<String>::parse("A B 1\nA C\n").unwrap_err();
        assert!(matches!(err, TspError::Parse { line: 2, .. }));

        let err = DistanceTable::<String>::parse("A B far\n").unwrap_err();
        assert!(matches!(err, TspError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_display_lists_both_directions() {
        let text = triangle().to_string();
        assert!(text.contains("[A -> B : 1]"));
        assert!(text.contains("[B -> A : 1]"));
        assert_eq!(text.lines().count(), 3);
    }
}
