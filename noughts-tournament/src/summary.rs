//! Per-generation reporting
//!
//! Level 4 - Utilities

use std::fmt;

use noughts_core::PlayerContainer;
use serde::Serialize;

/// Fitness of one individual, tagged with its container index
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FitnessEntry {
    pub fitness: f64,
    pub index: usize,
}

impl<P> From<&PlayerContainer<P>> for FitnessEntry {
    fn from(container: &PlayerContainer<P>) -> Self {
        Self {
            fitness: container.fitness(),
            index: container.index,
        }
    }
}

/// Statistics for one generation, taken after the round-robin
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub generation: usize,
    pub min: FitnessEntry,
    /// Entry at position N/2 of the sorted population
    pub median: FitnessEntry,
    pub max: FitnessEntry,
    /// Fitness a player earns by tying every round-robin game
    pub max_possible: usize,
    /// Gauntlet result of the generation's best; `None` without an earlier champion
    pub hall_of_fame_percent: Option<f64>,
}

impl GenerationSummary {
    /// Summarise a population sorted ascending by fitness.
    ///
    /// Returns `None` for an empty population.
    pub fn from_sorted<P>(
        generation: usize,
        population: &[PlayerContainer<P>],
        hall_of_fame_percent: Option<f64>,
    ) -> Option<Self> {
        let n = population.len();
        Some(Self {
            generation,
            min: population.first()?.into(),
            median: population.get(n / 2)?.into(),
            max: population.last()?.into(),
            max_possible: 2 * (n - 1),
            hall_of_fame_percent,
        })
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gen: {:3}", self.generation)?;
        for (label, entry) in [("Min", &self.min), ("Median", &self.median), ("Max", &self.max)] {
            write!(f, ",   {}: {:<6.1} [i={:<3}]", label, entry.fitness, entry.index)?;
        }
        write!(f, ",   Max possible: {:4}", self.max_possible)?;
        match self.hall_of_fame_percent {
            Some(percent) => write!(f, ",   Win vs HOF: {:.2}%", percent),
            None => write!(f, ",   Win vs HOF: n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(fitness: &[f64]) -> Vec<PlayerContainer<()>> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut c = PlayerContainer::new((), i * 10);
                c.add_to_fitness(f);
                c
            })
            .collect()
    }

    #[test]
    fn test_from_sorted_picks_positions() {
        let population = population(&[0.0, 1.0, 2.5, 4.0, 7.5]);
        let summary = GenerationSummary::from_sorted(3, &population, Some(50.0)).unwrap();

        assert_eq!(summary.min, FitnessEntry { fitness: 0.0, index: 0 });
        assert_eq!(summary.median, FitnessEntry { fitness: 2.5, index: 20 });
        assert_eq!(summary.max, FitnessEntry { fitness: 7.5, index: 40 });
        assert_eq!(summary.max_possible, 8);
    }

    #[test]
    fn test_median_uses_upper_middle() {
        let population = population(&[1.0, 2.0, 3.0, 4.0]);
        let summary = GenerationSummary::from_sorted(0, &population, None).unwrap();
        assert_eq!(summary.median.fitness, 3.0);
    }

    #[test]
    fn test_empty_population() {
        assert!(GenerationSummary::from_sorted::<()>(0, &[], None).is_none());
    }

    #[test]
    fn test_display_format() {
        let population = population(&[0.0, 2.0, 3.5]);
        let summary = GenerationSummary::from_sorted(7, &population, Some(62.5)).unwrap();
        assert_eq!(
            summary.to_string(),
            "Gen:   7,   Min: 0.0    [i=0  ],   Median: 2.0    [i=10 ],   Max: 3.5    [i=20 ],   \
             Max possible:    4,   Win vs HOF: 62.50%"
        );

        let first = GenerationSummary::from_sorted(0, &population, None).unwrap();
        assert!(first.to_string().ends_with("Win vs HOF: n/a"));
    }
}
