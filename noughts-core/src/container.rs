//! Fitness bookkeeping around a player

use std::cmp::Ordering;

/// A player plus the fitness it has earned this generation.
///
/// `index` is a stable tag assigned at creation and carried through breeding,
/// so summaries can tell individuals apart.
#[derive(Clone, Debug)]
pub struct PlayerContainer<P> {
    pub player: P,
    pub index: usize,
    fitness: f64,
}

impl<P> PlayerContainer<P> {
    pub fn new(player: P, index: usize) -> Self {
        Self {
            player,
            index,
            fitness: 0.0,
        }
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn add_to_fitness(&mut self, delta: f64) {
        self.fitness += delta;
    }

    pub fn reset_fitness(&mut self) {
        self.fitness = 0.0;
    }
}

/// Ascending by fitness; use with a stable sort so ties keep container order
pub fn compare_fitness<P>(a: &PlayerContainer<P>, b: &PlayerContainer<P>) -> Ordering {
    a.fitness.total_cmp(&b.fitness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_accumulates_and_resets() {
        let mut container = PlayerContainer::new((), 4);
        assert_eq!(container.fitness(), 0.0);
        container.add_to_fitness(1.5);
        container.add_to_fitness(1.0);
        assert_eq!(container.fitness(), 2.5);
        container.reset_fitness();
        assert_eq!(container.fitness(), 0.0);
        assert_eq!(container.index, 4);
    }

    #[test]
    fn test_sort_ascending_and_stable() {
        let mut population: Vec<_> = [2.0, 1.0, 2.0, 0.5]
            .into_iter()
            .enumerate()
            .map(|(i, f)| {
                let mut c = PlayerContainer::new((), i);
                c.add_to_fitness(f);
                c
            })
            .collect();
        population.sort_by(compare_fitness);
        let order: Vec<usize> = population.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![3, 1, 0, 2]);
    }
}
