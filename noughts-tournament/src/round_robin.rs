//! Round-robin play within one generation
//!
//! Level 2 - Phase-level implementation

use noughts_core::{play_game, Game, GameOutcome, Mark, Player, PlayerContainer};
use rayon::prelude::*;

/// Every unordered pair plays twice so each member starts once.
///
/// Fitness accumulates directly into the containers. With `parallel` the
/// games are played on the rayon pool and credited afterwards in pairing
/// order; the credited totals are the same either way.
pub fn round_robin<P: Player + Sync>(population: &mut [PlayerContainer<P>], parallel: bool) {
    let pairings = generate_round_robin_pairings(population.len());

    if parallel {
        let results = play_pairings_parallel(population, &pairings);
        for (i, j, [first, second]) in results {
            credit(population, i, j, &first);
            credit(population, j, i, &second);
        }
    } else {
        for (i, j) in pairings {
            let (a, b) = pair_mut(population, i, j);
            play_game(a, b);
            play_game(b, a);
        }
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Generate all pairings for round-robin
fn generate_round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairings.push((i, j));
        }
    }
    pairings
}

/// Play both games of every pairing without touching fitness
fn play_pairings_parallel<P: Player + Sync>(
    population: &[PlayerContainer<P>],
    pairings: &[(usize, usize)],
) -> Vec<(usize, usize, [GameOutcome; 2])> {
    pairings
        .par_iter()
        .map(|&(i, j)| {
            let a = &population[i].player;
            let b = &population[j].player;
            (i, j, [Game::new(a, b).play(), Game::new(b, a).play()])
        })
        .collect()
}

/// Credit a finished game where `x` moved first against `o`
fn credit<P>(population: &mut [PlayerContainer<P>], x: usize, o: usize, outcome: &GameOutcome) {
    population[x].add_to_fitness(outcome.reward(Mark::X));
    population[o].add_to_fitness(outcome.reward(Mark::O));
}

/// Two distinct members borrowed mutably at once; requires `i < j`
fn pair_mut<P>(
    population: &mut [PlayerContainer<P>],
    i: usize,
    j: usize,
) -> (&mut PlayerContainer<P>, &mut PlayerContainer<P>) {
    debug_assert!(i < j);
    let (left, right) = population.split_at_mut(j);
    (&mut left[i], &mut right[0])
}
