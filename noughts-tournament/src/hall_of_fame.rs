//! Hall of fame and the gauntlet against it
//!
//! Level 2 - Phase-level implementation

use noughts_core::{play_game, Player, PlayerContainer};

/// Snapshot of every generation's best individual, oldest first.
///
/// Entries are frozen copies; later breeding never touches them.
#[derive(Clone, Debug)]
pub struct HallOfFame<P> {
    entries: Vec<PlayerContainer<P>>,
}

impl<P> Default for HallOfFame<P> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<P: Clone> HallOfFame<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of `best`
    pub fn record(&mut self, best: &PlayerContainer<P>) {
        self.entries.push(best.clone());
    }
}

impl<P> HallOfFame<P> {
    pub fn entries(&self) -> &[PlayerContainer<P>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently recorded entry
    pub fn latest(&self) -> Option<&PlayerContainer<P>> {
        self.entries.last()
    }

    /// Every entry except the latest
    pub fn previous(&self) -> &[PlayerContainer<P>] {
        match self.entries.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

/// Play `best` twice against every earlier hall-of-fame entry.
///
/// The entry moves first in the opening game, `best` in the return game. Only
/// `best` is credited; its fitness is restored before returning. Returns the
/// fitness earned as a percentage of one point per game, or `None` when
/// there is no earlier entry.
pub fn play_hall_of_fame<P: Player + Clone>(
    best: &mut PlayerContainer<P>,
    hall_of_fame: &HallOfFame<P>,
) -> Option<f64> {
    let opponents = hall_of_fame.previous();
    if opponents.is_empty() {
        return None;
    }

    let saved = best.fitness();
    best.reset_fitness();

    for entry in opponents {
        // Work on a throwaway copy so the snapshot keeps its fitness
        let mut entry = entry.clone();
        play_game(&mut entry, best);
        play_game(best, &mut entry);
    }

    let percent = 100.0 * best.fitness() / (2 * opponents.len()) as f64;
    tracing::debug!(
        "Gauntlet: {:.1} fitness against {} hall-of-fame entries ({:.2}%)",
        best.fitness(),
        opponents.len(),
        percent
    );

    best.reset_fitness();
    best.add_to_fitness(saved);
    Some(percent)
}
