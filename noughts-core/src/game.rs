//! Turn loop, move ranking and fitness credit

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Mark, CELLS};
use crate::container::PlayerContainer;
use crate::player::{Player, Preferences};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Earliest ply on which a line can be completed
const FIRST_WINNING_PLY: u32 = 5;

/// Fitness credited to each player for a full board without a line
pub const TIE_REWARD: f64 = 1.0;

/// Fitness credited for a win on `ply`: faster wins earn more, ply 9 earns 1.1
pub fn win_reward(ply: u32) -> f64 {
    1.0 + (10.0 - ply as f64) / 10.0
}

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    XWon,
    OWon,
    Tie,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }

    pub fn winner(self) -> Option<Mark> {
        match self {
            GameResult::XWon => Some(Mark::X),
            GameResult::OWon => Some(Mark::O),
            GameResult::InProgress | GameResult::Tie => None,
        }
    }
}

/// How a finished game ended
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameOutcome {
    pub result: GameResult,
    /// Plies played, shared across both players
    pub plies: u32,
    pub board: Board,
}

impl GameOutcome {
    /// Fitness earned by the player holding `mark`
    pub fn reward(&self, mark: Mark) -> f64 {
        match self.result {
            GameResult::Tie => TIE_REWARD,
            result if result.winner() == Some(mark) => win_reward(self.plies),
            _ => 0.0,
        }
    }
}

/// Cells ordered from most to least preferred.
///
/// `(score, index)` pairs are sorted ascending and read back to front, so on
/// equal scores the higher index ranks first. `-0.0` and `0.0` count as equal.
pub fn rank_moves(preferences: &Preferences) -> [usize; CELLS] {
    // Adding 0.0 turns -0.0 into 0.0 so total_cmp sees one zero
    let mut pairs: [(f64, usize); CELLS] = std::array::from_fn(|i| (preferences[i] + 0.0, i));
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    std::array::from_fn(|rank| pairs[CELLS - 1 - rank].1)
}

// ============================================================================
// GAME
// ============================================================================

/// One game of noughts and crosses. The first player holds X.
pub struct Game<'a> {
    board: Board,
    x: &'a dyn Player,
    o: &'a dyn Player,
    ply: u32,
    result: GameResult,
}

impl<'a> Game<'a> {
    pub fn new(x: &'a dyn Player, o: &'a dyn Player) -> Self {
        Self {
            board: Board::new(),
            x,
            o,
            ply: 0,
            result: GameResult::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Plies played so far
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Player to move next
    pub fn to_move(&self) -> Mark {
        if self.ply % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Play one ply and return the resulting state.
    ///
    /// Does nothing once the game is over.
    pub fn take_turn(&mut self) -> GameResult {
        if self.result.is_over() {
            return self.result;
        }

        let mark = self.to_move();
        self.ply += 1;

        let player = match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        };
        let ranking = rank_moves(&player.get_move(&self.board.perspective(mark)));
        let cell = match ranking.iter().find(|&&cell| self.board.get(cell) == Cell::Empty) {
            Some(&cell) => cell,
            None => unreachable!("ply {} found no free cell on an unfinished board", self.ply),
        };
        self.board.set(cell, mark.cell());
        tracing::trace!(ply = self.ply, %mark, cell, "move");

        if self.ply >= FIRST_WINNING_PLY && self.board.has_won() {
            self.result = match mark {
                Mark::X => GameResult::XWon,
                Mark::O => GameResult::OWon,
            };
        } else if self.ply as usize == CELLS && self.board.is_full() {
            self.result = GameResult::Tie;
        }
        self.result
    }

    /// Play until a player wins or the board is full
    pub fn play(mut self) -> GameOutcome {
        while !self.take_turn().is_over() {}
        self.outcome()
    }

    /// Like [`Game::play`], printing the board before every ply and the final result
    pub fn play_verbose(mut self, out: &mut dyn Write) -> io::Result<GameOutcome> {
        loop {
            write!(out, "{}", self.board)?;
            writeln!(out)?;
            if self.take_turn().is_over() {
                break;
            }
        }

        write!(out, "{}", self.board)?;
        match self.result.winner() {
            Some(mark) => writeln!(out, "Player {} has won the game!", mark)?,
            None => writeln!(out, "Tie game")?,
        }
        writeln!(out, "=============")?;
        Ok(self.outcome())
    }

    fn outcome(&self) -> GameOutcome {
        GameOutcome {
            result: self.result,
            plies: self.ply,
            board: self.board,
        }
    }
}

/// Play one game, `x` moving first, and credit both containers
pub fn play_game<X: Player, O: Player>(
    x: &mut PlayerContainer<X>,
    o: &mut PlayerContainer<O>,
) -> GameOutcome {
    let outcome = Game::new(&x.player, &o.player).play();
    x.add_to_fitness(outcome.reward(Mark::X));
    o.add_to_fitness(outcome.reward(Mark::O));
    outcome
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ScriptedAgent;

    #[test]
    fn test_rank_moves_orders_by_score() {
        let prefs = [0.1, 0.9, 0.5, -1.0, 0.0, 0.3, 0.2, 0.8, 0.4];
        assert_eq!(rank_moves(&prefs), [1, 7, 2, 8, 5, 6, 0, 4, 3]);
    }

    #[test]
    fn test_rank_moves_ties_prefer_higher_index() {
        let prefs = [0.5, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5];
        let ranking = rank_moves(&prefs);
        assert_eq!(&ranking[..3], &[8, 2, 0]);
        assert_eq!(&ranking[3..], &[7, 6, 5, 4, 3, 1]);
    }

    #[test]
    fn test_rank_moves_signed_zeros_tie() {
        let mut prefs = [0.0; CELLS];
        prefs[8] = -0.0;
        prefs[3] = -0.0;
        assert_eq!(rank_moves(&prefs), [8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_win_reward_decreases() {
        assert_eq!(win_reward(5), 1.5);
        assert!((win_reward(9) - 1.1).abs() < 1e-12);
        assert!(win_reward(6) < win_reward(5));
    }

    #[test]
    fn test_center_first_players_tie() {
        let mut x = PlayerContainer::new(ScriptedAgent::center_first(), 0);
        let mut o = PlayerContainer::new(ScriptedAgent::center_first(), 1);

        let outcome = play_game(&mut x, &mut o);

        assert_eq!(outcome.result, GameResult::Tie);
        assert_eq!(outcome.plies, 9);
        assert!(outcome.board.is_full());
        assert!(!outcome.board.has_won());
        assert_eq!(x.fitness(), 1.0);
        assert_eq!(o.fitness(), 1.0);
    }

    #[test]
    fn test_fast_win_credits_winner_only() {
        // X takes the top row; O fills the bottom of the board without blocking
        let mut x = PlayerContainer::new(ScriptedAgent::new([0, 1, 2, 3, 4, 5, 6, 7, 8]), 0);
        let mut o = PlayerContainer::new(ScriptedAgent::new([8, 7, 6, 5, 4, 3, 2, 1, 0]), 1);

        let outcome = play_game(&mut x, &mut o);

        assert_eq!(outcome.result, GameResult::XWon);
        assert_eq!(outcome.plies, 5);
        assert_eq!(x.fitness(), 1.5);
        assert_eq!(o.fitness(), 0.0);
    }

    #[test]
    fn test_second_player_can_win() {
        // X wanders along the right column's far side, O takes the left column
        let x = ScriptedAgent::new([1, 2, 5, 8, 4, 0, 3, 6, 7]);
        let o = ScriptedAgent::new([0, 3, 6, 4, 8, 7, 5, 2, 1]);
        let outcome = Game::new(&x, &o).play();
        assert_eq!(outcome.result, GameResult::OWon);
        assert_eq!(outcome.plies, 6);
        assert!((outcome.reward(Mark::O) - 1.4).abs() < 1e-12);
        assert_eq!(outcome.reward(Mark::X), 0.0);
    }

    #[test]
    fn test_take_turn_alternates_and_stops() {
        let x = ScriptedAgent::center_first();
        let o = ScriptedAgent::center_first();
        let mut game = Game::new(&x, &o);

        assert_eq!(game.to_move(), Mark::X);
        game.take_turn();
        assert_eq!(game.board().get(4), Cell::X);
        assert_eq!(game.to_move(), Mark::O);
        game.take_turn();
        assert_eq!(game.board().get(0), Cell::O);

        while !game.take_turn().is_over() {}
        assert_eq!(game.ply(), 9);
        // Further calls are no-ops
        assert_eq!(game.take_turn(), GameResult::Tie);
        assert_eq!(game.ply(), 9);
    }

    #[test]
    fn test_play_verbose_reports_result() {
        let x = ScriptedAgent::new([0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let o = ScriptedAgent::new([8, 7, 6, 5, 4, 3, 2, 1, 0]);
        let mut out = Vec::new();

        let outcome = Game::new(&x, &o).play_verbose(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(outcome.result, GameResult::XWon);
        assert!(text.contains("Player X has won the game!"));
        assert!(text.contains("| X | X | X |"));
    }
}
