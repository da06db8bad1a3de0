//! Player capability and the agents that implement it

use std::cell::RefCell;
use std::io::{BufRead, Write};

use noughts_nn::NeuralNetwork;
use rand::Rng;

use crate::board::CELLS;
use crate::error::CoreError;

/// Board seen from the acting player: own +1, opponent -1, empty 0
pub type Perspective = [f64; CELLS];

/// One score per cell, higher = more preferred
pub type Preferences = [f64; CELLS];

/// Anything that can choose a move.
///
/// The game engine only ever asks for a full preference vector; it picks the
/// best-ranked legal cell itself.
pub trait Player {
    fn get_move(&self, perspective: &Perspective) -> Preferences;
}

// ============================================================================
// NEURAL AGENT
// ============================================================================

/// Player driven by a 9 -> ... -> 9 network
#[derive(Clone, Debug, PartialEq)]
pub struct NeuralAgent {
    network: NeuralNetwork,
}

impl NeuralAgent {
    /// Random network with the given hidden layer widths
    pub fn random<R: Rng + ?Sized>(hidden_layers: &[usize], rng: &mut R) -> Result<Self, CoreError> {
        let mut layer_sizes = Vec::with_capacity(hidden_layers.len() + 2);
        layer_sizes.push(CELLS);
        layer_sizes.extend_from_slice(hidden_layers);
        layer_sizes.push(CELLS);

        let network = NeuralNetwork::random(&layer_sizes, rng)?;
        Ok(Self { network })
    }

    /// Wrap an existing network; it must read and score the nine cells
    pub fn from_network(network: NeuralNetwork) -> Result<Self, CoreError> {
        if network.input_width() != CELLS || network.output_width() != CELLS {
            return Err(CoreError::IncompatibleNetwork {
                inputs: network.input_width(),
                outputs: network.output_width(),
            });
        }
        Ok(Self { network })
    }

    pub fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut NeuralNetwork {
        &mut self.network
    }
}

impl Player for NeuralAgent {
    fn get_move(&self, perspective: &Perspective) -> Preferences {
        let output = self.network.forward(perspective);
        std::array::from_fn(|i| output[i])
    }
}

// ============================================================================
// SCRIPTED AGENT
// ============================================================================

/// Player with a fixed order of preference, regardless of the board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedAgent {
    order: [usize; CELLS],
}

impl ScriptedAgent {
    /// `order` lists every cell once, most preferred first.
    ///
    /// # Panics
    /// Panics if `order` is not a permutation of 0..9.
    pub fn new(order: [usize; CELLS]) -> Self {
        let mut seen = [false; CELLS];
        for &cell in &order {
            assert!(cell < CELLS && !seen[cell], "order must be a permutation of 0..9: {:?}", order);
            seen[cell] = true;
        }
        Self { order }
    }

    /// Centre first, then the remaining cells in index order
    pub fn center_first() -> Self {
        Self::new([4, 0, 1, 2, 3, 5, 6, 7, 8])
    }

    pub fn order(&self) -> &[usize; CELLS] {
        &self.order
    }
}

impl Player for ScriptedAgent {
    fn get_move(&self, _perspective: &Perspective) -> Preferences {
        let mut preferences = [0.0; CELLS];
        for (rank, &cell) in self.order.iter().enumerate() {
            preferences[cell] = (CELLS - rank) as f64;
        }
        preferences
    }
}

// ============================================================================
// MANUAL AGENT
// ============================================================================

/// Interactive player: prompts for a cell index per move.
///
/// Showing the board is left to the caller, see [`crate::Game::play_verbose`].
pub struct ManualAgent<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl<R: BufRead, W: Write> ManualAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input.into_inner(), self.output.into_inner())
    }

    /// Read until a free cell is named; `None` once the input is exhausted
    fn read_cell(&self, perspective: &Perspective) -> Option<usize> {
        let mut input = self.input.borrow_mut();
        let mut output = self.output.borrow_mut();
        loop {
            // Prompt failures only lose the prompt text; reading still decides the move
            let _ = write!(output, "Your move (0-8): ");
            let _ = output.flush();

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            match line.trim().parse::<usize>() {
                Ok(cell) if cell < CELLS && perspective[cell] == 0.0 => return Some(cell),
                Ok(cell) if cell < CELLS => {
                    let _ = writeln!(output, "  Cell {} is taken. Please try again.", cell);
                }
                _ => {
                    let _ = writeln!(output, "  Invalid cell. Please enter a number from 0 to 8.");
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Player for ManualAgent<R, W> {
    fn get_move(&self, perspective: &Perspective) -> Preferences {
        let mut preferences = [0.0; CELLS];
        match self.read_cell(perspective) {
            Some(cell) => preferences[cell] = 1.0,
            None => tracing::warn!("Manual input exhausted, falling back to the last free cell"),
        }
        preferences
    }
}
