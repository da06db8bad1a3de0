//! Bit-packed 3x3 board
//!
//! Nine cells, two bits each, packed into a `u32`. Cell `p` occupies bits
//! `2*(8-p)` and `2*(8-p)+1`, so cell 0 is the most significant pair.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of cells on the board
pub const CELLS: usize = 9;

/// The 8 winning lines, by cell index
pub const LINES: [[usize; 3]; 8] = [
    [0, 4, 8],
    [2, 4, 6],
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
];

/// Each winning line pre-shifted into X's pattern (first 8) and O's (last 8)
pub const WIN_MASKS: [u32; 16] = build_win_masks();

const fn shift_for(position: usize) -> u32 {
    ((8 - position) as u32) << 1
}

const fn build_win_masks() -> [u32; 16] {
    let mut masks = [0u32; 16];
    let mut line = 0;
    while line < LINES.len() {
        let mut k = 0;
        while k < 3 {
            let shift = shift_for(LINES[line][k]);
            masks[line] |= (Cell::X as u32) << shift;
            masks[line + 8] |= (Cell::O as u32) << shift;
            k += 1;
        }
        line += 1;
    }
    masks
}

// ============================================================================
// CORE TYPES
// ============================================================================

/// Contents of one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty = 0,
    X = 1,
    O = 2,
}

/// The symbol a player controls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Compact board state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board(u32);

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self(0)
    }

    /// Build a board from nine cell values
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        let mut board = Self::new();
        for (position, cell) in cells.into_iter().enumerate() {
            board.set(position, cell);
        }
        board
    }

    /// Raw packed value
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Read the cell at `position`.
    ///
    /// # Panics
    /// Panics if `position` is outside 0..=8.
    pub fn get(&self, position: usize) -> Cell {
        assert!(position < CELLS, "Invalid board position {}", position);
        match (self.0 >> shift_for(position)) & 3 {
            0 => Cell::Empty,
            1 => Cell::X,
            2 => Cell::O,
            bits => unreachable!("cell {} holds invalid value {}", position, bits),
        }
    }

    /// Overwrite the cell at `position`, leaving every other cell untouched.
    ///
    /// # Panics
    /// Panics if `position` is outside 0..=8.
    pub fn set(&mut self, position: usize, cell: Cell) {
        assert!(position < CELLS, "Invalid board position {}", position);
        let shift = shift_for(position);
        self.0 &= !(3u32 << shift);
        self.0 |= (cell as u32) << shift;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_full(&self) -> bool {
        (0..CELLS).all(|position| self.get(position) != Cell::Empty)
    }

    /// True if either player has completed a line
    pub fn has_won(&self) -> bool {
        WIN_MASKS.iter().any(|&mask| self.0 & mask == mask)
    }

    /// The player owning a completed line, if any
    pub fn winner(&self) -> Option<Mark> {
        let (x_masks, o_masks) = WIN_MASKS.split_at(8);
        if x_masks.iter().any(|&mask| self.0 & mask == mask) {
            Some(Mark::X)
        } else if o_masks.iter().any(|&mask| self.0 & mask == mask) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Board as seen by `mark`: own cells +1, opponent cells -1, empty 0
    pub fn perspective(&self, mark: Mark) -> [f64; CELLS] {
        let own = mark.cell();
        std::array::from_fn(|position| match self.get(position) {
            Cell::Empty => 0.0,
            cell if cell == own => 1.0,
            _ => -1.0,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+---+---+---+")?;
        for row in 0..3 {
            write!(f, "|")?;
            for col in 0..3 {
                let symbol = match self.get(3 * row + col) {
                    Cell::X => 'X',
                    Cell::O => 'O',
                    Cell::Empty => ' ',
                };
                write!(f, " {} |", symbol)?;
            }
            writeln!(f)?;
            writeln!(f, "+---+---+---+")?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
