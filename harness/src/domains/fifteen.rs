//! The 15-puzzle: 4x4 sliding tiles, unit move costs.
//!
//! The heuristic is the Manhattan-distance sum over placed tiles, which
//! is consistent, so the engine never reopens on this domain. A board
//! packs into exactly one key word (16 tiles at 4 bits each).

use wayfinder_kernel::packed::{KeyWriter, PackedKey};
use wayfinder_search::contract::SearchDomainV1;

use super::DomainError;

const SIDE: u8 = 4;
const CELLS: usize = 16;
const TILE_BITS: u32 = 4;

/// Direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMove {
    Up,
    Down,
    Left,
    Right,
}

impl TileMove {
    const ALL: [TileMove; 4] = [TileMove::Up, TileMove::Down, TileMove::Left, TileMove::Right];

    fn opposite(self) -> TileMove {
        match self {
            TileMove::Up => TileMove::Down,
            TileMove::Down => TileMove::Up,
            TileMove::Left => TileMove::Right,
            TileMove::Right => TileMove::Left,
        }
    }
}

/// A board: tile values in row-major order, 0 for the blank.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    tiles: [u8; CELLS],
    blank: u8,
}

impl Board {
    fn from_tiles(tiles: [u8; CELLS]) -> Result<Self, DomainError> {
        let mut seen = [false; CELLS];
        let mut blank = None;
        for (index, &tile) in tiles.iter().enumerate() {
            let Some(slot) = seen.get_mut(tile as usize) else {
                return Err(DomainError::InvalidInstance {
                    detail: format!("tile value {tile} out of range"),
                });
            };
            if *slot {
                return Err(DomainError::InvalidInstance {
                    detail: format!("tile value {tile} appears twice"),
                });
            }
            *slot = true;
            if tile == 0 {
                blank = Some(index as u8);
            }
        }
        // A full permutation of 0..16 always contains the blank.
        let blank = blank.ok_or_else(|| DomainError::InvalidInstance {
            detail: "no blank tile".to_string(),
        })?;
        Ok(Self { tiles, blank })
    }

    #[must_use]
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// Where the blank lands for `op`, if it stays on the board.
    fn blank_target(&self, op: TileMove) -> Option<u8> {
        let row = self.blank / SIDE;
        let col = self.blank % SIDE;
        match op {
            TileMove::Up if row > 0 => Some(self.blank - SIDE),
            TileMove::Down if row + 1 < SIDE => Some(self.blank + SIDE),
            TileMove::Left if col > 0 => Some(self.blank - 1),
            TileMove::Right if col + 1 < SIDE => Some(self.blank + 1),
            _ => None,
        }
    }
}

/// A 15-puzzle instance defined by its start board. The goal is the
/// standard ordering 1..15 with the blank in the last cell.
pub struct FifteenPuzzle {
    start: Board,
}

impl FifteenPuzzle {
    /// Build an instance from a row-major tile permutation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInstance`] unless `tiles` is a
    /// permutation of `0..16`.
    pub fn new(tiles: [u8; CELLS]) -> Result<Self, DomainError> {
        Ok(Self {
            start: Board::from_tiles(tiles)?,
        })
    }

    /// The solved board.
    #[must_use]
    pub fn goal_board() -> Board {
        let mut tiles = [0u8; CELLS];
        for (index, tile) in tiles.iter_mut().enumerate().take(CELLS - 1) {
            *tile = index as u8 + 1;
        }
        Board {
            tiles,
            blank: (CELLS - 1) as u8,
        }
    }

    /// Parity test: on an even-width board a permutation is solvable iff
    /// the inversion count plus the blank's row from the bottom (1-based)
    /// is odd.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let tiles = &self.start.tiles;
        let mut inversions = 0u32;
        for i in 0..CELLS {
            for j in (i + 1)..CELLS {
                if tiles[i] != 0 && tiles[j] != 0 && tiles[i] > tiles[j] {
                    inversions += 1;
                }
            }
        }
        let blank_row_from_bottom = u32::from(SIDE - self.start.blank / SIDE);
        (inversions + blank_row_from_bottom) % 2 == 1
    }

    fn manhattan(board: &Board) -> f64 {
        let mut total = 0u32;
        for (index, &tile) in board.tiles.iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let index = index as u8;
            let home = tile - 1;
            total += u32::from((index / SIDE).abs_diff(home / SIDE))
                + u32::from((index % SIDE).abs_diff(home % SIDE));
        }
        f64::from(total)
    }
}

impl SearchDomainV1 for FifteenPuzzle {
    type State = Board;
    type Operator = TileMove;

    fn initial_state(&self) -> Board {
        self.start.clone()
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == Self::goal_board()
    }

    fn num_operators(&self, state: &Board) -> usize {
        TileMove::ALL
            .iter()
            .filter(|&&op| state.blank_target(op).is_some())
            .count()
    }

    fn operator(&self, state: &Board, index: usize) -> TileMove {
        TileMove::ALL
            .into_iter()
            .filter(|&op| state.blank_target(op).is_some())
            .nth(index)
            .unwrap_or_else(|| panic!("operator index {index} out of range"))
    }

    fn apply(&self, state: &Board, op: TileMove) -> Board {
        let target = state
            .blank_target(op)
            .unwrap_or_else(|| panic!("inapplicable move {op:?}"));
        let mut next = state.clone();
        next.tiles.swap(next.blank as usize, target as usize);
        next.blank = target;
        next
    }

    fn operator_cost(&self, _state: &Board, _parent: &Board, _op: TileMove) -> f64 {
        1.0
    }

    fn reverse(&self, _state: &Board, op: TileMove) -> Option<TileMove> {
        Some(op.opposite())
    }

    fn pack(&self, state: &Board) -> PackedKey {
        let mut w = KeyWriter::new();
        for &tile in &state.tiles {
            w.push(u64::from(tile), TILE_BITS);
        }
        w.finish()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn unpack(&self, key: &PackedKey) -> Board {
        let mut r = key.reader();
        let mut tiles = [0u8; CELLS];
        let mut blank = 0u8;
        for (index, tile) in tiles.iter_mut().enumerate() {
            *tile = r.take(TILE_BITS) as u8;
            if *tile == 0 {
                blank = index as u8;
            }
        }
        Board { tiles, blank }
    }

    fn h(&self, state: &Board) -> f64 {
        Self::manhattan(state)
    }
}
