//! 4-connected grid pathfinding with unit move costs.
//!
//! States are `(x, y)` cells; the Manhattan distance to the goal is both
//! the cost-to-go and distance-to-go estimate (admissible and consistent
//! on unit-cost grids). All f-values are integral, so this domain also
//! exercises the bucket queue.

use wayfinder_kernel::packed::{bits_for, KeyWriter, PackedKey};
use wayfinder_search::contract::SearchDomainV1;

use super::DomainError;

/// One of the four cardinal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMove {
    North,
    South,
    West,
    East,
}

impl GridMove {
    const ALL: [GridMove; 4] = [
        GridMove::North,
        GridMove::South,
        GridMove::West,
        GridMove::East,
    ];

    fn opposite(self) -> GridMove {
        match self {
            GridMove::North => GridMove::South,
            GridMove::South => GridMove::North,
            GridMove::West => GridMove::East,
            GridMove::East => GridMove::West,
        }
    }
}

/// A rectangular grid instance with blocked cells.
pub struct GridDomain {
    width: u32,
    height: u32,
    blocked: Vec<bool>,
    start: (u32, u32),
    goal: (u32, u32),
}

impl GridDomain {
    /// Build an instance. `blocked` lists impassable cells.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInstance`] for a degenerate grid,
    /// out-of-bounds cells, or a blocked start/goal.
    pub fn new(
        width: u32,
        height: u32,
        blocked: &[(u32, u32)],
        start: (u32, u32),
        goal: (u32, u32),
    ) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidInstance {
                detail: format!("degenerate grid {width}x{height}"),
            });
        }
        let cells = width as usize * height as usize;
        let mut map = vec![false; cells];
        for &(x, y) in blocked {
            if x >= width || y >= height {
                return Err(DomainError::InvalidInstance {
                    detail: format!("blocked cell ({x}, {y}) outside {width}x{height}"),
                });
            }
            map[(y * width + x) as usize] = true;
        }
        for (label, (x, y)) in [("start", start), ("goal", goal)] {
            if x >= width || y >= height {
                return Err(DomainError::InvalidInstance {
                    detail: format!("{label} ({x}, {y}) outside {width}x{height}"),
                });
            }
            if map[(y * width + x) as usize] {
                return Err(DomainError::InvalidInstance {
                    detail: format!("{label} ({x}, {y}) is blocked"),
                });
            }
        }
        Ok(Self {
            width,
            height,
            blocked: map,
            start,
            goal,
        })
    }

    fn passable(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && !self.blocked[(y * self.width + x) as usize]
    }

    /// The cell `op` leads to from `(x, y)`, if it stays on the grid.
    fn target(&self, (x, y): (u32, u32), op: GridMove) -> Option<(u32, u32)> {
        let (nx, ny) = match op {
            GridMove::North => (x, y.checked_sub(1)?),
            GridMove::South => (x, y + 1),
            GridMove::West => (x.checked_sub(1)?, y),
            GridMove::East => (x + 1, y),
        };
        self.passable(nx, ny).then_some((nx, ny))
    }

    fn applicable(&self, state: (u32, u32)) -> impl Iterator<Item = GridMove> + '_ {
        GridMove::ALL
            .into_iter()
            .filter(move |&op| self.target(state, op).is_some())
    }
}

impl SearchDomainV1 for GridDomain {
    type State = (u32, u32);
    type Operator = GridMove;

    fn initial_state(&self) -> (u32, u32) {
        self.start
    }

    fn is_goal(&self, state: &(u32, u32)) -> bool {
        *state == self.goal
    }

    fn num_operators(&self, state: &(u32, u32)) -> usize {
        self.applicable(*state).count()
    }

    fn operator(&self, state: &(u32, u32), index: usize) -> GridMove {
        self.applicable(*state)
            .nth(index)
            .unwrap_or_else(|| panic!("operator index {index} out of range"))
    }

    fn apply(&self, state: &(u32, u32), op: GridMove) -> (u32, u32) {
        self.target(*state, op)
            .unwrap_or_else(|| panic!("inapplicable move {op:?} at {state:?}"))
    }

    fn operator_cost(&self, _state: &(u32, u32), _parent: &(u32, u32), _op: GridMove) -> f64 {
        1.0
    }

    fn reverse(&self, _state: &(u32, u32), op: GridMove) -> Option<GridMove> {
        Some(op.opposite())
    }

    fn pack(&self, &(x, y): &(u32, u32)) -> PackedKey {
        let mut w = KeyWriter::new();
        w.push(u64::from(x), bits_for(u64::from(self.width)));
        w.push(u64::from(y), bits_for(u64::from(self.height)));
        w.finish()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn unpack(&self, key: &PackedKey) -> (u32, u32) {
        let mut r = key.reader();
        let x = r.take(bits_for(u64::from(self.width))) as u32;
        let y = r.take(bits_for(u64::from(self.height))) as u32;
        (x, y)
    }

    fn h(&self, &(x, y): &(u32, u32)) -> f64 {
        f64::from(x.abs_diff(self.goal.0) + y.abs_diff(self.goal.1))
    }
}
