use serde::{Deserialize, Serialize};

/// `(row, col)` position in a [`crate::grid::Grid`].
pub type Coord = (usize, usize);

/// A binary automaton cell: `0` dead, `1` alive.
pub type Bit = u8;

/// Compartment of one epidemic cell.
///
/// The discriminants are the stable state codes `0..=4` reported by
/// [`crate::epidemic::Counts`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    Empty = 0,
    #[default]
    Susceptible = 1,
    Infected = 2,
    Recovered = 3,
    Dead = 4,
}

impl CellState {
    /// All states in code order.
    pub const ALL: [CellState; 5] = [
        CellState::Empty,
        CellState::Susceptible,
        CellState::Infected,
        CellState::Recovered,
        CellState::Dead,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for state in CellState::ALL {
            assert_eq!(CellState::from_code(state.code()), Some(state));
        }
        assert_eq!(CellState::from_code(5), None);
        assert_eq!(CellState::Infected.code(), 2);
    }
}
