//! Cardinal directions and their wire encoding.
//!
//! The numeric codes are consumed by the circuit verifier and the frontend
//! renderer: NORTH=0, EAST=1, SOUTH=2, WEST=3.

use crate::error::MazeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// Candidate order used by both the carver and the solver.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// (row delta, col delta)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Index into a `[_; 4]` wall array.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Step from `(row, col)`, returning `None` when the step leaves `0..rows` x `0..cols`.
    pub fn step(self, (row, col): (usize, usize), rows: usize, cols: usize) -> Option<(usize, usize)> {
        let (dr, dc) = self.delta();
        let nr = row.checked_add_signed(dr as isize)?;
        let nc = col.checked_add_signed(dc as isize)?;
        (nr < rows && nc < cols).then_some((nr, nc))
    }
}

impl From<Direction> for u8 {
    fn from(dir: Direction) -> u8 {
        dir as u8
    }
}

impl TryFrom<u8> for Direction {
    type Error = MazeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::North),
            1 => Ok(Direction::East),
            2 => Ok(Direction::South),
            3 => Ok(Direction::West),
            other => Err(MazeError::InvalidDirection(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes() {
        let codes: Vec<u8> = Direction::ALL.iter().map(|&d| d.into()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
        assert_eq!(Direction::try_from(2), Ok(Direction::South));
        assert_eq!(Direction::try_from(4), Err(MazeError::InvalidDirection(4)));
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
            let (dr, dc) = dir.delta();
            assert_eq!(dir.opposite().delta(), (-dr, -dc));
        }
    }

    #[test]
    fn test_step_bounds() {
        assert_eq!(Direction::North.step((0, 0), 3, 3), None);
        assert_eq!(Direction::West.step((0, 0), 3, 3), None);
        assert_eq!(Direction::East.step((0, 2), 3, 3), None);
        assert_eq!(Direction::South.step((1, 1), 3, 3), Some((2, 1)));
    }
}
