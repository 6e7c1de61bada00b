//! Shortest-path solving and move encoding over an occupancy grid.

use std::collections::VecDeque;

use crate::direction::Direction;
use crate::grid::{GridPos, OccupancyGrid};

/// A solved maze: grid positions from start to end inclusive, and the same
/// walk as one direction per step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub path: Vec<GridPos>,
    pub moves: Vec<Direction>,
}

impl Solution {
    /// Moves as wire codes (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST).
    pub fn move_codes(&self) -> Vec<u8> {
        self.moves.iter().map(|&dir| dir.into()).collect()
    }
}

/// Breadth-first search from `start` to `end`.
///
/// Neighbors are expanded North, East, South, West and each position is
/// enqueued at most once, so the returned path is the first shortest path in
/// that order. Returns an empty path if `end` is unreachable or either
/// endpoint is blocked.
pub fn solve_bfs(grid: &OccupancyGrid, start: GridPos, end: GridPos) -> Vec<GridPos> {
    if !grid.is_passable(start) || !grid.is_passable(end) {
        return Vec::new();
    }

    let (rows, cols) = (grid.rows(), grid.cols());
    // parent[idx] is the position that first enqueued idx
    let mut parent: Vec<Option<GridPos>> = vec![None; rows * cols];
    let mut seen = vec![false; rows * cols];
    let mut queue = VecDeque::from([start]);
    seen[start.0 * cols + start.1] = true;

    while let Some(pos) = queue.pop_front() {
        if pos == end {
            return walk_back(&parent, cols, start, end);
        }

        for dir in Direction::ALL {
            let Some(next) = dir.step(pos, rows, cols) else {
                continue;
            };
            let idx = next.0 * cols + next.1;
            if !seen[idx] && grid.is_passable(next) {
                seen[idx] = true;
                parent[idx] = Some(pos);
                queue.push_back(next);
            }
        }
    }

    Vec::new()
}

fn walk_back(parent: &[Option<GridPos>], cols: usize, start: GridPos, end: GridPos) -> Vec<GridPos> {
    let mut path = vec![end];
    let mut pos = end;
    while pos != start {
        match parent[pos.0 * cols + pos.1] {
            Some(prev) => {
                path.push(prev);
                pos = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Convert a path to uncompressed moves, one direction per step.
///
/// A path shorter than two positions yields no moves.
pub fn path_to_moves(path: &[GridPos]) -> Vec<Direction> {
    path.windows(2)
        .map(|pair| {
            let dr = pair[1].0 as i64 - pair[0].0 as i64;
            let dc = pair[1].1 as i64 - pair[0].1 as i64;
            match (dr, dc) {
                (-1, _) => Direction::North,
                (1, _) => Direction::South,
                (_, 1) => Direction::East,
                _ => Direction::West,
            }
        })
        .collect()
}

/// Replay typed moves from `start`, returning every visited position
/// including `start`. Returns `None` if a move steps below row or column 0.
pub fn apply_moves(start: GridPos, moves: &[Direction]) -> Option<Vec<GridPos>> {
    let mut path = Vec::with_capacity(moves.len() + 1);
    path.push(start);
    let mut pos = start;
    for &dir in moves {
        let (dr, dc) = dir.delta();
        pos = (
            pos.0.checked_add_signed(dr as isize)?,
            pos.1.checked_add_signed(dc as isize)?,
        );
        path.push(pos);
    }
    Some(path)
}

/// Check raw move codes against a grid the way the circuit verifier does.
///
/// Rejects more than `max_moves` codes, codes above 3, steps out of bounds
/// and steps onto blocked positions. Moves after `end` is first reached are
/// ignored. When `start == end` the walk counts as complete before any move.
pub fn verify_moves(
    grid: &OccupancyGrid,
    moves: &[u8],
    start: GridPos,
    end: GridPos,
    max_moves: usize,
) -> bool {
    if moves.len() > max_moves || !grid.is_passable(start) {
        return false;
    }

    let mut pos = start;
    let mut reached = pos == end;

    for &code in moves {
        if reached {
            break;
        }
        let Ok(dir) = Direction::try_from(code) else {
            return false;
        };
        let Some(next) = dir.step(pos, grid.rows(), grid.cols()) else {
            return false;
        };
        if !grid.is_passable(next) {
            return false;
        }
        pos = next;
        reached = pos == end;
    }

    reached
}
