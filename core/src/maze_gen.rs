//! Maze generation using Recursive Backtracker algorithm
//!
//! Algorithm: Recursive Backtracker (DFS with backtracking)
//! 1. Start at (0, 0), mark as visited
//! 2. While stack is not empty:
//!    - Get unvisited neighbors of current cell (North, East, South, West)
//!    - If neighbors exist:
//!      * Choose random neighbor
//!      * Remove wall between current and neighbor
//!      * Mark neighbor as visited, push to stack
//!    - Else: backtrack (pop from stack)
//!
//! Every random decision is drawn from a [`SimpleLCG`] passed in explicitly,
//! so a seed fully determines the carved maze.

use crate::direction::Direction;
use crate::error::MazeError;
use crate::grid::{GridPos, OccupancyGrid};
use crate::rng::SimpleLCG;
use crate::solver::{self, Solution};

/// A cell in the maze with walls in four directions
#[derive(Clone, Copy, Debug)]
struct Cell {
    walls: [bool; 4], // indexed by Direction::index()
    visited: bool,
}

impl Cell {
    fn new() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }
}

/// A perfect maze carved from a seed.
///
/// Start is always the top-left cell and end the bottom-right cell.
#[derive(Clone, Debug)]
pub struct Maze {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
    seed: u32,
}

impl Maze {
    /// Generate a maze using the recursive backtracker algorithm
    ///
    /// # Arguments
    /// * `rows` - Number of cell rows (not including walls)
    /// * `cols` - Number of cell columns (not including walls)
    /// * `seed` - RNG seed; a random one is drawn when `None`
    ///
    /// # Returns
    /// A generated maze with a unique path from (0,0) to (rows-1, cols-1),
    /// or `InvalidDimensions` if either dimension is zero or the grid size
    /// would overflow.
    pub fn generate(rows: usize, cols: usize, seed: Option<u32>) -> Result<Self, MazeError> {
        let grid_rows = rows.checked_mul(2).and_then(|r| r.checked_add(1));
        let grid_cols = cols.checked_mul(2).and_then(|c| c.checked_add(1));
        let fits = match (grid_rows, grid_cols) {
            (Some(gr), Some(gc)) => gr.checked_mul(gc).is_some(),
            _ => false,
        };
        if rows == 0 || cols == 0 || !fits {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }

        let seed = seed.unwrap_or_else(rand::random::<u32>);
        tracing::debug!(rows, cols, seed, "carving maze");

        let mut maze = Self::blank(rows, cols, seed);
        let mut rng = SimpleLCG::new(seed);
        maze.recursive_backtracker(&mut rng);

        tracing::debug!(seed, passages = maze.passage_count(), "maze carved");
        Ok(maze)
    }

    /// Every wall standing, nothing visited.
    fn blank(rows: usize, cols: usize, seed: u32) -> Self {
        Self {
            cells: vec![Cell::new(); rows * cols],
            rows,
            cols,
            seed,
        }
    }

    /// Recursive backtracker algorithm (iterative with explicit stack)
    ///
    /// `current` is tracked separately from the stack: on backtrack it takes
    /// the popped cell, which is re-examined on the next iteration before the
    /// following pop. Re-reading the stack top instead carves a different
    /// maze for some seeds, so this ordering is what keeps every consumer
    /// of the seed in agreement.
    fn recursive_backtracker(&mut self, rng: &mut SimpleLCG) {
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(self.rows * self.cols);

        let mut current = self.start();
        self.cell_mut(current).visited = true;
        stack.push(current);

        while !stack.is_empty() {
            let neighbors = self.unvisited_neighbors(current);

            if neighbors.is_empty() {
                if let Some(popped) = stack.pop() {
                    current = popped;
                }
                continue;
            }

            let dir = neighbors[rng.choice_index(neighbors.len())];
            if let Some(next) = self.remove_wall(current, dir) {
                self.cell_mut(next).visited = true;
                stack.push(next);
                current = next;
            }
        }
    }

    /// Directions to unvisited in-bounds neighbors, in North, East, South,
    /// West order.
    fn unvisited_neighbors(&self, pos: (usize, usize)) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| {
                dir.step(pos, self.rows, self.cols)
                    .is_some_and(|next| !self.cell(next).visited)
            })
            .collect()
    }

    /// Remove the wall between `pos` and its neighbor in `dir`, on both sides.
    ///
    /// Returns the neighbor, or `None` (and changes nothing) if `dir` points
    /// off the grid.
    fn remove_wall(&mut self, pos: (usize, usize), dir: Direction) -> Option<(usize, usize)> {
        let next = dir.step(pos, self.rows, self.cols)?;
        self.cell_mut(pos).walls[dir.index()] = false;
        self.cell_mut(next).walls[dir.opposite().index()] = false;
        Some(next)
    }

    fn cell(&self, (row, col): (usize, usize)) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    fn cell_mut(&mut self, (row, col): (usize, usize)) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The seed as supplied (0 is kept here even though the RNG runs as 1).
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Start cell, always (0, 0).
    pub fn start(&self) -> (usize, usize) {
        (0, 0)
    }

    /// End cell, always the opposite corner.
    pub fn end(&self) -> (usize, usize) {
        (self.rows - 1, self.cols - 1)
    }

    /// Whether the wall on side `dir` of cell `(row, col)` is present.
    /// Out-of-range cells report every wall present.
    pub fn has_wall(&self, row: usize, col: usize, dir: Direction) -> bool {
        if row >= self.rows || col >= self.cols {
            return true;
        }
        self.cell((row, col)).walls[dir.index()]
    }

    pub fn is_visited(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cell((row, col)).visited
    }

    /// Number of removed walls between adjacent cells.
    ///
    /// Only East and South sides are counted so each passage is seen once.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                usize::from(!cell.walls[Direction::East.index()])
                    + usize::from(!cell.walls[Direction::South.index()])
            })
            .sum()
    }

    /// Convert maze to binary grid representation
    ///
    /// Creates a grid where:
    /// - 0 = wall
    /// - 1 = path (walkable cell or open passage)
    ///
    /// For a maze with R rows and C columns:
    /// - Grid size is (R*2 + 1) × (C*2 + 1)
    /// - Each cell occupies a 3×3 block in the grid
    /// - Cell centers are at (row*2+1, col*2+1)
    pub fn to_binary_grid(&self) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new_blocked(self.rows * 2 + 1, self.cols * 2 + 1);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cell((row, col));

                // Cell center position in grid
                let gr = row * 2 + 1;
                let gc = col * 2 + 1;
                grid.open((gr, gc));

                // Open passages based on walls
                if !cell.walls[Direction::North.index()] {
                    grid.open((gr - 1, gc));
                }
                if !cell.walls[Direction::South.index()] {
                    grid.open((gr + 1, gc));
                }
                if !cell.walls[Direction::East.index()] {
                    grid.open((gr, gc + 1));
                }
                if !cell.walls[Direction::West.index()] {
                    grid.open((gr, gc - 1));
                }
            }
        }

        grid
    }

    /// Start and end positions in grid coordinates.
    pub fn grid_coordinates(&self) -> (GridPos, GridPos) {
        let (sr, sc) = self.start();
        let (er, ec) = self.end();
        ((sr * 2 + 1, sc * 2 + 1), (er * 2 + 1, ec * 2 + 1))
    }

    /// Binary grid plus its start and end positions.
    pub fn to_occupancy_grid(&self) -> (OccupancyGrid, GridPos, GridPos) {
        let (start, end) = self.grid_coordinates();
        (self.to_binary_grid(), start, end)
    }

    /// Encode and solve, treating an unreachable end as a generation defect.
    pub fn solve(&self) -> Result<Solution, MazeError> {
        let (grid, start, end) = self.to_occupancy_grid();
        let path = solver::solve_bfs(&grid, start, end);
        if path.is_empty() {
            tracing::error!(seed = self.seed, "carved maze has no solution");
            return Err(MazeError::Unsolvable { seed: self.seed });
        }
        let moves = solver::path_to_moves(&path);
        tracing::debug!(seed = self.seed, path_len = path.len(), moves = moves.len(), "maze solved");
        Ok(Solution { path, moves })
    }
}
