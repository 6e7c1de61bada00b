use std::collections::VecDeque;

use maze_core::{apply_moves, Direction, Maze, SimpleLCG};
use proptest::prelude::*;

/// Cells reachable from (0, 0) through removed walls.
fn reachable_cells(maze: &Maze) -> usize {
    let (rows, cols) = (maze.rows(), maze.cols());
    let mut seen = vec![false; rows * cols];
    let mut queue = VecDeque::from([(0usize, 0usize)]);
    seen[0] = true;
    let mut count = 0;

    while let Some((row, col)) = queue.pop_front() {
        count += 1;
        for dir in Direction::ALL {
            if maze.has_wall(row, col, dir) {
                continue;
            }
            let next = dir
                .step((row, col), rows, cols)
                .expect("carved wall points off the grid");
            if !seen[next.0 * cols + next.1] {
                seen[next.0 * cols + next.1] = true;
                queue.push_back(next);
            }
        }
    }
    count
}

fn dims() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=16, 1usize..=16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generator_stream_is_reproducible(seed in any::<u32>()) {
        let mut a = SimpleLCG::new(seed);
        let mut b = SimpleLCG::new(seed);
        for _ in 0..64 {
            prop_assert_eq!(a.next_f64(), b.next_f64());
            prop_assert_eq!(a.state(), b.state());
            prop_assert!(a.state() > 0);
        }
    }

    #[test]
    fn generation_is_deterministic((rows, cols) in dims(), seed in any::<u32>()) {
        let first = Maze::generate(rows, cols, Some(seed)).unwrap();
        let second = Maze::generate(rows, cols, Some(seed)).unwrap();
        prop_assert_eq!(first.to_binary_grid(), second.to_binary_grid());
        prop_assert_eq!(first.solve().unwrap(), second.solve().unwrap());
    }

    #[test]
    fn carved_passages_form_a_spanning_tree((rows, cols) in dims(), seed in any::<u32>()) {
        let maze = Maze::generate(rows, cols, Some(seed)).unwrap();
        // n - 1 edges plus full connectivity implies no cycles
        prop_assert_eq!(maze.passage_count(), rows * cols - 1);
        prop_assert_eq!(reachable_cells(&maze), rows * cols);
    }

    #[test]
    fn occupancy_grid_mirrors_walls((rows, cols) in dims(), seed in any::<u32>()) {
        let maze = Maze::generate(rows, cols, Some(seed)).unwrap();
        let grid = maze.to_binary_grid();
        prop_assert_eq!(grid.rows(), rows * 2 + 1);
        prop_assert_eq!(grid.cols(), cols * 2 + 1);

        for row in 0..rows {
            for col in 0..cols {
                let (gr, gc) = (row * 2 + 1, col * 2 + 1);
                prop_assert!(grid.is_passable((gr, gc)));
                prop_assert_eq!(grid.is_passable((gr, gc + 1)), !maze.has_wall(row, col, Direction::East));
                prop_assert_eq!(grid.is_passable((gr + 1, gc)), !maze.has_wall(row, col, Direction::South));
                prop_assert_eq!(grid.is_passable((gr - 1, gc)), !maze.has_wall(row, col, Direction::North));
                prop_assert_eq!(grid.is_passable((gr, gc - 1)), !maze.has_wall(row, col, Direction::West));
            }
        }

        for gr in (0..grid.rows()).step_by(2) {
            for gc in (0..grid.cols()).step_by(2) {
                prop_assert!(!grid.is_passable((gr, gc)), "lattice point ({}, {}) open", gr, gc);
            }
        }
    }

    #[test]
    fn every_maze_is_solvable((rows, cols) in dims(), seed in any::<u32>()) {
        let maze = Maze::generate(rows, cols, Some(seed)).unwrap();
        let (_, start, end) = maze.to_occupancy_grid();
        let solution = maze.solve().unwrap();

        prop_assert_eq!(start, (1, 1));
        prop_assert_eq!(end, (rows * 2 - 1, cols * 2 - 1));
        prop_assert_eq!(solution.path.first(), Some(&start));
        prop_assert_eq!(solution.path.last(), Some(&end));
        prop_assert_eq!(solution.moves.len(), solution.path.len() - 1);
    }

    #[test]
    fn moves_replay_the_path((rows, cols) in dims(), seed in any::<u32>()) {
        let maze = Maze::generate(rows, cols, Some(seed)).unwrap();
        let (grid, start, end) = maze.to_occupancy_grid();
        let solution = maze.solve().unwrap();

        let replayed = apply_moves(start, &solution.moves).unwrap();
        prop_assert_eq!(&replayed, &solution.path);
        let codes = solution.move_codes();
        prop_assert!(maze_core::verify_moves(&grid, &codes, start, end, codes.len()));
        if !codes.is_empty() {
            prop_assert!(!maze_core::verify_moves(&grid, &codes, start, end, codes.len() - 1));
        }
    }
}

#[test]
fn zero_seed_normalizes_to_one() {
    for (rows, cols) in [(1, 1), (4, 9), (20, 20)] {
        let zero = Maze::generate(rows, cols, Some(0)).unwrap();
        let one = Maze::generate(rows, cols, Some(1)).unwrap();
        assert_eq!(zero.to_binary_grid(), one.to_binary_grid());
        assert_eq!(zero.solve().unwrap(), one.solve().unwrap());
    }
}

#[test]
fn single_cell_maze() {
    let maze = Maze::generate(1, 1, Some(123)).unwrap();
    let (grid, start, end) = maze.to_occupancy_grid();

    assert_eq!(grid.to_rows(), vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]);
    assert_eq!(start, end);

    let solution = maze.solve().unwrap();
    assert_eq!(solution.path, vec![(1, 1)]);
    assert!(solution.moves.is_empty());
}

#[test]
fn known_solution_4x4_seed_42() {
    let maze = Maze::generate(4, 4, Some(42)).unwrap();
    assert_eq!(
        maze.to_binary_grid().to_rows(),
        vec![
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0, 1, 1, 1, 0],
            vec![0, 0, 0, 1, 0, 0, 0, 1, 0],
            vec![0, 1, 0, 1, 1, 1, 1, 1, 0],
            vec![0, 1, 0, 0, 0, 0, 0, 1, 0],
            vec![0, 1, 1, 1, 1, 1, 1, 1, 0],
            vec![0, 1, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 1, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
        ]
    );
    assert_eq!(
        maze.solve().unwrap().move_codes(),
        vec![1, 1, 2, 2, 1, 1, 1, 1, 2, 2, 3, 3, 3, 3, 3, 3, 2, 2, 1, 1, 1, 1, 1, 1]
    );
}

#[test]
fn known_solution_5x5_seed_33() {
    let maze = Maze::generate(5, 5, Some(33)).unwrap();
    assert_eq!(
        maze.solve().unwrap().move_codes(),
        vec![1, 1, 2, 2, 3, 3, 2, 2, 2, 2, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1]
    );
}
