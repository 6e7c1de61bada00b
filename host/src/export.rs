//! Text artifacts consumed by the circuit, the prover and the frontend.
//!
//! Renderers are pure; [`export_all`] writes them to their conventional
//! locations under an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{ExportError, FrontendConfig, MazeBundle};

const HEADER: &str = "Auto-generated by host generate - do not edit manually!";

/// Moves listed in the maze config's sample comment
const SAMPLE_MOVES: usize = 30;

/// Bracketed list: `[1, 2, 3]`
fn list(values: &[u8]) -> String {
    let items: Vec<String> = values.iter().map(u8::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Noir source holding the maze grid and its endpoints.
pub fn render_maze_config(bundle: &MazeBundle) -> Result<String, ExportError> {
    let grid = &bundle.grid;
    grid.validate_endpoints(bundle.start, bundle.end)?;
    if grid.rows() > u8::MAX as usize {
        return Err(ExportError::GridTooLarge(grid.rows()));
    }

    let rows: Vec<String> = grid
        .to_rows()
        .iter()
        .map(|row| format!("        {}", list(row)))
        .collect();
    let grid_str = format!("[\n{}\n    ]", rows.join(",\n"));

    let moves = bundle.move_codes();
    let sample_len = moves.len().min(SAMPLE_MOVES);
    let ellipsis = if moves.len() > SAMPLE_MOVES { "..." } else { "" };

    Ok(format!(
        "// {HEADER}
// Seed: {seed}
// Maze size: {rows}x{cols} cells
// Grid size: {size}x{width} (includes walls)

pub global MAZE_SEED: u32 = {seed};
pub global MAZE_SIZE: u8 = {size};  // Square maze
pub global START_POS: u8 = {start};   // Both row and col start at {start}
pub global END_POS: u8 = {end};    // Both row and col end at {end}

pub global MAZE: [[u8; {width}]; {size}] = {grid_str};

// Test solution (generated by BFS)
// Path length: {path_len} positions
// Moves: {move_count} directions (uncompressed)
// Sample: {sample}{ellipsis}
",
        seed = bundle.seed,
        rows = bundle.rows,
        cols = bundle.cols,
        size = grid.rows(),
        width = grid.cols(),
        start = bundle.start.0,
        end = bundle.end.0,
        path_len = bundle.path.len(),
        move_count = moves.len(),
        sample = list(&moves[..sample_len]),
    ))
}

/// `Prover.toml` with the seed and moves padded to `max_moves`.
pub fn render_prover_inputs(bundle: &MazeBundle, max_moves: usize) -> Result<String, ExportError> {
    let padded = bundle.padded_moves(max_moves)?;
    let actual = bundle.moves.len();
    Ok(format!(
        "# {HEADER}
# Seed: {seed}
# {actual} actual moves + {padding} padding zeros = {max_moves} total

maze_seed = {seed}
moves = {moves}
",
        seed = bundle.seed,
        padding = max_moves - actual,
        moves = list(&padded),
    ))
}

/// Noir test module replaying the BFS solution.
pub fn render_test_solution(bundle: &MazeBundle, max_moves: usize) -> Result<String, ExportError> {
    let padded = bundle.padded_moves(max_moves)?;
    let actual = bundle.moves.len();
    Ok(format!(
        "// {HEADER}
// Seed: {seed}

use crate::main;
use crate::maze_config::MAZE_SEED;

#[test]
fn test_generated_solution() {{
    // BFS-generated solution: {actual} moves + {padding} padding zeros = {max_moves} total
    let moves = {moves};

    // This should pass if the circuit logic is correct
    main(moves, MAZE_SEED);
}}
",
        seed = bundle.seed,
        padding = max_moves - actual,
        moves = list(&padded),
    ))
}

/// Unpadded moves as a pretty JSON array.
pub fn render_moves_json(bundle: &MazeBundle) -> Result<String, ExportError> {
    let mut json = serde_json::to_string_pretty(&bundle.move_codes())?;
    json.push('\n');
    Ok(json)
}

/// `{seed, rows, cols}` for the frontend, which regenerates the maze itself.
pub fn render_frontend_config(bundle: &MazeBundle) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&FrontendConfig::from(bundle))?)
}

/// ASCII preview, two characters per grid position.
pub fn visualize(bundle: &MazeBundle) -> String {
    bundle
        .grid
        .to_rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|&cell| if cell == 0 { "██" } else { "  " })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Write every artifact under `out_dir`, returning the written paths.
///
/// Layout:
/// - `circuit-noir/src/maze_config.nr`
/// - `circuit-noir/Prover.toml`
/// - `circuit-noir/src/test_solutions.nr`
/// - `circuit-risczero/<seed>_moves.json`
/// - `src/maze_seed.json`
///
/// Everything is rendered before the first write, so a render failure
/// leaves the directory untouched.
pub fn export_all(bundle: &MazeBundle, out_dir: &Path, max_moves: usize) -> Result<Vec<PathBuf>, ExportError> {
    let noir = out_dir.join("circuit-noir");
    let files = [
        (noir.join("src").join("maze_config.nr"), render_maze_config(bundle)?),
        (noir.join("Prover.toml"), render_prover_inputs(bundle, max_moves)?),
        (noir.join("src").join("test_solutions.nr"), render_test_solution(bundle, max_moves)?),
        (
            out_dir.join("circuit-risczero").join(format!("{}_moves.json", bundle.seed)),
            render_moves_json(bundle)?,
        ),
        (out_dir.join("src").join("maze_seed.json"), render_frontend_config(bundle)?),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (path, contents) in files {
        write_file(&path, &contents)?;
        written.push(path);
    }
    Ok(written)
}
