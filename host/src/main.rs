use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use host::{export_all, visualize, ExportError, MazeBundle, MazeConfig};
use maze_core::{MAX_MOVES, MAZE_COLS, MAZE_ROWS};

/// Deterministic maze generator and solver
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and export circuit, prover and frontend files
    Generate {
        /// Random seed for maze generation (random if not specified)
        seed: Option<u32>,

        /// Maze rows in cells
        #[arg(long, default_value_t = MAZE_ROWS)]
        rows: usize,

        /// Maze columns in cells (must equal rows)
        #[arg(long, default_value_t = MAZE_COLS)]
        cols: usize,

        /// Directory the exported files are written under
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Length the prover moves are zero-padded to
        #[arg(long, default_value_t = MAX_MOVES)]
        max_moves: usize,

        /// Skip ASCII visualization preview
        #[arg(long)]
        no_preview: bool,
    },

    /// Print the BFS solution of a seed's maze as JSON
    Solve {
        seed: u32,

        #[arg(long, default_value_t = MAZE_ROWS)]
        rows: usize,

        #[arg(long, default_value_t = MAZE_COLS)]
        cols: usize,

        /// Print grid, endpoints and path as well as the moves
        #[arg(long)]
        full: bool,
    },

    /// Check a moves file (JSON array of 0-3) against a seed's maze
    Verify {
        seed: u32,

        moves_file: PathBuf,

        #[arg(long, default_value_t = MAZE_ROWS)]
        rows: usize,

        #[arg(long, default_value_t = MAZE_COLS)]
        cols: usize,
    },
}

/// Largest moves file `verify` will read
const MAX_MOVES_FILE_BYTES: u64 = 10_000_000;

/// Upper bound on moves loaded from a file
const MAX_LOADED_MOVES: usize = 10_000;

/// Outcome of a command that ran to completion
enum Outcome {
    Done,
    PathRejected,
}

fn main() -> ExitCode {
    host::init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate {
            seed,
            rows,
            cols,
            output_dir,
            max_moves,
            no_preview,
        } => {
            let config = MazeConfig {
                rows,
                cols,
                seed,
                max_moves,
                output_dir,
            };
            generate_command(&config, !no_preview)
        }
        Command::Solve { seed, rows, cols, full } => solve_command(&fixed_seed(seed, rows, cols), full),
        Command::Verify {
            seed,
            moves_file,
            rows,
            cols,
        } => verify_command(&fixed_seed(seed, rows, cols), &moves_file),
    };

    match result {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::PathRejected) => ExitCode::from(2),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn fixed_seed(seed: u32, rows: usize, cols: usize) -> MazeConfig {
    MazeConfig {
        rows,
        cols,
        seed: Some(seed),
        ..MazeConfig::default()
    }
}

fn generate_command(config: &MazeConfig, preview: bool) -> Result<Outcome, ExportError> {
    println!("🎲 Generating {}x{} maze...", config.rows, config.cols);
    let start = Instant::now();

    let bundle = MazeBundle::build(config)?;
    println!("🌱 Seed: {}", bundle.seed);
    println!("  Generation time: {:.3}s", start.elapsed().as_secs_f64());
    println!();

    let written = export_all(&bundle, &config.output_dir, config.max_moves)?;
    for path in &written {
        println!("✅ Written {}", path.display());
    }
    println!("   Grid size: {}x{} (square)", bundle.grid.rows(), bundle.grid.cols());
    println!("   Start: ({0}, {0}), End: ({1}, {1})", bundle.start.0, bundle.end.0);
    println!("   Solution: {} positions, {} moves", bundle.path.len(), bundle.moves.len());

    if preview {
        println!();
        println!("Preview:");
        println!("{}", visualize(&bundle));
    }

    println!();
    println!("✨ To regenerate this exact maze, run: host generate {}", bundle.seed);
    Ok(Outcome::Done)
}

fn solve_command(config: &MazeConfig, full: bool) -> Result<Outcome, ExportError> {
    let bundle = MazeBundle::build(config)?;
    let json = if full {
        serde_json::to_string_pretty(&bundle)?
    } else {
        serde_json::to_string(&bundle.move_codes())?
    };
    println!("{}", json);
    Ok(Outcome::Done)
}

fn verify_command(config: &MazeConfig, moves_file: &Path) -> Result<Outcome, ExportError> {
    let moves = load_moves(moves_file)?;
    let bundle = MazeBundle::build(config)?;

    println!("📦 Loaded {} moves", moves.len());
    println!("  First 20 moves: {:?}", &moves[..20.min(moves.len())]);

    if bundle.verify(&moves, config.max_moves) {
        println!("✅ Path reaches the goal of maze {}", bundle.seed);
        Ok(Outcome::Done)
    } else {
        println!("❌ Path does NOT reach the goal of maze {}", bundle.seed);
        Ok(Outcome::PathRejected)
    }
}

fn load_moves(path: &Path) -> Result<Vec<u8>, ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let invalid = |reason: String| ExportError::MovesFile {
        path: path.to_path_buf(),
        reason,
    };

    // Check the size before reading so a huge file never lands in memory
    let size = fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_MOVES_FILE_BYTES {
        return Err(invalid(format!("file is {} bytes (max 10MB)", size)));
    }

    let json = fs::read_to_string(path).map_err(io_err)?;
    let moves: Vec<u8> = serde_json::from_str(&json)?;

    if moves.len() > MAX_LOADED_MOVES {
        return Err(invalid(format!(
            "too many moves: {} (max {})",
            moves.len(),
            MAX_LOADED_MOVES
        )));
    }

    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_moves(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("moves.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_moves() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_moves(dir.path(), "[1, 1, 2, 2]");
        assert_eq!(load_moves(&path).unwrap(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_load_moves_rejects_too_many() {
        let dir = tempfile::tempdir().unwrap();
        let json = serde_json::to_string(&vec![1u8; MAX_LOADED_MOVES + 1]).unwrap();
        let path = write_moves(dir.path(), &json);
        assert!(matches!(load_moves(&path), Err(ExportError::MovesFile { .. })));

        let json = serde_json::to_string(&vec![1u8; MAX_LOADED_MOVES]).unwrap();
        let path = write_moves(dir.path(), &json);
        assert_eq!(load_moves(&path).unwrap().len(), MAX_LOADED_MOVES);
    }

    #[test]
    fn test_load_moves_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let padding = " ".repeat(MAX_MOVES_FILE_BYTES as usize);
        let path = write_moves(dir.path(), &format!("[1{}]", padding));
        assert!(matches!(load_moves(&path), Err(ExportError::MovesFile { .. })));
    }

    #[test]
    fn test_load_moves_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_moves(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_verify_command_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixed_seed(7, 3, 3);

        let valid = write_moves(dir.path(), "[1, 1, 2, 2, 1, 1, 2, 2]");
        assert!(matches!(verify_command(&config, &valid), Ok(Outcome::Done)));

        let wrong = write_moves(dir.path(), "[2, 2]");
        assert!(matches!(verify_command(&config, &wrong), Ok(Outcome::PathRejected)));

        // Valid route, but longer than the configured bound
        let bounded = MazeConfig { max_moves: 7, ..config };
        assert!(matches!(verify_command(&bounded, &valid), Ok(Outcome::PathRejected)));
    }
}
