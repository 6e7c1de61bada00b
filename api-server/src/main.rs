use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use host::{ExportError, MazeBundle, MazeConfig};
use maze_core::{GridPos, MAZE_COLS, MAZE_ROWS};
use serde::{Deserialize, Serialize};

/// Largest rows/cols a request may ask for
const MAX_API_DIMENSION: usize = 64;

/// Upper bound on submitted moves
const MAX_API_MOVES: usize = 10_000;

const DEFAULT_BIND: &str = "0.0.0.0:8080";

// Request/Response types

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateMazeRequest {
    seed: Option<u32>,
    rows: Option<usize>,
    cols: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MazeView {
    seed: u32,
    rows: usize,
    cols: usize,
    grid: Vec<Vec<u8>>,
    start: GridPos,
    end: GridPos,
    moves: Vec<u8>,
}

impl From<MazeBundle> for MazeView {
    fn from(bundle: MazeBundle) -> Self {
        Self {
            seed: bundle.seed,
            rows: bundle.rows,
            cols: bundle.cols,
            grid: bundle.grid.to_rows(),
            start: bundle.start,
            end: bundle.end,
            moves: bundle.move_codes(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GenerateMazeResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    maze: Option<MazeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyPathRequest {
    seed: u32,
    moves: Vec<u8>,
    rows: Option<usize>,
    cols: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VerifyPathResponse {
    success: bool,
    is_valid: bool,
    maze_seed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Resolve requested dimensions, rejecting anything outside 1..=MAX_API_DIMENSION.
fn maze_config(seed: Option<u32>, rows: Option<usize>, cols: Option<usize>) -> Result<MazeConfig, String> {
    let rows = rows.unwrap_or(MAZE_ROWS);
    let cols = cols.unwrap_or(MAZE_COLS);
    if !(1..=MAX_API_DIMENSION).contains(&rows) || !(1..=MAX_API_DIMENSION).contains(&cols) {
        return Err(format!(
            "Maze dimensions must be between 1 and {} (got {}x{})",
            MAX_API_DIMENSION, rows, cols
        ));
    }
    Ok(MazeConfig {
        rows,
        cols,
        seed,
        ..MazeConfig::default()
    })
}

/// Configuration errors are the caller's fault; anything else is ours.
fn is_client_error(err: &ExportError) -> bool {
    matches!(err, ExportError::Maze(e) if e.is_configuration())
}

// API Handlers

/// POST /api/generate-maze
/// Generate a maze and its BFS solution
async fn generate_maze(req: web::Json<GenerateMazeRequest>) -> impl Responder {
    tracing::info!("Received generate-maze request: {:?}", req);

    let failure = |error: String| GenerateMazeResponse {
        success: false,
        maze: None,
        error: Some(error),
    };

    let config = match maze_config(req.seed, req.rows, req.cols) {
        Ok(config) => config,
        Err(e) => return HttpResponse::BadRequest().json(failure(e)),
    };

    match MazeBundle::build(&config) {
        Ok(bundle) => {
            tracing::info!("Generated maze for seed {} ({} moves)", bundle.seed, bundle.moves.len());
            HttpResponse::Ok().json(GenerateMazeResponse {
                success: true,
                maze: Some(bundle.into()),
                error: None,
            })
        }
        Err(e) if is_client_error(&e) => HttpResponse::BadRequest().json(failure(e.to_string())),
        Err(e) => {
            tracing::error!("Failed to generate maze: {}", e);
            HttpResponse::InternalServerError().json(failure(e.to_string()))
        }
    }
}

/// POST /api/verify-path
/// Replay a player's moves against the maze regenerated from its seed
async fn verify_path(req: web::Json<VerifyPathRequest>) -> impl Responder {
    tracing::info!(
        "Received verify-path request for maze seed: {}, moves: {}",
        req.seed,
        req.moves.len()
    );

    let failure = |error: String| VerifyPathResponse {
        success: false,
        is_valid: false,
        maze_seed: req.seed,
        error: Some(error),
    };

    if req.moves.len() > MAX_API_MOVES {
        return HttpResponse::BadRequest().json(failure(format!(
            "Too many moves: {} (max {})",
            req.moves.len(),
            MAX_API_MOVES
        )));
    }

    let config = match maze_config(Some(req.seed), req.rows, req.cols) {
        Ok(config) => config,
        Err(e) => return HttpResponse::BadRequest().json(failure(e)),
    };

    match MazeBundle::build(&config) {
        Ok(bundle) => {
            let is_valid = bundle.verify(&req.moves, config.max_moves);
            tracing::info!("Verified path for maze seed: {}, valid: {}", req.seed, is_valid);
            HttpResponse::Ok().json(VerifyPathResponse {
                success: true,
                is_valid,
                maze_seed: req.seed,
                error: None,
            })
        }
        Err(e) if is_client_error(&e) => HttpResponse::BadRequest().json(failure(e.to_string())),
        Err(e) => {
            tracing::error!("Failed to verify path: {}", e);
            HttpResponse::InternalServerError().json(failure(e.to_string()))
        }
    }
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "maze-api"
    }))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(1_048_576)) // 1MB limit
        .route("/health", web::get().to(health))
        .route("/api/generate-maze", web::post().to(generate_maze))
        .route("/api/verify-path", web::post().to(verify_path));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    host::init_tracing();

    tracing::info!("Starting Maze API Server");

    let bind_address = std::env::var("MAZE_API_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    tracing::info!("Binding to {}", bind_address);

    HttpServer::new(|| App::new().wrap(Cors::permissive()).configure(routes))
        .bind(bind_address)?
        .run()
        .await
}
