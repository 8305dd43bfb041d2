// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Uses the `clap` crate
// to parse command line arguments; all business logic is
// delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `serve`   — runs the HTTP API
//   2. `train`   — fits the classifier on the stored examples
//   3. `predict` — classifies one grid from a JSON file
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::RwLock;

use commands::{Commands, PredictArgs, ServeArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "scribble-server",
    version,
    about = "Collect labelled 28x28 drawings, train a classifier, serve predictions."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve(args)   => run_serve(args).await,
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

/// Handles the `serve` subcommand: open the store, build the
/// shared state, and run the HTTP server until stopped.
async fn run_serve(args: ServeArgs) -> Result<()> {
    use crate::data::store::JsonlStore;
    use crate::server::{self, state::AppState, ServerConfig};

    let store = JsonlStore::open(&args.data_file)?;
    let state = AppState::new(store, (&args).into());

    let mut config = ServerConfig::default().with_address(args.address);
    if !args.cors_origins.is_empty() {
        config = config.with_cors_origins(args.cors_origins);
    }

    server::run(config, state).await
}

/// Handles the `train` subcommand.
fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;
    use crate::data::store::JsonlStore;

    tracing::info!("Training from record store '{}'", args.data_file);

    let store = RwLock::new(JsonlStore::open(&args.data_file)?);
    let use_case = TrainUseCase::new((&args).into());
    use_case.execute(&store)?;

    println!("Model trained and saved.");
    Ok(())
}

/// Handles the `predict` subcommand: read a 28x28 JSON array
/// from disk and print the predicted label.
fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let raw = std::fs::read_to_string(&args.image_file)
        .with_context(|| format!("Cannot read image file '{}'", args.image_file))?;
    let image: Vec<Vec<f32>> = serde_json::from_str(&raw)
        .with_context(|| format!("'{}' is not a JSON pixel grid", args.image_file))?;

    let use_case = PredictUseCase::new(args.model_dir);
    let outcome = use_case.execute(&image)?;

    println!(
        "Prediction: class {} -> '{}' (confidence {:.2}%)",
        outcome.prediction,
        outcome.label,
        outcome.confidence * 100.0,
    );
    Ok(())
}
