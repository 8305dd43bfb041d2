// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `serve`, `train`, `predict`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, SocketAddr)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::net::SocketAddr;

use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Train the classifier on the stored examples
    Train(TrainArgs),

    /// Classify a grid from a JSON file using the trained model
    Predict(PredictArgs),
}

/// All arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub address: SocketAddr,

    /// Path of the append-only example record file
    #[arg(long, default_value = "data.jsonl")]
    pub data_file: String,

    /// Directory for the trained model artifacts
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Number of full passes through the stored examples
    #[arg(long, default_value_t = 20)]
    pub epochs: usize,

    /// Number of samples per optimiser step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the classifier's hidden layer
    #[arg(long, default_value_t = 64)]
    pub hidden_size: usize,

    /// Allowed CORS origin (repeat the flag for several).
    /// Defaults to the local development origins when omitted.
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path of the append-only example record file
    #[arg(long, default_value = "data.jsonl")]
    pub data_file: String,

    /// Directory for the trained model artifacts
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Number of full passes through the stored examples
    #[arg(long, default_value_t = 20)]
    pub epochs: usize,

    /// Number of samples per optimiser step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the classifier's hidden layer
    #[arg(long, default_value_t = 64)]
    pub hidden_size: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<&TrainArgs> for TrainConfig {
    fn from(a: &TrainArgs) -> Self {
        TrainConfig {
            model_dir:   a.model_dir.clone(),
            epochs:      a.epochs,
            batch_size:  a.batch_size,
            lr:          a.lr,
            hidden_size: a.hidden_size,
        }
    }
}

impl From<&ServeArgs> for TrainConfig {
    fn from(a: &ServeArgs) -> Self {
        TrainConfig {
            model_dir:   a.model_dir.clone(),
            epochs:      a.epochs,
            batch_size:  a.batch_size,
            lr:          a.lr,
            hidden_size: a.hidden_size,
        }
    }
}

/// All arguments for the `predict` command.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// JSON file holding a 28x28 array of pixel values
    #[arg(long)]
    pub image_file: String,

    /// Directory where the trained model artifacts live
    #[arg(long, default_value = "model")]
    pub model_dir: String,
}
