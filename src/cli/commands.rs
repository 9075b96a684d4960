// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `predict` and `serve`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the digit classifier on the MNIST dataset
    Train(TrainArgs),

    /// Classify a single image file using a trained checkpoint
    Predict(PredictArgs),

    /// Serve predictions over HTTP using a trained checkpoint
    Serve(ServeArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory to save model checkpoints, config and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Fraction of the training split held out for validation
    #[arg(long, default_value_t = 0.1)]
    pub val_fraction: f64,

    /// Filters in the first convolutional block
    #[arg(long, default_value_t = 32)]
    pub conv1_filters: usize,

    /// Filters in the second convolutional block
    #[arg(long, default_value_t = 64)]
    pub conv2_filters: usize,

    /// Filters in the third convolutional block
    #[arg(long, default_value_t = 128)]
    pub conv3_filters: usize,

    /// Width of the fully-connected layer between the conv stack
    /// and the 10-way output
    #[arg(long, default_value_t = 128)]
    pub hidden_dim: usize,

    /// Dropout probability — randomly zeroes activations during training
    /// to prevent overfitting
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            checkpoint_dir: a.checkpoint_dir,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            val_fraction:   a.val_fraction,
            conv1_filters:  a.conv1_filters,
            conv2_filters:  a.conv2_filters,
            conv3_filters:  a.conv3_filters,
            hidden_dim:     a.hidden_dim,
            dropout:        a.dropout,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Path to the image file to classify.
    /// When omitted, the path is read from standard input.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}

/// All arguments for the `serve` command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server on
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
