// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`   — trains the CNN on the MNIST dataset
//   2. `predict` — loads a checkpoint and classifies one image file
//   3. `serve`   — loads a checkpoint and serves predictions over HTTP
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs, PredictArgs, ServeArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "digit-recognizer",
    version = "0.1.0",
    about = "Train a CNN digit classifier on MNIST, then predict from image files or over HTTP."
)]
pub struct Cli {
    /// The subcommand to run (train, predict or serve)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => self.run_train(args),
            Commands::Predict(args) => self.run_predict(args),
            Commands::Serve(args)   => self.run_serve(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(&self, args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training, checkpoints in: {}", args.checkpoint_dir);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    /// Handles the `predict` subcommand.
    /// Loads the model from checkpoint and prints the predicted digit.
    fn run_predict(&self, args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::PredictUseCase;
        use std::io::{self, BufRead, Write};

        // When no path is given on the command line, prompt on stdin
        // (the interactive mode of the standalone prediction script)
        let image_path = match args.image {
            Some(path) => path,
            None => {
                print!("Enter the path of the image: ");
                io::stdout().flush()?;
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                std::path::PathBuf::from(line.trim())
            }
        };

        let use_case   = PredictUseCase::new(args.checkpoint_dir.clone())?;
        let prediction = use_case.predict_file(&image_path)?;

        println!("Raw predictions: {:?}", prediction.probabilities);
        println!("The predicted digit is: {}", prediction.digit);
        Ok(())
    }

    /// Handles the `serve` subcommand.
    /// Loads the model once, then blocks serving HTTP requests.
    fn run_serve(&self, args: ServeArgs) -> Result<()> {
        use crate::application::serve_use_case::ServeUseCase;

        let use_case = ServeUseCase::new(args.checkpoint_dir.clone())?;
        use_case.serve(&args.host, args.port)
    }
}
