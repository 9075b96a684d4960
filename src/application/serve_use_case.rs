// ============================================================
// Layer 2 — Serve Use Case
// ============================================================
// Wires the HTTP layer to the model:
//   1. Load the trained model from its checkpoint ONCE
//   2. Build the shared application state
//   3. Block on the HTTP server until shutdown
//
// The model is read-only after load; per-request work is one
// preprocessing pass and one forward pass, with no state shared
// between requests.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::data::preprocessor::ImagePreprocessor;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::Inferencer;
use crate::server::{self, AppState};

pub struct ServeUseCase {
    state: Arc<AppState>,
}

impl ServeUseCase {
    pub fn new(checkpoint_dir: String) -> Result<Self> {
        let ckpt       = CheckpointManager::new(checkpoint_dir);
        let inferencer = Inferencer::from_checkpoint(&ckpt)?;

        // Uploads are fed through unchanged — no inversion heuristic
        // on the HTTP path.
        let preprocessor = ImagePreprocessor::new();

        Ok(Self {
            state: Arc::new(AppState::new(inferencer, preprocessor)),
        })
    }

    /// Run the HTTP server until the process is stopped.
    /// The CLI layer is synchronous, so the async server runs on
    /// a runtime created here.
    pub fn serve(self, host: &str, port: u16) -> Result<()> {
        let addr = format!("{host}:{port}");
        tracing::info!("Serving predictions on http://{addr}");

        let runtime = tokio::runtime::Runtime::new()
            .context("cannot start tokio runtime")?;
        runtime.block_on(server::serve(&addr, self.state))
    }
}
