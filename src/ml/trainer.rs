// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
// Backend notes:
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on EvalBackend (NdArray)
//   - Validation and test batchers must also use EvalBackend
//   - argmax(1) returns [batch, 1] so we flatten before .equal()
//
// A 28×28 digit CNN trains comfortably on the CPU NdArray
// backend; no GPU backend is wired in.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::DigitBatcher, dataset::DigitDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{ConvNet, ConvNetConfig};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
type EvalBackend  = burn::backend::NdArray;

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: DigitDataset,
    val_dataset:   DigitDataset,
    test_dataset:  DigitDataset,
    ckpt_manager:  CheckpointManager,
) -> Result<()> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    train_loop(cfg, train_dataset, val_dataset, test_dataset, ckpt_manager, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: DigitDataset,
    val_dataset:   DigitDataset,
    test_dataset:  DigitDataset,
    ckpt_manager:  CheckpointManager,
    device:        burn::backend::ndarray::NdArrayDevice,
) -> Result<()> {

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = ConvNetConfig::new(
        cfg.conv1_filters, cfg.conv2_filters, cfg.conv3_filters,
        cfg.hidden_dim, cfg.dropout,
    );
    let mut model: ConvNet<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: conv {}-{}-{}, hidden_dim={}",
        cfg.conv1_filters, cfg.conv2_filters, cfg.conv3_filters, cfg.hidden_dim,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = DigitBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (EvalBackend — no autodiff overhead) ───────────
    let val_batcher = DigitBatcher::<EvalBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.images, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → ConvNet<EvalBackend>
        // dropout disabled for deterministic evaluation
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;
        let mut correct      = 0usize;
        let mut total        = 0usize;

        for batch in val_loader.iter() {
            let logits = model_valid.forward(batch.images);

            let ce = burn::nn::loss::CrossEntropyLossConfig::new()
                .init(&logits.device());
            let batch_loss: f64 = ce
                .forward(logits.clone(), batch.targets.clone())
                .into_scalar().elem::<f64>();
            val_loss_sum += batch_loss;
            val_batches  += 1;

            let (batch_correct, batch_total) = count_correct(logits, batch.targets);
            correct += batch_correct;
            total   += batch_total;
        }

        let avg_val_loss = if val_batches > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        let val_acc      = if total > 0 { correct as f64 / total as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, val_acc * 100.0,
        );

        metrics.log(&EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc))?;

        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    // ── Final evaluation on the held-out test split ───────────────────────────
    let test_acc = evaluate(&model.valid(), test_dataset, cfg.batch_size, device);
    println!("Test accuracy: {:.4}", test_acc);

    tracing::info!("Training complete!");
    Ok(())
}

/// Accuracy of a model over a dataset, batch by batch.
fn evaluate(
    model:      &ConvNet<EvalBackend>,
    dataset:    DigitDataset,
    batch_size: usize,
    device:     burn::backend::ndarray::NdArrayDevice,
) -> f64 {
    let batcher = DigitBatcher::<EvalBackend>::new(device);
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .num_workers(1)
        .build(dataset);

    let mut correct = 0usize;
    let mut total   = 0usize;

    for batch in loader.iter() {
        let logits = model.forward(batch.images);
        let (batch_correct, batch_total) = count_correct(logits, batch.targets);
        correct += batch_correct;
        total   += batch_total;
    }

    if total > 0 { correct as f64 / total as f64 } else { 0.0 }
}

/// Count argmax hits for one batch: (correct, total).
fn count_correct(
    logits:  Tensor<EvalBackend, 2>,
    targets: Tensor<EvalBackend, 1, Int>,
) -> (usize, usize) {
    let total = targets.dims()[0];

    // argmax(1) returns shape [batch, 1] — flatten to [batch]
    // before comparing with targets which is [batch]
    let predicted = logits.argmax(1).flatten::<1>(0, 1);

    let hits: i64 = predicted
        .equal(targets)
        .int().sum().into_scalar().elem::<i64>();

    (hits as usize, total)
}
