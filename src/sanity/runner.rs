use std::time::Instant;

use log::{debug, info};
use ndarray::{Array2, ArrayView2};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::Result;
use crate::gradcheck::{grad_check_sparse, worst_rel_error, GradCheckSample};
use crate::loss::{LossGrad, SoftmaxStrategy};
use crate::math::init::{gaussian, random_labels};
use crate::sanity::sanity_config::SanityConfig;
use crate::sanity::sanity_report::SanityReport;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Builds a synthetic batch, evaluates both strategies on it, and checks the
/// analytic gradient against centered finite differences.
///
/// The weights are small Gaussian noise, so the reported losses should sit
/// near `ln(num_classes)`.
pub fn run_sanity_check(config: &SanityConfig) -> Result<SanityReport> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut weights = gaussian(config.num_features, config.num_classes, config.weight_scale, &mut rng);
    let features = gaussian(config.num_train, config.num_features, 1.0, &mut rng);
    let labels = random_labels(config.num_train, config.num_classes, &mut rng);

    info!(
        "sanity check: N={} D={} C={} reg={:e}",
        config.num_train, config.num_features, config.num_classes, config.reg
    );

    // ── Both evaluators on the same batch ─────────────────────────────────
    let (naive, naive_ms) =
        timed(SoftmaxStrategy::Naive, weights.view(), features.view(), &labels, config.reg)?;
    let (vectorized, vectorized_ms) =
        timed(SoftmaxStrategy::Vectorized, weights.view(), features.view(), &labels, config.reg)?;

    let loss_difference = (naive.loss - vectorized.loss).abs();
    let gradient_difference = frobenius(&(&naive.grad - &vectorized.grad));
    info!("loss difference {:.3e}, gradient difference {:.3e}", loss_difference, gradient_difference);

    // ── Numerical gradient check ──────────────────────────────────────────
    let analytic = match config.check_with {
        SoftmaxStrategy::Naive => &naive.grad,
        SoftmaxStrategy::Vectorized => &vectorized.grad,
    }
    .clone();
    let grad_check = check_gradient(config, &mut weights, features.view(), &labels, analytic.view(), &mut rng);
    let max_rel_error = worst_rel_error(grad_check.iter().map(|s| s.rel_error));
    info!("gradient check over {} entries: max relative error {:.3e}", grad_check.len(), max_rel_error);

    Ok(SanityReport {
        num_train: config.num_train,
        num_features: config.num_features,
        num_classes: config.num_classes,
        reg: config.reg,
        naive_loss: naive.loss,
        vectorized_loss: vectorized.loss,
        loss_difference,
        gradient_difference,
        expected_initial_loss: (config.num_classes as f64).ln(),
        naive_ms,
        vectorized_ms,
        grad_check,
        max_rel_error,
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Evaluates one strategy and returns its result with the wall-clock time in
/// milliseconds.
fn timed(
    strategy: SoftmaxStrategy,
    weights: ArrayView2<f64>,
    features: ArrayView2<f64>,
    labels: &[usize],
    reg: f64,
) -> Result<(LossGrad, f64)> {
    let t_start = Instant::now();
    let out = strategy.evaluate(weights, features, labels, reg)?;
    let elapsed_ms = t_start.elapsed().as_secs_f64() * 1e3;
    debug!("{} loss {:.6} computed in {:.3} ms", strategy, out.loss, elapsed_ms);
    Ok((out, elapsed_ms))
}

fn check_gradient<R: Rng + ?Sized>(
    config: &SanityConfig,
    weights: &mut Array2<f64>,
    features: ArrayView2<f64>,
    labels: &[usize],
    analytic: ArrayView2<f64>,
    rng: &mut R,
) -> Vec<GradCheckSample> {
    // Inputs were validated by the first evaluation; only the weights move.
    // A failed evaluation yields NaN, which fails the check downstream.
    let loss_at = |w: ArrayView2<f64>| {
        config
            .check_with
            .evaluate(w, features, labels, config.reg)
            .map(|out| out.loss)
            .unwrap_or(f64::NAN)
    };
    grad_check_sparse(loss_at, weights, analytic, config.num_checks, config.step, rng)
}

fn frobenius(m: &Array2<f64>) -> f64 {
    m.iter().map(|x| x * x).sum::<f64>().sqrt()
}
