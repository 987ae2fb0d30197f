use serde::{Deserialize, Serialize};

use crate::gradcheck::GradCheckSample;

/// Outcome of one `run_sanity_check` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanityReport {
    pub num_train: usize,
    pub num_features: usize,
    pub num_classes: usize,
    pub reg: f64,
    /// Loss from the looped evaluator.
    pub naive_loss: f64,
    /// Loss from the vectorized evaluator.
    pub vectorized_loss: f64,
    /// `|naive_loss - vectorized_loss|`.
    pub loss_difference: f64,
    /// Frobenius norm of the difference between the two gradients.
    pub gradient_difference: f64,
    /// `ln(num_classes)`: what the loss should be close to with small
    /// random weights, since every class then gets probability ~1/C.
    pub expected_initial_loss: f64,
    pub naive_ms: f64,
    pub vectorized_ms: f64,
    pub grad_check: Vec<GradCheckSample>,
    /// Largest relative error over `grad_check`.
    pub max_rel_error: f64,
}

impl SanityReport {
    /// True when both evaluators agree and the gradient check stays within
    /// `tolerance`. Any NaN in the differences or the samples fails.
    pub fn passed(&self, tolerance: f64) -> bool {
        let loss_scale = self.naive_loss.abs().max(1.0);
        self.loss_difference <= tolerance * loss_scale
            && self.gradient_difference <= tolerance
            && self.max_rel_error <= tolerance
            && self.grad_check.iter().all(|s| s.rel_error <= tolerance)
    }
}
