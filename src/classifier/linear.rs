use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::error::{Error, Result};
use crate::loss::{LossGrad, SoftmaxStrategy};
use crate::math::init::gaussian;

/// A linear classifier scored with softmax: `scores = X · W`.
///
/// Holds the weights and the evaluator used for `loss`. Updating the
/// weights from the returned gradient is left to the caller.
#[derive(Debug, Clone)]
pub struct LinearSoftmax {
    /// Shape (D, C).
    pub weights: Array2<f64>,
    pub strategy: SoftmaxStrategy,
}

impl LinearSoftmax {
    /// Gaussian-initialized weights of shape (dim, num_classes) scaled by
    /// `weight_scale`.
    pub fn new<R: Rng + ?Sized>(dim: usize, num_classes: usize, weight_scale: f64, rng: &mut R) -> Self {
        Self::from_weights(gaussian(dim, num_classes, weight_scale, rng))
    }

    pub fn from_weights(weights: Array2<f64>) -> Self {
        LinearSoftmax {
            weights,
            strategy: SoftmaxStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: SoftmaxStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn dim(&self) -> usize {
        self.weights.nrows()
    }

    pub fn num_classes(&self) -> usize {
        self.weights.ncols()
    }

    /// Raw class scores, shape (N, C).
    pub fn scores(&self, features: ArrayView2<f64>) -> Result<Array2<f64>> {
        if features.ncols() != self.dim() {
            return Err(Error::FeatureMismatch {
                weights: self.dim(),
                features: features.ncols(),
            });
        }
        Ok(features.dot(&self.weights))
    }

    /// Regularized softmax loss and dW for this batch.
    pub fn loss(&self, features: ArrayView2<f64>, labels: &[usize], reg: f64) -> Result<LossGrad> {
        self.strategy.evaluate(self.weights.view(), features, labels, reg)
    }

    /// Predicted class per row. Ties go to the lowest class index.
    pub fn predict(&self, features: ArrayView2<f64>) -> Result<Vec<usize>> {
        let scores = self.scores(features)?;
        Ok(scores.rows().into_iter().map(|row| argmax(row.iter().copied())).collect())
    }

    /// Fraction of rows whose predicted class matches the label.
    pub fn accuracy(&self, features: ArrayView2<f64>, labels: &[usize]) -> Result<f64> {
        if labels.len() != features.nrows() {
            return Err(Error::LabelCountMismatch {
                rows: features.nrows(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(Error::EmptyBatch);
        }
        let predicted = self.predict(features)?;
        let correct = predicted.iter().zip(labels).filter(|(p, y)| p == y).count();
        Ok(correct as f64 / labels.len() as f64)
    }
}

/// Index of the first maximum element.
fn argmax(values: impl Iterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_val = f64::NEG_INFINITY;
    for (i, v) in values.enumerate() {
        if v > best_val {
            best = i;
            best_val = v;
        }
    }
    best
}
