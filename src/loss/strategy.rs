use std::fmt;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loss::loss_grad::{LossGrad, SoftmaxLoss};
use crate::loss::naive::NaiveSoftmax;
use crate::loss::vectorized::VectorizedSoftmax;

/// Selects which evaluator computes the softmax loss and gradient.
///
/// - `Naive`: explicit loops, the reference implementation.
/// - `Vectorized`: batched array operations, the one to use in practice.
///
/// Both return the same loss and gradient up to floating-point rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftmaxStrategy {
    Naive,
    #[default]
    Vectorized,
}

impl SoftmaxStrategy {
    /// Computes the regularized loss and dW with the selected evaluator.
    pub fn evaluate(
        self,
        weights: ArrayView2<f64>,
        features: ArrayView2<f64>,
        labels: &[usize],
        reg: f64,
    ) -> Result<LossGrad> {
        match self {
            SoftmaxStrategy::Naive => NaiveSoftmax.loss_and_grad(weights, features, labels, reg),
            SoftmaxStrategy::Vectorized => VectorizedSoftmax.loss_and_grad(weights, features, labels, reg),
        }
    }
}

impl SoftmaxLoss for SoftmaxStrategy {
    fn loss_and_grad(
        &self,
        weights: ArrayView2<f64>,
        features: ArrayView2<f64>,
        labels: &[usize],
        reg: f64,
    ) -> Result<LossGrad> {
        self.evaluate(weights, features, labels, reg)
    }
}

impl fmt::Display for SoftmaxStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftmaxStrategy::Naive => write!(f, "naive"),
            SoftmaxStrategy::Vectorized => write!(f, "vectorized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&SoftmaxStrategy::Vectorized).unwrap();
        assert_eq!(json, "\"vectorized\"");
        let parsed: SoftmaxStrategy = serde_json::from_str("\"naive\"").unwrap();
        assert_eq!(parsed, SoftmaxStrategy::Naive);
        assert_eq!(SoftmaxStrategy::default(), SoftmaxStrategy::Vectorized);
        assert_eq!(SoftmaxStrategy::Naive.to_string(), "naive");
    }

    #[test]
    fn both_strategies_agree_on_small_batch() {
        let w = array![[0.2, -0.1, 0.4], [-0.3, 0.25, 0.05]];
        let x = array![[1.5, -2.0], [0.3, 0.7], [-1.0, -1.0], [2.0, 0.0]];
        let y = [0, 2, 1, 1];

        let a = SoftmaxStrategy::Naive.evaluate(w.view(), x.view(), &y, 0.1).unwrap();
        let b = SoftmaxStrategy::Vectorized.evaluate(w.view(), x.view(), &y, 0.1).unwrap();

        assert!((a.loss - b.loss).abs() <= 1e-12 * a.loss.abs().max(1.0));
        for (ga, gb) in a.grad.iter().zip(b.grad.iter()) {
            assert!((ga - gb).abs() < 1e-12);
        }
    }

    #[test]
    fn both_strategies_report_the_same_error() {
        let w = array![[1.0, 0.0], [0.0, 1.0]];
        let x = array![[1.0, 0.0]];
        for strategy in [SoftmaxStrategy::Naive, SoftmaxStrategy::Vectorized] {
            let err = strategy.evaluate(w.view(), x.view(), &[2], 0.0).unwrap_err();
            assert_eq!(err.to_string(), "label 2 at row 0 is outside 0..2");
        }
    }
}
