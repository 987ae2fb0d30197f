use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

/// Regularized loss and its gradient with respect to the weights.
#[derive(Debug, Clone, PartialEq)]
pub struct LossGrad {
    /// Mean cross-entropy over the batch plus `reg * sum(W²)`.
    pub loss: f64,
    /// ∂loss/∂W, shape (D, C).
    pub grad: Array2<f64>,
}

/// A softmax cross-entropy evaluator for a linear classifier.
///
/// - `weights`: shape (D, C)
/// - `features`: shape (N, D), one example per row
/// - `labels`: length N, each in `0..C`
/// - `reg`: L2 strength; the penalty is `reg * sum(W²)`, not the mean
///
/// Implementations must subtract each row's maximum score before
/// exponentiating, and must agree with each other to within 1e-7.
pub trait SoftmaxLoss {
    fn loss_and_grad(
        &self,
        weights: ArrayView2<f64>,
        features: ArrayView2<f64>,
        labels: &[usize],
        reg: f64,
    ) -> Result<LossGrad>;
}

/// Rejects shape, label and regularization errors before any arithmetic.
pub(crate) fn check_inputs(
    weights: ArrayView2<f64>,
    features: ArrayView2<f64>,
    labels: &[usize],
    reg: f64,
) -> Result<()> {
    let (num_train, dim) = features.dim();
    let (w_rows, num_classes) = weights.dim();

    if dim != w_rows {
        return Err(Error::FeatureMismatch {
            weights: w_rows,
            features: dim,
        });
    }
    if labels.len() != num_train {
        return Err(Error::LabelCountMismatch {
            rows: num_train,
            labels: labels.len(),
        });
    }
    if num_train == 0 {
        return Err(Error::EmptyBatch);
    }
    if !reg.is_finite() || reg < 0.0 {
        return Err(Error::InvalidRegularization(reg));
    }
    if let Some((row, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= num_classes) {
        return Err(Error::LabelOutOfRange {
            row,
            label,
            classes: num_classes,
        });
    }
    Ok(())
}
