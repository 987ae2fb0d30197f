use ndarray::{Array1, ArrayView2, Axis};

use crate::error::Result;
use crate::loss::loss_grad::{check_inputs, LossGrad, SoftmaxLoss};

/// Softmax loss computed with whole-batch array operations.
///
/// Scores come from a single (N, D)·(D, C) product, the stabilizing shift and
/// the softmax denominators from row-wise reductions, and the gradient from a
/// single (D, N)·(N, C) product.
#[derive(Debug, Default, Clone, Copy)]
pub struct VectorizedSoftmax;

impl SoftmaxLoss for VectorizedSoftmax {
    fn loss_and_grad(
        &self,
        weights: ArrayView2<f64>,
        features: ArrayView2<f64>,
        labels: &[usize],
        reg: f64,
    ) -> Result<LossGrad> {
        check_inputs(weights, features, labels, reg)?;

        let num_train = features.nrows();
        let n = num_train as f64;

        let scores = features.dot(&weights); // (N, C)
        let row_max = scores.fold_axis(Axis(1), f64::NEG_INFINITY, |&a, &b| a.max(b));
        let shifted = &scores - &row_max.insert_axis(Axis(1));

        let exp_scores = shifted.mapv(f64::exp);
        let sum_exp = exp_scores.sum_axis(Axis(1)); // (N,)
        let correct = Array1::from_shape_fn(num_train, |i| shifted[[i, labels[i]]]);

        let data_loss = (sum_exp.mapv(f64::ln) - &correct).sum() / n;
        let loss = data_loss + reg * (&weights * &weights).sum();

        let mut coeff = exp_scores / &sum_exp.insert_axis(Axis(1));
        for (i, &label) in labels.iter().enumerate() {
            coeff[[i, label]] -= 1.0;
        }

        let grad = features.t().dot(&coeff) / n + &weights * (2.0 * reg);

        Ok(LossGrad { loss, grad })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn identity_weights_single_example() {
        let w = array![[1.0, 0.0], [0.0, 1.0]];
        let x = array![[1.0, 0.0]];
        let out = VectorizedSoftmax.loss_and_grad(w.view(), x.view(), &[0], 0.0).unwrap();

        let e = std::f64::consts::E;
        assert_abs_diff_eq!(out.loss, 0.3133, epsilon = 1e-4);
        assert_abs_diff_eq!(out.grad[[0, 0]], -1.0 / (1.0 + e), epsilon = 1e-12);
        assert_abs_diff_eq!(out.grad[[0, 1]], 1.0 / (1.0 + e), epsilon = 1e-12);
        assert_abs_diff_eq!(out.grad[[1, 0]], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(out.grad[[1, 1]], 0.0, epsilon = 1e-15);
    }

    #[test]
    fn gradient_rows_sum_to_zero_without_reg() {
        // Each example contributes (p - onehot) ⊗ x, and p - onehot sums to 0
        // across classes, so each row of dW sums to 0.
        let w = array![[0.3, -0.2, 0.1], [0.05, 0.4, -0.6]];
        let x = array![[1.0, 2.0], [-0.5, 0.25], [3.0, -1.0]];
        let out = VectorizedSoftmax.loss_and_grad(w.view(), x.view(), &[2, 0, 1], 0.0).unwrap();
        for row in out.grad.rows() {
            assert_abs_diff_eq!(row.sum(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn large_scores_stay_finite() {
        let w = array![[1.0e4, -1.0e4, 0.0], [0.0, 5.0e3, -5.0e3]];
        let x = array![[1.0, 0.0], [0.0, 1.0], [-1.0, 1.0]];
        let out = VectorizedSoftmax.loss_and_grad(w.view(), x.view(), &[1, 2, 0], 0.0).unwrap();
        assert!(out.loss.is_finite());
        assert!(out.grad.iter().all(|g| g.is_finite()));
        // First row: true class is 2e4 below the max, so its loss is ~2e4.
        assert!(out.loss > 1.0e3);
    }

    #[test]
    fn confident_correct_prediction_has_near_zero_loss() {
        let w = array![[50.0, 0.0], [0.0, 50.0]];
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let out = VectorizedSoftmax.loss_and_grad(w.view(), x.view(), &[0, 1], 0.0).unwrap();
        assert!(out.loss >= 0.0);
        assert!(out.loss < 1e-20);
        assert!(out.grad.iter().all(|g| g.abs() < 1e-20));
    }
}
