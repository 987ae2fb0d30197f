use ndarray::{Array2, ArrayView2};

use crate::error::Result;
use crate::loss::loss_grad::{check_inputs, LossGrad, SoftmaxLoss};

/// Reference softmax loss computed with explicit loops over examples,
/// classes and features.
///
/// Slow, but every term maps one-to-one onto the per-example formulas, which
/// makes it the baseline the vectorized evaluator is checked against.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveSoftmax;

impl SoftmaxLoss for NaiveSoftmax {
    fn loss_and_grad(
        &self,
        weights: ArrayView2<f64>,
        features: ArrayView2<f64>,
        labels: &[usize],
        reg: f64,
    ) -> Result<LossGrad> {
        check_inputs(weights, features, labels, reg)?;

        let (num_train, dim) = features.dim();
        let num_classes = weights.ncols();

        let mut loss = 0.0;
        let mut grad = Array2::<f64>::zeros((dim, num_classes));
        let mut scores = vec![0.0; num_classes];

        for (i, &label) in labels.iter().enumerate() {
            // s_i = x_i · W
            for (c, score) in scores.iter_mut().enumerate() {
                let mut sum = 0.0;
                for d in 0..dim {
                    sum += features[[i, d]] * weights[[d, c]];
                }
                *score = sum;
            }

            // Shift by the row max so exp() cannot overflow.
            let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mut sum_exp = 0.0;
            for &s in &scores {
                sum_exp += (s - max).exp();
            }

            loss += sum_exp.ln() - (scores[label] - max);

            for (c, &s) in scores.iter().enumerate() {
                let p = (s - max).exp() / sum_exp;
                let coeff = if c == label { p - 1.0 } else { p };
                for d in 0..dim {
                    grad[[d, c]] += coeff * features[[i, d]];
                }
            }
        }

        let n = num_train as f64;
        loss /= n;

        let mut sum_sq = 0.0;
        for d in 0..dim {
            for c in 0..num_classes {
                let w = weights[[d, c]];
                grad[[d, c]] = grad[[d, c]] / n + 2.0 * reg * w;
                sum_sq += w * w;
            }
        }
        loss += reg * sum_sq;

        Ok(LossGrad { loss, grad })
    }
}
