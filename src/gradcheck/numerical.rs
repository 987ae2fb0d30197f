use log::debug;
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One checked entry from [`grad_check_sparse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradCheckSample {
    pub row: usize,
    pub col: usize,
    pub numerical: f64,
    pub analytic: f64,
    pub rel_error: f64,
}

/// `|a - b| / max(1e-8, |a| + |b|)`.
pub fn rel_error(a: f64, b: f64) -> f64 {
    (a - b).abs() / (a.abs() + b.abs()).max(1e-8)
}

/// Largest of `errors`, or NaN if any of them is NaN.
///
/// `f64::max` discards NaN operands, so a plain `fold(0.0, f64::max)` would
/// report a broken gradient as a perfect match.
pub fn worst_rel_error(errors: impl IntoIterator<Item = f64>) -> f64 {
    errors.into_iter().fold(0.0, |worst, e| {
        if worst.is_nan() || e.is_nan() {
            f64::NAN
        } else {
            worst.max(e)
        }
    })
}

/// Largest entry-wise [`rel_error`] between two same-shape arrays; NaN if
/// any entry of either array is NaN.
///
/// # Panics
/// Panics if the shapes differ.
pub fn max_rel_error(a: ArrayView2<f64>, b: ArrayView2<f64>) -> f64 {
    assert_eq!(a.dim(), b.dim(), "max_rel_error needs equally shaped arrays");
    worst_rel_error(a.iter().zip(b.iter()).map(|(&x, &y)| rel_error(x, y)))
}

/// Centered finite-difference gradient of `f` at `weights`, one entry at a
/// time: `(f(W + h·e_ij) - f(W - h·e_ij)) / 2h`.
///
/// `weights` is perturbed in place and restored after every entry.
pub fn eval_numerical_gradient<F>(mut f: F, weights: &mut Array2<f64>, h: f64) -> Array2<f64>
where
    F: FnMut(ArrayView2<f64>) -> f64,
{
    let mut grad = Array2::zeros(weights.raw_dim());
    let (rows, cols) = weights.dim();
    for i in 0..rows {
        for j in 0..cols {
            grad[[i, j]] = central_difference(&mut f, weights, (i, j), h);
        }
    }
    grad
}

/// Compares `analytic` against centered differences at `num_checks` randomly
/// chosen entries of `weights`.
///
/// Cheaper than [`eval_numerical_gradient`] on large weight matrices; each
/// check costs two evaluations of `f`.
pub fn grad_check_sparse<F, R>(
    mut f: F,
    weights: &mut Array2<f64>,
    analytic: ArrayView2<f64>,
    num_checks: usize,
    h: f64,
    rng: &mut R,
) -> Vec<GradCheckSample>
where
    F: FnMut(ArrayView2<f64>) -> f64,
    R: Rng + ?Sized,
{
    assert_eq!(weights.dim(), analytic.dim(), "analytic gradient must match weights shape");
    let (rows, cols) = weights.dim();

    (0..num_checks)
        .map(|_| {
            let row = rng.gen_range(0..rows);
            let col = rng.gen_range(0..cols);
            let numerical = central_difference(&mut f, weights, (row, col), h);
            let analytic = analytic[[row, col]];
            let sample = GradCheckSample {
                row,
                col,
                numerical,
                analytic,
                rel_error: rel_error(numerical, analytic),
            };
            debug!(
                "grad check ({}, {}): numerical {:.6e} analytic {:.6e} relative error {:.3e}",
                row, col, sample.numerical, sample.analytic, sample.rel_error
            );
            sample
        })
        .collect()
}

fn central_difference<F>(f: &mut F, weights: &mut Array2<f64>, idx: (usize, usize), h: f64) -> f64
where
    F: FnMut(ArrayView2<f64>) -> f64,
{
    let old = weights[idx];
    weights[idx] = old + h;
    let plus = f(weights.view());
    weights[idx] = old - h;
    let minus = f(weights.view());
    weights[idx] = old;
    (plus - minus) / (2.0 * h)
}
