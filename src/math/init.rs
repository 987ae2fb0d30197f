use ndarray::Array2;
use rand::Rng;
use std::f64::consts::PI;

/// Samples a single value from N(0, 1) using the Box-Muller transform.
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // Draw two independent uniform samples in (0, 1] to avoid log(0).
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Samples a (rows, cols) matrix from N(0, scale²).
///
/// Used both for small initial classifier weights (`scale` around 1e-3 or
/// 1e-4, which keeps the initial loss close to `ln(num_classes)`) and for
/// synthetic feature batches (`scale = 1.0`).
pub fn gaussian<R: Rng + ?Sized>(rows: usize, cols: usize, scale: f64, rng: &mut R) -> Array2<f64> {
    let mut res = Array2::zeros((rows, cols));
    for v in res.iter_mut() {
        *v = sample_standard_normal(rng) * scale;
    }
    res
}

/// Draws `n` labels uniformly from `0..num_classes`.
///
/// # Panics
/// Panics if `num_classes == 0`.
pub fn random_labels<R: Rng + ?Sized>(n: usize, num_classes: usize, rng: &mut R) -> Vec<usize> {
    (0..n).map(|_| rng.gen_range(0..num_classes)).collect()
}
