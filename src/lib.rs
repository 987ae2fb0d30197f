pub mod error;
pub mod math;
pub mod loss;
pub mod classifier;
pub mod gradcheck;
pub mod sanity;

// Convenience re-exports
pub use error::{Error, Result};
pub use loss::{LossGrad, NaiveSoftmax, SoftmaxLoss, SoftmaxStrategy, VectorizedSoftmax};
pub use classifier::LinearSoftmax;
pub use gradcheck::{eval_numerical_gradient, grad_check_sparse, rel_error, GradCheckSample};
pub use sanity::{run_sanity_check, SanityConfig, SanityReport};
