pub mod numerical;

pub use numerical::{eval_numerical_gradient, grad_check_sparse, max_rel_error, rel_error, worst_rel_error, GradCheckSample};
