pub mod loss_grad;
pub mod naive;
pub mod strategy;
pub mod vectorized;

pub use loss_grad::{LossGrad, SoftmaxLoss};
pub use naive::NaiveSoftmax;
pub use strategy::SoftmaxStrategy;
pub use vectorized::VectorizedSoftmax;
