pub mod linear;

pub use linear::LinearSoftmax;
