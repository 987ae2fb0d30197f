pub mod init;

pub use init::{gaussian, random_labels, sample_standard_normal};
