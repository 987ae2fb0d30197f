use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::loss::SoftmaxStrategy;

/// Configuration for a `run_sanity_check` run.
///
/// Every field has a default, so a JSON file only needs the keys it wants
/// to override. The defaults match a CIFAR-10 sized development batch
/// (3072 pixels plus a bias column, 10 classes).
///
/// # Fields
/// - `num_train`: examples in the synthetic batch
/// - `num_features`: feature dimension D
/// - `num_classes`: number of classes C
/// - `weight_scale`: std-dev of the initial Gaussian weights
/// - `reg`: L2 regularization strength
/// - `num_checks`: random entries sampled by the sparse gradient check
/// - `step`: finite-difference step h
/// - `check_with`: evaluator whose gradient is checked numerically
/// - `tolerance`: bound used by `SanityReport::passed`
/// - `seed`: RNG seed; `None` draws from the thread RNG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    pub num_train: usize,
    pub num_features: usize,
    pub num_classes: usize,
    pub weight_scale: f64,
    pub reg: f64,
    pub num_checks: usize,
    pub step: f64,
    pub check_with: SoftmaxStrategy,
    pub tolerance: f64,
    pub seed: Option<u64>,
}

impl Default for SanityConfig {
    fn default() -> Self {
        SanityConfig {
            num_train: 500,
            num_features: 3073,
            num_classes: 10,
            weight_scale: 1e-4,
            reg: 5e-6,
            num_checks: 10,
            step: 1e-5,
            check_with: SoftmaxStrategy::Vectorized,
            tolerance: 1e-5,
            seed: None,
        }
    }
}

impl SanityConfig {
    /// Checks that the run is well-defined before any work starts.
    pub fn validate(&self) -> Result<()> {
        if self.num_train == 0 || self.num_features == 0 || self.num_classes == 0 {
            return Err(Error::InvalidConfig(format!(
                "dimensions must be positive, got num_train={} num_features={} num_classes={}",
                self.num_train, self.num_features, self.num_classes
            )));
        }
        if self.num_checks == 0 {
            return Err(Error::InvalidConfig("num_checks must be at least 1".into()));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidConfig(format!("step must be positive, got {}", self.step)));
        }
        if !(self.weight_scale.is_finite() && self.weight_scale >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "weight_scale must be non-negative, got {}",
                self.weight_scale
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidConfig(format!("tolerance must be positive, got {}", self.tolerance)));
        }
        if !(self.reg.is_finite() && self.reg >= 0.0) {
            return Err(Error::InvalidRegularization(self.reg));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `SanityConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<SanityConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
