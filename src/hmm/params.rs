//!
//! HMMParams: tunables of the training engine
//!
use crate::error::{HMMError, Result};
use serde::{Deserialize, Serialize};

/// pseudo count added to every transition count in `evaluate()` by default
pub const DEFAULT_PSEUDO_COUNTS: f64 = 1e-15;

///
/// HMMParams
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HMMParams {
    ///
    /// additive smoothing constant applied to every enabled transition
    /// when re-normalizing in `evaluate()`. must be `>= 0`.
    pub pseudo_counts: f64,
    ///
    /// relative tolerance used when checking that outgoing probabilities
    /// of a state sum to one
    pub tolerance: f64,
}

impl HMMParams {
    pub fn new(pseudo_counts: f64) -> Result<HMMParams> {
        let params = HMMParams {
            pseudo_counts,
            ..HMMParams::default()
        };
        params.validate()?;
        Ok(params)
    }
    /// check `pseudo_counts` is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.pseudo_counts.is_finite() || self.pseudo_counts < 0.0 {
            return Err(HMMError::InvalidPseudoCounts(self.pseudo_counts));
        }
        Ok(())
    }
}

impl Default for HMMParams {
    fn default() -> Self {
        HMMParams {
            pseudo_counts: DEFAULT_PSEUDO_COUNTS,
            tolerance: 1e-9,
        }
    }
}

impl std::fmt::Display for HMMParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "pseudo_counts: {}", self.pseudo_counts)?;
        write!(f, "tolerance: {}", self.tolerance)
    }
}
