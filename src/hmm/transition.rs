//!
//! HMMTransition: the edge record of the state graph
//!
//! Topology (`enabled`) and parameters (`probability` and the training
//! statistics) live in one record, so enabling and disabling an edge never
//! loses its trained values.
//!
use crate::common::Freq;
use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(new, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HMMTransition {
    /// current transition probability
    pub probability: f64,
    /// participates in forward/backward and normalization
    #[new(value = "true")]
    pub enabled: bool,
    /// expected count accumulated by `train()` in the current epoch
    #[new(default)]
    pub count: Freq,
    /// per-example expected count increment of every `train()`, zeros
    /// included, across epochs
    #[new(default)]
    pub count_history: Vec<Freq>,
    /// probability after each completed `evaluate()`
    #[new(default)]
    pub probability_history: Vec<f64>,
    /// number of examples that gave this transition non-zero mass
    #[new(default)]
    pub training_steps: usize,
    /// received non-zero mass (directly or through its synonym class)
    /// in the last evaluated epoch
    #[new(default)]
    pub trained: bool,
}

impl HMMTransition {
    /// record of a newly enabled transition, without probability
    pub fn empty() -> HMMTransition {
        HMMTransition::new(0.0)
    }
    /// total expected count over all examples ever trained
    pub fn total_count(&self) -> Freq {
        self.count_history.iter().sum()
    }
}

impl std::fmt::Display for HMMTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.enabled {
            write!(f, "p={}", self.probability)
        } else {
            write!(f, "p={} (disabled)", self.probability)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_record_defaults() {
        let t = HMMTransition::new(0.3);
        assert!(t.enabled);
        assert_eq!(t.count, 0.0);
        assert_eq!(t.training_steps, 0);
        assert!(!t.trained);
        assert_eq!(t.to_string(), "p=0.3");
        let mut t = HMMTransition::empty();
        t.count_history.extend_from_slice(&[0.5, 0.25]);
        assert_eq!(t.total_count(), 0.75);
        t.enabled = false;
        assert_eq!(t.to_string(), "p=0 (disabled)");
    }
}
