//!
//! TrainingExample: the per-example evidence of one `train()` call
//!
use super::model::HiddenMarkovModel;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Initial transition probabilities of start states and emission evidence
/// of emitting states, keyed by state name.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    #[serde(default)]
    pub init: BTreeMap<String, f64>,
    #[serde(default)]
    pub emission: BTreeMap<String, f64>,
}

impl TrainingExample {
    pub fn new() -> Self {
        TrainingExample::default()
    }
    pub fn with_init(mut self, state: &str, prob: f64) -> Self {
        self.init.insert(state.to_string(), prob);
        self
    }
    pub fn with_emission(mut self, state: &str, prob: f64) -> Self {
        self.emission.insert(state.to_string(), prob);
        self
    }
    ///
    /// Replace the evidence of the model with this example.
    ///
    pub fn apply(&self, hmm: &mut HiddenMarkovModel) -> Result<()> {
        hmm.clear_initial_transition_probabilities();
        hmm.clear_training_emission_probabilities();
        for (state, &prob) in self.init.iter() {
            hmm.set_initial_transition_probability(state, prob)?;
        }
        for (state, &prob) in self.emission.iter() {
            hmm.set_training_emission_probability(state, prob)?;
        }
        Ok(())
    }
}
