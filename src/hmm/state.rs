//!
//! HMMState: node weight of the state graph
//!
//! A state only carries its identity and visibility. Predecessors and
//! successors are derived from the enabled edge records of the owning
//! `HiddenMarkovModel`.
//!
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HMMState {
    name: String,
    /// hidden states route probability mass, emitting states are observed
    hidden: bool,
}

impl HMMState {
    /// hidden state with the given name
    pub fn new(name: impl Into<String>) -> HMMState {
        HMMState::with_hidden(name, true)
    }
    /// emitting (non-hidden) state with the given name
    pub fn emitting(name: impl Into<String>) -> HMMState {
        HMMState::with_hidden(name, false)
    }
    pub fn with_hidden(name: impl Into<String>, hidden: bool) -> HMMState {
        HMMState {
            name: name.into(),
            hidden,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl std::fmt::Display for HMMState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.hidden {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} (emitting)", self.name)
        }
    }
}
