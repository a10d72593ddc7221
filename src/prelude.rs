//!
//! globally-available parts
//!
pub use crate::common::{EmissionProbs, Freq};
pub use crate::error::{HMMError, Result};
pub use crate::hmm::{
    DumpSink, HMMParams, HMMState, HMMTransition, HiddenMarkovModel, TrainingExample, Weighting,
};
pub use crate::prob::{p, Prob};
pub use petgraph::graph::{EdgeIndex, NodeIndex};
