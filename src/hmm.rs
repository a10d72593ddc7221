//!
//! Hidden Markov Model over a directed acyclic state graph
//!
//! # Overview of calculation
//!
//! Each state `s` is hidden (weight `w(s) = 1`) or emitting (weight `w(s)` =
//! the observed evidence of the current example). Start states get an
//! initial probability `init[s]`.
//!
//! Forward
//! f[s] = (init[s] + \sum_{p -> s} f[p] t(p,s)) w(s)
//!
//! Backward
//! b[s] = 1                              if s is terminal
//!      = \sum_{s -> c} t(s,c) w(c) b[c]  otherwise
//!
//! Evidence
//! P(x) = \sum_{s: terminal} f[s]
//!
//! Expected usage of a transition in one example
//! xi(a,b) = f[a] t(a,b) w(b) b[b] / P(x)
//!
//! `train()` accumulates `xi` over the examples of an epoch and `evaluate()`
//! turns the accumulated counts into new transition probabilities.
//!
pub mod backward;
pub mod dump;
pub mod emission;
pub mod estimate;
pub mod example;
pub mod forward;
pub mod mocks;
pub mod model;
pub mod params;
pub mod state;
pub mod synonym;
pub mod table;
pub mod train;
pub mod transition;

pub use dump::{DumpEvent, DumpSink, LogSink};
pub use example::TrainingExample;
pub use model::HiddenMarkovModel;
pub use params::HMMParams;
pub use state::HMMState;
pub use table::Weighting;
pub use transition::HMMTransition;
