//!
//! Shared aliases and short-hands
//!
use fnv::FnvHashMap;
pub use petgraph::graph::{EdgeIndex, NodeIndex};

/// expected usage frequency (count) of a transition
pub type Freq = f64;

/// emission probability assigned to each emitting state, keyed by state name
pub type EmissionProbs = FnvHashMap<String, f64>;

///
/// short-hand of `NodeIndex::new`
///
pub fn ni(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

///
/// short-hand of `EdgeIndex::new`
///
pub fn ei(index: usize) -> EdgeIndex {
    EdgeIndex::new(index)
}
