//!
//! Scratch tables for the forward/backward passes
//!
use crate::common::NodeIndex;
use crate::error::{HMMError, Pass, Result};
use crate::prob::Prob;

/// How missing emission evidence is weighted in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// emitting states without evidence contribute zero mass
    Training,
    /// emitting states without evidence are unconstrained (weight one)
    Inference,
}

///
/// Dense table of `Prob` assigned to each state, indexed by `NodeIndex`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct StateTable(Vec<Prob>);

impl StateTable {
    /// table of `n_states` entries, all p=0
    pub fn new(n_states: usize) -> StateTable {
        StateTable(vec![Prob::zero(); n_states])
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// iterator of `(NodeIndex, Prob)`
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, Prob)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &p)| (NodeIndex::new(i), p))
    }
    /// sum of all entries
    pub fn sum(&self) -> Prob {
        self.0.iter().sum()
    }
}

impl std::ops::Index<NodeIndex> for StateTable {
    type Output = Prob;
    fn index(&self, node: NodeIndex) -> &Prob {
        &self.0[node.index()]
    }
}

impl std::ops::IndexMut<NodeIndex> for StateTable {
    fn index_mut(&mut self, node: NodeIndex) -> &mut Prob {
        &mut self.0[node.index()]
    }
}

///
/// Results of the last forward/backward passes.
///
/// A table is `None` until its pass runs and is reset to `None` whenever the
/// model, its parameters or the per-example evidence change.
///
#[derive(Debug, Clone, Default)]
pub struct ForwardBackward {
    pub forward: Option<(Weighting, StateTable)>,
    pub backward: Option<(Weighting, StateTable)>,
}

impl ForwardBackward {
    pub fn invalidate(&mut self) {
        self.forward = None;
        self.backward = None;
    }
    pub fn forward(&self) -> Result<&StateTable> {
        self.forward
            .as_ref()
            .map(|(_, table)| table)
            .ok_or(HMMError::PassNotRun(Pass::Forward))
    }
    pub fn backward(&self) -> Result<&StateTable> {
        self.backward
            .as_ref()
            .map(|(_, table)| table)
            .ok_or(HMMError::PassNotRun(Pass::Backward))
    }
}
