//!
//! Forward algorithm definitions
//!
use super::model::HiddenMarkovModel;
use super::table::{StateTable, Weighting};
use crate::common::NodeIndex;
use crate::error::Result;
use crate::prob::{p, Prob};
use log::trace;

// wrappers and exposed functions
impl HiddenMarkovModel {
    ///
    /// Run Forward algorithm with the current evidence (training weighting)
    ///
    /// ```text
    /// f[s] = (init[s] + \sum_{p: enabled parents} f[p] t(p,s)) w(s)
    /// ```
    ///
    /// States are visited in topological order, so every parent is final
    /// before its child is computed.
    ///
    pub fn calculate_forward_part(&mut self) -> Result<()> {
        self.run_forward(Weighting::Training)
    }
    ///
    /// Run Forward algorithm with the given weighting of emitting states
    /// without evidence, and store the table in the scratch area.
    ///
    pub fn run_forward(&mut self, weighting: Weighting) -> Result<()> {
        let order = self.topological_order()?;
        let mut table = StateTable::new(self.get_number_of_states());
        for node in order {
            let value = self.f_state(node, &table, weighting);
            table[node] = value;
        }
        trace!("forward table {:?}", table);
        self.scratch.forward = Some((weighting, table));
        Ok(())
    }
    ///
    /// Forward variable of the state named `name`
    ///
    pub fn get_forward_variable(&self, name: &str) -> Result<f64> {
        let node = self.state_index(name)?;
        Ok(self.forward_variable(node)?.to_value())
    }
    pub fn forward_variable(&self, node: NodeIndex) -> Result<Prob> {
        Ok(self.scratch.forward()?[node])
    }
    ///
    /// `P(x)`: total forward mass reaching the terminal states
    ///
    pub fn probability_of_evidence(&self) -> Result<Prob> {
        let forward = self.scratch.forward()?;
        Ok(self
            .states()
            .filter(|&(node, _)| self.is_terminal(node))
            .map(|(node, _)| forward[node])
            .sum())
    }
}

// functions to calculate each state
impl HiddenMarkovModel {
    /// Fill the forward prob of a state from the table of its parents
    fn f_state(&self, node: NodeIndex, table: &StateTable, weighting: Weighting) -> Prob {
        let w = self.emission_weight(node, weighting);
        if w.is_zero() {
            return Prob::zero();
        }
        let from_parents: Prob = self
            .parents(node)
            .map(|(_, parent, t)| table[parent] * p(t.probability))
            .sum();
        (self.initial_probability(node) + from_parents) * w
    }
}
