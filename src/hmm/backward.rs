//!
//! Backward algorithm definitions
//!
use super::model::HiddenMarkovModel;
use super::table::{StateTable, Weighting};
use crate::common::NodeIndex;
use crate::error::Result;
use crate::prob::{p, Prob};
use log::trace;

impl HiddenMarkovModel {
    ///
    /// Run Backward algorithm with the current evidence (training weighting)
    ///
    /// ```text
    /// b[s] = 1                                              (s is terminal)
    ///      = \sum_{c: enabled childs} t(s,c) w(c) b[c]      (otherwise)
    /// ```
    ///
    pub fn calculate_backward_part(&mut self) -> Result<()> {
        self.run_backward(Weighting::Training)
    }
    ///
    /// Run Backward algorithm in reverse topological order with the given
    /// weighting and store the table in the scratch area.
    ///
    pub fn run_backward(&mut self, weighting: Weighting) -> Result<()> {
        let order = self.topological_order()?;
        let mut table = StateTable::new(self.get_number_of_states());
        for node in order.into_iter().rev() {
            let value = self.b_state(node, &table, weighting);
            table[node] = value;
        }
        trace!("backward table {:?}", table);
        self.scratch.backward = Some((weighting, table));
        Ok(())
    }
    ///
    /// Backward variable of the state named `name`
    ///
    pub fn get_backward_variable(&self, name: &str) -> Result<f64> {
        let node = self.state_index(name)?;
        Ok(self.backward_variable(node)?.to_value())
    }
    pub fn backward_variable(&self, node: NodeIndex) -> Result<Prob> {
        Ok(self.scratch.backward()?[node])
    }
}

impl HiddenMarkovModel {
    /// Fill the backward prob of a state from the table of its childs
    fn b_state(&self, node: NodeIndex, table: &StateTable, weighting: Weighting) -> Prob {
        if self.is_terminal(node) {
            return Prob::one();
        }
        self.childs(node)
            .map(|(_, child, t)| {
                p(t.probability) * self.emission_weight(child, weighting) * table[child]
            })
            .sum()
    }
}
