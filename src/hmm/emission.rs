//!
//! Emission probabilities of the observed states
//!
use super::model::HiddenMarkovModel;
use super::table::Weighting;
use crate::common::EmissionProbs;
use crate::error::Result;

impl HiddenMarkovModel {
    ///
    /// Posterior emission mass `f[s] b[s]` of every emitting state under the
    /// current initial probabilities and evidence.
    ///
    /// Both passes run in inference weighting, so emitting states without
    /// evidence are unconstrained. Entries of `out` for emitting states are
    /// overwritten; hidden states never get an entry.
    ///
    pub fn calculate_emission_probabilities(&mut self, out: &mut EmissionProbs) -> Result<()> {
        self.build_synonyms()?;
        self.run_forward(Weighting::Inference)?;
        self.run_backward(Weighting::Inference)?;
        for (node, state) in self.states() {
            if state.is_hidden() {
                continue;
            }
            let value = self.forward_variable(node)? * self.backward_variable(node)?;
            out.insert(state.name().to_string(), value.to_value());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::common::EmissionProbs;
    use crate::hmm::mocks::{mock_branching, mock_linear};

    #[test]
    fn emission_of_linear_chain() {
        let mut hmm = mock_linear();
        hmm.set_initial_transition_probability("S", 1.0).unwrap();
        hmm.set_training_emission_probability("M", 0.7).unwrap();
        let mut out = EmissionProbs::default();
        hmm.calculate_emission_probabilities(&mut out).unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out["M"], 0.7);
        assert!(!out.contains_key("S"));
    }
    #[test]
    fn emission_without_evidence_is_reachability() {
        let mut hmm = mock_branching();
        hmm.set_initial_transition_probability("S", 1.0).unwrap();
        let mut out = EmissionProbs::default();
        out.insert("A".to_string(), 42.0);
        hmm.calculate_emission_probabilities(&mut out).unwrap();
        assert_relative_eq!(out["A"], 0.6);
        assert_relative_eq!(out["B"], 0.4);
    }
}
