//!
//! Training engine: expectation (`train`) and maximization (`evaluate`)
//!
//! ```text
//! train():    count(a,b) += f[a] t(a,b) w(b) b[b] / P(x)     per example
//! evaluate(): t(s,c)      = (count(s,c) + pc) / T(s)          per epoch
//!             T(s)        = \sum_{c: enabled childs} (count(s,c) + pc)
//! ```
//!
//! Transitions tied by synonyms pool their counts and share one value
//!
//! ```text
//! t_C = \sum_{e in C} (count(e) + pc) / \sum_{e in C} T(source(e))
//! ```
//!
//! and the untied transitions of each source share the remaining mass.
//!
use super::example::TrainingExample;
use super::model::HiddenMarkovModel;
use super::table::Weighting;
use crate::common::{EdgeIndex, Freq, NodeIndex};
use crate::error::{HMMError, Result};
use crate::prob::{p, Prob};
use fnv::FnvHashMap;
use log::{debug, info, warn};

impl HiddenMarkovModel {
    ///
    /// Accumulate the expected transition counts of the current example.
    ///
    /// Runs forward and backward in training weighting and returns `P(x)`.
    /// Probabilities are never changed here. Every enabled transition gets
    /// one `count_history` entry per call, zero included. An example with
    /// `P(x) = 0` contributes nothing.
    ///
    pub fn train(&mut self) -> Result<Prob> {
        self.build_synonyms()?;
        self.run_forward(Weighting::Training)?;
        self.run_backward(Weighting::Training)?;
        let px = self.probability_of_evidence()?;
        self.n_trained_examples += 1;

        if px.is_zero() {
            warn!(
                "example #{} has zero probability under the current model; no counts added",
                self.n_trained_examples
            );
        }

        let mut increments: Vec<(EdgeIndex, Freq)> = Vec::new();
        for (edge, a, b, t) in self.transitions() {
            let xi = if px.is_zero() {
                0.0
            } else {
                self.expected_count(a, b, p(t.probability), px)?
            };
            increments.push((edge, xi));
        }

        for (edge, xi) in increments {
            let t = &mut self.graph[edge];
            t.count_history.push(xi);
            if xi > 0.0 {
                t.count += xi;
                t.training_steps += 1;
            }
        }
        debug!("trained example #{} P(x)={}", self.n_trained_examples, px);
        Ok(px)
    }
    ///
    /// `f[a] t(a,b) w(b) b[b] / P(x)` on the current scratch tables
    ///
    fn expected_count(&self, a: NodeIndex, b: NodeIndex, t: Prob, px: Prob) -> Result<Freq> {
        let w = self.emission_weight(b, Weighting::Training);
        let xi = self.forward_variable(a)? * t * w * self.backward_variable(b)? / px;
        Ok(xi.to_value())
    }
    ///
    /// Re-estimate the transition probabilities from the counts accumulated
    /// since the last call, then reset the counts for the next epoch.
    ///
    /// Every source with a positive smoothed total `T(s)` is renormalized,
    /// including sources that received no mass (uniform when `pc > 0`).
    /// Only when `T(s) = 0` (no mass and no smoothing) the current values
    /// are kept, rescaled to sum to one.
    ///
    pub fn evaluate(&mut self) -> Result<()> {
        if self.n_trained_examples == 0 {
            return Err(HMMError::NotTrained);
        }
        self.build_synonyms()?;
        let classes = self.synonym_classes();
        let pc = self.params.pseudo_counts;
        let tolerance = self.params.tolerance;
        let n_edges = self.graph.edge_count();

        // (1) per-source totals and per-class mass
        let mut source_total = vec![0.0; self.get_number_of_states()];
        let mut class_mass: FnvHashMap<usize, Freq> = FnvHashMap::default();
        for (edge, source, _, t) in self.transitions() {
            source_total[source.index()] += t.count + pc;
            *class_mass.entry(classes.label(edge)).or_insert(0.0) += t.count;
        }
        let has_mass = |edge: EdgeIndex| {
            class_mass
                .get(&classes.label(edge))
                .map_or(false, |&m| m > 0.0)
        };

        // (2) tied classes
        let mut new_prob: Vec<Option<f64>> = vec![None; n_edges];
        for members in classes.tied_classes() {
            // (edge, source) of the enabled members
            let enabled: Vec<(EdgeIndex, NodeIndex)> = members
                .iter()
                .filter(|&&e| self.graph[e].enabled)
                .filter_map(|&e| self.graph.edge_endpoints(e).map(|(s, _)| (e, s)))
                .collect();
            if enabled.is_empty() {
                continue;
            }
            let num: f64 = enabled.iter().map(|&(e, _)| self.graph[e].count + pc).sum();
            let den: f64 = enabled.iter().map(|(_, s)| source_total[s.index()]).sum();
            // no smoothing and no mass: keep the current value
            let value = if den > 0.0 {
                num / den
            } else {
                self.graph[enabled[0].0].probability
            };
            for (e, _) in enabled {
                new_prob[e.index()] = Some(value);
            }
        }

        // (3) free transitions of each source share the remaining mass
        for s in self.graph.node_indices() {
            let childs: Vec<(EdgeIndex, f64, f64)> = self
                .childs(s)
                .map(|(e, _, t)| (e, t.count, t.probability))
                .collect();
            if childs.is_empty() {
                continue;
            }
            let tied: f64 = childs.iter().filter_map(|(e, _, _)| new_prob[e.index()]).sum();
            let free: Vec<(EdgeIndex, f64)> = childs
                .iter()
                .filter(|(e, _, _)| new_prob[e.index()].is_none())
                .map(|&(e, count, prob)| {
                    let weight = if source_total[s.index()] > 0.0 {
                        count + pc
                    } else {
                        prob
                    };
                    (e, weight)
                })
                .collect();
            if tied > 1.0 + tolerance {
                warn!(
                    "tied transitions of '{}' sum to {} > 1",
                    self.state_name(s),
                    tied
                );
            }
            if free.is_empty() {
                if (tied - 1.0).abs() > tolerance {
                    debug!(
                        "transitions of '{}' are all tied and sum to {}",
                        self.state_name(s),
                        tied
                    );
                }
                continue;
            }
            let remaining = (1.0 - tied).max(0.0);
            let total: f64 = free.iter().map(|(_, w)| w).sum();
            let n_free = free.len() as f64;
            for (e, weight) in free {
                let value = if total > 0.0 {
                    remaining * weight / total
                } else {
                    remaining / n_free
                };
                new_prob[e.index()] = Some(value);
            }
        }

        // (4) commit and reset the epoch
        for (i, value) in new_prob.into_iter().enumerate() {
            let edge = EdgeIndex::new(i);
            let trained = has_mass(edge);
            let t = &mut self.graph[edge];
            if let Some(value) = value {
                t.probability = value;
                t.probability_history.push(value);
                t.trained = trained;
            }
            t.count = 0.0;
        }
        info!(
            "evaluated {} examples over {} transitions",
            self.n_trained_examples,
            self.get_number_of_transitions()
        );
        self.n_trained_examples = 0;
        self.scratch.invalidate();
        Ok(())
    }
    ///
    /// One epoch: apply each example's evidence, `train()`, clear the
    /// evidence. `evaluate()` is left to the caller.
    ///
    /// Returns the total `log P(x)` of the examples with non-zero probability.
    ///
    pub fn train_examples(&mut self, examples: &[TrainingExample]) -> Result<f64> {
        let mut log_likelihood = 0.0;
        for example in examples {
            example.apply(self)?;
            let px = self.train();
            self.clear_initial_transition_probabilities();
            self.clear_training_emission_probabilities();
            let px = px?;
            if !px.is_zero() {
                log_likelihood += px.to_log_value();
            }
        }
        Ok(log_likelihood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::{mock_branching, mock_linear};
    use crate::hmm::state::HMMState;

    fn train_branching(hmm: &mut HiddenMarkovModel, a: f64, b: f64) -> Prob {
        hmm.set_initial_transition_probability("S", 1.0).unwrap();
        hmm.set_training_emission_probability("A", a).unwrap();
        hmm.set_training_emission_probability("B", b).unwrap();
        let px = hmm.train().unwrap();
        hmm.clear_initial_transition_probabilities();
        hmm.clear_training_emission_probabilities();
        px
    }

    #[test]
    fn train_accumulates_expected_counts() {
        let mut hmm = mock_branching();
        let px = train_branching(&mut hmm, 0.5, 1.0);
        assert_relative_eq!(px.to_value(), 0.7);
        // posterior of S -> A is 0.3 / 0.7
        assert_relative_eq!(hmm.transition_count("S", "A").unwrap(), 0.3 / 0.7);
        assert_relative_eq!(hmm.transition_count("S", "B").unwrap(), 0.4 / 0.7);
        assert_relative_eq!(hmm.transition_count("A", "E").unwrap(), 0.3 / 0.7);
        let t = hmm.get_transition("S", "A").unwrap();
        assert_eq!(t.training_steps, 1);
        assert_eq!(t.count_history.len(), 1);
        train_branching(&mut hmm, 0.0, 1.0);
        let t = hmm.get_transition("S", "A").unwrap();
        assert_eq!(t.training_steps, 1);
        assert_eq!(t.count_history.len(), 2);
        assert_eq!(t.count_history[1], 0.0);
        // probabilities are untouched
        assert_eq!(hmm.get_transition_probability("S", "A").unwrap(), 0.6);
    }
    #[test]
    fn evaluate_renormalizes_counts() {
        let mut hmm = mock_branching();
        hmm.set_pseudo_counts(0.0).unwrap();
        train_branching(&mut hmm, 0.5, 1.0);
        hmm.evaluate().unwrap();
        assert_relative_eq!(hmm.get_transition_probability("S", "A").unwrap(), 3.0 / 7.0);
        assert_relative_eq!(hmm.get_transition_probability("S", "B").unwrap(), 4.0 / 7.0);
        assert_relative_eq!(hmm.get_transition_probability("A", "E").unwrap(), 1.0);
        assert!(hmm.is_trained_transition("S", "A").unwrap());
        let t = hmm.get_transition("S", "A").unwrap();
        assert_eq!(t.count, 0.0);
        assert_eq!(t.probability_history.len(), 1);
    }
    #[test]
    fn evaluate_requires_training() {
        let mut hmm = mock_linear();
        assert!(matches!(hmm.evaluate(), Err(HMMError::NotTrained)));
        hmm.set_initial_transition_probability("S", 1.0).unwrap();
        hmm.set_training_emission_probability("M", 0.5).unwrap();
        hmm.train().unwrap();
        assert!(hmm.evaluate().is_ok());
        assert!(matches!(hmm.evaluate(), Err(HMMError::NotTrained)));
    }
    #[test]
    fn zero_probability_example_adds_nothing() {
        let mut hmm = mock_branching();
        hmm.set_pseudo_counts(0.0).unwrap();
        let px = train_branching(&mut hmm, 0.0, 0.0);
        assert!(px.is_zero());
        assert_eq!(hmm.transition_count("S", "A").unwrap(), 0.0);
        let t = hmm.get_transition("S", "A").unwrap();
        assert_eq!(t.count_history, vec![0.0]);
        assert_eq!(t.training_steps, 0);
        // without smoothing the sources keep their probabilities
        hmm.evaluate().unwrap();
        assert_relative_eq!(hmm.get_transition_probability("S", "A").unwrap(), 0.6);
        assert!(!hmm.is_trained_transition("S", "A").unwrap());
    }
    #[test]
    fn zero_probability_example_with_smoothing_gives_uniform() {
        let mut hmm = mock_branching();
        hmm.set_pseudo_counts(1.0).unwrap();
        train_branching(&mut hmm, 0.0, 0.0);
        hmm.evaluate().unwrap();
        assert_relative_eq!(hmm.get_transition_probability("S", "A").unwrap(), 0.5);
        assert_relative_eq!(hmm.get_transition_probability("S", "B").unwrap(), 0.5);
    }
    #[test]
    fn reached_source_without_mass_is_smoothed() {
        // S -> A (0.6) / B (0.4), A -> E (0.9) / F (0.1), B -> E
        let mut hmm = mock_branching();
        hmm.add_new_state(HMMState::new("F")).unwrap();
        hmm.set_transition_probability("A", "E", 0.9).unwrap();
        hmm.set_transition_probability("A", "F", 0.1).unwrap();
        hmm.set_pseudo_counts(1.0).unwrap();
        train_branching(&mut hmm, 0.0, 1.0);
        assert_eq!(hmm.transition_count("A", "E").unwrap(), 0.0);
        assert_eq!(hmm.transition_count("A", "F").unwrap(), 0.0);
        hmm.evaluate().unwrap();
        assert_relative_eq!(hmm.get_transition_probability("A", "E").unwrap(), 0.5);
        assert_relative_eq!(hmm.get_transition_probability("A", "F").unwrap(), 0.5);
        assert!(!hmm.is_trained_transition("A", "E").unwrap());
    }
    #[test]
    fn pseudo_counts_smooth_unused_transitions() {
        let mut hmm = mock_branching();
        hmm.set_pseudo_counts(1.0).unwrap();
        train_branching(&mut hmm, 0.0, 1.0);
        hmm.evaluate().unwrap();
        // counts: S->A 0, S->B 1
        assert_relative_eq!(hmm.get_transition_probability("S", "A").unwrap(), 1.0 / 3.0);
        assert_relative_eq!(hmm.get_transition_probability("S", "B").unwrap(), 2.0 / 3.0);
        assert!(!hmm.is_trained_transition("S", "A").unwrap());
        assert!(hmm.is_trained_transition("S", "B").unwrap());
    }
    #[test]
    fn train_examples_clears_evidence() {
        let mut hmm = mock_linear();
        let examples = vec![
            TrainingExample::new().with_init("S", 1.0).with_emission("M", 0.9),
            TrainingExample::new().with_init("S", 1.0).with_emission("M", 0.5),
        ];
        let ll = hmm.train_examples(&examples).unwrap();
        assert_relative_eq!(ll, 0.9f64.ln() + 0.5f64.ln());
        assert!(hmm.initial_states().is_empty());
        assert_relative_eq!(hmm.transition_count("S", "M").unwrap(), 2.0);
        hmm.evaluate().unwrap();
        assert_relative_eq!(hmm.get_transition_probability("S", "M").unwrap(), 1.0);
    }
}
