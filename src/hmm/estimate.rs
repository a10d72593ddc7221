//!
//! Fallback estimation of transitions that received no training mass
//!
use super::model::HiddenMarkovModel;
use crate::common::{EdgeIndex, NodeIndex};
use itertools::Itertools;
use log::{debug, info};

impl HiddenMarkovModel {
    ///
    /// Give every enabled transition that was not trained in the last epoch
    /// a usable probability, then renormalize the affected sources.
    ///
    /// The estimate of an untrained `s -> t` is the first available of
    ///
    /// 1. mean probability of the trained transitions out of `s`
    /// 2. mean probability of the trained transitions into `t` from other
    ///    sources (analogous transitions)
    /// 3. its current probability, if non-zero
    /// 4. `1 / outdeg(s)`
    ///
    /// All estimates are computed from the probabilities before the update.
    /// Returns the number of estimated transitions.
    ///
    pub fn estimate_untrained_transitions(&mut self) -> usize {
        let estimates: Vec<(EdgeIndex, NodeIndex, f64)> = self
            .transitions()
            .filter(|(_, _, _, t)| !t.trained)
            .map(|(edge, s, t, _)| {
                let value = self.estimate_transition(edge, s, t);
                debug!(
                    "estimated {} -> {} as {}",
                    self.state_name(s),
                    self.state_name(t),
                    value
                );
                (edge, s, value)
            })
            .collect();
        for &(edge, _, value) in estimates.iter() {
            self.graph[edge].probability = value;
        }

        let sources: Vec<NodeIndex> = estimates.iter().map(|&(_, s, _)| s).unique().collect();
        for &s in sources.iter() {
            self.normalize_source(s);
        }
        info!(
            "estimated {} untrained transitions of {} states",
            estimates.len(),
            sources.len()
        );
        self.scratch.invalidate();
        estimates.len()
    }
    fn estimate_transition(&self, edge: EdgeIndex, s: NodeIndex, t: NodeIndex) -> f64 {
        let siblings: Vec<f64> = self
            .childs(s)
            .filter(|(_, _, tr)| tr.trained)
            .map(|(_, _, tr)| tr.probability)
            .collect();
        if let Some(mean) = mean(&siblings) {
            return mean;
        }
        let analogous: Vec<f64> = self
            .parents(t)
            .filter(|&(_, parent, tr)| parent != s && tr.trained)
            .map(|(_, _, tr)| tr.probability)
            .collect();
        if let Some(mean) = mean(&analogous) {
            return mean;
        }
        let current = self.graph[edge].probability;
        if current > 0.0 {
            current
        } else {
            1.0 / self.childs(s).count() as f64
        }
    }
    /// scale the enabled transitions of `s` to sum to one (uniform if zero)
    fn normalize_source(&mut self, s: NodeIndex) {
        let childs: Vec<(EdgeIndex, f64)> = self
            .childs(s)
            .map(|(e, _, t)| (e, t.probability))
            .collect();
        let total: f64 = childs.iter().map(|(_, p)| p).sum();
        let n = childs.len() as f64;
        for (e, prob) in childs {
            self.graph[e].probability = if total > 0.0 { prob / total } else { 1.0 / n };
        }
    }
}

fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        None
    } else {
        Some(xs.iter().sum::<f64>() / xs.len() as f64)
    }
}
