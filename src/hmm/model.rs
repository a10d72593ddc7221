//!
//! Definition of the HiddenMarkovModel
//!
//! The model owns an arena of states (`petgraph` `DiGraph`) whose edges are
//! `HMMTransition` records. States are addressed by `NodeIndex` internally
//! and by their unique name from the outside. An edge record is created the
//! first time a transition is enabled and is never removed; disabling only
//! clears its `enabled` flag.
//!
use super::params::HMMParams;
use super::state::HMMState;
use super::synonym::{SynonymClasses, SynonymTable};
use super::table::{ForwardBackward, Weighting};
use super::transition::HMMTransition;
use crate::common::{EdgeIndex, Freq, NodeIndex};
use crate::error::{HMMError, Result};
use crate::prob::{p, Prob};
use fnv::FnvHashMap;
use log::debug;
use petgraph::dot::Dot;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::VecDeque;

pub type HMMGraph = DiGraph<HMMState, HMMTransition>;

///
/// DAG-shaped Hidden Markov Model with trainable transitions
///
#[derive(Debug, Clone, Default)]
pub struct HiddenMarkovModel {
    pub(crate) graph: HMMGraph,
    pub(crate) name_to_state: FnvHashMap<String, NodeIndex>,
    pub(crate) synonyms: SynonymTable,
    /// per-example initial transition probability (start states)
    pub(crate) init_prob: FnvHashMap<NodeIndex, f64>,
    /// per-example emission evidence of emitting states
    pub(crate) train_emission_prob: FnvHashMap<NodeIndex, f64>,
    pub(crate) scratch: ForwardBackward,
    pub(crate) params: HMMParams,
    /// number of `train()` calls since the last `evaluate()`
    pub(crate) n_trained_examples: usize,
    pub(crate) variable_modifications: Vec<String>,
}

//
// construction and parameters
//
impl HiddenMarkovModel {
    pub fn new() -> HiddenMarkovModel {
        HiddenMarkovModel::default()
    }
    pub fn params(&self) -> &HMMParams {
        &self.params
    }
    pub fn set_params(&mut self, params: HMMParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }
    pub fn set_pseudo_counts(&mut self, pseudo_counts: f64) -> Result<()> {
        self.set_params(HMMParams {
            pseudo_counts,
            ..self.params
        })
    }
    pub fn get_pseudo_counts(&self) -> f64 {
        self.params.pseudo_counts
    }
    ///
    /// Opaque list of variable modifications supplied by the calling
    /// application. It is stored for the caller and never interpreted here.
    ///
    pub fn set_variable_modifications(&mut self, modifications: Vec<String>) {
        self.variable_modifications = modifications;
    }
    pub fn variable_modifications(&self) -> &[String] {
        &self.variable_modifications
    }
    ///
    /// Discard every state, transition, synonym, evidence and statistic.
    /// Parameters (pseudo counts) are kept.
    ///
    pub fn clear(&mut self) {
        *self = HiddenMarkovModel {
            params: self.params,
            ..HiddenMarkovModel::default()
        };
    }
}

//
// state graph
//
impl HiddenMarkovModel {
    ///
    /// Register a new state. Its name must not be used yet.
    ///
    pub fn add_new_state(&mut self, state: HMMState) -> Result<NodeIndex> {
        if self.name_to_state.contains_key(state.name()) {
            return Err(HMMError::DuplicateState(state.name().to_string()));
        }
        let name = state.name().to_string();
        let node = self.graph.add_node(state);
        self.name_to_state.insert(name, node);
        self.scratch.invalidate();
        Ok(node)
    }
    pub fn get_state(&self, name: &str) -> Result<&HMMState> {
        let node = self.state_index(name)?;
        Ok(&self.graph[node])
    }
    pub fn state_index(&self, name: &str) -> Result<NodeIndex> {
        self.name_to_state
            .get(name)
            .copied()
            .ok_or_else(|| HMMError::StateNotFound(name.to_string()))
    }
    /// state of the node. panics if the index is not in this model.
    pub fn state(&self, node: NodeIndex) -> &HMMState {
        &self.graph[node]
    }
    pub fn state_name(&self, node: NodeIndex) -> &str {
        self.graph[node].name()
    }
    pub fn get_number_of_states(&self) -> usize {
        self.graph.node_count()
    }
    /// the number of enabled transitions
    pub fn get_number_of_transitions(&self) -> usize {
        self.transitions().count()
    }
    ///
    /// iterator of all states
    /// Item is `(NodeIndex, &HMMState)`.
    ///
    pub fn states(&self) -> impl Iterator<Item = (NodeIndex, &HMMState)> + '_ {
        self.graph
            .node_indices()
            .map(move |node| (node, &self.graph[node]))
    }
    ///
    /// iterator of all enabled transitions
    /// Item is `(EdgeIndex, source, target, &HMMTransition)`.
    ///
    pub fn transitions(
        &self,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex, &HMMTransition)> + '_ {
        self.all_transitions().filter(|(_, _, _, t)| t.enabled)
    }
    ///
    /// iterator of every transition record, including disabled ones
    ///
    pub fn all_transitions(
        &self,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex, &HMMTransition)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.id(), e.source(), e.target(), e.weight()))
    }
    ///
    /// iterator of enabled child edges of the node
    ///
    /// Item is `(EdgeIndex, child NodeIndex, &HMMTransition)`
    ///
    pub fn childs(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &HMMTransition)> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .filter(|e| e.weight().enabled)
            .map(|e| (e.id(), e.target(), e.weight()))
    }
    ///
    /// iterator of enabled parent edges of the node
    ///
    /// Item is `(EdgeIndex, parent NodeIndex, &HMMTransition)`
    ///
    pub fn parents(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &HMMTransition)> + '_ {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .filter(|e| e.weight().enabled)
            .map(|e| (e.id(), e.source(), e.weight()))
    }
    /// names of the states reachable by one enabled transition, sorted
    pub fn successors(&self, name: &str) -> Result<Vec<&str>> {
        let node = self.state_index(name)?;
        let mut names: Vec<&str> = self
            .childs(node)
            .map(|(_, child, _)| self.state_name(child))
            .collect();
        names.sort_unstable();
        Ok(names)
    }
    /// names of the states with an enabled transition into `name`, sorted
    pub fn predecessors(&self, name: &str) -> Result<Vec<&str>> {
        let node = self.state_index(name)?;
        let mut names: Vec<&str> = self
            .parents(node)
            .map(|(_, parent, _)| self.state_name(parent))
            .collect();
        names.sort_unstable();
        Ok(names)
    }
    /// the state has no enabled successor
    pub fn is_terminal(&self, node: NodeIndex) -> bool {
        self.childs(node).next().is_none()
    }
    fn pair(&self, s1: &str, s2: &str) -> Result<(NodeIndex, NodeIndex)> {
        Ok((self.state_index(s1)?, self.state_index(s2)?))
    }
}

//
// transitions
//
impl HiddenMarkovModel {
    ///
    /// Enable `s1 -> s2`, creating its record if needed. A new record starts
    /// with the probability of its synonyms, or 0 if it has none. The
    /// probability of an existing record is kept.
    ///
    pub fn enable_transition(&mut self, s1: &str, s2: &str) -> Result<EdgeIndex> {
        let (v, w) = self.pair(s1, s2)?;
        Ok(self.enable_transition_by_index(v, w))
    }
    pub fn enable_transition_by_index(&mut self, v: NodeIndex, w: NodeIndex) -> EdgeIndex {
        let edge = match self.graph.find_edge(v, w) {
            Some(edge) => edge,
            None => {
                self.synonyms.invalidate();
                let edge = self.graph.add_edge(v, w, HMMTransition::empty());
                if let Some(other) = self.tied_members(edge).into_iter().find(|&e| e != edge) {
                    let prob = self.graph[other].probability;
                    self.graph[edge].probability = prob;
                }
                edge
            }
        };
        self.graph[edge].enabled = true;
        self.scratch.invalidate();
        edge
    }
    ///
    /// Disable `s1 -> s2`. Disabling a transition that was never enabled
    /// is a no-op.
    ///
    pub fn disable_transition(&mut self, s1: &str, s2: &str) -> Result<()> {
        let (v, w) = self.pair(s1, s2)?;
        if let Some(edge) = self.graph.find_edge(v, w) {
            self.graph[edge].enabled = false;
            self.scratch.invalidate();
        }
        Ok(())
    }
    /// Disable every transition of the model.
    pub fn disable_transitions(&mut self) {
        for t in self.graph.edge_weights_mut() {
            t.enabled = false;
        }
        self.scratch.invalidate();
    }
    pub fn is_transition_enabled(&self, s1: &str, s2: &str) -> Result<bool> {
        let (v, w) = self.pair(s1, s2)?;
        Ok(self
            .graph
            .find_edge(v, w)
            .map_or(false, |edge| self.graph[edge].enabled))
    }
    ///
    /// Set the probability of `s1 -> s2`. The transition is enabled and its
    /// training step counter is reset. Every transition tied to it by a
    /// synonym declaration takes the value too.
    ///
    pub fn set_transition_probability(&mut self, s1: &str, s2: &str, prob: f64) -> Result<()> {
        if !prob.is_finite() || prob < 0.0 {
            return Err(HMMError::InvalidProbability {
                target: format!("{} -> {}", s1, s2),
                value: prob,
            });
        }
        let (v, w) = self.pair(s1, s2)?;
        let edge = self.enable_transition_by_index(v, w);
        self.graph[edge].training_steps = 0;
        for member in self.tied_members(edge) {
            self.graph[member].probability = prob;
        }
        Ok(())
    }
    ///
    /// Probability of the enabled transition `s1 -> s2`.
    ///
    pub fn get_transition_probability(&self, s1: &str, s2: &str) -> Result<f64> {
        let edge = self.enabled_edge(s1, s2)?;
        Ok(self.graph[edge].probability)
    }
    ///
    /// Record of `s1 -> s2`, enabled or not.
    ///
    pub fn get_transition(&self, s1: &str, s2: &str) -> Result<&HMMTransition> {
        let edge = self.edge(s1, s2)?;
        Ok(&self.graph[edge])
    }
    ///
    /// Expected count of `s1 -> s2` accumulated in the current epoch,
    /// pooled over its synonym class once synonyms are resolved.
    ///
    pub fn transition_count(&self, s1: &str, s2: &str) -> Result<Freq> {
        let edge = self.edge(s1, s2)?;
        let members = match self.synonyms.classes() {
            Some(classes) => classes.members(edge),
            None => vec![edge],
        };
        Ok(members.into_iter().map(|e| self.graph[e].count).sum())
    }
    /// `s1 -> s2` received training mass in the last evaluated epoch
    pub fn is_trained_transition(&self, s1: &str, s2: &str) -> Result<bool> {
        Ok(self.get_transition(s1, s2)?.trained)
    }
    fn edge(&self, s1: &str, s2: &str) -> Result<EdgeIndex> {
        let (v, w) = self.pair(s1, s2)?;
        self.graph
            .find_edge(v, w)
            .ok_or_else(|| HMMError::TransitionNotFound {
                from: s1.to_string(),
                to: s2.to_string(),
            })
    }
    fn enabled_edge(&self, s1: &str, s2: &str) -> Result<EdgeIndex> {
        let (v, w) = self.pair(s1, s2)?;
        match self.graph.find_edge(v, w) {
            Some(edge) if self.graph[edge].enabled => Ok(edge),
            _ => Err(HMMError::TransitionNotEnabled {
                from: s1.to_string(),
                to: s2.to_string(),
            }),
        }
    }
}

//
// synonyms
//
impl HiddenMarkovModel {
    ///
    /// Tie `synonym1 -> synonym2` to `name1 -> name2`: both transitions share
    /// training counts and always carry the same probability.
    ///
    pub fn add_synonym_transition(
        &mut self,
        name1: &str,
        name2: &str,
        synonym1: &str,
        synonym2: &str,
    ) -> Result<()> {
        for name in [name1, name2, synonym1, synonym2] {
            self.state_index(name)?;
        }
        self.synonyms.declare(
            (name1.to_string(), name2.to_string()),
            (synonym1.to_string(), synonym2.to_string()),
        );
        Ok(())
    }
    ///
    /// Resolve the synonym declarations against the current edge records.
    ///
    /// Each class takes the probability of the canonical transition of its
    /// first declaration. Called by `train()` and `evaluate()`; a no-op when
    /// the classes are already up to date.
    ///
    pub fn build_synonyms(&mut self) -> Result<()> {
        if let Some(classes) = self.synonyms.classes() {
            if classes.n_edges() == self.graph.edge_count() {
                return Ok(());
            }
        }
        let mut pairs = Vec::with_capacity(self.synonyms.declarations().len());
        for declaration in self.synonyms.declarations() {
            let (c1, c2) = &declaration.canonical;
            let (s1, s2) = &declaration.synonym;
            pairs.push((self.edge(c1, c2)?, self.edge(s1, s2)?));
        }
        let classes = SynonymClasses::from_pairs(self.graph.edge_count(), pairs.iter().copied());

        let mut class_value: FnvHashMap<usize, f64> = FnvHashMap::default();
        for &(canonical, _) in pairs.iter() {
            let value = self.graph[canonical].probability;
            class_value.entry(classes.label(canonical)).or_insert(value);
        }
        for &(canonical, _) in pairs.iter() {
            let value = class_value[&classes.label(canonical)];
            for member in classes.members(canonical) {
                self.graph[member].probability = value;
            }
        }
        debug!(
            "resolved {} synonym declarations into {} classes",
            pairs.len(),
            classes.tied_classes().count()
        );
        self.synonyms.set_classes(classes);
        self.scratch.invalidate();
        Ok(())
    }
    ///
    /// Members of the synonym class of `edge` (including itself). Out of date
    /// classes are resolved again over the declarations whose transitions
    /// already exist.
    ///
    fn tied_members(&self, edge: EdgeIndex) -> Vec<EdgeIndex> {
        if let Some(classes) = self.synonyms.classes() {
            return classes.members(edge);
        }
        if self.synonyms.declarations().is_empty() {
            return vec![edge];
        }
        let pairs: Vec<(EdgeIndex, EdgeIndex)> = self
            .synonyms
            .declarations()
            .iter()
            .filter_map(|d| {
                let canonical = self.edge(&d.canonical.0, &d.canonical.1).ok()?;
                let synonym = self.edge(&d.synonym.0, &d.synonym.1).ok()?;
                Some((canonical, synonym))
            })
            .collect();
        SynonymClasses::from_pairs(self.graph.edge_count(), pairs).members(edge)
    }
    /// resolved synonym classes, or every edge in its own class
    pub(crate) fn synonym_classes(&self) -> SynonymClasses {
        match self.synonyms.classes() {
            Some(classes) => classes.clone(),
            None => SynonymClasses::from_pairs(self.graph.edge_count(), Vec::new()),
        }
    }
    /// declared synonyms as `(synonym, canonical)` name pairs
    pub fn synonym_transitions(&self) -> impl Iterator<Item = (&str, &str, &str, &str)> + '_ {
        self.synonyms.declarations().iter().map(|d| {
            (
                d.synonym.0.as_str(),
                d.synonym.1.as_str(),
                d.canonical.0.as_str(),
                d.canonical.1.as_str(),
            )
        })
    }
}

//
// per-example evidence
//
impl HiddenMarkovModel {
    ///
    /// Mark `state` as a start state of the current example with the
    /// initial transition probability `prob`.
    ///
    pub fn set_initial_transition_probability(&mut self, state: &str, prob: f64) -> Result<()> {
        let node = self.state_index(state)?;
        check_probability(state, prob)?;
        self.init_prob.insert(node, prob);
        self.scratch.invalidate();
        Ok(())
    }
    pub fn clear_initial_transition_probabilities(&mut self) {
        self.init_prob.clear();
        self.scratch.invalidate();
    }
    ///
    /// Set the observed emission evidence of the emitting `state` for the
    /// current example.
    ///
    pub fn set_training_emission_probability(&mut self, state: &str, prob: f64) -> Result<()> {
        let node = self.state_index(state)?;
        if self.graph[node].is_hidden() {
            return Err(HMMError::HiddenStateEvidence(state.to_string()));
        }
        check_probability(state, prob)?;
        self.train_emission_prob.insert(node, prob);
        self.scratch.invalidate();
        Ok(())
    }
    pub fn clear_training_emission_probabilities(&mut self) {
        self.train_emission_prob.clear();
        self.scratch.invalidate();
    }
    ///
    /// Weight of the state in a pass: 1 for hidden states, the emission
    /// evidence for emitting states. Emitting states without evidence weigh
    /// 0 in training and 1 in inference.
    ///
    pub(crate) fn emission_weight(&self, node: NodeIndex, weighting: Weighting) -> Prob {
        if self.graph[node].is_hidden() {
            return Prob::one();
        }
        match (self.train_emission_prob.get(&node), weighting) {
            (Some(&value), _) => p(value),
            (None, Weighting::Training) => Prob::zero(),
            (None, Weighting::Inference) => Prob::one(),
        }
    }
    pub(crate) fn initial_probability(&self, node: NodeIndex) -> Prob {
        self.init_prob
            .get(&node)
            .map_or(Prob::zero(), |&value| p(value))
    }
    ///
    /// Start states of the current example, ordered by index
    ///
    pub fn initial_states(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.init_prob.keys().copied().collect();
        nodes.sort();
        nodes
    }
}

fn check_probability(target: &str, prob: f64) -> Result<()> {
    if prob.is_finite() && prob >= 0.0 {
        Ok(())
    } else {
        Err(HMMError::InvalidProbability {
            target: target.to_string(),
            value: prob,
        })
    }
}

//
// graph traversal
//
impl HiddenMarkovModel {
    ///
    /// Topological order of all states over the enabled transitions
    /// (Kahn's algorithm, ties broken by index).
    ///
    pub fn topological_order(&self) -> Result<Vec<NodeIndex>> {
        let n = self.graph.node_count();
        let mut in_degree = vec![0usize; n];
        for (_, _, target, _) in self.transitions() {
            in_degree[target.index()] += 1;
        }
        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|node| in_degree[node.index()] == 0)
            .collect();
        let mut order = Vec::with_capacity(n);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for (_, child, _) in self.childs(node) {
                in_degree[child.index()] -= 1;
                if in_degree[child.index()] == 0 {
                    queue.push_back(child);
                }
            }
        }
        if order.len() < n {
            let stuck = self
                .graph
                .node_indices()
                .find(|node| in_degree[node.index()] > 0)
                .map(|node| self.state_name(node).to_string())
                .unwrap_or_default();
            return Err(HMMError::CyclicGraph(stuck));
        }
        Ok(order)
    }
}

impl std::fmt::Display for HiddenMarkovModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", Dot::with_config(&self.graph, &[]))
    }
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::{mock_fragmentation, mock_linear};

    #[test]
    fn states_registration_and_lookup() {
        let mut hmm = HiddenMarkovModel::new();
        let s = hmm.add_new_state(HMMState::new("S")).unwrap();
        let m = hmm.add_new_state(HMMState::emitting("M")).unwrap();
        assert_eq!(hmm.get_number_of_states(), 2);
        assert_eq!(hmm.state_index("S").unwrap(), s);
        assert_eq!(hmm.state_name(m), "M");
        assert!(!hmm.get_state("M").unwrap().is_hidden());
        assert!(matches!(
            hmm.add_new_state(HMMState::new("S")),
            Err(HMMError::DuplicateState(name)) if name == "S"
        ));
        assert_eq!(hmm.get_number_of_states(), 2);
        assert!(matches!(
            hmm.get_state("X"),
            Err(HMMError::StateNotFound(name)) if name == "X"
        ));
    }
    #[test]
    fn enable_and_disable_transitions() {
        let mut hmm = mock_linear();
        assert_eq!(hmm.successors("S").unwrap(), vec!["M"]);
        assert_eq!(hmm.predecessors("M").unwrap(), vec!["S"]);
        hmm.disable_transition("S", "M").unwrap();
        assert!(hmm.successors("S").unwrap().is_empty());
        assert!(hmm.predecessors("M").unwrap().is_empty());
        assert!(!hmm.is_transition_enabled("S", "M").unwrap());
        assert!(matches!(
            hmm.get_transition_probability("S", "M"),
            Err(HMMError::TransitionNotEnabled { .. })
        ));
        // re-enabling restores the stored probability
        hmm.enable_transition("S", "M").unwrap();
        assert_eq!(hmm.get_transition_probability("S", "M").unwrap(), 1.0);

        hmm.disable_transitions();
        assert_eq!(hmm.get_number_of_transitions(), 0);
        assert!(hmm.disable_transition("M", "S").is_ok());
    }
    #[test]
    fn set_transition_probability_enables() {
        let mut hmm = HiddenMarkovModel::new();
        hmm.add_new_state(HMMState::new("A")).unwrap();
        hmm.add_new_state(HMMState::new("B")).unwrap();
        assert!(matches!(
            hmm.get_transition_probability("A", "B"),
            Err(HMMError::TransitionNotEnabled { .. })
        ));
        assert!(matches!(
            hmm.get_transition("A", "B"),
            Err(HMMError::TransitionNotFound { .. })
        ));
        hmm.set_transition_probability("A", "B", 0.4).unwrap();
        assert!(hmm.is_transition_enabled("A", "B").unwrap());
        assert_eq!(hmm.get_transition_probability("A", "B").unwrap(), 0.4);
        assert!(hmm.set_transition_probability("A", "B", -0.1).is_err());
        assert!(hmm.set_transition_probability("A", "C", 0.1).is_err());
    }
    #[test]
    fn synonyms_share_probability_after_resolution() {
        let mut hmm = HiddenMarkovModel::new();
        for name in ["A", "B", "C", "D"] {
            hmm.add_new_state(HMMState::new(name)).unwrap();
        }
        hmm.set_transition_probability("A", "B", 0.7).unwrap();
        hmm.set_transition_probability("C", "D", 0.2).unwrap();
        hmm.add_synonym_transition("A", "B", "C", "D").unwrap();
        hmm.build_synonyms().unwrap();
        assert_eq!(hmm.get_transition_probability("C", "D").unwrap(), 0.7);
        hmm.set_transition_probability("C", "D", 0.3).unwrap();
        assert_eq!(hmm.get_transition_probability("A", "B").unwrap(), 0.3);
        assert!(hmm.add_synonym_transition("A", "B", "C", "X").is_err());
    }
    #[test]
    fn synonym_write_survives_new_transitions() {
        let mut hmm = mock_fragmentation();
        hmm.build_synonyms().unwrap();
        // a new record leaves the resolved classes out of date
        hmm.enable_transition("A", "E").unwrap();
        hmm.set_transition_probability("B", "M2", 0.8).unwrap();
        assert_eq!(hmm.get_transition_probability("A", "M1").unwrap(), 0.8);
        hmm.build_synonyms().unwrap();
        assert_eq!(hmm.get_transition_probability("A", "M1").unwrap(), 0.8);
        assert_eq!(hmm.get_transition_probability("B", "M2").unwrap(), 0.8);
    }
    #[test]
    fn new_transition_joins_value_of_its_synonyms() {
        let mut hmm = HiddenMarkovModel::new();
        for name in ["A", "B", "C", "D"] {
            hmm.add_new_state(HMMState::new(name)).unwrap();
        }
        hmm.add_synonym_transition("A", "B", "C", "D").unwrap();
        hmm.set_transition_probability("C", "D", 0.3).unwrap();
        hmm.enable_transition("A", "B").unwrap();
        assert_eq!(hmm.get_transition_probability("A", "B").unwrap(), 0.3);
        hmm.build_synonyms().unwrap();
        assert_eq!(hmm.get_transition_probability("A", "B").unwrap(), 0.3);
        assert_eq!(hmm.get_transition_probability("C", "D").unwrap(), 0.3);
    }
    #[test]
    fn synonyms_over_missing_transition() {
        let mut hmm = HiddenMarkovModel::new();
        for name in ["A", "B", "C", "D"] {
            hmm.add_new_state(HMMState::new(name)).unwrap();
        }
        hmm.set_transition_probability("A", "B", 0.7).unwrap();
        hmm.add_synonym_transition("A", "B", "C", "D").unwrap();
        assert!(matches!(
            hmm.build_synonyms(),
            Err(HMMError::TransitionNotFound { from, to }) if from == "C" && to == "D"
        ));
    }
    #[test]
    fn emission_evidence_only_for_emitting_states() {
        let mut hmm = mock_linear();
        assert!(matches!(
            hmm.set_training_emission_probability("S", 0.5),
            Err(HMMError::HiddenStateEvidence(_))
        ));
        assert!(hmm.set_training_emission_probability("M", 0.5).is_ok());
        assert!(hmm.set_initial_transition_probability("S", f64::NAN).is_err());
        assert!(hmm.set_initial_transition_probability("Q", 1.0).is_err());
    }
    #[test]
    fn topological_order_and_cycles() {
        let mut hmm = mock_linear();
        let order: Vec<&str> = hmm
            .topological_order()
            .unwrap()
            .into_iter()
            .map(|v| hmm.state_name(v))
            .collect();
        assert_eq!(order, vec!["S", "M", "E"]);
        hmm.enable_transition("E", "S").unwrap();
        assert!(matches!(
            hmm.topological_order(),
            Err(HMMError::CyclicGraph(_))
        ));
    }
    #[test]
    fn clear_discards_everything() {
        let mut hmm = mock_linear();
        hmm.set_pseudo_counts(0.5).unwrap();
        hmm.set_variable_modifications(vec!["Oxidation (M)".to_string()]);
        hmm.clear();
        assert_eq!(hmm.get_number_of_states(), 0);
        assert!(matches!(
            hmm.get_state("S"),
            Err(HMMError::StateNotFound(_))
        ));
        assert!(hmm.variable_modifications().is_empty());
        assert_eq!(hmm.get_pseudo_counts(), 0.5);
        assert!(hmm.set_pseudo_counts(-1.0).is_err());
    }
    #[test]
    fn display_as_dot() {
        let hmm = mock_linear();
        let dot = hmm.to_string();
        assert!(dot.contains("digraph"));
        assert!(dot.contains("M (emitting)"));
        assert!(dot.contains("p=1"));
    }
}
