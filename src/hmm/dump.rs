//!
//! Diagnostic dumps of the model into an injectable sink
//!
use super::model::HiddenMarkovModel;
use super::transition::HMMTransition;
use crate::common::NodeIndex;
use fnv::FnvHashSet;
use log::debug;
use std::collections::BTreeSet;

///
/// One line of a dump
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DumpEvent<'a> {
    /// an enabled transition and its statistics
    Transition {
        from: &'a str,
        to: &'a str,
        transition: &'a HMMTransition,
    },
    /// a state reachable from a start state in `depth` steps
    Reachable { depth: usize, state: &'a str },
}

impl<'a> std::fmt::Display for DumpEvent<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DumpEvent::Transition {
                from,
                to,
                transition,
            } => write!(
                f,
                "{} -> {} {} count={} steps={}",
                from, to, transition.probability, transition.count, transition.training_steps
            ),
            DumpEvent::Reachable { depth, state } => write!(f, "{}\t{}", depth, state),
        }
    }
}

///
/// Destination of dump events
///
pub trait DumpSink {
    fn record(&mut self, event: DumpEvent<'_>);
}

/// Sink writing each event with `log::debug!`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DumpSink for LogSink {
    fn record(&mut self, event: DumpEvent<'_>) {
        debug!("{}", event);
    }
}

/// collects the rendered events
impl DumpSink for Vec<String> {
    fn record(&mut self, event: DumpEvent<'_>) {
        self.push(event.to_string());
    }
}

impl HiddenMarkovModel {
    ///
    /// Dump every enabled transition, sorted by `(from, to)` names
    ///
    pub fn dump<S: DumpSink>(&self, sink: &mut S) {
        let mut transitions: Vec<(&str, &str, &HMMTransition)> = self
            .transitions()
            .map(|(_, s, t, tr)| (self.state_name(s), self.state_name(t), tr))
            .collect();
        transitions.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        for (from, to, transition) in transitions {
            sink.record(DumpEvent::Transition {
                from,
                to,
                transition,
            });
        }
    }
    ///
    /// Dump the states reachable from the start states of the current
    /// example, level by level. Each state is reported once, at its
    /// shallowest depth.
    ///
    pub fn forward_dump<S: DumpSink>(&self, sink: &mut S) {
        let mut visited: FnvHashSet<NodeIndex> = self.initial_states().into_iter().collect();
        let mut level: BTreeSet<NodeIndex> = visited.iter().copied().collect();
        let mut depth = 0;
        while !level.is_empty() {
            let mut next = BTreeSet::new();
            for &node in level.iter() {
                sink.record(DumpEvent::Reachable {
                    depth,
                    state: self.state_name(node),
                });
                for (_, child, _) in self.childs(node) {
                    if visited.insert(child) {
                        next.insert(child);
                    }
                }
            }
            level = next;
            depth += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::mock_branching;

    #[test]
    fn dump_lists_enabled_transitions() {
        let mut hmm = mock_branching();
        hmm.disable_transition("B", "E").unwrap();
        let mut lines: Vec<String> = Vec::new();
        hmm.dump(&mut lines);
        assert_eq!(
            lines,
            vec![
                "A -> E 1 count=0 steps=0",
                "S -> A 0.6 count=0 steps=0",
                "S -> B 0.4 count=0 steps=0",
            ]
        );
        hmm.dump(&mut LogSink);
    }
    #[test]
    fn forward_dump_by_depth() {
        let mut hmm = mock_branching();
        hmm.set_initial_transition_probability("S", 1.0).unwrap();
        let mut lines: Vec<String> = Vec::new();
        hmm.forward_dump(&mut lines);
        assert_eq!(lines, vec!["0\tS", "1\tA", "1\tB", "2\tE"]);
    }
}
