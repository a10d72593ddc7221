//!
//! Mock HMMs for testing
//!
use super::example::TrainingExample;
use super::model::HiddenMarkovModel;
use super::state::HMMState;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

fn add_states(hmm: &mut HiddenMarkovModel, states: &[HMMState]) {
    for state in states {
        hmm.add_new_state(state.clone()).unwrap();
    }
}

///
/// ```text
/// S --1.0--> M --1.0--> E
/// ```
///
/// `S` and `E` are hidden, `M` is emitting.
///
pub fn mock_linear() -> HiddenMarkovModel {
    let mut hmm = HiddenMarkovModel::new();
    add_states(
        &mut hmm,
        &[HMMState::new("S"), HMMState::emitting("M"), HMMState::new("E")],
    );
    hmm.set_transition_probability("S", "M", 1.0).unwrap();
    hmm.set_transition_probability("M", "E", 1.0).unwrap();
    hmm
}

///
/// ```text
///      0.6  A  1.0
///   S <          > E
///      0.4  B  1.0
/// ```
///
/// `A` and `B` are emitting.
///
pub fn mock_branching() -> HiddenMarkovModel {
    let mut hmm = HiddenMarkovModel::new();
    add_states(
        &mut hmm,
        &[
            HMMState::new("S"),
            HMMState::emitting("A"),
            HMMState::emitting("B"),
            HMMState::new("E"),
        ],
    );
    hmm.set_transition_probability("S", "A", 0.6).unwrap();
    hmm.set_transition_probability("S", "B", 0.4).unwrap();
    hmm.set_transition_probability("A", "E", 1.0).unwrap();
    hmm.set_transition_probability("B", "E", 1.0).unwrap();
    hmm
}

///
/// Two fragmentation sites `A` and `B` with tied outcomes
///
/// ```text
/// A -> M1, A -> N1        (A -> M1) ~ (B -> M2)
/// B -> M2, B -> N2        (A -> N1) ~ (B -> N2)
/// M*, N* -> E
/// ```
///
/// Every branch starts at 0.5; `M*` and `N*` are emitting.
///
pub fn mock_fragmentation() -> HiddenMarkovModel {
    let mut hmm = HiddenMarkovModel::new();
    add_states(
        &mut hmm,
        &[
            HMMState::new("A"),
            HMMState::new("B"),
            HMMState::emitting("M1"),
            HMMState::emitting("N1"),
            HMMState::emitting("M2"),
            HMMState::emitting("N2"),
            HMMState::new("E"),
        ],
    );
    for (source, targets) in [("A", ["M1", "N1"]), ("B", ["M2", "N2"])] {
        for target in targets {
            hmm.set_transition_probability(source, target, 0.5).unwrap();
            hmm.set_transition_probability(target, "E", 1.0).unwrap();
        }
    }
    hmm.add_synonym_transition("A", "M1", "B", "M2").unwrap();
    hmm.add_synonym_transition("A", "N1", "B", "N2").unwrap();
    hmm
}

///
/// Create a random layered DAG of `n_states` states (`n_states >= 2`)
///
/// `s0` is the hidden start and `s{n-1}` the hidden end. Every state has a
/// transition to its successor plus random forward skips. Odd states emit.
///
pub fn mock_random_dag(n_states: usize, seed: u64) -> HiddenMarkovModel {
    assert!(n_states >= 2);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut hmm = HiddenMarkovModel::new();
    let name = |i: usize| format!("s{}", i);
    for i in 0..n_states {
        let emitting = i % 2 == 1 && i != n_states - 1;
        hmm.add_new_state(HMMState::with_hidden(name(i), !emitting))
            .unwrap();
    }
    for i in 0..n_states - 1 {
        let mut targets = vec![i + 1];
        for j in i + 2..n_states.min(i + 5) {
            if rng.gen_bool(0.3) {
                targets.push(j);
            }
        }
        let weights: Vec<f64> = targets.iter().map(|_| rng.gen_range(0.1..1.0)).collect();
        let total: f64 = weights.iter().sum();
        for (&j, w) in targets.iter().zip(weights) {
            hmm.set_transition_probability(&name(i), &name(j), w / total)
                .unwrap();
        }
    }
    hmm
}

///
/// Random training examples for a model made by `mock_random_dag`
///
/// Each example starts at `s0` and has evidence in `[0.05, 1)` on every
/// emitting state.
///
pub fn mock_random_examples(
    hmm: &HiddenMarkovModel,
    n_examples: usize,
    seed: u64,
) -> Vec<TrainingExample> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..n_examples)
        .map(|_| {
            hmm.states()
                .filter(|(_, state)| !state.is_hidden())
                .fold(
                    TrainingExample::new().with_init("s0", 1.0),
                    |example, (_, state)| {
                        example.with_emission(state.name(), rng.gen_range(0.05..1.0))
                    },
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_dag_is_normalized_and_acyclic() {
        let hmm = mock_random_dag(20, 3);
        assert_eq!(hmm.get_number_of_states(), 20);
        assert!(hmm.topological_order().is_ok());
        for i in 0..19 {
            let s = format!("s{}", i);
            let total: f64 = hmm
                .successors(&s)
                .unwrap()
                .iter()
                .map(|t| hmm.get_transition_probability(&s, t).unwrap())
                .sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        }
        let examples = mock_random_examples(&hmm, 3, 0);
        assert_eq!(examples.len(), 3);
        assert_eq!(examples[0].emission.len(), 9);
    }
}
