//!
//! Error type of the HMM engine
//!
//! Configuration errors and precondition violations fail fast at the call that
//! breaks the invariant. Numeric degeneracies are not errors; they fall back to
//! uniform distributions inside the training engine.
//!
use thiserror::Error;

/// Which dynamic-programming pass an accessor depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Forward,
    Backward,
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Pass::Forward => write!(f, "forward"),
            Pass::Backward => write!(f, "backward"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HMMError {
    /// `add_new_state` with a name that is already registered
    #[error("state name '{0}' already used")]
    DuplicateState(String),

    /// lookup of a state name that is not registered
    #[error("state '{0}' not found")]
    StateNotFound(String),

    /// read of a transition that exists but is not enabled
    #[error("transition {from} -> {to} is not enabled")]
    TransitionNotEnabled { from: String, to: String },

    /// reference to a transition that was never created
    #[error("transition {from} -> {to} does not exist")]
    TransitionNotFound { from: String, to: String },

    /// forward/backward variable read before its pass ran on the current model
    #[error("{0} pass has not been run on the current model and evidence")]
    PassNotRun(Pass),

    /// `evaluate()` with no `train()` since the last evaluation
    #[error("evaluate() called before any train()")]
    NotTrained,

    /// the enabled transitions contain a cycle
    #[error("enabled transitions form a cycle through state '{0}'")]
    CyclicGraph(String),

    /// emission evidence given for a hidden (non-emitting) state
    #[error("state '{0}' is hidden and cannot take emission evidence")]
    HiddenStateEvidence(String),

    /// state name that the line-oriented text format cannot represent
    #[error("state name '{0}' is empty or contains whitespace")]
    UnwritableName(String),

    #[error("invalid pseudo counts {0}: must be finite and non-negative")]
    InvalidPseudoCounts(f64),

    #[error("invalid probability {value} for '{target}'")]
    InvalidProbability { target: String, value: f64 },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HMMError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        HMMError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HMMError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let e = HMMError::TransitionNotEnabled {
            from: "S".to_string(),
            to: "M".to_string(),
        };
        assert_eq!(e.to_string(), "transition S -> M is not enabled");
        let e = HMMError::PassNotRun(Pass::Backward);
        assert_eq!(
            e.to_string(),
            "backward pass has not been run on the current model and evidence"
        );
        let e = HMMError::parse(3, "unknown keyword");
        assert_eq!(e.to_string(), "parse error at line 3: unknown keyword");
    }
}
