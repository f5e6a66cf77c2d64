//! This module defines the shared types and constants used throughout the simulator,
//! including the symbol representation, the machine's running state and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tape symbol. The empty string is the blank symbol.
pub type Symbol = String;

/// The blank symbol: an unwritten cell.
pub const BLANK_SYMBOL: &str = "";
/// How a blank cell is displayed when the tape is formatted.
pub const BLANK_DISPLAY: &str = "_";
/// Placeholder used by example machines to mark the start of the tape.
pub const SCHWA: &str = "ə";
/// Name of the synthetic configuration every fresh machine starts in.
pub const BEGIN_CONFIGURATION: &str = "begin";
/// Name of the terminal configuration. It has no rules and never needs declaring.
pub const COMPLETE_CONFIGURATION: &str = "complete";
/// A conventional step budget for `run_with_limit`.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// The lifecycle of a machine.
///
/// A machine starts `Paused`, becomes `Running` on its first successful step and ends up
/// `Completed` once its configuration has no rule for the scanned symbol. There is no way
/// out of `Completed`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunningState {
    /// Created but not stepped yet.
    #[default]
    Paused,
    /// Stepped at least once and still has a transition to follow.
    Running,
    /// No rule matched; terminal.
    Completed,
}

/// Represents the errors that can occur while building programs or extracting results.
///
/// Stepping a machine never fails; "no matching rule" is the `Completed` state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The initial configuration passed to the builder is not declared.
    #[error("Invalid start configuration: {0}")]
    InvalidStartConfiguration(String),
    /// A configuration name was declared more than once.
    #[error("Duplicate configuration: {0}")]
    DuplicateConfiguration(String),
    /// Rules name successors that are not declared, as `from -> to` pairs.
    #[error("Rules reference undefined configurations: {0:?}")]
    UndefinedConfigurations(Vec<String>),
    /// A rule matches on an empty symbol set and can never fire.
    #[error("Rule in configuration '{0}' matches an empty symbol set")]
    EmptySymbolSet(String),
    /// The machine did not complete within the given number of steps.
    #[error("Machine did not complete within {0} steps")]
    StepLimitExceeded(usize),
    /// The binary digits on the tape do not fit the result type.
    #[error("Binary result of {0} digits overflows")]
    Overflow(usize),
    /// No built-in program has the given name or index.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
    /// A trace could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_state_serialization() {
        let json = serde_json::to_string(&RunningState::Completed).unwrap();
        assert_eq!(json, "\"Completed\"");

        let state: RunningState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, RunningState::Completed);
    }

    #[test]
    fn test_running_state_default() {
        assert_eq!(RunningState::default(), RunningState::Paused);
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::InvalidStartConfiguration("b".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid start configuration"));
        assert!(error_msg.contains('b'));
    }
}
