//! This crate simulates the m-configuration machines of Turing's 1936 paper, one tape
//! operation per step. It includes modules for the tape, symbol matching, configurations
//! and their rules, the step engine and its drivers, and for turning a finished tape
//! into text or a binary number.

pub mod analyzer;
pub mod machine;
pub mod operation;
pub mod program;
pub mod programs;
pub mod render;
pub mod symbol;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `lint` function and analysis result types from the analyzer module.
pub use analyzer::{lint, AnalysisError, AnalysisWarning};
/// Re-exports the machine snapshot and its drivers from the machine module.
pub use machine::{run_steps, run_to_completion, run_with_limit, Machine, Snapshots};
/// Re-exports the operation type and its constructors from the operation module.
pub use operation::{erase, left, print, right, Operation};
/// Re-exports configuration and program types from the program module.
pub use program::{
    ConfigId, Configuration, ConfigurationBuilder, Program, ProgramBuilder, Rule,
};
/// Re-exports `ProgramManager` and `PROGRAMS` from the programs module.
pub use programs::{ProgramManager, PROGRAMS};
/// Re-exports the formatting and decoding functions from the render module.
pub use render::{decode_binary, format_tape, format_tape_with_cursor, tape_symbols};
/// Re-exports the symbol matcher and its helper constructors from the symbol module.
pub use symbol::{any, any_of, none, schwa, Matcher};
/// Re-exports the arena tape types from the tape module.
pub use tape::{CellId, Tape};
/// Re-exports the step trace types from the trace module.
pub use trace::{to_json, trace, StepRecord};
/// Re-exports shared types and constants from the types module.
pub use types::{MachineError, RunningState, Symbol, MAX_EXECUTION_STEPS};
