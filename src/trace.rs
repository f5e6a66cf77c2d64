//! Serializable per-step records, for observing how a machine evolves one operation at a time.

use crate::machine::Machine;
use crate::render::format_tape_with_cursor;
use crate::types::{MachineError, RunningState};
use serde::{Deserialize, Serialize};

/// What one snapshot looked like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub running_state: RunningState,
    /// The configuration whose rule is being carried out.
    pub configuration: String,
    /// The configuration adopted once the pending operations are done.
    pub next_configuration: String,
    /// The operation that produced this snapshot, if any.
    pub operation: Option<String>,
    pub pending_operations: Vec<String>,
    /// The tape with the scanned cell in brackets.
    pub tape: String,
}

impl From<&Machine<'_>> for StepRecord {
    fn from(machine: &Machine<'_>) -> Self {
        Self {
            step: machine.step_count(),
            running_state: machine.running_state(),
            configuration: machine.current_configuration().name.clone(),
            next_configuration: machine.next_configuration().name.clone(),
            operation: machine.last_operation().map(|o| o.name()),
            pending_operations: machine
                .pending_operations()
                .unwrap_or_default()
                .iter()
                .map(|o| o.name())
                .collect(),
            tape: format_tape_with_cursor(machine),
        }
    }
}

/// Records every snapshot of a run.
pub fn trace(machines: &[Machine]) -> Vec<StepRecord> {
    machines.iter().map(StepRecord::from).collect()
}

/// Serializes records as a JSON array.
pub fn to_json(records: &[StepRecord]) -> Result<String, MachineError> {
    serde_json::to_string_pretty(records).map_err(|e| MachineError::Serialization(e.to_string()))
}
