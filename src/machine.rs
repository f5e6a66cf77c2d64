//! This module defines the `Machine` snapshot, the step engine that advances it one
//! operation at a time, and the drivers that run a machine for a number of steps or
//! until it completes.
//!
//! A rule's operations are not executed atomically: each operation is its own step, and
//! the operations still owed are carried in the snapshot until they run out. Every step
//! produces a new snapshot with its own copy of the tape, so earlier snapshots stay
//! intact while the machine keeps running.

use crate::operation::Operation;
use crate::program::{ConfigId, Configuration, Program};
use crate::tape::{CellId, Tape};
use crate::types::{MachineError, RunningState};
use log::{debug, trace};

/// One snapshot of a running machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Machine<'p> {
    program: &'p Program,
    running_state: RunningState,
    tape: Tape,
    current_cell: CellId,
    current_configuration: ConfigId,
    pending_operations: Option<&'p [Operation]>,
    next_configuration: ConfigId,
    last_operation: Option<&'p Operation>,
    step_count: usize,
}

impl<'p> Machine<'p> {
    /// Creates a paused machine on a blank tape.
    ///
    /// The machine reports the program's synthetic `begin` configuration, and its first
    /// step looks up a rule in the program's initial configuration.
    pub fn new(program: &'p Program) -> Self {
        let tape = Tape::new();

        Self {
            program,
            running_state: RunningState::Paused,
            current_cell: tape.origin(),
            tape,
            current_configuration: program.begin(),
            pending_operations: None,
            next_configuration: program.initial(),
            last_operation: None,
            step_count: 0,
        }
    }

    /// Computes the snapshot that follows this one.
    ///
    /// If operations from the current rule are still pending, the next one is executed
    /// and the scanned symbol is ignored. Otherwise the first rule of the next
    /// configuration matching the scanned symbol is selected and its first operation
    /// executed. When no rule matches, the result is this snapshot marked `Completed`.
    pub fn step(&self) -> Machine<'p> {
        if self.is_completed() {
            return self.clone();
        }

        let (configuration, operations, next) = match self.pending_operations {
            Some(operations) => (
                self.current_configuration,
                operations,
                self.next_configuration,
            ),
            None => {
                let symbol = self.symbol();
                match self.program.configuration(self.next_configuration).find_rule(symbol) {
                    Some(rule) => (
                        self.next_configuration,
                        rule.operations.as_slice(),
                        rule.next_configuration(),
                    ),
                    None => {
                        debug!(
                            "{}: no rule in '{}' for {:?}, completed after {} steps",
                            self.program.name(),
                            self.program.configuration(self.next_configuration).name,
                            symbol,
                            self.step_count
                        );
                        return Machine {
                            running_state: RunningState::Completed,
                            ..self.clone()
                        };
                    }
                }
            }
        };

        let mut tape = self.tape.clone();
        let (current_cell, remaining, last_operation) = match operations.split_first() {
            Some((operation, remaining)) => {
                trace!(
                    "{}: step {} in '{}': {}",
                    self.program.name(),
                    self.step_count + 1,
                    self.program.configuration(configuration).name,
                    operation
                );
                (
                    operation.execute(&mut tape, self.current_cell),
                    remaining,
                    Some(operation),
                )
            }
            // A rule without operations only redirects to its successor.
            None => (self.current_cell, operations, None),
        };

        Machine {
            program: self.program,
            running_state: RunningState::Running,
            tape,
            current_cell,
            current_configuration: configuration,
            pending_operations: (!remaining.is_empty()).then_some(remaining),
            next_configuration: next,
            last_operation,
            step_count: self.step_count + 1,
        }
    }

    /// An endless iterator of snapshots, starting with a copy of this one.
    pub fn snapshots(&self) -> Snapshots<'p> {
        Snapshots {
            next: Some(self.clone()),
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn running_state(&self) -> RunningState {
        self.running_state
    }

    pub fn is_completed(&self) -> bool {
        self.running_state == RunningState::Completed
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn current_cell(&self) -> CellId {
        self.current_cell
    }

    /// The symbol under the head.
    pub fn symbol(&self) -> &str {
        self.tape.read(self.current_cell)
    }

    /// The configuration whose rule is being carried out.
    pub fn current_configuration(&self) -> &'p Configuration {
        self.program.configuration(self.current_configuration)
    }

    /// The configuration adopted once the pending operations are done.
    pub fn next_configuration(&self) -> &'p Configuration {
        self.program.configuration(self.next_configuration)
    }

    /// Operations of the current rule that have not run yet.
    pub fn pending_operations(&self) -> Option<&'p [Operation]> {
        self.pending_operations
    }

    /// The operation executed by the step that produced this snapshot.
    pub fn last_operation(&self) -> Option<&'p Operation> {
        self.last_operation
    }

    /// Number of steps that advanced the machine. Steps on a completed machine do not count.
    pub fn step_count(&self) -> usize {
        self.step_count
    }
}

/// Iterator returned by `Machine::snapshots`.
pub struct Snapshots<'p> {
    next: Option<Machine<'p>>,
}

impl<'p> Iterator for Snapshots<'p> {
    type Item = Machine<'p>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = Some(current.step());
        Some(current)
    }
}

/// Runs `steps` steps and returns `steps + 1` snapshots, the given machine first.
///
/// Steps are applied even after the machine completes; they leave it unchanged.
pub fn run_steps<'p>(steps: usize, machine: &Machine<'p>) -> Vec<Machine<'p>> {
    machine.snapshots().take(steps + 1).collect()
}

/// Steps the machine until it completes and returns every snapshot, the given machine
/// first. At least one step is always taken.
///
/// This does not return if the machine never completes; use `run_steps` or
/// `run_with_limit` for bounded execution.
pub fn run_to_completion<'p>(machine: &Machine<'p>) -> Vec<Machine<'p>> {
    let mut machines = vec![machine.clone()];

    loop {
        let next = machines[machines.len() - 1].step();
        let completed = next.is_completed();
        machines.push(next);

        if completed {
            return machines;
        }
    }
}

/// Like `run_to_completion`, but gives up after `limit` steps.
///
/// # Returns
///
/// * `Ok(Vec<Machine>)` with every snapshot if the machine completed in time.
/// * `Err(MachineError::StepLimitExceeded)` otherwise.
pub fn run_with_limit<'p>(
    machine: &Machine<'p>,
    limit: usize,
) -> Result<Vec<Machine<'p>>, MachineError> {
    let mut machines = vec![machine.clone()];

    for _ in 0..limit {
        let next = machines[machines.len() - 1].step();
        let completed = next.is_completed();
        machines.push(next);

        if completed {
            return Ok(machines);
        }
    }

    Err(MachineError::StepLimitExceeded(limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{print, right};
    use crate::programs::ProgramManager;
    use crate::render::{decode_binary, format_tape, format_tape_with_cursor};
    use crate::symbol::none;
    use crate::types::{BEGIN_CONFIGURATION, MAX_EXECUTION_STEPS};

    fn last<'p>(machines: &[Machine<'p>]) -> Machine<'p> {
        machines.last().cloned().unwrap()
    }

    fn builtin(name: &str) -> &'static Program {
        ProgramManager::get_program_by_name(name).unwrap()
    }

    #[test]
    fn test_machine_creation() {
        let machine = Machine::new(builtin("alternating-digits"));

        assert_eq!(machine.running_state(), RunningState::Paused);
        assert_eq!(machine.current_configuration().name, BEGIN_CONFIGURATION);
        assert_eq!(machine.next_configuration().name, "b");
        assert_eq!(machine.pending_operations(), None);
        assert_eq!(machine.symbol(), "");
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_operations_are_split_across_steps() {
        let machine = Machine::new(builtin("alternating-digits"));

        let first = machine.step();
        assert_eq!(first.running_state(), RunningState::Running);
        assert_eq!(first.current_configuration().name, "b");
        assert_eq!(first.next_configuration().name, "c");
        assert_eq!(first.last_operation(), Some(&print("0")));
        assert_eq!(first.pending_operations(), Some(&[right()][..]));
        assert_eq!(first.symbol(), "0");

        let second = first.step();
        assert_eq!(second.current_configuration().name, "b");
        assert_eq!(second.last_operation(), Some(&right()));
        assert_eq!(second.pending_operations(), None);
        assert_eq!(second.symbol(), "");

        let third = second.step();
        assert_eq!(third.current_configuration().name, "c");
        assert_eq!(third.next_configuration().name, "e");
    }

    #[test]
    fn test_pending_operations_ignore_scanned_symbol() {
        // The head scans blanks while the queue drains; no rule lookup happens until it is empty.
        let program = Program::builder("queued")
            .configuration("b", |c| c.rule(none(), [right(), right(), print("1")], "p"))
            .configuration("p", |c| c.rule("1", [], "complete"))
            .build("b")
            .unwrap();

        let machines = run_to_completion(&Machine::new(&program));
        let completed = last(&machines);

        assert_eq!(format_tape(&completed), "__1");
        assert_eq!(completed.step_count(), 4);
        assert_eq!(machines.len(), 6);
    }

    #[test]
    fn test_no_matching_rule_completes_with_fields_unchanged() {
        let program = Program::builder("stuck")
            .configuration("b", |c| c.rule("1", [print("0")], "b"))
            .build("b")
            .unwrap();
        let machine = Machine::new(&program);

        let completed = machine.step();
        assert_eq!(completed.running_state(), RunningState::Completed);
        assert_eq!(
            Machine {
                running_state: RunningState::Paused,
                ..completed.clone()
            },
            machine
        );
    }

    #[test]
    fn test_completed_machine_is_idempotent() {
        let machines = run_to_completion(&Machine::new(builtin("erase-cells")));
        let completed = last(&machines);

        assert!(completed.is_completed());
        assert_eq!(completed.step(), completed);
        assert_eq!(completed.step().step(), completed);
    }

    #[test]
    fn test_empty_rule_redirects_in_one_step() {
        let program = Program::builder("redirect")
            .configuration("a", |c| c.rule(none(), [], "b"))
            .configuration("b", |c| c.rule(none(), [print("1")], "complete"))
            .build("a")
            .unwrap();
        let machine = Machine::new(&program);

        let redirected = machine.step();
        assert_eq!(redirected.running_state(), RunningState::Running);
        assert_eq!(redirected.current_configuration().name, "a");
        assert_eq!(redirected.next_configuration().name, "b");
        assert_eq!(redirected.last_operation(), None);
        assert_eq!(redirected.current_cell(), machine.current_cell());
        assert_eq!(redirected.tape(), machine.tape());

        let printed = redirected.step();
        assert_eq!(printed.current_configuration().name, "b");
        assert_eq!(printed.symbol(), "1");
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let program = Program::builder("order")
            .configuration("b", |c| {
                c.rule(none(), [print("x")], "complete")
                    .rule(none(), [print("y")], "complete")
            })
            .build("b")
            .unwrap();

        let machine = Machine::new(&program).step();
        assert_eq!(machine.symbol(), "x");
    }

    #[test]
    fn test_snapshots_are_independent() {
        let machines = run_steps(6, &Machine::new(builtin("alternating-digits")));

        assert_eq!(format_tape_with_cursor(&machines[0]), "[_]");
        assert_eq!(format_tape(&machines[1]), "0");
        assert_eq!(format_tape(&machines[6]), "0_1__");
    }

    #[test]
    fn test_run_steps_len() {
        let machine = Machine::new(builtin("erase-cells"));

        assert_eq!(run_steps(0, &machine), vec![machine.clone()]);
        // Keeps stepping after completion without changing the machine.
        let machines = run_steps(50, &machine);
        assert_eq!(machines.len(), 51);
        assert!(machines[50].is_completed());
        assert_eq!(machines[49], machines[50]);
    }

    #[test]
    fn test_run_to_completion_takes_at_least_one_step() {
        let program = Program::builder("nothing").build("complete").unwrap();
        let machines = run_to_completion(&Machine::new(&program));

        assert_eq!(machines.len(), 2);
        assert!(machines[1].is_completed());
    }

    #[test]
    fn test_run_with_limit() {
        let machine = Machine::new(builtin("alternating-digits"));
        assert_eq!(
            run_with_limit(&machine, 100),
            Err(MachineError::StepLimitExceeded(100))
        );

        let machine = Machine::new(builtin("erase-cells"));
        let machines = run_with_limit(&machine, MAX_EXECUTION_STEPS).unwrap();
        assert!(last(&machines).is_completed());
        assert_eq!(machines, run_to_completion(&machine));
    }

    #[test]
    fn test_erase_cells_leaves_blank_tape() {
        let machines = run_to_completion(&Machine::new(builtin("erase-cells")));
        let completed = last(&machines);

        assert_eq!(completed.step_count(), 6);
        assert_eq!(format_tape(&completed), "__");
        assert_eq!(format_tape_with_cursor(&completed), "[_]_");
        assert_eq!(decode_binary(&completed), Ok(0));
    }
}
