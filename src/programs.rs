//! Built-in example machines from The Annotated Turing (Petzold, 2008).

use crate::operation::{erase, left, print, right};
use crate::program::Program;
use crate::symbol::{any, any_of, none, schwa};
use crate::types::MachineError;
use log::error;

type Definition = fn() -> Result<Program, MachineError>;

const DEFINITIONS: [Definition; 4] = [
    alternating_digits,
    alternating_digits_compact,
    erase_cells,
    increasing_ones,
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = DEFINITIONS
        .iter()
        .filter_map(|definition| match definition() {
            Ok(program) => Some(program),
            Err(e) => {
                error!("Failed to build program: {}", e);
                None
            }
        })
        .collect();
}

/// Prints `0 1 0 1 ...` on every other cell (p. 81).
fn alternating_digits() -> Result<Program, MachineError> {
    Program::builder("alternating-digits")
        .configuration("b", |c| c.rule(none(), [print("0"), right()], "c"))
        .configuration("c", |c| c.rule(none(), [right()], "e"))
        .configuration("e", |c| c.rule(none(), [print("1"), right()], "f"))
        .configuration("f", |c| c.rule(none(), [right()], "b"))
        .build("b")
}

/// The same sequence from a single configuration (p. 84).
fn alternating_digits_compact() -> Result<Program, MachineError> {
    Program::builder("alternating-digits-compact")
        .configuration("b", |c| {
            c.rule(none(), [print("0")], "b")
                .rule("0", [right(), right(), print("1")], "b")
                .rule("1", [right(), right(), print("0")], "b")
        })
        .build("b")
}

/// Prints two digits, erases them again and completes.
fn erase_cells() -> Result<Program, MachineError> {
    Program::builder("erase-cells")
        .configuration("e", |c| {
            c.rule(none(), [print("1")], "e")
                .rule("1", [right(), print("0")], "e")
                .rule("0", [erase(), left(), erase()], "complete")
        })
        .build("e")
}

/// Prints `0 0 1 0 1 1 0 1 1 1 ...` on the F-squares, using `x` marks on the E-squares
/// to count the ones of the previous group (p. 87).
fn increasing_ones() -> Result<Program, MachineError> {
    Program::builder("increasing-ones")
        .configuration("b", |c| {
            c.rule(
                none(),
                [
                    print(schwa()),
                    right(),
                    print(schwa()),
                    right(),
                    print("0"),
                    right(),
                    right(),
                    print("0"),
                    left(),
                    left(),
                ],
                "o",
            )
        })
        .configuration("o", |c| {
            c.rule("1", [right(), print("x"), left(), left(), left()], "o")
                .rule("0", [], "q")
        })
        .configuration("q", |c| {
            c.rule(any_of(["0", "1"]), [right(), right()], "q")
                .rule(none(), [print("1"), left()], "p")
        })
        .configuration("p", |c| {
            c.rule("x", [erase(), right()], "q")
                .rule(schwa(), [right()], "f")
                .rule(none(), [left(), left()], "p")
        })
        .configuration("f", |c| {
            c.rule(any(), [right(), right()], "f")
                .rule(none(), [print("0"), left(), left()], "o")
        })
        .build("b")
}

/// Read-only access to the built-in programs.
pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<&'static Program, MachineError> {
        PROGRAMS
            .get(index)
            .ok_or_else(|| MachineError::UnknownProgram(format!("index {}", index)))
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<&'static Program, MachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name() == name)
            .ok_or_else(|| MachineError::UnknownProgram(name.to_string()))
    }

    /// Get the names of all programs, in catalogue order
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::lint;
    use crate::machine::{run_steps, run_to_completion, Machine};
    use crate::render::{decode_binary, format_tape};

    fn finished(name: &str, steps: usize) -> Machine<'static> {
        let program = ProgramManager::get_program_by_name(name).unwrap();
        run_steps(steps, &Machine::new(program)).pop().unwrap()
    }

    #[test]
    fn test_all_programs_build() {
        assert_eq!(ProgramManager::get_program_count(), DEFINITIONS.len());
        assert_eq!(
            ProgramManager::list_program_names(),
            vec![
                "alternating-digits",
                "alternating-digits-compact",
                "erase-cells",
                "increasing-ones"
            ]
        );
    }

    #[test]
    fn test_programs_have_no_warnings() {
        for program in PROGRAMS.iter() {
            assert!(lint(program).is_empty(), "{}", program.name());
        }
    }

    #[test]
    fn test_get_program_by_index() {
        let program = ProgramManager::get_program_by_index(2).unwrap();
        assert_eq!(program.name(), "erase-cells");

        assert_eq!(
            ProgramManager::get_program_by_index(99),
            Err(MachineError::UnknownProgram("index 99".to_string()))
        );
    }

    #[test]
    fn test_get_program_by_name_unknown() {
        assert_eq!(
            ProgramManager::get_program_by_name("busy-beaver"),
            Err(MachineError::UnknownProgram("busy-beaver".to_string()))
        );
    }

    #[test]
    fn test_alternating_digits() {
        assert_eq!(decode_binary(&finished("alternating-digits", 20)), Ok(42));
        assert_eq!(
            decode_binary(&finished("alternating-digits-compact", 20)),
            Ok(42)
        );
    }

    #[test]
    fn test_erase_cells() {
        let program = ProgramManager::get_program_by_name("erase-cells").unwrap();
        let machines = run_to_completion(&Machine::new(program));

        assert_eq!(machines.len(), 8);
        assert_eq!(decode_binary(&machines[7]), Ok(0));
    }

    #[test]
    fn test_increasing_ones() {
        assert_eq!(
            format_tape(&finished("increasing-ones", 1020)),
            "əə0_0_1_0_1_1_0_1_1_1_0_1_1_1_1_0_1_1_1_1_1_0_1_1_1_1_1_1_0_1_1_1_1_1_1"
        );
    }
}
