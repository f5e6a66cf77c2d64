//! Functions that turn a machine's tape into printable text or a number.

use crate::machine::Machine;
use crate::types::{MachineError, BLANK_DISPLAY};

/// The symbols of every materialized cell, leftmost first.
pub fn tape_symbols(machine: &Machine) -> Vec<String> {
    machine
        .tape()
        .cells(machine.current_cell())
        .map(|(_, symbol)| symbol.to_string())
        .collect()
}

fn display(symbol: &str) -> &str {
    if symbol.is_empty() {
        BLANK_DISPLAY
    } else {
        symbol
    }
}

/// Concatenates the tape's symbols, showing blanks as `_`.
pub fn format_tape(machine: &Machine) -> String {
    machine
        .tape()
        .cells(machine.current_cell())
        .map(|(_, symbol)| display(symbol))
        .collect()
}

/// Like `format_tape`, with the scanned cell wrapped in brackets, e.g. `ə[0]_`.
pub fn format_tape_with_cursor(machine: &Machine) -> String {
    let cursor = machine.current_cell();

    machine
        .tape()
        .cells(cursor)
        .map(|(id, symbol)| {
            if id == cursor {
                format!("[{}]", display(symbol))
            } else {
                display(symbol).to_string()
            }
        })
        .collect()
}

/// Reads the `0` and `1` cells from left to right as a binary number.
///
/// Every other symbol, blanks included, is skipped. A tape without digits decodes to 0.
///
/// # Returns
///
/// * `Ok(u128)` with the decoded value.
/// * `Err(MachineError::Overflow)` if there are more significant digits than fit in 128 bits.
pub fn decode_binary(machine: &Machine) -> Result<u128, MachineError> {
    let digits = machine
        .tape()
        .cells(machine.current_cell())
        .filter(|(_, symbol)| matches!(*symbol, "0" | "1"))
        .map(|(_, symbol)| symbol)
        .collect::<String>();

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }

    u128::from_str_radix(significant, 2).map_err(|_| MachineError::Overflow(significant.len()))
}
