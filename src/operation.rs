//! Tape operations: the atomic units a rule is made of.

use crate::tape::{CellId, Tape};
use crate::types::Symbol;
use std::fmt;

/// One atomic tape mutation or head movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Write a symbol into the scanned cell.
    Print(Symbol),
    /// Blank the scanned cell.
    Erase,
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

impl Operation {
    /// Applies the operation to `cell` and returns the cell the head ends up on.
    pub fn execute(&self, tape: &mut Tape, cell: CellId) -> CellId {
        match self {
            Operation::Print(symbol) => tape.print(cell, symbol),
            Operation::Erase => tape.erase(cell),
            Operation::Left => tape.move_left(cell),
            Operation::Right => tape.move_right(cell),
        }
    }

    /// The operation kind followed by its parameters, e.g. `print 0`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Print(symbol) => write!(f, "print {symbol}"),
            Operation::Erase => write!(f, "erase"),
            Operation::Left => write!(f, "left"),
            Operation::Right => write!(f, "right"),
        }
    }
}

/// Writes `symbol` into the scanned cell.
pub fn print(symbol: impl Into<Symbol>) -> Operation {
    Operation::Print(symbol.into())
}

/// Blanks the scanned cell.
pub fn erase() -> Operation {
    Operation::Erase
}

/// Moves the head left.
pub fn left() -> Operation {
    Operation::Left
}

/// Moves the head right.
pub fn right() -> Operation {
    Operation::Right
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(print("0").name(), "print 0");
        assert_eq!(print("ə").name(), "print ə");
        assert_eq!(erase().name(), "erase");
        assert_eq!(left().name(), "left");
        assert_eq!(right().name(), "right");
    }

    #[test]
    fn test_execute() {
        let mut tape = Tape::new();
        let origin = tape.origin();

        assert_eq!(print("1").execute(&mut tape, origin), origin);
        assert_eq!(tape.read(origin), "1");

        let next = right().execute(&mut tape, origin);
        assert_ne!(next, origin);
        assert_eq!(left().execute(&mut tape, next), origin);

        assert_eq!(erase().execute(&mut tape, origin), origin);
        assert_eq!(tape.read(origin), "");
    }
}
