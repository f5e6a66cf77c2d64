//! This module defines the tape: a lazily grown, doubly linked sequence of cells.
//!
//! Cells live in an arena owned by the `Tape` and refer to their neighbours by index,
//! so the chain can be walked in both directions without shared ownership. Cells are
//! never removed; moving past either end allocates a fresh blank cell.

use crate::types::{Symbol, BLANK_SYMBOL};

/// A handle to one cell of a `Tape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(usize);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Cell {
    value: Symbol,
    left: Option<CellId>,
    right: Option<CellId>,
}

/// The arena holding every materialized cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Cell>,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates a tape with a single blank cell, returned by `origin`.
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default()],
        }
    }

    /// The first cell ever materialized on this tape.
    pub fn origin(&self) -> CellId {
        CellId(0)
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a tape holds at least its origin cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the symbol stored in `cell`.
    pub fn read(&self, cell: CellId) -> &str {
        &self.cells[cell.0].value
    }

    /// Stores `symbol` in `cell` and returns the same cell.
    pub fn print(&mut self, cell: CellId, symbol: &str) -> CellId {
        self.cells[cell.0].value = symbol.to_string();
        cell
    }

    /// Blanks `cell` and returns the same cell.
    pub fn erase(&mut self, cell: CellId) -> CellId {
        self.print(cell, BLANK_SYMBOL)
    }

    /// Returns the left neighbour of `cell`, materializing a blank one if needed.
    pub fn move_left(&mut self, cell: CellId) -> CellId {
        if let Some(left) = self.cells[cell.0].left {
            return left;
        }

        let left = self.allocate(Cell {
            right: Some(cell),
            ..Cell::default()
        });
        self.cells[cell.0].left = Some(left);
        left
    }

    /// Returns the right neighbour of `cell`, materializing a blank one if needed.
    pub fn move_right(&mut self, cell: CellId) -> CellId {
        if let Some(right) = self.cells[cell.0].right {
            return right;
        }

        let right = self.allocate(Cell {
            left: Some(cell),
            ..Cell::default()
        });
        self.cells[cell.0].right = Some(right);
        right
    }

    /// The left neighbour of `cell`, if it has been materialized.
    pub fn left_of(&self, cell: CellId) -> Option<CellId> {
        self.cells[cell.0].left
    }

    /// The right neighbour of `cell`, if it has been materialized.
    pub fn right_of(&self, cell: CellId) -> Option<CellId> {
        self.cells[cell.0].right
    }

    /// Follows left links from `cell` to the leftmost materialized cell.
    pub fn leftmost(&self, cell: CellId) -> CellId {
        let mut current = cell;
        while let Some(left) = self.left_of(current) {
            current = left;
        }
        current
    }

    /// Walks the whole chain that `cell` belongs to, from left to right.
    pub fn cells(&self, cell: CellId) -> impl Iterator<Item = (CellId, &str)> + '_ {
        std::iter::successors(Some(self.leftmost(cell)), move |&id| self.right_of(id))
            .map(move |id| (id, self.read(id)))
    }

    fn allocate(&mut self, cell: Cell) -> CellId {
        self.cells.push(cell);
        CellId(self.cells.len() - 1)
    }
}
