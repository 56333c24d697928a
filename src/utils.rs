//! Parsing of the external board text format.
//!
//! A board is written as one line of 7 comma-separated 7-character
//! rows, using `-` for wall cells, `0` for holes and `X` for pegs:
//!
//! ```text
//! --000--,--000--,0000000,000X000,0000000,--000--,--000--
//! ```
//!
//! Parsing is strict: a wrong row count, a wrong row length or an
//! unknown character is a fatal input error, reported as a
//! [`ParseError`] before any search runs.
use crate::engine::{Board, Cell, BOARD_SIZE, CELL_COUNT};

/// A fatal defect in board input. Distinct from a board that merely
/// cannot be solved, which is a normal search result.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    /// The input did not contain exactly seven rows.
    #[display("expected 7 comma-separated rows, found {found}")]
    WrongRowCount { found: usize },
    /// A row did not contain exactly seven cells.
    #[display("row {row} has {found} cells (expected 7)")]
    WrongRowLength { row: usize, found: usize },
    /// A cell character outside the `-0X` alphabet.
    #[display("unrecognized character '{ch}' at row {row} col {col}")]
    InvalidCharacter { ch: char, row: usize, col: usize },
}

/// Parses a board from seven row strings (top row first).
///
/// # Examples
/// ```
/// use pegsolitaire_solver::utils::board_from_rows;
///
/// let board = board_from_rows(&[
///     "--000--", "--000--", "0000000", "000X000", "0000000", "--000--", "--000--",
/// ])
/// .unwrap();
/// assert!(board.is_solved());
/// ```
pub fn board_from_rows(rows: &[&str]) -> Result<Board, ParseError> {
    if rows.len() != BOARD_SIZE {
        return Err(ParseError::WrongRowCount { found: rows.len() });
    }
    let mut cells = [Cell::Hole; CELL_COUNT];
    for (row, row_str) in rows.iter().enumerate() {
        let length = row_str.chars().count();
        if length != BOARD_SIZE {
            return Err(ParseError::WrongRowLength { row, found: length });
        }
        for (col, ch) in row_str.chars().enumerate() {
            cells[Board::index(row, col)] = match ch {
                '-' => Cell::Wall,
                '0' => Cell::Hole,
                'X' => Cell::Peg,
                _ => return Err(ParseError::InvalidCharacter { ch, row, col }),
            };
        }
    }
    Ok(Board::from_cells(cells))
}

/// Parses a board from the single-line file format: seven rows joined
/// by commas. Surrounding whitespace on the line is ignored.
pub fn board_from_line(line: &str) -> Result<Board, ParseError> {
    let rows: Vec<&str> = line.trim().split(',').collect();
    board_from_rows(&rows)
}
