//! # Peg Solitaire Solver Library
//!
//! This library provides the core game model for Peg Solitaire on the
//! classic cross-shaped 7x7 board, together with a family of game-tree
//! search strategies that solve a board down to a single peg on the
//! center cell: iterative-deepening depth-first search and best-first
//! (A*) search under four selectable heuristics.
//!
//! It is used by two binaries:
//! - `solver`: reads a board file, runs one or all strategies, and
//!   reports the elapsed time, expansion count and solving trace.
//! - `board_generator`: emits random solvable boards by scrambling the
//!   solved position backwards.
//!
//! ## Modules
//! - `engine`: the board representation (`Board`), cell states
//!   (`Cell`), moves, and the per-search session record (`Game`).
//! - `symmetry`: canonicalization of a board's 8-element dihedral
//!   symmetry class, used to deduplicate search states.
//! - `heuristics`: the frontier-ordering cost functions.
//! - `solver`: the search algorithms and the `Strategy` selector.
//! - `utils`: parsing of the board text format.

pub mod engine;
pub mod heuristics;
pub mod solver;
pub mod symmetry;
pub mod utils;
