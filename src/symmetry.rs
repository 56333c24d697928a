//! Dihedral symmetry canonicalization for boards.
//!
//! A board and its seven rotated/mirrored images are the same game: one
//! can be solved exactly when the others can, in the same number of
//! moves. Search keys boards by the lexicographically smallest of the
//! eight images, so all eight collapse to one node in the explored and
//! frontier sets. Computing the eight images is the most expensive
//! per-node operation in the engine, which is why callers analyze a
//! board once at node construction and cache the result.
use crate::engine::{Board, Cell, MovePruning, BOARD_SIZE, CELL_COUNT};

/// The representative of a board's 8-element symmetry class: the
/// lexicographically smallest image under the cell ordering
/// `Wall < Hole < Peg`.
///
/// Keys compare by full cell-array equality, so two boards share a key
/// exactly when they are symmetric images of each other; there are no
/// hash-collision false positives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey([Cell; CELL_COUNT]);

/// Everything the canonicalizer learns about one board: its canonical
/// key plus the two self-symmetry flags used to prune redundant move
/// directions.
#[derive(Clone, Copy, Debug)]
pub struct Symmetry {
    /// Minimal image over the dihedral group of the square.
    pub key: CanonicalKey,
    /// The board equals its own top-bottom mirror.
    pub vertical: bool,
    /// The board equals its own left-right mirror.
    pub horizontal: bool,
}

impl Symmetry {
    /// The direction filter this board's self-symmetry justifies: a
    /// vertically symmetric board makes every `South` move the mirror
    /// of a `North` move, and a horizontally symmetric board makes
    /// every `West` move the mirror of an `East` move.
    pub fn pruning(&self) -> MovePruning {
        MovePruning {
            skip_south: self.vertical,
            skip_west: self.horizontal,
        }
    }
}

type Grid = [Cell; CELL_COUNT];

// Top-bottom mirror: row r swaps with row 6 - r.
fn flipped(g: &Grid) -> Grid {
    let mut out = *g;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            out[row * BOARD_SIZE + col] = g[(BOARD_SIZE - 1 - row) * BOARD_SIZE + col];
        }
    }
    out
}

// Quarter turn clockwise: cell (r, c) comes from (6 - c, r).
fn rotated_cw(g: &Grid) -> Grid {
    let mut out = *g;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            out[row * BOARD_SIZE + col] = g[(BOARD_SIZE - 1 - col) * BOARD_SIZE + row];
        }
    }
    out
}

/// Computes the canonical key and self-symmetry flags for a board.
///
/// Walks the dihedral group of the square: the identity, three
/// successive quarter turns, and the top-bottom mirror of each of the
/// four, then takes the minimum. The vertical flag falls out of
/// comparing the board with its first mirror; the horizontal flag from
/// comparing it with the mirrored half turn (which is exactly the
/// left-right mirror).
pub fn analyze(board: &Board) -> Symmetry {
    let r0 = *board.cells();
    let f0 = flipped(&r0);
    let vertical = r0 == f0;
    let r90 = rotated_cw(&r0);
    let f90 = flipped(&r90);
    let r180 = rotated_cw(&r90);
    let f180 = flipped(&r180);
    let horizontal = r0 == f180;
    let r270 = rotated_cw(&r180);
    let f270 = flipped(&r270);

    let key = [r0, f0, r90, f90, r180, f180, r270, f270]
        .into_iter()
        .min()
        .expect("the symmetry class is never empty");
    Symmetry {
        key: CanonicalKey(key),
        vertical,
        horizontal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_rows;

    // Builds every image of a board through the public Board API so the
    // tests do not depend on this module's own transforms.
    fn images_of(board: &Board) -> Vec<Board> {
        let mut images = Vec::new();
        let cells = board.cells();
        for rotations in 0..4 {
            for mirror in [false, true] {
                let mut out = [Cell::Hole; CELL_COUNT];
                for row in 0..BOARD_SIZE {
                    for col in 0..BOARD_SIZE {
                        let (mut r, mut c) = (row, col);
                        for _ in 0..rotations {
                            let (nr, nc) = (c, BOARD_SIZE - 1 - r);
                            r = nr;
                            c = nc;
                        }
                        if mirror {
                            r = BOARD_SIZE - 1 - r;
                        }
                        out[r * BOARD_SIZE + c] = cells[row * BOARD_SIZE + col];
                    }
                }
                images.push(Board::from_cells(out));
            }
        }
        images
    }

    #[test]
    fn test_all_eight_images_share_one_key() {
        let board = board_from_rows(&[
            "--0X0--", "--00X--", "00000X0", "0X00000", "0000X00", "--000--", "--0X0--",
        ])
        .unwrap();
        let key = analyze(&board).key;
        let images = images_of(&board);
        assert_eq!(images.len(), 8);
        for image in &images {
            assert_eq!(analyze(image).key, key, "image {} diverged", image);
        }
    }

    #[test]
    fn test_distinct_classes_get_distinct_keys() {
        let a = board_from_rows(&[
            "--000--", "--000--", "0X00000", "0000000", "0000000", "--000--", "--000--",
        ])
        .unwrap();
        let b = board_from_rows(&[
            "--000--", "--000--", "00X0000", "0000000", "0000000", "--000--", "--000--",
        ])
        .unwrap();
        assert_ne!(analyze(&a).key, analyze(&b).key);
    }

    #[test]
    fn test_fully_symmetric_board_sets_both_flags() {
        let sym = analyze(&Board::full());
        assert!(sym.vertical);
        assert!(sym.horizontal);
        assert!(sym.pruning().skip_south);
        assert!(sym.pruning().skip_west);
    }

    #[test]
    fn test_vertical_but_not_horizontal_symmetry() {
        // Pegs mirrored across the horizontal midline, but shifted to
        // one side so the left-right mirror differs.
        let board = board_from_rows(&[
            "--000--", "--X00--", "0000000", "0000000", "0000000", "--X00--", "--000--",
        ])
        .unwrap();
        let sym = analyze(&board);
        assert!(sym.vertical);
        assert!(!sym.horizontal);
        assert_eq!(
            sym.pruning(),
            MovePruning {
                skip_south: true,
                skip_west: false
            }
        );
    }

    #[test]
    fn test_horizontal_but_not_vertical_symmetry() {
        let board = board_from_rows(&[
            "--0X0--", "--000--", "0000000", "0000000", "0000000", "--000--", "--000--",
        ])
        .unwrap();
        let sym = analyze(&board);
        assert!(!sym.vertical);
        assert!(sym.horizontal);
    }

    #[test]
    fn test_asymmetric_board_sets_no_flags() {
        let board = board_from_rows(&[
            "--X00--", "--000--", "0000000", "0000000", "0000000", "--000--", "--000--",
        ])
        .unwrap();
        let sym = analyze(&board);
        assert!(!sym.vertical);
        assert!(!sym.horizontal);
        assert_eq!(sym.pruning(), MovePruning::NONE);
    }
}
