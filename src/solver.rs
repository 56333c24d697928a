//! Search algorithms over the Peg Solitaire game tree.
//!
//! Two search families share the [`SearchNode`] machinery:
//! - [`iterative_deepening`]: depth-limited DFS rerun with a growing
//!   limit, carrying a memo of states proven unsolvable across
//!   iterations.
//! - [`uniform_cost`] / [`a_star`]: best-first search over a
//!   min-priority frontier ordered by a [`Heuristic`] cost.
//!
//! Both deduplicate states by canonical symmetry key, so a board and
//! its seven mirror/rotation images occupy one slot in every set.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use log::debug;

use crate::engine::{Board, Cell, Game, Move, MovePruning, CENTER};
use crate::heuristics::Heuristic;
use crate::symmetry::{self, CanonicalKey};

/// One immutable node in the game tree.
///
/// A node owns its board, the cumulative trace that produced it (two
/// `(row, col)` entries per move), a cached peg count, and the cost its
/// heuristic assigned at construction. The canonical key and the
/// self-symmetry move pruning are computed once here and reused for
/// every set lookup and move generation.
#[derive(Clone, Debug)]
pub struct SearchNode {
    board: Board,
    trace: Vec<(usize, usize)>,
    pegs: u32,
    cost: u32,
    key: CanonicalKey,
    pruning: MovePruning,
    heuristic: Option<Heuristic>,
}

impl SearchNode {
    /// Builds the root node of a search over `board`. Passing a
    /// heuristic pre-computes frontier costs on this node and every
    /// node expanded from it; passing `None` leaves all costs at zero.
    pub fn root(board: &Board, heuristic: Option<Heuristic>) -> Self {
        Self::new(board.clone(), Vec::new(), board.peg_count(), heuristic)
    }

    fn new(
        board: Board,
        trace: Vec<(usize, usize)>,
        pegs: u32,
        heuristic: Option<Heuristic>,
    ) -> Self {
        let sym = symmetry::analyze(&board);
        let cost = heuristic.map_or(0, |h| h.cost(&board, pegs));
        SearchNode {
            pruning: sym.pruning(),
            key: sym.key,
            board,
            trace,
            pegs,
            cost,
            heuristic,
        }
    }

    /// The board this node wraps.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The move trace from the root to this node.
    pub fn trace(&self) -> &[(usize, usize)] {
        &self.trace
    }

    /// Cached number of pegs on this node's board.
    pub fn peg_count(&self) -> u32 {
        self.pegs
    }

    /// The heuristic cost assigned at construction (zero without a
    /// heuristic). Lower sorts first in the frontier.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Canonical symmetry key, for explored/frontier membership tests.
    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// Whether this node's board is the goal state.
    pub fn is_solved(&self) -> bool {
        self.pegs == 1 && self.board.cell(CENTER) == Cell::Peg
    }

    /// Legal moves from this node, with the node's own symmetry-based
    /// direction pruning applied.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.board.legal_moves(self.pruning)
    }

    /// Builds the child node created by a legal move, bumping the
    /// game's expanded-node counter.
    pub fn expand(&self, mv: Move, game: &mut Game) -> SearchNode {
        game.count_expansion();
        let (board, [origin, dest]) = self.board.apply_move(mv.from, mv.dir);
        let mut trace = self.trace.clone();
        trace.push(origin);
        trace.push(dest);
        Self::new(board, trace, self.pegs - 1, self.heuristic)
    }

    /// Copies this node's board and trace back into the session record.
    pub fn copy_solution(&self, game: &mut Game) {
        game.record_solution(self.board.clone(), self.trace.clone());
    }
}

/// Terminal signal of one (depth-limited or best-first) search run.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The goal was reached; the node carries the solved board and the
    /// full trace.
    Solved(SearchNode),
    /// The depth limit stopped at least one branch that might still
    /// succeed deeper.
    CutOff,
    /// Every reachable branch was exhausted without a solution.
    Failed,
}

/// Iterative-deepening depth-first search.
///
/// Runs a depth-limited search at every limit from zero up to one less
/// than the initial peg count (each move removes exactly one peg, so no
/// solution can be longer). The `failed` memo of states proven
/// unsolvable is carried across iterations: failure is depth-monotonic,
/// so a failed state never deserves a second visit even with more depth
/// available. Cut-off states, by contrast, are retried, which is why
/// the explored set is rebuilt fresh for every iteration.
///
/// Returns whether the game was solved; the session's board and trace
/// (or failure marker) are updated accordingly.
pub fn iterative_deepening(game: &mut Game) -> bool {
    let max_depth = game.board().peg_count();
    let mut failed: HashSet<CanonicalKey> = HashSet::new();
    for limit in 0..max_depth {
        match depth_limited(game, limit, &mut failed) {
            SearchOutcome::Solved(node) => {
                debug!("iterative deepening solved at depth {}", limit);
                node.copy_solution(game);
                return true;
            }
            SearchOutcome::CutOff => debug!("depth {}: cut off, deepening", limit),
            SearchOutcome::Failed => debug!("depth {}: exhausted", limit),
        }
    }
    game.record_failure();
    false
}

/// One depth-limited search over the game's current board.
///
/// `failed` accumulates states proven unsolvable, and doubles as the
/// seed of this run's explored set so they are skipped outright.
pub fn depth_limited(
    game: &mut Game,
    limit: u32,
    failed: &mut HashSet<CanonicalKey>,
) -> SearchOutcome {
    let root = SearchNode::root(game.board(), None);
    let mut explored = failed.clone();
    recursive_dls(root, game, limit, &mut explored, failed)
}

fn recursive_dls(
    node: SearchNode,
    game: &mut Game,
    limit: u32,
    explored: &mut HashSet<CanonicalKey>,
    failed: &mut HashSet<CanonicalKey>,
) -> SearchOutcome {
    if node.is_solved() {
        return SearchOutcome::Solved(node);
    }
    if limit == 0 {
        return SearchOutcome::CutOff;
    }
    explored.insert(*node.key());
    let mut cut_off = false;
    for mv in node.legal_moves() {
        let child = node.expand(mv, game);
        if explored.contains(child.key()) {
            continue;
        }
        let child_key = *child.key();
        match recursive_dls(child, game, limit - 1, explored, failed) {
            SearchOutcome::Solved(solved) => return SearchOutcome::Solved(solved),
            SearchOutcome::CutOff => cut_off = true,
            SearchOutcome::Failed => {
                failed.insert(child_key);
            }
        }
    }
    if cut_off {
        SearchOutcome::CutOff
    } else {
        // No branch was depth-limited, so this state is unsolvable at
        // any depth.
        failed.insert(*node.key());
        SearchOutcome::Failed
    }
}

// Frontier entry: min-order by heuristic cost, ties broken by insertion
// order. `BinaryHeap` is a max-heap, so both comparisons are inverted.
struct FrontierEntry {
    node: SearchNode,
    seq: u64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node.cost() == other.node.cost() && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .cost()
            .cmp(&self.node.cost())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Best-first search over a min-priority frontier.
///
/// With a heuristic this is weighted best-first search; without one,
/// every node costs zero and the frontier degrades to insertion order.
/// A child enters the frontier only if its canonical key is in neither
/// the explored set nor the frontier itself. A duplicate key never
/// replaces the copy already queued: two nodes with one key have made
/// the same number of moves (moves made equals pegs removed, however
/// the moves were ordered), so the queued copy is already as cheap as
/// the new one. That shortcut is specific to this game and would be
/// unsound in a general A* implementation.
pub fn uniform_cost(game: &mut Game, heuristic: Option<Heuristic>) -> SearchOutcome {
    let root = SearchNode::root(game.board(), heuristic);
    let mut frontier = BinaryHeap::new();
    let mut frontier_keys: HashSet<CanonicalKey> = HashSet::new();
    let mut explored: HashSet<CanonicalKey> = HashSet::new();
    let mut seq = 0u64;
    frontier_keys.insert(*root.key());
    frontier.push(FrontierEntry { node: root, seq });
    loop {
        let Some(entry) = frontier.pop() else {
            return SearchOutcome::Failed;
        };
        let node = entry.node;
        frontier_keys.remove(node.key());
        if node.is_solved() {
            debug!("best-first search solved after {} expansions", game.nodes_expanded());
            return SearchOutcome::Solved(node);
        }
        explored.insert(*node.key());
        for mv in node.legal_moves() {
            let child = node.expand(mv, game);
            if explored.contains(child.key()) || frontier_keys.contains(child.key()) {
                continue;
            }
            seq += 1;
            frontier_keys.insert(*child.key());
            frontier.push(FrontierEntry { node: child, seq });
        }
    }
}

/// Best-first search with the given heuristic, reporting into the
/// session: the solved board and trace on success, the failure marker
/// otherwise. Returns whether the game was solved.
pub fn a_star(game: &mut Game, heuristic: Heuristic) -> bool {
    match uniform_cost(game, Some(heuristic)) {
        SearchOutcome::Solved(node) => {
            node.copy_solution(game);
            true
        }
        SearchOutcome::CutOff | SearchOutcome::Failed => {
            game.record_failure();
            false
        }
    }
}

/// The five selectable search strategies, in CLI flag order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    IterativeDeepening,
    AStarManhattan,
    AStarWeightedDifficulty,
    AStarDanglingPegs,
    AStarCenterRegion,
}

impl Strategy {
    /// All strategies, in the order the driver runs them when no flag
    /// is given.
    pub const ALL: [Strategy; 5] = [
        Strategy::IterativeDeepening,
        Strategy::AStarManhattan,
        Strategy::AStarWeightedDifficulty,
        Strategy::AStarDanglingPegs,
        Strategy::AStarCenterRegion,
    ];

    /// Maps the CLI selector flag (1 through 5) to a strategy.
    pub fn from_flag(flag: u32) -> Option<Strategy> {
        match flag {
            1 => Some(Strategy::IterativeDeepening),
            2 => Some(Strategy::AStarManhattan),
            3 => Some(Strategy::AStarWeightedDifficulty),
            4 => Some(Strategy::AStarDanglingPegs),
            5 => Some(Strategy::AStarCenterRegion),
            _ => None,
        }
    }

    /// Human-readable strategy name for result reporting.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::IterativeDeepening => "Iterative Deepening Search",
            Strategy::AStarManhattan => "A* Search (Manhattan to center)",
            Strategy::AStarWeightedDifficulty => "A* Search (weighted difficulty)",
            Strategy::AStarDanglingPegs => "A* Search (dangling pegs)",
            Strategy::AStarCenterRegion => "A* Search (center region)",
        }
    }

    /// The frontier heuristic this strategy uses, if any.
    pub fn heuristic(self) -> Option<Heuristic> {
        match self {
            Strategy::IterativeDeepening => None,
            Strategy::AStarManhattan => Some(Heuristic::ManhattanCenter),
            Strategy::AStarWeightedDifficulty => Some(Heuristic::WeightedDifficulty),
            Strategy::AStarDanglingPegs => Some(Heuristic::DanglingPegs),
            Strategy::AStarCenterRegion => Some(Heuristic::CenterRegion),
        }
    }

    /// Runs the strategy over the game, returning whether it solved the
    /// board. The session record is updated either way.
    pub fn run(self, game: &mut Game) -> bool {
        match self.heuristic() {
            None => iterative_deepening(game),
            Some(heuristic) => a_star(game, heuristic),
        }
    }
}
