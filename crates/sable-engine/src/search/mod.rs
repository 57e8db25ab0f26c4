//! Alpha-beta tree search.

mod alphabeta;
mod ordering;
mod tree;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;

use tracing::debug;

use sable_core::{Board, Color, Move};

use crate::eval::Activity;
use alphabeta::{SearchContext, minimax};
use tree::Tree;

/// Result of one completed search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Principal variation: the best line found, root move first. Empty
    /// when the side to move has no legal moves.
    pub pv: Vec<Move>,
    /// Minimax score of the root, White-positive. The checkmate sentinel
    /// appears here when a forced mate is in view.
    pub score: f32,
    /// Number of tree nodes built.
    pub nodes: u64,
    /// Wall-clock search time.
    pub elapsed: Duration,
}

/// Search `board` to `depth` plies and return the principal variation.
///
/// `known_hashes` is the set of positions already reached in the game;
/// any child landing on one is scored as a repetition and not explored.
/// The search is a pure CPU routine: it builds its node tree, walks it,
/// and drops it before returning.
pub fn search(
    board: &Board,
    depth: u8,
    known_hashes: &HashSet<u64>,
    rng: &mut StdRng,
) -> SearchReport {
    let start = Instant::now();

    // The root starts at the worst value for the side to move, so any
    // real child improves on it.
    let worst = match board.side_to_move() {
        Color::White => f32::NEG_INFINITY,
        Color::Black => f32::INFINITY,
    };
    let (tree, root) = Tree::with_root(worst);
    let mut ctx = SearchContext {
        tree,
        known_hashes,
        rng,
    };

    minimax(
        &mut ctx,
        root,
        board,
        Activity::measure(board),
        depth,
        f32::NEG_INFINITY,
        f32::INFINITY,
    );

    let pv = ctx.tree.principal_variation(root);
    let score = ctx.tree.node(root).tree_evaluation;
    let nodes = ctx.tree.node(root).tree_nodes_count;
    let elapsed = start.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
    debug!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, nps = nps as u64, "search done");

    SearchReport {
        pv,
        score,
        nodes,
        elapsed,
    }
}
