//! Depth-limited minimax with alpha-beta cutoffs over the explicit tree.

use std::collections::HashSet;

use rand::rngs::StdRng;

use sable_core::{Board, Color, generate_legal_moves};

use crate::eval::{self, Activity, REPETITION_PENALTY};
use crate::search::ordering::sort_moves;
use crate::search::tree::{NodeId, Tree};

/// Mutable state threaded through one search.
pub(crate) struct SearchContext<'a> {
    pub tree: Tree,
    pub known_hashes: &'a HashSet<u64>,
    pub rng: &'a mut StdRng,
}

/// Expand and evaluate `node`, whose position is `board`, to `depth` plies.
///
/// `prev` is the activity of the parent position, feeding the evaluator's
/// mobility and capture deltas. `lower`/`upper` are the alpha-beta window:
/// a White mover raises `lower`, a Black mover drops `upper`, and siblings
/// are cut off once the window closes. On return the node carries its
/// minimax value, best child, and subtree size.
pub(crate) fn minimax(
    ctx: &mut SearchContext<'_>,
    node: NodeId,
    board: &Board,
    prev: Activity,
    depth: u8,
    mut lower: f32,
    mut upper: f32,
) {
    if depth == 0 {
        let incoming = ctx.tree.node(node).mv;
        let score = match incoming {
            Some(mv) => eval::evaluate(board, mv, prev, ctx.known_hashes, ctx.rng),
            // A zero-depth search of the root has no incoming move; score
            // the position against itself (the deltas vanish).
            None => eval::position_score(board, Activity::measure(board), ctx.rng),
        };
        ctx.tree.node_mut(node).tree_evaluation = score;
        return;
    }

    let mut moves = generate_legal_moves(board);
    if moves.is_empty() {
        // Checkmate or stalemate; the evaluator decides which.
        ctx.tree.node_mut(node).tree_evaluation = eval::terminal_score(board);
        return;
    }
    sort_moves(&mut moves);

    let here = Activity::of_moves(&moves);
    let us = board.side_to_move();
    let mut best = match us {
        Color::White => f32::NEG_INFINITY,
        Color::Black => f32::INFINITY,
    };
    let mut best_child = None;

    for mv in moves {
        let child_board = board.make_move(mv);
        let child = ctx.tree.add_child(node, mv);

        let score = if ctx.known_hashes.contains(&child_board.hash()) {
            // Repeated position: score it without recursing.
            let penalty = mv.color().sign() * REPETITION_PENALTY;
            ctx.tree.node_mut(child).tree_evaluation = penalty;
            penalty
        } else {
            minimax(ctx, child, &child_board, here, depth - 1, lower, upper);
            ctx.tree.node(child).tree_evaluation
        };

        match us {
            Color::White => {
                if score > best {
                    best = score;
                    best_child = Some(child);
                }
                lower = lower.max(best);
            }
            Color::Black => {
                if score < best {
                    best = score;
                    best_child = Some(child);
                }
                upper = upper.min(best);
            }
        }
        if lower >= upper {
            break;
        }
    }

    let entry = ctx.tree.node_mut(node);
    entry.tree_evaluation = best;
    entry.best_child = best_child;
    ctx.tree.refresh_subtree_count(node);
}
