//! Static evaluation. Positive scores favor White.

pub mod material;
mod pst;

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;

use sable_core::{Board, Color, Move, generate_legal_moves};

/// Score assigned when a position's hash was already reached in the game,
/// signed by the mover so that repeating is discouraged.
pub const REPETITION_PENALTY: f32 = -1.900128;

/// Weight of the legal-move-count delta against the previous position.
pub const MOBILITY_WEIGHT: f32 = 0.01;

/// Weight of the capture-move-count delta against the previous position.
pub const CAPTURE_WEIGHT: f32 = 0.02;

/// Upper bound of the uniform jitter added to non-terminal evaluations.
/// Without it the engine replays identical games; the game's seeded RNG
/// keeps it reproducible.
pub const EVAL_NOISE_SPAN: f32 = 0.2;

/// Checkmate sentinel magnitude. The sign carries the loser: negative
/// when White is mated.
pub const CHECKMATE_SCORE: f32 = f32::MAX;

/// The score of a position in which `loser` has been checkmated.
#[inline]
pub fn checkmate_score(loser: Color) -> f32 {
    -loser.sign() * CHECKMATE_SCORE
}

/// Test whether a score is the checkmate sentinel of either sign.
#[inline]
pub fn is_checkmate_score(score: f32) -> bool {
    score.abs() == CHECKMATE_SCORE
}

/// Move-list statistics of a position: how many legal moves there are and
/// how many of them capture. The evaluator scores the *change* in both
/// relative to the pre-move position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Activity {
    /// Number of legal moves.
    pub moves: usize,
    /// Number of legal capturing moves.
    pub captures: usize,
}

impl Activity {
    /// Measure an already-generated move list.
    pub fn of_moves(moves: &[Move]) -> Activity {
        Activity {
            moves: moves.len(),
            captures: moves.iter().filter(|m| m.is_capture()).count(),
        }
    }

    /// Generate and measure the legal moves of `board`.
    pub fn measure(board: &Board) -> Activity {
        Self::of_moves(&generate_legal_moves(board))
    }
}

/// Score a position with no legal moves: the checkmate sentinel if the
/// side to move is in check, zero for stalemate.
pub fn terminal_score(board: &Board) -> f32 {
    let stm = board.side_to_move();
    if board.in_check(stm) {
        checkmate_score(stm)
    } else {
        0.0
    }
}

/// Evaluate a position reached by `mv`, given the activity of the
/// position it was played from and the set of hashes seen in the game.
///
/// A position whose hash is already known short-circuits to the
/// repetition penalty, signed by the mover. Everything else is
/// [`position_score`].
pub fn evaluate(
    board: &Board,
    mv: Move,
    prev: Activity,
    known_hashes: &HashSet<u64>,
    rng: &mut StdRng,
) -> f32 {
    if known_hashes.contains(&board.hash()) {
        return mv.color().sign() * REPETITION_PENALTY;
    }
    position_score(board, prev, rng)
}

/// The non-repetition part of the evaluation: terminal handling, material
/// with placement bonuses, mobility and capture deltas, and jitter.
pub fn position_score(board: &Board, prev: Activity, rng: &mut StdRng) -> f32 {
    let moves = generate_legal_moves(board);
    if moves.is_empty() {
        return terminal_score(board);
    }
    let here = Activity::of_moves(&moves);
    let stm = board.side_to_move().sign();

    let mut score = material::material(board);
    score += stm * MOBILITY_WEIGHT * (here.moves as f32 - prev.moves as f32);
    score += stm * CAPTURE_WEIGHT * (here.captures as f32 - prev.captures as f32);
    score += stm * rng.random_range(0.0..EVAL_NOISE_SPAN);
    score
}
