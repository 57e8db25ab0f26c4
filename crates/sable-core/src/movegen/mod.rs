//! Legal move generation.
//!
//! Candidates are generated per piece (pseudo-legal), then filtered by
//! king safety: a candidate survives iff the mover's king is not attacked
//! after hypothetically applying it. Castling gets two extra probes for
//! the squares the king starts on and passes over; the destination square
//! is covered by the generic post-move filter.

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::attacks::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::board::Board;
use crate::chess_move::Move;
use crate::file::File;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Generate all legal moves for the side to move.
///
/// Order is deterministic: squares in index order (a1..h8), and within a
/// piece the fixed direction order of its generator.
pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let us = board.side_to_move();
    let mut moves = Vec::with_capacity(48);

    for sq in Square::all() {
        let Some(piece) = board.piece_at(sq) else {
            continue;
        };
        if !piece.is(us) {
            continue;
        }
        match piece.kind() {
            PieceKind::Pawn => pawns::generate(board, sq, us, &mut moves),
            PieceKind::Knight => knights::generate(board, sq, us, &mut moves),
            PieceKind::Bishop => sliders::generate(board, sq, us, &BISHOP_DIRECTIONS, &mut moves),
            PieceKind::Rook => sliders::generate(board, sq, us, &ROOK_DIRECTIONS, &mut moves),
            PieceKind::Queen => {
                sliders::generate(board, sq, us, &BISHOP_DIRECTIONS, &mut moves);
                sliders::generate(board, sq, us, &ROOK_DIRECTIONS, &mut moves);
            }
            PieceKind::King => king::generate(board, sq, us, &mut moves),
        }
    }

    moves.retain(|mv| is_legal(board, *mv));
    moves
}

/// A candidate is legal iff it does not leave the mover's king attacked.
fn is_legal(board: &Board, mv: Move) -> bool {
    let us = mv.color();
    let them = us.flip();

    // Castling: the king may not start in check or cross an attacked
    // square. Its destination is checked by the post-move probe below.
    if board.piece_at(mv.source()).is_some_and(|p| p.kind() == PieceKind::King)
        && mv.source().file().distance(mv.dest().file()) == 2
    {
        if board.is_square_attacked(mv.source(), them) {
            return false;
        }
        let crossed_file = if mv.dest().file() > mv.source().file() {
            File::FileF
        } else {
            File::FileD
        };
        let crossed = Square::new(mv.source().rank(), crossed_file);
        if board.is_square_attacked(crossed, them) {
            return false;
        }
    }

    let after = board.make_move(mv);
    !after.is_square_attacked(after.king_square(us), them)
}
