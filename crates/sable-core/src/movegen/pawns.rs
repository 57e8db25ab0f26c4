//! Pawn move candidates: pushes, captures, promotions, en passant.

use crate::board::Board;
use crate::chess_move::{Move, PromotionPiece};
use crate::color::Color;
use crate::rank::Rank;
use crate::square::Square;

/// The rank a pawn of `color` starts on.
fn start_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::Rank2,
        Color::Black => Rank::Rank7,
    }
}

/// The rank a pawn of `color` promotes on.
fn last_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::Rank8,
        Color::Black => Rank::Rank1,
    }
}

/// The rank a pawn of `color` must stand on to capture en passant.
fn en_passant_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::Rank5,
        Color::Black => Rank::Rank4,
    }
}

/// Push either a plain move or, on the last rank, all four promotions.
fn push_maybe_promoting(
    source: Square,
    dest: Square,
    color: Color,
    is_capture: bool,
    out: &mut Vec<Move>,
) {
    if dest.rank() == last_rank(color) {
        for promo in PromotionPiece::ALL {
            out.push(Move::promotion(source, dest, color, promo, is_capture));
        }
    } else if is_capture {
        out.push(Move::capture(source, dest, color));
    } else {
        out.push(Move::quiet(source, dest, color));
    }
}

/// Generate pawn candidates from `sq`.
pub(super) fn generate(board: &Board, sq: Square, us: Color, out: &mut Vec<Move>) {
    let forward = us.forward();

    // Single push onto an empty square.
    if let Some(dest) = sq.offset(forward, 0)
        && board.piece_at(dest).is_none()
    {
        push_maybe_promoting(sq, dest, us, false, out);

        // Double push: only from the start rank, through the empty square
        // just vacated above.
        if sq.rank() == start_rank(us)
            && let Some(double_dest) = dest.offset(forward, 0)
            && board.piece_at(double_dest).is_none()
        {
            out.push(Move::quiet(sq, double_dest, us));
        }
    }

    // Diagonal captures.
    for df in [-1, 1] {
        if let Some(dest) = sq.offset(forward, df)
            && let Some(target) = board.piece_at(dest)
            && target.is(us.flip())
        {
            push_maybe_promoting(sq, dest, us, true, out);
        }
    }

    // En passant: a pawn on the capture rank adjacent to the recorded file
    // takes the square behind the double-stepped pawn.
    if let Some(ep_file) = board.en_passant_file()
        && sq.rank() == en_passant_rank(us)
        && sq.file().distance(ep_file) == 1
    {
        let dest_rank = Rank::from_index((sq.rank().index() as i8 + forward) as u8).unwrap();
        out.push(Move::en_passant(sq, Square::new(dest_rank, ep_file), us));
    }
}
