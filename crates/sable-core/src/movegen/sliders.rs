//! Sliding piece candidates: bishop, rook, and queen rays.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

/// Generate ray candidates from `sq` along each direction in `directions`.
///
/// A ray extends over empty squares and terminates at the first occupied
/// one, which is included as a capture iff it holds an enemy piece. The
/// queen is generated as a bishop ray set followed by a rook ray set.
pub(super) fn generate(
    board: &Board,
    sq: Square,
    us: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(dr, df) in directions {
        let mut current = sq;
        while let Some(dest) = current.offset(dr, df) {
            match board.piece_at(dest) {
                None => out.push(Move::quiet(sq, dest, us)),
                Some(target) => {
                    if target.is(us.flip()) {
                        out.push(Move::capture(sq, dest, us));
                    }
                    break;
                }
            }
            current = dest;
        }
    }
}
