//! Attack detection by geometric probes from the target square.
//!
//! Instead of generating the attacker's move list, each piece type is
//! probed directly: offset lookups for knights, kings and pawns, ray scans
//! for the sliders. A ray stops at the first occupied square.

use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The eight knight jumps as (rank, file) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

/// The eight king steps as (rank, file) deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, 0),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
];

/// Diagonal ray directions (bishop, one half of the queen).
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Orthogonal ray directions (rook, the other half of the queen).
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Walk from `from` in direction `(dr, df)` and return the first occupied
/// square together with its piece, or `None` if the ray runs off the board.
pub(crate) fn first_piece_along(
    board: &Board,
    from: Square,
    (dr, df): (i8, i8),
) -> Option<(Square, Piece)> {
    let mut current = from;
    while let Some(next) = current.offset(dr, df) {
        if let Some(piece) = board.piece_at(next) {
            return Some((next, piece));
        }
        current = next;
    }
    None
}

impl Board {
    /// Return `true` if `sq` is attacked by any piece of `by`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        // Knights.
        for (dr, df) in KNIGHT_OFFSETS {
            if let Some(probe) = sq.offset(dr, df)
                && self.piece_at(probe) == Some(Piece::new(PieceKind::Knight, by))
            {
                return true;
            }
        }

        // The enemy king (relevant when filtering king moves).
        for (dr, df) in KING_OFFSETS {
            if let Some(probe) = sq.offset(dr, df)
                && self.piece_at(probe) == Some(Piece::new(PieceKind::King, by))
            {
                return true;
            }
        }

        // Pawns: an attacker of color `by` stands one rank short of `sq`
        // in its own push direction, on an adjacent file.
        let dr = -by.forward();
        for df in [-1, 1] {
            if let Some(probe) = sq.offset(dr, df)
                && self.piece_at(probe) == Some(Piece::new(PieceKind::Pawn, by))
            {
                return true;
            }
        }

        // Diagonal sliders.
        for dir in BISHOP_DIRECTIONS {
            if let Some((_, piece)) = first_piece_along(self, sq, dir)
                && piece.is(by)
                && matches!(piece.kind(), PieceKind::Bishop | PieceKind::Queen)
            {
                return true;
            }
        }

        // Orthogonal sliders.
        for dir in ROOK_DIRECTIONS {
            if let Some((_, piece)) = first_piece_along(self, sq, dir)
                && piece.is(by)
                && matches!(piece.kind(), PieceKind::Rook | PieceKind::Queen)
            {
                return true;
            }
        }

        false
    }

    /// Return `true` if the king of `color` is currently attacked.
    #[inline]
    pub fn in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.flip())
    }
}
