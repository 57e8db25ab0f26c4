//! Piece-square tables.
//!
//! Tables are written from White's perspective, indexed `[rank][file]`
//! with rank 0 = White's back rank. Black lookups mirror the rank axis.
//! Values are in pawns, like the rest of the evaluation.

use sable_core::{Color, PieceKind, Square};

#[rustfmt::skip]
const PAWN_TABLE: [[f32; 8]; 8] = [
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [-0.1,  -0.1,  0.0,  0.15, 0.15, 0.0, -0.05, -0.05 ],
    [ 0.0,   0.0,  0.0,  0.15, 0.15, 0.0,  0.0,   0.0  ],
    [ 0.1,   0.1,  0.15, 0.15, 0.15, 0.15, 0.1,   0.1  ],
    [ 0.2,   0.2,  0.3,  0.3,  0.3,  0.3,  0.2,   0.2  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[f32; 8]; 8] = [
    [-0.05,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  -0.05 ],
    [-0.05,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  -0.05 ],
    [-0.03,  0.0,  0.1,  0.1,  0.1,  0.1,  0.0,  -0.03 ],
    [ 0.0,   0.0,  0.0,  0.13, 0.13, 0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.13, 0.13, 0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
];

#[rustfmt::skip]
const BISHOP_TABLE: [[f32; 8]; 8] = [
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.05, 0.05, 0.05, 0.05, 0.05, 0.05,  0.0  ],
    [ 0.05,  0.05, 0.05, 0.05, 0.05, 0.05, 0.05,  0.05 ],
    [ 0.0,   0.05, 0.05, 0.05, 0.05, 0.05, 0.05,  0.0  ],
    [ 0.0,   0.05, 0.05, 0.05, 0.05, 0.05, 0.05,  0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
];

const ROOK_TABLE: [[f32; 8]; 8] = [[0.0; 8]; 8];

#[rustfmt::skip]
const QUEEN_TABLE: [[f32; 8]; 8] = [
    [ 0.0,   0.0,  0.0,  0.05, 0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
];

/// The king table rewards staying home (castled corners in particular)
/// and penalizes wandering up the board.
#[rustfmt::skip]
const KING_TABLE: [[f32; 8]; 8] = [
    [ 0.0,   0.5,  0.5, -0.2,  0.0, -0.2,  0.5,   0.0  ],
    [ 0.0,   0.0, -0.5, -0.5, -0.5, -0.5,  0.0,   0.0  ],
    [-0.5,  -0.5, -0.5, -0.5, -0.5, -0.5, -0.5,  -0.5  ],
    [-0.5,  -0.5, -0.5, -0.5, -0.5, -0.5, -0.5,  -0.5  ],
    [-0.5,  -0.5, -0.5, -0.5, -0.5, -0.5, -0.5,  -0.5  ],
    [-0.5,  -0.5, -0.5, -0.5, -0.5, -0.5, -0.5,  -0.5  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
    [ 0.0,   0.0,  0.0,  0.0,  0.0,  0.0,  0.0,   0.0  ],
];

/// All tables indexed by [`PieceKind::index`].
static TABLES: [[[f32; 8]; 8]; PieceKind::COUNT] = [
    PAWN_TABLE,
    KNIGHT_TABLE,
    BISHOP_TABLE,
    ROOK_TABLE,
    QUEEN_TABLE,
    KING_TABLE,
];

/// Look up the placement bonus for a piece of `kind` and `color` on `sq`.
///
/// Black pieces read the table mirrored over the rank axis, so both sides
/// see the same geometry.
#[inline]
pub(crate) fn piece_square_bonus(kind: PieceKind, color: Color, sq: Square) -> f32 {
    let rank = match color {
        Color::White => sq.rank().index(),
        Color::Black => 7 - sq.rank().index(),
    };
    TABLES[kind.index()][rank][sq.file().index()]
}

#[cfg(test)]
mod tests {
    use sable_core::{Color, PieceKind, Square};

    use super::piece_square_bonus;

    #[test]
    fn central_pawns_are_rewarded() {
        assert_eq!(
            piece_square_bonus(PieceKind::Pawn, Color::White, Square::E4),
            0.15
        );
        assert_eq!(
            piece_square_bonus(PieceKind::Pawn, Color::White, Square::A4),
            -0.1
        );
    }

    #[test]
    fn black_lookups_mirror_the_rank_axis() {
        for kind in PieceKind::ALL {
            assert_eq!(
                piece_square_bonus(kind, Color::White, Square::E4),
                piece_square_bonus(kind, Color::Black, Square::E5),
            );
            assert_eq!(
                piece_square_bonus(kind, Color::White, Square::C1),
                piece_square_bonus(kind, Color::Black, Square::C8),
            );
        }
    }

    #[test]
    fn king_prefers_castled_corners() {
        let castled = piece_square_bonus(PieceKind::King, Color::White, Square::G1);
        let centered = piece_square_bonus(PieceKind::King, Color::White, Square::E4);
        assert!(castled > centered);
        assert_eq!(castled, 0.5);
        assert_eq!(centered, -0.5);
    }

    #[test]
    fn near_promotion_pawns_are_best() {
        assert_eq!(
            piece_square_bonus(PieceKind::Pawn, Color::White, Square::D7),
            0.3
        );
        assert_eq!(
            piece_square_bonus(PieceKind::Pawn, Color::Black, Square::D2),
            0.3
        );
    }
}
