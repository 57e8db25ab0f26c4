//! Move execution via copy-make, with incremental hash maintenance.

use crate::board::Board;
use crate::castling::CastlingRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::file::File;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

/// Castling rights revoked when a square is the source or destination of a
/// move: the king squares clear both of that side's rights, the rook
/// corners clear one. Landing on a corner covers rook captures.
const REVOKED_RIGHTS: [CastlingRights; 64] = {
    let mut table = [CastlingRights::NONE; 64];
    table[Square::E1.index()] = CastlingRights::WHITE_BOTH;
    table[Square::A1.index()] = CastlingRights::WHITE_LONG;
    table[Square::H1.index()] = CastlingRights::WHITE_SHORT;
    table[Square::E8.index()] = CastlingRights::BLACK_BOTH;
    table[Square::A8.index()] = CastlingRights::BLACK_LONG;
    table[Square::H8.index()] = CastlingRights::BLACK_SHORT;
    table
};

impl Board {
    /// Apply a move and return the resulting board; `self` is unchanged.
    ///
    /// Executes the implicit rook move on castles and removes the captured
    /// pawn on en passant, updates the king cache, revokes castling rights,
    /// records or clears the en passant file, flips the side to move, and
    /// keeps the Zobrist hash incrementally in sync with
    /// `hash_from_scratch`.
    ///
    /// The move is trusted to come from the generator (or to have been
    /// validated against it); an empty source square returns the board
    /// unchanged.
    pub fn make_move(&self, mv: Move) -> Board {
        let mut b = *self;
        let us = b.side_to_move();
        let them = us.flip();
        let source = mv.source();
        let dest = mv.dest();

        let Some(moving) = b.piece_at(source) else {
            return b;
        };

        // The en passant file and castling rights are about to change;
        // XOR their old keys out before touching either.
        if let Some(file) = b.en_passant_file() {
            b.xor_hash(zobrist::EN_PASSANT_FILE[file.index()]);
        }
        b.xor_hash(zobrist::CASTLING[b.castling().bits() as usize]);
        b.set_en_passant_file(None);

        // Remove the captured piece. For en passant the victim stands on
        // the source rank in the destination file, not on the target square.
        if mv.is_en_passant() {
            let victim_sq = Square::new(source.rank(), dest.file());
            b.set_piece(victim_sq, None);
            b.xor_hash(
                zobrist::PIECE_SQUARE[Piece::new(PieceKind::Pawn, them).index()][victim_sq.index()],
            );
        } else if let Some(victim) = b.piece_at(dest) {
            b.xor_hash(zobrist::PIECE_SQUARE[victim.index()][dest.index()]);
        }

        // Move the piece, replacing a promoting pawn by its new kind.
        let placed = match mv.promotion_piece() {
            Some(promo) => Piece::new(promo.piece_kind(), us),
            None => moving,
        };
        b.set_piece(source, None);
        b.set_piece(dest, Some(placed));
        b.xor_hash(zobrist::PIECE_SQUARE[moving.index()][source.index()]);
        b.xor_hash(zobrist::PIECE_SQUARE[placed.index()][dest.index()]);

        if moving.kind() == PieceKind::King {
            b.set_king_square(us, dest);

            // A two-file king move is a castle; relocate the rook.
            if source.file().distance(dest.file()) == 2 {
                let (rook_source, rook_dest) = if dest.file() > source.file() {
                    (
                        Square::new(source.rank(), File::FileH),
                        Square::new(source.rank(), File::FileF),
                    )
                } else {
                    (
                        Square::new(source.rank(), File::FileA),
                        Square::new(source.rank(), File::FileD),
                    )
                };
                let rook = Piece::new(PieceKind::Rook, us);
                b.set_piece(rook_source, None);
                b.set_piece(rook_dest, Some(rook));
                b.xor_hash(zobrist::PIECE_SQUARE[rook.index()][rook_source.index()]);
                b.xor_hash(zobrist::PIECE_SQUARE[rook.index()][rook_dest.index()]);
            }
        }

        // A two-square pawn push opens en passant on its file for one ply.
        if moving.kind() == PieceKind::Pawn
            && source.rank().index().abs_diff(dest.rank().index()) == 2
        {
            b.set_en_passant_file(Some(dest.file()));
        }

        // Revoke castling rights touched by either end of the move, then
        // XOR the new castling and en passant state back into the hash.
        let rights = b
            .castling()
            .without(REVOKED_RIGHTS[source.index()])
            .without(REVOKED_RIGHTS[dest.index()]);
        b.set_castling(rights);
        b.xor_hash(zobrist::CASTLING[rights.bits() as usize]);
        if let Some(file) = b.en_passant_file() {
            b.xor_hash(zobrist::EN_PASSANT_FILE[file.index()]);
        }

        if moving.kind() == PieceKind::Pawn || mv.is_capture() {
            b.set_halfmove_clock(0);
        } else {
            b.set_halfmove_clock(b.halfmove_clock() + 1);
        }

        b.set_side_to_move(them);
        b.xor_hash(zobrist::SIDE_TO_MOVE[Color::White.index()]);
        b.xor_hash(zobrist::SIDE_TO_MOVE[Color::Black.index()]);

        if us == Color::Black {
            b.set_fullmove_number(b.fullmove_number() + 1);
        }

        debug_assert_eq!(
            b.hash(),
            zobrist::hash_from_scratch(&b),
            "incremental hash diverged after {mv}"
        );

        b
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::castling::CastlingRights;
    use crate::chess_move::{Move, PromotionPiece};
    use crate::color::Color;
    use crate::file::File;
    use crate::piece::Piece;
    use crate::square::Square;
    use crate::zobrist;

    fn assert_hash_coherent(board: &Board) {
        assert_eq!(
            board.hash(),
            zobrist::hash_from_scratch(board),
            "incremental hash diverged from scratch"
        );
    }

    #[test]
    fn double_push_sets_en_passant_file() {
        let after = Board::starting_position().make_move(Move::quiet(
            Square::E2,
            Square::E4,
            Color::White,
        ));
        assert_eq!(after.piece_at(Square::E4), Some(Piece::WHITE_PAWN));
        assert_eq!(after.piece_at(Square::E2), None);
        assert_eq!(after.en_passant_file(), Some(File::FileE));
        assert_eq!(after.side_to_move(), Color::Black);
        assert_hash_coherent(&after);
    }

    #[test]
    fn en_passant_file_cleared_next_ply() {
        let board = Board::starting_position()
            .make_move(Move::quiet(Square::E2, Square::E4, Color::White))
            .make_move(Move::quiet(Square::G8, Square::F6, Color::Black));
        assert_eq!(board.en_passant_file(), None);
        assert_hash_coherent(&board);
    }

    #[test]
    fn capture_removes_victim_and_resets_clock() {
        // 1.e4 d5 2.exd5
        let board = Board::starting_position()
            .make_move(Move::quiet(Square::E2, Square::E4, Color::White))
            .make_move(Move::quiet(Square::D7, Square::D5, Color::Black))
            .make_move(Move::capture(Square::E4, Square::D5, Color::White));
        assert_eq!(board.piece_at(Square::D5), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_at(Square::E4), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_hash_coherent(&board);
    }

    #[test]
    fn en_passant_removes_the_bypassing_pawn() {
        // 1.e4 a6 2.e5 d5 3.exd6
        let board = Board::starting_position()
            .make_move(Move::quiet(Square::E2, Square::E4, Color::White))
            .make_move(Move::quiet(Square::A7, Square::A6, Color::Black))
            .make_move(Move::quiet(Square::E4, Square::E5, Color::White))
            .make_move(Move::quiet(Square::D7, Square::D5, Color::Black));
        assert_eq!(board.en_passant_file(), Some(File::FileD));

        let after = board.make_move(Move::en_passant(Square::E5, Square::D6, Color::White));
        assert_eq!(after.piece_at(Square::D6), Some(Piece::WHITE_PAWN));
        assert_eq!(after.piece_at(Square::D5), None, "victim pawn must be gone");
        assert_eq!(after.piece_at(Square::E5), None);
        assert_hash_coherent(&after);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let board: Board = "4k3/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        for promo in PromotionPiece::ALL {
            let after = board.make_move(Move::promotion(
                Square::E7,
                Square::E8,
                Color::White,
                promo,
                false,
            ));
            assert_eq!(
                after.piece_at(Square::E8),
                Some(Piece::new(promo.piece_kind(), Color::White))
            );
            assert_eq!(after.piece_at(Square::E7), None);
            assert_hash_coherent(&after);
        }
    }

    #[test]
    fn capture_promotion() {
        let board: Board = "3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let after = board.make_move(Move::promotion(
            Square::E7,
            Square::D8,
            Color::White,
            PromotionPiece::Queen,
            true,
        ));
        assert_eq!(after.piece_at(Square::D8), Some(Piece::WHITE_QUEEN));
        assert_eq!(after.piece_at(Square::E7), None);
        assert_hash_coherent(&after);
    }

    #[test]
    fn short_castle_moves_both_king_and_rook() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let after = board.make_move(Move::quiet(Square::E1, Square::G1, Color::White));
        assert_eq!(after.piece_at(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(after.piece_at(Square::F1), Some(Piece::WHITE_ROOK));
        assert_eq!(after.piece_at(Square::E1), None);
        assert_eq!(after.piece_at(Square::H1), None);
        assert_eq!(after.king_square(Color::White), Square::G1);
        assert!(!after.castling().contains(CastlingRights::WHITE_SHORT));
        assert!(!after.castling().contains(CastlingRights::WHITE_LONG));
        assert!(after.castling().contains(CastlingRights::BLACK_SHORT));
        assert_hash_coherent(&after);
    }

    #[test]
    fn long_castle_black() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1"
            .parse()
            .unwrap();
        let after = board.make_move(Move::quiet(Square::E8, Square::C8, Color::Black));
        assert_eq!(after.piece_at(Square::C8), Some(Piece::BLACK_KING));
        assert_eq!(after.piece_at(Square::D8), Some(Piece::BLACK_ROOK));
        assert_eq!(after.piece_at(Square::A8), None);
        assert_eq!(after.king_square(Color::Black), Square::C8);
        assert!(!after.castling().contains(CastlingRights::BLACK_LONG));
        assert!(after.castling().contains(CastlingRights::WHITE_BOTH));
        assert_hash_coherent(&after);
    }

    #[test]
    fn rook_moves_revoke_one_wing() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let after = board.make_move(Move::quiet(Square::H1, Square::G1, Color::White));
        assert!(!after.castling().contains(CastlingRights::WHITE_SHORT));
        assert!(after.castling().contains(CastlingRights::WHITE_LONG));
        assert_hash_coherent(&after);
    }

    #[test]
    fn capturing_a_rook_revokes_its_right() {
        // White bishop takes the h8 rook.
        let board: Board = "r3k2r/8/8/8/8/8/1B6/R3K2R w KQkq - 0 1".parse().unwrap();
        let after = board.make_move(Move::capture(Square::B2, Square::H8, Color::White));
        assert!(!after.castling().contains(CastlingRights::BLACK_SHORT));
        assert!(after.castling().contains(CastlingRights::BLACK_LONG));
        assert_hash_coherent(&after);
    }

    #[test]
    fn king_cache_follows_every_king_move() {
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let after = board.make_move(Move::quiet(Square::E1, Square::D2, Color::White));
        assert_eq!(after.king_square(Color::White), Square::D2);
        after.validate().unwrap();
        let after = after.make_move(Move::quiet(Square::E8, Square::F7, Color::Black));
        assert_eq!(after.king_square(Color::Black), Square::F7);
        after.validate().unwrap();
    }

    #[test]
    fn counters_advance() {
        let b1 = Board::starting_position().make_move(Move::quiet(
            Square::G1,
            Square::F3,
            Color::White,
        ));
        assert_eq!(b1.halfmove_clock(), 1);
        assert_eq!(b1.fullmove_number(), 1);
        let b2 = b1.make_move(Move::quiet(Square::G8, Square::F6, Color::Black));
        assert_eq!(b2.halfmove_clock(), 2);
        assert_eq!(b2.fullmove_number(), 2);
    }

    #[test]
    fn transpositions_collide_on_purpose() {
        // 1.Nf3 Nf6 2.Nc3 Nc6 and 1.Nc3 Nc6 2.Nf3 Nf6 reach the same position.
        let path_a = Board::starting_position()
            .make_move(Move::quiet(Square::G1, Square::F3, Color::White))
            .make_move(Move::quiet(Square::G8, Square::F6, Color::Black))
            .make_move(Move::quiet(Square::B1, Square::C3, Color::White))
            .make_move(Move::quiet(Square::B8, Square::C6, Color::Black));
        let path_b = Board::starting_position()
            .make_move(Move::quiet(Square::B1, Square::C3, Color::White))
            .make_move(Move::quiet(Square::B8, Square::C6, Color::Black))
            .make_move(Move::quiet(Square::G1, Square::F3, Color::White))
            .make_move(Move::quiet(Square::G8, Square::F6, Color::Black));
        assert_eq!(path_a.hash(), path_b.hash());
    }

    #[test]
    fn knight_trade_line_hash_matches_scratch() {
        // e2e4 e7e5 g1f3 b8c6 f3e5 c6e5, checked after every ply.
        let moves = [
            Move::quiet(Square::E2, Square::E4, Color::White),
            Move::quiet(Square::E7, Square::E5, Color::Black),
            Move::quiet(Square::G1, Square::F3, Color::White),
            Move::quiet(Square::B8, Square::C6, Color::Black),
            Move::capture(Square::F3, Square::E5, Color::White),
            Move::capture(Square::C6, Square::E5, Color::Black),
        ];
        let mut board = Board::starting_position();
        for mv in moves {
            board = board.make_move(mv);
            assert_hash_coherent(&board);
        }
    }

    #[test]
    fn castle_hash_matches_scratch() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        for (source, dest) in [
            (Square::E1, Square::G1),
            (Square::E1, Square::C1),
        ] {
            let after = board.make_move(Move::quiet(source, dest, Color::White));
            assert_hash_coherent(&after);
        }
    }

    #[test]
    fn empty_source_square_is_a_no_op() {
        let board = Board::starting_position();
        let after = board.make_move(Move::quiet(Square::E4, Square::E5, Color::White));
        assert_eq!(board, after);
    }
}
