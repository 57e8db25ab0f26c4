//! The board: piece placement, side to move, castling, en passant, counters.

use std::fmt;

use crate::castling::CastlingRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::file::File;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;
use crate::zobrist;

/// A complete position, as a plain value type.
///
/// `make_move` produces a new board from an old one (copy-make); nothing
/// here is shared or reference-counted, so search can fan out positions
/// freely.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Mailbox grid indexed by [`Square::index`].
    squares: [Option<Piece>; Square::COUNT],
    /// Which side moves next.
    side_to_move: Color,
    /// Remaining castling rights.
    castling: CastlingRights,
    /// File on which an en passant capture is available, set for exactly
    /// one ply after a two-square pawn push.
    en_passant_file: Option<File>,
    /// Halfmove clock for the fifty-move rule (tracked for FEN fidelity).
    halfmove_clock: u16,
    /// Fullmove number, incremented after Black moves.
    fullmove_number: u16,
    /// Cached king locations, indexed by [`Color::index`].
    king_squares: [Square; Color::COUNT],
    /// Zobrist hash of the position.
    hash: u64,
}

impl Board {
    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let mut squares = [None; Square::COUNT];

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file_idx, &kind) in back_rank.iter().enumerate() {
            let file = File::from_index(file_idx as u8).unwrap();
            squares[Square::new(Rank::Rank1, file).index()] =
                Some(Piece::new(kind, Color::White));
            squares[Square::new(Rank::Rank8, file).index()] =
                Some(Piece::new(kind, Color::Black));
            squares[Square::new(Rank::Rank2, file).index()] = Some(Piece::WHITE_PAWN);
            squares[Square::new(Rank::Rank7, file).index()] = Some(Piece::BLACK_PAWN);
        }

        let mut board = Board {
            squares,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant_file: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [Square::E1, Square::E8],
            hash: 0,
        };
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    /// Construct a board from raw components. Used by FEN parsing; the
    /// caller is responsible for passing a coherent king cache and hash.
    pub(crate) fn from_parts(
        squares: [Option<Piece>; Square::COUNT],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant_file: Option<File>,
        halfmove_clock: u16,
        fullmove_number: u16,
        king_squares: [Square; Color::COUNT],
    ) -> Board {
        let mut board = Board {
            squares,
            side_to_move,
            castling,
            en_passant_file,
            halfmove_clock,
            fullmove_number,
            king_squares,
            hash: 0,
        };
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    /// Return the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Return the cached square of the king of the given color.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the remaining castling rights.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Return the file on which en passant is available, if any.
    #[inline]
    pub fn en_passant_file(&self) -> Option<File> {
        self.en_passant_file
    }

    /// Return the en passant target square, derived from the file and the
    /// side to move (rank 6 when White captures, rank 3 when Black does).
    pub fn en_passant_square(&self) -> Option<Square> {
        let file = self.en_passant_file?;
        let rank = match self.side_to_move {
            Color::White => Rank::Rank6,
            Color::Black => Rank::Rank3,
        };
        Some(Square::new(rank, file))
    }

    /// Return the halfmove clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Return the fullmove number.
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Return the Zobrist hash of this position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    // Mutators below are crate-internal: only move execution and FEN
    // parsing may change a board, and both restore the invariants
    // (king cache, incremental hash) before handing the value out.

    #[inline]
    pub(crate) fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_en_passant_file(&mut self, file: Option<File>) {
        self.en_passant_file = file;
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    #[inline]
    pub(crate) fn set_king_square(&mut self, color: Color, sq: Square) {
        self.king_squares[color.index()] = sq;
    }

    #[inline]
    pub(crate) fn xor_hash(&mut self, key: u64) {
        self.hash ^= key;
    }

    /// Validate structural invariants: exactly one king per side, the king
    /// cache coherent with the grid, and no pawns on a back rank.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let name = match color {
                Color::White => "white",
                Color::Black => "black",
            };
            let king = Piece::new(PieceKind::King, color);
            let count = Square::all()
                .filter(|&sq| self.piece_at(sq) == Some(king))
                .count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color: name, count });
            }
            if self.piece_at(self.king_square(color)) != Some(king) {
                return Err(BoardError::KingCacheDesynced { color: name });
            }
        }

        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq)
                && piece.kind() == PieceKind::Pawn
                && matches!(sq.rank(), Rank::Rank1 | Rank::Rank8)
            {
                return Err(BoardError::PawnsOnBackRank);
            }
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

/// Wrapper that renders a board as an 8x8 grid, rank 8 on top.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_idx in (0u8..8).rev() {
            let rank = Rank::from_index(rank_idx).unwrap();
            write!(f, "{}  ", rank_idx + 1)?;
            for file_idx in 0u8..8 {
                let file = File::from_index(file_idx).unwrap();
                let c = match self.0.piece_at(Square::new(rank, file)) {
                    Some(piece) => piece.fen_char(),
                    None => '.',
                };
                if file_idx < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
