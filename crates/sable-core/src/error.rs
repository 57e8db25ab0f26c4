//! Error types for FEN parsing and board validation.

/// Errors from parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The FEN string does not have exactly 6 space-separated fields.
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index in FEN order (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The offending character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The offending field.
        found: String,
    },
    /// An unrecognized character in the castling field.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar {
        /// The offending character.
        character: char,
    },
    /// The en passant field is not "-" or a valid square.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// The offending field.
        found: String,
    },
    /// A move counter is not a valid number.
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// "halfmove clock" or "fullmove number".
        field: &'static str,
        /// The offending field.
        found: String,
    },
    /// The parsed position fails structural validation.
    #[error("invalid board: {source}")]
    InvalidBoard {
        /// The underlying validation failure.
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
    /// The cached king square does not hold that side's king.
    #[error("king cache for {color} is out of sync with the board")]
    KingCacheDesynced {
        /// Which side's cache is stale.
        color: &'static str,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on a back rank")]
    PawnsOnBackRank,
}
