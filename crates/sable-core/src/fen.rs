//! FEN parsing and serialization for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castling::CastlingRights;
use crate::color::Color;
use crate::error::FenError;
use crate::file::File;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        // Piece placement, rank 8 first.
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut squares = [None; Square::COUNT];
        let mut kings = [None, None];

        for (rank_index, rank_str) in ranks.iter().enumerate() {
            let rank = Rank::from_index(7 - rank_index as u8).unwrap();
            let mut file_index: u8 = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file_index += digit as u8;
                } else {
                    let piece = Piece::from_fen_char(c)
                        .ok_or(FenError::InvalidPieceChar { character: c })?;
                    let file = File::from_index(file_index).ok_or(FenError::BadRankLength {
                        rank_index,
                        length: file_index as usize + 1,
                    })?;
                    let sq = Square::new(rank, file);
                    squares[sq.index()] = Some(piece);
                    if piece.kind() == PieceKind::King {
                        kings[piece.color().index()] = Some(sq);
                    }
                    file_index += 1;
                }
            }

            if file_index != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file_index as usize,
                });
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let castling = CastlingRights::from_fen(fields[2])?;

        // Only the file of the en passant target matters to the engine,
        // but the square must still be well-formed and on the right rank.
        let en_passant_file = if fields[3] == "-" {
            None
        } else {
            let sq = Square::from_algebraic(fields[3]).ok_or_else(|| FenError::InvalidEnPassant {
                found: fields[3].to_string(),
            })?;
            let expected_rank = match side_to_move {
                Color::White => Rank::Rank6,
                Color::Black => Rank::Rank3,
            };
            if sq.rank() != expected_rank {
                return Err(FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                });
            }
            Some(sq.file())
        };

        let halfmove_clock = fields[4]
            .parse::<u16>()
            .map_err(|_| FenError::InvalidMoveCounter {
                field: "halfmove clock",
                found: fields[4].to_string(),
            })?;

        let fullmove_number = fields[5]
            .parse::<u16>()
            .map_err(|_| FenError::InvalidMoveCounter {
                field: "fullmove number",
                found: fields[5].to_string(),
            })?;

        let king_squares = match (kings[0], kings[1]) {
            (Some(white), Some(black)) => [white, black],
            (None, _) => {
                return Err(FenError::InvalidBoard {
                    source: crate::error::BoardError::InvalidKingCount {
                        color: "white",
                        count: 0,
                    },
                });
            }
            (_, None) => {
                return Err(FenError::InvalidBoard {
                    source: crate::error::BoardError::InvalidKingCount {
                        color: "black",
                        count: 0,
                    },
                });
            }
        };

        let board = Board::from_parts(
            squares,
            side_to_move,
            castling,
            en_passant_file,
            halfmove_clock,
            fullmove_number,
            king_squares,
        );
        board.validate()?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_idx in (0u8..8).rev() {
            let rank = Rank::from_index(rank_idx).unwrap();
            let mut empty_run = 0u8;

            for file_idx in 0u8..8 {
                let file = File::from_index(file_idx).unwrap();
                match self.piece_at(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank_idx > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {}", self.side_to_move())?;
        write!(f, " {}", self.castling())?;
        match self.en_passant_square() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
