//! Castling rights, four independent flags in the low nibble of a `u8`.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::color::Color;
use crate::error::FenError;

/// Which wing a castle goes toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    /// King-side (short) castling.
    Short,
    /// Queen-side (long) castling.
    Long,
}

/// Castling rights: bit 0 = white short, 1 = white long, 2 = black short,
/// 3 = black long.
///
/// Rights are monotonic over a game: they are only ever removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No rights remaining.
    pub const NONE: CastlingRights = CastlingRights(0);
    /// All four rights.
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub const WHITE_SHORT: CastlingRights = CastlingRights(0b0001);
    pub const WHITE_LONG: CastlingRights = CastlingRights(0b0010);
    pub const BLACK_SHORT: CastlingRights = CastlingRights(0b0100);
    pub const BLACK_LONG: CastlingRights = CastlingRights(0b1000);

    /// Both rights of one color.
    pub const WHITE_BOTH: CastlingRights = CastlingRights(0b0011);
    pub const BLACK_BOTH: CastlingRights = CastlingRights(0b1100);

    /// Return the raw nibble (0..16), the index into the Zobrist castling table.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return `true` if no rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if every flag in `other` is present.
    #[inline]
    pub const fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// Return the rights with every flag in `other` added.
    #[inline]
    pub const fn with(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 | other.0)
    }

    /// Return the rights with every flag in `other` removed.
    #[inline]
    pub const fn without(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 & !other.0)
    }

    /// Return `true` if `color` may still castle toward `wing`.
    #[inline]
    pub const fn allows(self, color: Color, wing: Wing) -> bool {
        self.0 & Self::flag(color, wing).0 != 0
    }

    /// The single-bit flag for a color and wing.
    #[inline]
    pub const fn flag(color: Color, wing: Wing) -> CastlingRights {
        match (color, wing) {
            (Color::White, Wing::Short) => Self::WHITE_SHORT,
            (Color::White, Wing::Long) => Self::WHITE_LONG,
            (Color::Black, Wing::Short) => Self::BLACK_SHORT,
            (Color::Black, Wing::Long) => Self::BLACK_LONG,
        }
    }

    /// Parse the FEN castling field ("KQkq", "Kq", "-", ...).
    pub fn from_fen(s: &str) -> Result<CastlingRights, FenError> {
        if s == "-" {
            return Ok(CastlingRights::NONE);
        }
        let mut rights = CastlingRights::NONE;
        for c in s.chars() {
            let flag = match c {
                'K' => Self::WHITE_SHORT,
                'Q' => Self::WHITE_LONG,
                'k' => Self::BLACK_SHORT,
                'q' => Self::BLACK_LONG,
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            rights = rights.with(flag);
        }
        Ok(rights)
    }

    /// Serialize to the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        for (flag, c) in [
            (Self::WHITE_SHORT, 'K'),
            (Self::WHITE_LONG, 'Q'),
            (Self::BLACK_SHORT, 'k'),
            (Self::BLACK_LONG, 'q'),
        ] {
            if self.contains(flag) {
                s.push(c);
            }
        }
        s
    }
}

impl BitAnd for CastlingRights {
    type Output = CastlingRights;
    #[inline]
    fn bitand(self, rhs: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 & rhs.0)
    }
}

impl BitOr for CastlingRights {
    type Output = CastlingRights;
    #[inline]
    fn bitor(self, rhs: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 | rhs.0)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({})", self.to_fen())
    }
}
