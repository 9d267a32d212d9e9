use crate::chess::{Color, Piece, Role};
use bitflags::bitflags;
use derive_more::{Display, Error};
use std::{fmt, str::FromStr};

bitflags! {
    /// The castling rights recorded in a FEN record.
    #[derive(Default)]
    pub struct Castles: u8 {
        const WHITE_SHORT = 0b0001;
        const WHITE_LONG =  0b0010;
        const BLACK_SHORT = 0b0100;
        const BLACK_LONG =  0b1000;
    }
}

impl Castles {
    /// The kingside castling right of a side.
    pub fn short(side: Color) -> Self {
        match side {
            Color::White => Castles::WHITE_SHORT,
            Color::Black => Castles::BLACK_SHORT,
        }
    }

    /// The queenside castling right of a side.
    pub fn long(side: Color) -> Self {
        match side {
            Color::White => Castles::WHITE_LONG,
            Color::Black => Castles::BLACK_LONG,
        }
    }

    /// The castling right associated with the rook that starts on the given file.
    pub fn of_rook(side: Color, file: i8) -> Option<Self> {
        match file {
            0 => Some(Castles::long(side)),
            7 => Some(Castles::short(side)),
            _ => None,
        }
    }
}

/// Prints castling rights as in FEN, e.g. `KQkq`, or `-` if there are none.
impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }

        for side in Color::iter() {
            if self.contains(Castles::short(side)) {
                fmt::Display::fmt(&Piece::new(Role::King, side), f)?;
            }

            if self.contains(Castles::long(side)) {
                fmt::Display::fmt(&Piece::new(Role::Queen, side), f)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse castling rights")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Castles::empty());
        }

        let mut castles = Castles::empty();

        for c in s.chars() {
            let right = match Piece::try_from(c) {
                Ok(p) if p.role() == Role::King => Castles::short(p.color()),
                Ok(p) if p.role() == Role::Queen => Castles::long(p.color()),
                _ => return Err(ParseCastlesError),
            };

            if castles.contains(right) {
                return Err(ParseCastlesError);
            }

            castles |= right;
        }

        if castles.is_empty() {
            Err(ParseCastlesError)
        } else {
            Ok(castles)
        }
    }
}
