use crate::chess::{Color, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// A chess [piece][`Role`] of a certain [`Color`].
///
/// Besides its identity, a piece remembers whether it has ever been moved,
/// which is what castling eligibility depends on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece {
    role: Role,
    color: Color,
    #[cfg_attr(test, strategy(proptest::strategy::Just(false)))]
    moved: bool,
}

impl Piece {
    /// Constructs a [`Piece`] that has not moved yet.
    pub fn new(role: Role, color: Color) -> Self {
        Piece {
            role,
            color,
            moved: false,
        }
    }

    /// This piece's [`Role`].
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Color`].
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether this piece has been the subject of a move.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Records that this piece has moved.
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Whether this piece is of the given [`Role`] and [`Color`].
    pub fn is(&self, role: Role, color: Color) -> bool {
        self.role == role && self.color == color
    }
}

/// Prints the piece as a FEN letter, uppercase for white and lowercase for black.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.color {
            Color::White => write!(f, "{}", self.role.to_string().to_uppercase()),
            Color::Black => write!(f, "{}", self.role),
        }
    }
}

/// The reason why parsing a [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected one of `pnbrqk` or `PNBRQK`")]
pub struct ParsePieceError;

impl TryFrom<char> for Piece {
    type Error = ParsePieceError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = match c {
            'A'..='Z' => Color::White,
            'a'..='z' => Color::Black,
            _ => return Err(ParsePieceError),
        };

        match c.to_ascii_lowercase().to_string().parse() {
            Ok(role) => Ok(Piece::new(role, color)),
            Err(_) => Err(ParsePieceError),
        }
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.try_into(),
            _ => Err(ParsePieceError),
        }
    }
}
