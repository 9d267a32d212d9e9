use derive_more::{Display, Error};
use std::{ops::Not, str::FromStr};

/// The color of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Color {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Color {
    /// Returns an iterator over both colors, white first.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        [Color::White, Color::Black].into_iter()
    }

    /// The rank of this side's back row, where its king and rooks start.
    pub fn home(&self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The rank offset of one step forward for this side's pawns.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// The reason why parsing the side to move failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected either `w` or `b`")]
pub struct ParseColorError;

/// Parses the side to move as it appears in FEN.
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _ => Err(ParseColorError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn color_implements_not_operator(c: Color) {
        assert_eq!(!!c, c);
        assert_ne!(!c, c);
    }

    #[proptest]
    fn iter_returns_both_colors() {
        assert_eq!(
            Color::iter().collect::<Vec<_>>(),
            [Color::White, Color::Black]
        );
    }

    #[proptest]
    fn pawns_of_opposing_colors_advance_in_opposite_directions(c: Color) {
        assert_eq!(c.forward(), -(!c).forward());
    }

    #[proptest]
    fn home_rank_is_on_the_edge_of_the_board(c: Color) {
        assert!([0, 7].contains(&c.home()));
        assert_ne!(c.home(), (!c).home());
    }

    #[proptest]
    fn parsing_side_to_move_fails_if_not_w_or_b(#[filter(#s != "w" && #s != "b")] s: String) {
        assert_eq!(s.parse::<Color>(), Err(ParseColorError));
    }

    #[test]
    fn parsing_side_to_move_accepts_w_and_b() {
        assert_eq!("w".parse(), Ok(Color::White));
        assert_eq!("b".parse(), Ok(Color::Black));
    }
}
