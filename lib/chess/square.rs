use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A square on the chess board, addressed by `(rank, file)`.
///
/// Rank 0 is the row printed first, i.e. black's back rank, and file 0 is the `a` file.
/// A square may lie off the board, which is how move generators probe offsets;
/// only squares for which [`Square::is_valid`] holds may be used to access a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square {
    #[cfg_attr(test, strategy(0i8..8))]
    rank: i8,
    #[cfg_attr(test, strategy(0i8..8))]
    file: i8,
}

impl Square {
    /// Constructs a [`Square`] from a pair of rank and file indices.
    pub const fn new(rank: i8, file: i8) -> Self {
        Square { rank, file }
    }

    /// This square's rank index.
    pub fn rank(&self) -> i8 {
        self.rank
    }

    /// This square's file index.
    pub fn file(&self) -> i8 {
        self.file
    }

    /// Whether both coordinates lie in the range `0..8`.
    pub fn is_valid(&self) -> bool {
        (0..8).contains(&self.rank) && (0..8).contains(&self.file)
    }

    /// The square `dr` ranks and `df` files away, which may be off the board.
    pub fn offset(&self, dr: i8, df: i8) -> Self {
        Square::new(self.rank + dr, self.file + df)
    }

    /// Returns an iterator over every valid square, rank by rank.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..64).map(|i| Square::new(i / 8, i % 8))
    }
}

/// Prints the square in algebraic notation, e.g. `e4`.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            f.write_char((b'a' + self.file as u8).into())?;
            f.write_char((b'8' - self.rank as u8).into())
        } else {
            write!(f, "({}, {})", self.rank, self.file)
        }
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseSquareError {
    #[display(fmt = "expected lower case letter in the range `('a'..='h')`")]
    InvalidFile,
    #[display(fmt = "expected digit in the range `('1'..='8')`")]
    InvalidRank,
}

/// Parses algebraic notation, e.g. `e4`.
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        let file = match chars.next() {
            Some(c @ 'a'..='h') => c as i8 - 'a' as i8,
            _ => return Err(ParseSquareError::InvalidFile),
        };

        let rank = match (chars.next(), chars.next()) {
            (Some(c @ '1'..='8'), None) => 7 - (c as i8 - '1' as i8),
            _ => return Err(ParseSquareError::InvalidRank),
        };

        Ok(Square::new(rank, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn arbitrary_squares_are_valid(s: Square) {
        assert!(s.is_valid());
    }

    #[proptest]
    fn square_is_invalid_if_any_coordinate_is_out_of_range(
        #[strategy(-16i8..16)] r: i8,
        #[strategy(-16i8..16)] f: i8,
    ) {
        let s = Square::new(r, f);
        assert_eq!(s.is_valid(), (0..8).contains(&r) && (0..8).contains(&f));
    }

    #[proptest]
    fn offset_adds_to_each_coordinate(
        s: Square,
        #[strategy(-8i8..8)] dr: i8,
        #[strategy(-8i8..8)] df: i8,
    ) {
        let t = s.offset(dr, df);
        assert_eq!((t.rank(), t.file()), (s.rank() + dr, s.file() + df));
    }

    #[test]
    fn iter_returns_every_square_once() {
        let squares: Vec<_> = Square::iter().collect();
        assert_eq!(squares.len(), 64);
        assert!(squares.iter().all(Square::is_valid));
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(s: Square) {
        assert_eq!(s.to_string().parse(), Ok(s));
    }

    #[test]
    fn algebraic_notation_counts_ranks_from_the_bottom() {
        assert_eq!("a8".parse(), Ok(Square::new(0, 0)));
        assert_eq!("e4".parse(), Ok(Square::new(4, 4)));
        assert_eq!("h1".parse(), Ok(Square::new(7, 7)));
    }

    #[proptest]
    fn parsing_square_fails_if_file_is_invalid(#[strategy("[^a-h][1-8]")] s: String) {
        assert_eq!(s.parse::<Square>(), Err(ParseSquareError::InvalidFile));
    }

    #[proptest]
    fn parsing_square_fails_if_rank_is_invalid(#[strategy("[a-h]([^1-8]|[1-8].+)?")] s: String) {
        assert_eq!(s.parse::<Square>(), Err(ParseSquareError::InvalidRank));
    }
}
