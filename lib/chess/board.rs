use crate::chess::{Color, Move, ParseFenError, Piece, Role, Square};
use derive_more::DebugCustom;
use std::{fmt, str::FromStr};

/// The pieces in their starting order along the back rank, from the `a` to the `h` file.
const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// The piece placement on the chess board.
///
/// A board holds at most one [`Piece`] per [`Square`] and does not validate
/// whether the placement is legal according to the rules of chess.
#[derive(DebugCustom, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Board(\"{}\")", self)]
pub struct Board([[Option<Piece>; 8]; 8]);

/// The standard starting position.
impl Default for Board {
    fn default() -> Self {
        let mut board = Board::empty();

        for side in Color::iter() {
            let home = side.home();
            let pawns = home + side.forward();
            for (file, &role) in (0..).zip(BACK_RANK.iter()) {
                board.set(Square::new(home, file), Some(Piece::new(role, side)));
                board.set(Square::new(pawns, file), Some(Piece::new(Role::Pawn, side)));
            }
        }

        board
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board([[None; 8]; 8])
    }

    /// Whether the [`Square`] lies on this board.
    pub fn valid_position(&self, sq: Square) -> bool {
        sq.is_valid()
    }

    /// The [`Piece`] on the given [`Square`], if any.
    ///
    /// Squares off the board are always empty.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if self.valid_position(sq) {
            self.0[sq.rank() as usize][sq.file() as usize]
        } else {
            None
        }
    }

    /// Places a [`Piece`] on, or clears, the given [`Square`], returning its previous occupant.
    ///
    /// # Panics
    ///
    /// Panics if the square is not a [valid position][`Board::valid_position`].
    pub fn set(&mut self, sq: Square, p: Option<Piece>) -> Option<Piece> {
        assert!(self.valid_position(sq), "square {} is off the board", sq);
        std::mem::replace(&mut self.0[sq.rank() as usize][sq.file() as usize], p)
    }

    /// Clears the given [`Square`], returning the [`Piece`] that was on it, if any.
    ///
    /// # Panics
    ///
    /// Panics if the square is not a [valid position][`Board::valid_position`].
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.set(sq, None)
    }

    /// An iterator over all pieces on the board and the squares they stand on.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| Some((sq, self.get(sq)?)))
    }

    /// An iterator over the pieces of a [`Color`] and the squares they stand on.
    pub fn by_color(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, p)| p.color() == c)
    }

    /// The [`Square`] occupied by the king of a [`Color`].
    ///
    /// If more than one king of that color is on the board, the first one
    /// found scanning rank by rank is returned.
    pub fn king(&self, c: Color) -> Option<Square> {
        self.iter()
            .find(|(_, p)| p.is(Role::King, c))
            .map(|(sq, _)| sq)
    }

    /// Moves pieces around according to the [`Move`], without checking whether it's legal.
    ///
    /// Kings and rooks are marked as moved.
    pub fn play(&mut self, m: &Move) {
        self.remove(m.whence());

        if let Some(sq) = m.captured_at() {
            self.remove(sq);
        }

        if let Move::Castle {
            rook_whence,
            rook_whither,
            mut rook,
            ..
        } = *m
        {
            self.remove(rook_whence);
            rook.mark_moved();
            self.set(rook_whither, Some(rook));
        }

        let mut piece = m.piece();
        if matches!(piece.role(), Role::King | Role::Rook) {
            piece.mark_moved();
        }

        self.set(m.whither(), Some(piece));
    }
}

/// Prints the piece placement field of FEN.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, row) in self.0.iter().enumerate() {
            if rank > 0 {
                f.write_str("/")?;
            }

            let mut skip = 0;
            for square in row {
                match square {
                    None => skip += 1,
                    Some(p) => {
                        if skip > 0 {
                            write!(f, "{}", skip)?;
                            skip = 0;
                        }

                        write!(f, "{}", p)?;
                    }
                }
            }

            if skip > 0 {
                write!(f, "{}", skip)?;
            }
        }

        Ok(())
    }
}

/// Parses the piece placement field of FEN.
impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks: Vec<_> = s.split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseFenError::InvalidPlacement);
        }

        let mut board = Board::empty();
        for (rank, segment) in (0..).zip(ranks) {
            let mut file = 0;
            for c in segment.chars() {
                if file >= 8 {
                    return Err(ParseFenError::InvalidPlacement);
                } else if let Some(skip @ 1..=8) = c.to_digit(10) {
                    file += skip as i8;
                } else if let Ok(p) = Piece::try_from(c) {
                    board.set(Square::new(rank, file), Some(p));
                    file += 1;
                } else {
                    return Err(ParseFenError::InvalidPlacement);
                }
            }

            if file != 8 {
                return Err(ParseFenError::InvalidPlacement);
            }
        }

        Ok(board)
    }
}

// We provide a custom implementation of Arbitrary rather than deriving,
// otherwise proptest overflows the stack generating large arrays.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, prelude::*};

        vec(any::<Option<Piece>>(), 64)
            .prop_map(|v| {
                let mut board = Board::empty();
                for (sq, p) in Square::iter().zip(v) {
                    board.set(sq, p);
                }

                board
            })
            .boxed()
    }
}
