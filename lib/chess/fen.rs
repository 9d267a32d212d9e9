use crate::chess::{Board, Castles, Color, Square};
use derive_more::{DebugCustom, Display, Error};
use std::{fmt, str::FromStr};

/// A representation of the [Forsyth–Edwards Notation].
///
/// [Forsyth–Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
#[derive(DebugCustom, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "Fen(\"{}\")", self)]
pub struct Fen {
    /// The piece placement.
    pub board: Board,
    /// The side to move.
    pub turn: Color,
    /// The castling rights.
    #[cfg_attr(
        test,
        strategy(proptest::strategy::Strategy::prop_map(
            proptest::prelude::any::<u8>(),
            Castles::from_bits_truncate
        ))
    )]
    pub castles: Castles,
    /// The square behind a pawn that has just advanced two squares, if any.
    pub en_passant: Option<Square>,
    /// The number of halfmoves since the last capture or pawn move.
    pub halfmoves: u32,
    /// The move number, incremented after every black move.
    pub fullmoves: u32,
}

impl Default for Fen {
    fn default() -> Self {
        Fen {
            board: Board::default(),
            turn: Color::White,
            castles: Castles::all(),
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.board)?;

        match self.turn {
            Color::White => f.write_str("w ")?,
            Color::Black => f.write_str("b ")?,
        }

        write!(f, "{} ", self.castles)?;

        match self.en_passant {
            Some(ep) => write!(f, "{} ", ep)?,
            None => f.write_str("- ")?,
        }

        write!(f, "{} {}", self.halfmoves, self.fullmoves)
    }
}

/// The reason why the string is not valid FEN.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[display(fmt = "failed to parse piece placement")]
    InvalidPlacement,
    #[display(fmt = "failed to parse side to move")]
    InvalidSideToMove,
    #[display(fmt = "failed to parse castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "failed to parse en passant square")]
    InvalidEnPassantSquare,
    #[display(fmt = "failed to parse halfmove clock")]
    InvalidHalfmoveClock,
    #[display(fmt = "failed to parse fullmove number")]
    InvalidFullmoveNumber,
    #[display(fmt = "expected exactly six fields separated by spaces")]
    InvalidSyntax,
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split(' ').collect();
        let &[board, turn, castles, en_passant, halfmoves, fullmoves] = &fields[..] else {
            return Err(ParseFenError::InvalidSyntax);
        };

        let en_passant = match en_passant {
            "-" => None,
            ep => match ep.parse() {
                Err(_) => return Err(ParseFenError::InvalidEnPassantSquare),
                Ok(sq) => Some(sq),
            },
        };

        Ok(Fen {
            board: board.parse()?,
            turn: turn.parse().map_err(|_| ParseFenError::InvalidSideToMove)?,
            castles: castles
                .parse()
                .map_err(|_| ParseFenError::InvalidCastlingRights)?,
            en_passant,
            halfmoves: halfmoves
                .parse()
                .map_err(|_| ParseFenError::InvalidHalfmoveClock)?,
            fullmoves: fullmoves
                .parse()
                .map_err(|_| ParseFenError::InvalidFullmoveNumber)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_fen_is_an_identity(fen: Fen) {
        assert_eq!(fen.to_string().parse(), Ok(fen));
    }

    #[test]
    fn default_fen_is_the_starting_position() {
        assert_eq!(
            Fen::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn parsing_fen_reads_every_field() {
        let fen: Fen = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w Kq c6 0 2"
            .parse()
            .unwrap();

        assert_eq!(fen.turn, Color::White);
        assert_eq!(fen.castles, Castles::WHITE_SHORT | Castles::BLACK_LONG);
        assert_eq!(fen.en_passant, Some(Square::new(2, 2)));
        assert_eq!(fen.halfmoves, 0);
        assert_eq!(fen.fullmoves, 2);
    }

    #[proptest]
    fn parsing_fen_fails_if_not_six_fields(
        #[by_ref] fen: Fen,
        #[filter(#n != 6)]
        #[strategy(0usize..12)]
        n: usize,
    ) {
        let s = fen.to_string();
        let s: Vec<_> = s.split(' ').cycle().take(n).collect();
        assert_eq!(s.join(" ").parse::<Fen>(), Err(ParseFenError::InvalidSyntax));
    }

    #[test]
    fn parsing_fen_reports_the_field_that_failed() {
        use ParseFenError::*;

        for (s, e) in [
            ("8/8/8/8/8/8/8/7x w - - 0 1", InvalidPlacement),
            ("8/8/8/8/8/8/8 w - - 0 1", InvalidPlacement),
            ("8/8/8/8/8/8/8/8 x - - 0 1", InvalidSideToMove),
            ("8/8/8/8/8/8/8/8 w KX - 0 1", InvalidCastlingRights),
            ("8/8/8/8/8/8/8/8 w - z9 0 1", InvalidEnPassantSquare),
            ("8/8/8/8/8/8/8/8 w - - x 1", InvalidHalfmoveClock),
            ("8/8/8/8/8/8/8/8 w - - 0 -1", InvalidFullmoveNumber),
        ] {
            assert_eq!(s.parse::<Fen>(), Err(e), "{}", s);
        }
    }

    #[proptest]
    fn parsing_fen_fails_for_invalid_string(
        #[by_ref] fen: Fen,
        #[strategy(..=#fen.to_string().len())] n: usize,
        #[strategy("[^[:ascii:]]+")] r: String,
    ) {
        let s = fen.to_string();
        assert!([&s[..n], &r, &s[n..]].concat().parse::<Fen>().is_err());
    }
}
