use crate::chess::Color;
use derive_more::Display;

/// The reason why a game was drawn.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Draw {
    #[display(fmt = "insufficient material")]
    InsufficientMaterial,

    #[display(fmt = "the fifty-move rule")]
    FiftyMoveRule,

    /// Reserved, repetitions are not tracked.
    #[display(fmt = "threefold repetition")]
    ThreefoldRepetition,
}

/// One of the possible outcomes of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    /// The side given is checkmated.
    #[display(fmt = "the {_0} player is checkmated")]
    Checkmate(Color),

    #[display(fmt = "stalemate")]
    Stalemate,

    #[display(fmt = "draw by {_0}")]
    Draw(Draw),
}

impl Outcome {
    /// Whether the outcome is a [draw] and neither side has won.
    ///
    /// [draw]: https://www.chessprogramming.org/Draw
    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }

    /// Whether the outcome is a decisive and one of the sides has won.
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Checkmate(_))
    }

    /// The winning side, if the outcome is [decisive](`Self::is_decisive`).
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(!c),
            Outcome::Stalemate | Outcome::Draw(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn outcome_is_either_draw_or_decisive(o: Outcome) {
        assert_ne!(o.is_draw(), o.is_decisive());
    }

    #[proptest]
    fn neither_side_wins_if_draw(#[filter(#o.is_draw())] o: Outcome) {
        assert_eq!(o.winner(), None);
    }

    #[proptest]
    fn one_side_wins_if_decisive(#[filter(#o.is_decisive())] o: Outcome) {
        assert_ne!(o.winner(), None);
    }

    #[proptest]
    fn side_that_is_checkmated_loses(c: Color) {
        assert_eq!(Outcome::Checkmate(c).winner(), Some(!c));
    }

    #[test]
    fn stalemate_is_a_draw() {
        assert!(Outcome::Stalemate.is_draw());
    }

    #[proptest]
    fn draw_reason_is_printed(d: Draw) {
        assert_eq!(Outcome::Draw(d).to_string(), format!("draw by {}", d));
    }
}
