use crate::chess::Move;
use derive_more::{Deref, IntoIterator};

/// The sequence of [`Move`]s played so far, oldest first.
///
/// Moves can only ever be appended; entries never change once recorded.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deref, IntoIterator)]
#[deref(forward)]
#[into_iterator(ref)]
pub struct History(Vec<Move>);

impl History {
    /// Appends a [`Move`] to the end of the history.
    pub(crate) fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Color, Piece, Role, Square};
    use test_strategy::proptest;

    fn pawn_push(file: i8) -> Move {
        Move::Normal {
            whence: Square::new(6, file),
            whither: Square::new(5, file),
            piece: Piece::new(Role::Pawn, Color::White),
        }
    }

    #[test]
    fn history_starts_empty() {
        let history = History::default();
        assert!(history.is_empty());
        assert_eq!(history.last(), None);
    }

    #[proptest]
    fn last_returns_the_most_recent_move(#[strategy(1usize..16)] n: usize) {
        let mut history = History::default();
        for file in 0..n {
            history.push(pawn_push(file as i8 % 8));
        }

        assert_eq!(history.len(), n);
        assert_eq!(history.last(), Some(&pawn_push((n - 1) as i8 % 8)));
    }

    #[test]
    fn history_iterates_in_the_order_moves_were_played() {
        let mut history = History::default();
        history.push(pawn_push(3));
        history.push(pawn_push(4));

        let files: Vec<_> = (&history).into_iter().map(|m| m.whence().file()).collect();
        assert_eq!(files, [3, 4]);
    }
}
