use crate::chess::{Board, Color, Context, Role, Square, ADJACENT};
use arrayvec::ArrayVec;

/// The squares a single piece attacks.
pub type Attacks = ArrayVec<Square, 32>;

impl Board {
    /// The squares attacked by the piece on a [`Square`].
    ///
    /// Pawns attack both forward diagonals whether or not they are occupied,
    /// and kings attack their neighbours but never castle.
    /// Every other piece attacks exactly the destinations of its pseudo-legal moves.
    pub fn attacks(&self, whence: Square) -> Attacks {
        let Some(piece) = self.get(whence) else {
            return Attacks::new();
        };

        match piece.role() {
            Role::Pawn => [-1, 1]
                .into_iter()
                .map(|df| whence.offset(piece.color().forward(), df))
                .filter(|&sq| self.valid_position(sq))
                .collect(),

            Role::King => ADJACENT
                .into_iter()
                .map(|(dr, df)| whence.offset(dr, df))
                .filter(|&sq| self.valid_position(sq))
                .collect(),

            _ => self
                .pseudo_legal_moves(whence, Context::default())
                .iter()
                .map(|m| m.whither())
                .collect(),
        }
    }

    /// Whether the opponent of `side` attacks the [`Square`].
    pub fn is_square_attacked(&self, side: Color, sq: Square) -> bool {
        self.by_color(!side)
            .any(|(whence, _)| self.attacks(whence).contains(&sq))
    }

    /// Whether the king of `side` is attacked by the opponent.
    ///
    /// A side with no king on the board is never in check.
    pub fn is_in_check(&self, side: Color) -> bool {
        self.king(side)
            .is_some_and(|sq| self.is_square_attacked(side, sq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Fen, Piece};
    use std::collections::HashSet;
    use test_strategy::proptest;

    fn board(fen: &str) -> Board {
        fen.parse::<Fen>().unwrap().board
    }

    #[proptest]
    fn attacks_lie_on_the_board(b: Board, sq: Square) {
        for a in b.attacks(sq) {
            assert!(b.valid_position(a));
        }
    }

    #[proptest]
    fn empty_squares_attack_nothing(#[by_ref] b: Board, #[filter(#b.get(#sq).is_none())] sq: Square) {
        assert!(b.attacks(sq).is_empty());
    }

    #[proptest]
    fn pieces_attack_every_square_they_can_capture_on(b: Board, sq: Square) {
        let attacks = b.attacks(sq);
        for m in b.pseudo_legal_moves(sq, Context::default()) {
            if m.is_capture() {
                assert!(attacks.contains(&m.whither()));
            }
        }
    }

    #[proptest]
    fn checking_is_pure(b: Board, c: Color) {
        let before = b.clone();
        b.is_in_check(c);
        assert_eq!(b, before);
    }

    #[proptest]
    fn side_without_a_king_is_never_in_check(mut b: Board, c: Color) {
        while let Some(sq) = b.king(c) {
            b.remove(sq);
        }

        assert!(!b.is_in_check(c));
    }

    #[test]
    fn pawns_attack_empty_diagonals() {
        let b = board("8/8/8/8/4P3/8/8/8 w - - 0 1");
        let attacks: HashSet<_> = b.attacks(Square::new(4, 4)).into_iter().collect();
        assert_eq!(attacks, [Square::new(3, 3), Square::new(3, 5)].into());
    }

    #[test]
    fn pawns_on_the_edge_attack_a_single_square() {
        let b = board("8/p7/8/8/8/8/8/8 b - - 0 1");
        assert_eq!(b.attacks(Square::new(1, 0)).as_slice(), [Square::new(2, 1)]);
    }

    #[test]
    fn nobody_is_in_check_in_the_starting_position() {
        let b = Board::default();
        assert!(!b.is_in_check(Color::White));
        assert!(!b.is_in_check(Color::Black));
    }

    #[test]
    fn sliding_pieces_give_check_along_open_lines() {
        let b = board("4k3/8/8/8/8/8/8/3R2K1 b - - 0 1");
        assert!(!b.is_in_check(Color::Black));

        let b = board("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
        assert!(b.is_in_check(Color::Black));
        assert!(!b.is_in_check(Color::White));
    }

    #[test]
    fn blocked_lines_give_no_check() {
        let b = board("4k3/4p3/8/8/8/8/8/4R1K1 b - - 0 1");
        assert!(!b.is_in_check(Color::Black));
    }

    #[test]
    fn knights_give_check_over_other_pieces() {
        let b = board("4k3/3ppp2/5N2/8/8/8/8/6K1 b - - 0 1");
        assert!(b.is_in_check(Color::Black));
    }

    #[test]
    fn pawns_give_check_diagonally() {
        let b = board("8/8/8/3k4/4P3/8/8/6K1 b - - 0 1");
        assert!(b.is_in_check(Color::Black));

        let b = board("8/8/8/4k3/4P3/8/8/6K1 b - - 0 1");
        assert!(!b.is_in_check(Color::Black));
    }

    #[test]
    fn squares_next_to_a_king_are_attacked() {
        let b = board("8/8/8/3k4/8/8/8/6K1 w - - 0 1");
        assert!(b.is_square_attacked(Color::White, Square::new(4, 4)));
        assert!(!b.is_square_attacked(Color::White, Square::new(5, 5)));
        assert!(!b.is_square_attacked(Color::Black, Square::new(4, 4)));
    }

    #[test]
    fn protected_pieces_are_not_attacked_by_their_own_side() {
        let mut b = board("8/8/8/8/8/8/8/R3K3 w - - 0 1");
        b.set(Square::new(7, 2), Some(Piece::new(Role::Knight, Color::White)));
        assert!(!b.is_square_attacked(Color::Black, Square::new(7, 2)));
        assert!(b.is_square_attacked(Color::Black, Square::new(7, 1)));
    }
}
