use crate::chess::{Board, Context, Move, Moves, Square};

impl Board {
    /// Whether playing the [`Move`] keeps the mover's own king out of check.
    ///
    /// The move is simulated on a copy, so this board is left untouched.
    pub fn is_legal(&self, m: &Move) -> bool {
        let mut scratch = self.clone();
        scratch.play(m);
        !scratch.is_in_check(m.turn())
    }

    /// The legal moves of the piece on a [`Square`].
    pub fn legal_moves(&self, whence: Square, ctx: Context<'_>) -> Moves {
        let mut moves = self.pseudo_legal_moves(whence, ctx);
        moves.retain(|m| self.is_legal(m));
        moves
    }
}
