use crate::chess::{Board, Move, Piece, Role, Square};
use arrayvec::ArrayVec;

/// Upper bound on the number of moves any single piece can have.
pub const MAX_PIECE_MOVES: usize = 32;

/// The pseudo-legal moves of a single piece.
pub type Moves = ArrayVec<Move, MAX_PIECE_MOVES>;

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ADJACENT: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// What move generation needs to know beyond the piece placement.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Context<'a> {
    /// The last move played, which pawns consult for en passant.
    pub last: Option<&'a Move>,
    /// Whether the side of the piece is currently in check, which rules out castling.
    pub in_check: bool,
}

impl<'a> Context<'a> {
    /// Constructs a [`Context`].
    pub fn new(last: Option<&'a Move>, in_check: bool) -> Self {
        Context { last, in_check }
    }
}

/// Classifies a move of `piece` from `whence` onto `whither`.
///
/// Returns `None` if the destination is off the board or occupied by a friendly piece.
fn step(board: &Board, piece: Piece, whence: Square, whither: Square) -> Option<Move> {
    if !board.valid_position(whither) {
        return None;
    }

    match board.get(whither) {
        None => Some(Move::Normal {
            whence,
            whither,
            piece,
        }),

        Some(p) if p.color() != piece.color() => Some(Move::Capture {
            whence,
            whither,
            piece,
        }),

        Some(_) => None,
    }
}

impl Board {
    /// The pseudo-legal moves of the piece on a [`Square`].
    ///
    /// Pseudo-legal moves obey how each piece moves, but may leave the mover's own king in check;
    /// see [`Board::legal_moves`] for the moves that don't.
    /// An empty square has no moves.
    pub fn pseudo_legal_moves(&self, whence: Square, ctx: Context<'_>) -> Moves {
        let mut moves = Moves::new();

        let Some(piece) = self.get(whence) else {
            return moves;
        };

        match piece.role() {
            Role::Pawn => self.pawn_moves(piece, whence, ctx.last, &mut moves),
            Role::Knight => self.leaps(piece, whence, &KNIGHT, &mut moves),
            Role::Bishop => self.slides(piece, whence, &DIAGONAL, &mut moves),
            Role::Rook => self.slides(piece, whence, &ORTHOGONAL, &mut moves),
            Role::Queen => {
                self.slides(piece, whence, &ORTHOGONAL, &mut moves);
                self.slides(piece, whence, &DIAGONAL, &mut moves);
            }
            Role::King => {
                self.leaps(piece, whence, &ADJACENT, &mut moves);
                if !ctx.in_check {
                    self.castles(piece, whence, &mut moves);
                }
            }
        }

        moves
    }

    /// Walks each ray until the edge of the board or the first occupied square.
    fn slides(&self, piece: Piece, whence: Square, rays: &[(i8, i8)], moves: &mut Moves) {
        for &(dr, df) in rays {
            let mut whither = whence.offset(dr, df);
            while let Some(m) = step(self, piece, whence, whither) {
                moves.push(m);
                if m.is_capture() {
                    break;
                }

                whither = whither.offset(dr, df);
            }
        }
    }

    /// Jumps directly onto each offset.
    fn leaps(&self, piece: Piece, whence: Square, offsets: &[(i8, i8)], moves: &mut Moves) {
        for &(dr, df) in offsets {
            moves.extend(step(self, piece, whence, whence.offset(dr, df)));
        }
    }

    fn pawn_moves(&self, pawn: Piece, whence: Square, last: Option<&Move>, moves: &mut Moves) {
        let side = pawn.color();
        let forward = side.forward();

        let push = whence.offset(forward, 0);
        if self.valid_position(push) && self.get(push).is_none() {
            moves.push(Move::Normal {
                whence,
                whither: push,
                piece: pawn,
            });

            let double = push.offset(forward, 0);
            let start = side.home() + forward;
            if whence.rank() == start && self.get(double).is_none() {
                moves.push(Move::Normal {
                    whence,
                    whither: double,
                    piece: pawn,
                });
            }
        }

        for df in [-1, 1] {
            let whither = whence.offset(forward, df);
            if self.get(whither).is_some_and(|p| p.color() != side) {
                moves.push(Move::Capture {
                    whence,
                    whither,
                    piece: pawn,
                });
            }
        }

        moves.extend(last.and_then(|m| self.en_passant(pawn, whence, m)));
    }

    /// The en passant capture available to the `pawn` on `whence` after the opponent played `last`.
    fn en_passant(&self, pawn: Piece, whence: Square, last: &Move) -> Option<Move> {
        let Move::Normal {
            whence: origin,
            whither: captured,
            piece: pushed,
        } = *last
        else {
            return None;
        };

        let is_double_push = pushed.is(Role::Pawn, !pawn.color())
            && origin.file() == captured.file()
            && origin.rank() - captured.rank() == 2 * pawn.color().forward();

        let is_beside = captured.rank() == whence.rank() && (captured.file() - whence.file()).abs() == 1;

        let whither = captured.offset(pawn.color().forward(), 0);
        let is_reachable = self.valid_position(whither)
            && self.get(whither).is_none()
            && self.get(captured) == Some(pushed);

        if is_double_push && is_beside && is_reachable {
            Some(Move::EnPassant {
                whence,
                whither,
                piece: pawn,
                captured,
            })
        } else {
            None
        }
    }

    /// Castling on either side, provided the king and rook have never moved,
    /// the squares between them are empty and the king doesn't cross an attacked square.
    ///
    /// Whether the king is currently in check is the caller's concern.
    fn castles(&self, king: Piece, whence: Square, moves: &mut Moves) {
        let side = king.color();
        if king.has_moved() || whence != Square::new(side.home(), 4) {
            return;
        }

        for (file, direction) in [(7, 1), (0, -1)] {
            let rook_whence = Square::new(side.home(), file);
            let Some(rook) = self.get(rook_whence) else {
                continue;
            };

            if !rook.is(Role::Rook, side) || rook.has_moved() {
                continue;
            }

            let (lo, hi) = if file > 4 { (5, file) } else { (file + 1, 4) };
            if (lo..hi).any(|f| self.get(Square::new(side.home(), f)).is_some()) {
                continue;
            }

            let crossed = whence.offset(0, direction);
            let whither = whence.offset(0, 2 * direction);
            if self.is_square_attacked(side, crossed) || self.is_square_attacked(side, whither) {
                continue;
            }

            moves.push(Move::Castle {
                whence,
                whither,
                king,
                rook_whence,
                rook_whither: crossed,
                rook,
            });
        }
    }
}
