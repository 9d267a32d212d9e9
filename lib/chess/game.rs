use crate::chess::{Board, Castles, Color, Context, Draw, Fen, History, Move, MoveKind};
use crate::chess::{Moves, Outcome, ParseFenError, Piece, Role, Square};
use derive_more::{DebugCustom, Display, Error};
use std::str::FromStr;
use tracing::{instrument, warn};

/// Represents a request to move between two squares that no legal move connects.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "there is no legal move from `{whence}` to `{whither}`")]
pub struct IllegalMove {
    pub whence: Square,
    pub whither: Square,
}

/// The state of a game of chess.
///
/// A game owns the authoritative [`Board`] and keeps track of whose turn it is,
/// the move clocks and every [`Move`] played so far.
#[derive(DebugCustom, Display, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Game(\"{}\")", self)]
#[display(fmt = "{}", "Fen::from(self)")]
pub struct Game {
    board: Board,
    turn: Color,
    halfmoves: u32,
    fullmoves: u32,
    history: History,
    checks: [bool; 2],
}

impl Default for Game {
    fn default() -> Self {
        Fen::default().into()
    }
}

impl Game {
    /// The piece placement.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The number of halfmoves since the last capture or pawn move.
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// The current move number, incremented after every black move.
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    /// The moves played so far.
    ///
    /// A game loaded from FEN with an en passant square starts with the
    /// double pawn push that must have preceded it.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether the king of `side` is in [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self, side: Color) -> bool {
        self.checks[side as usize]
    }

    /// Whether the side to move is [checkmated].
    ///
    /// [checkmated]: https://www.chessprogramming.org/Checkmate
    pub fn is_checkmate(&self) -> bool {
        self.is_check(self.turn) && self.legal_moves(MoveKind::ANY).next().is_none()
    }

    /// Whether the side to move is [stalemated].
    ///
    /// [stalemated]: https://www.chessprogramming.org/Stalemate
    pub fn is_stalemate(&self) -> bool {
        !self.is_check(self.turn) && self.legal_moves(MoveKind::ANY).next().is_none()
    }

    /// Whether the game is a draw by the [fifty-move rule].
    ///
    /// [fifty-move rule]: https://en.wikipedia.org/wiki/Fifty-move_rule
    pub fn is_draw_by_fifty_move_rule(&self) -> bool {
        self.halfmoves >= 50
    }

    /// Whether the game is a draw by [threefold repetition].
    ///
    /// Repetitions are not tracked, so this never holds.
    ///
    /// [threefold repetition]: https://en.wikipedia.org/wiki/Threefold_repetition
    pub fn is_draw_by_threefold_repetition(&self) -> bool {
        false
    }

    /// Whether neither side has enough material left to checkmate.
    ///
    /// That is the case if only the kings are left,
    /// or if a single bishop or knight is left besides them.
    pub fn is_material_insufficient(&self) -> bool {
        let mut others = self
            .board
            .iter()
            .filter(|(_, p)| p.role() != Role::King)
            .map(|(_, p)| p.role());

        match (others.next(), others.next()) {
            (None, _) => true,
            (Some(r), None) => r.is_minor(),
            _ => false,
        }
    }

    /// The [`Outcome`] of the game, if it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_checkmate() {
            Some(Outcome::Checkmate(self.turn))
        } else if self.is_stalemate() {
            Some(Outcome::Stalemate)
        } else if self.is_material_insufficient() {
            Some(Outcome::Draw(Draw::InsufficientMaterial))
        } else if self.is_draw_by_fifty_move_rule() {
            Some(Outcome::Draw(Draw::FiftyMoveRule))
        } else if self.is_draw_by_threefold_repetition() {
            Some(Outcome::Draw(Draw::ThreefoldRepetition))
        } else {
            None
        }
    }

    /// The legal moves of the piece on a [`Square`], regardless of whose turn it is.
    pub fn moves(&self, whence: Square) -> Moves {
        match self.board.get(whence) {
            None => Moves::new(),
            Some(p) => {
                let ctx = Context::new(self.history.last(), self.is_check(p.color()));
                self.board.legal_moves(whence, ctx)
            }
        }
    }

    /// An iterator over the legal moves of the side to move that match the [`MoveKind`].
    pub fn legal_moves(&self, kind: MoveKind) -> impl Iterator<Item = Move> + '_ {
        self.board
            .by_color(self.turn)
            .flat_map(move |(whence, _)| self.moves(whence))
            .filter(move |m| kind.intersects(m.kind()))
    }

    /// Plays a [`Move`] without checking whether it's legal.
    #[instrument(level = "trace", skip(self))]
    pub fn play(&mut self, m: Move) {
        self.board.play(&m);

        if m.is_capture() || m.piece().role() == Role::Pawn {
            self.halfmoves = 0;
        } else {
            self.halfmoves = self.halfmoves.saturating_add(1);
        }

        if m.turn() == Color::Black {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }

        self.turn = !m.turn();
        self.history.push(m);
        self.update_checks();
    }

    /// Plays the legal move of the side to move that connects two squares.
    #[instrument(level = "debug", skip(self), err)]
    pub fn make(&mut self, whence: Square, whither: Square) -> Result<Move, IllegalMove> {
        let m = match self.board.get(whence) {
            Some(p) if p.color() == self.turn => self
                .moves(whence)
                .into_iter()
                .find(|m| m.whither() == whither),
            _ => None,
        };

        let m = m.ok_or(IllegalMove { whence, whither })?;
        self.play(m);
        Ok(m)
    }

    /// Counts the leaf nodes of the tree of legal moves `depth` plies deep.
    ///
    /// See [perft](https://www.chessprogramming.org/Perft).
    pub fn perft(&self, depth: usize) -> usize {
        match depth {
            0 => 1,
            1 => self.legal_moves(MoveKind::ANY).count(),
            _ => self
                .legal_moves(MoveKind::ANY)
                .map(|m| {
                    let mut next = self.clone();
                    next.play(m);
                    next.perft(depth - 1)
                })
                .sum(),
        }
    }

    fn update_checks(&mut self) {
        for side in Color::iter() {
            self.checks[side as usize] = self.board.is_in_check(side);
        }
    }
}

impl From<Fen> for Game {
    fn from(fen: Fen) -> Self {
        let Fen {
            mut board,
            turn,
            castles,
            en_passant,
            halfmoves,
            fullmoves,
        } = fen;

        for side in Color::iter() {
            let short = castles.contains(Castles::short(side));
            let long = castles.contains(Castles::long(side));

            for (file, right) in [(7, short), (0, long)] {
                let sq = Square::new(side.home(), file);
                if let Some(mut rook) = board.get(sq).filter(|p| !right && p.is(Role::Rook, side)) {
                    rook.mark_moved();
                    board.set(sq, Some(rook));
                }
            }

            if let Some(sq) = board.king(side).filter(|_| !short && !long) {
                if let Some(mut king) = board.get(sq) {
                    king.mark_moved();
                    board.set(sq, Some(king));
                }
            }
        }

        let mut history = History::default();
        if let Some(ep) = en_passant {
            let side = !turn;
            let pawn = Piece::new(Role::Pawn, side);
            let whence = ep.offset(-side.forward(), 0);
            let whither = ep.offset(side.forward(), 0);

            if board.get(whither) == Some(pawn)
                && board.valid_position(whence)
                && board.get(whence).is_none()
                && board.get(ep).is_none()
            {
                history.push(Move::Normal {
                    whence,
                    whither,
                    piece: pawn,
                });
            } else {
                warn!(%ep, "ignoring en passant square with no pawn pushed past it");
            }
        }

        let mut game = Game {
            board,
            turn,
            halfmoves,
            fullmoves,
            history,
            checks: [false; 2],
        };

        game.update_checks();
        game
    }
}

impl From<&Game> for Fen {
    fn from(game: &Game) -> Self {
        let mut board = Board::empty();
        let mut castles = Castles::empty();

        for (sq, p) in game.board.iter() {
            board.set(sq, Some(Piece::new(p.role(), p.color())));
        }

        for side in Color::iter() {
            let king = Square::new(side.home(), 4);
            if !game.board.get(king).is_some_and(|p| p.is(Role::King, side) && !p.has_moved()) {
                continue;
            }

            for file in [0, 7] {
                let sq = Square::new(side.home(), file);
                if game.board.get(sq).is_some_and(|p| p.is(Role::Rook, side) && !p.has_moved()) {
                    castles |= Castles::of_rook(side, file).unwrap_or_default();
                }
            }
        }

        let en_passant = match game.history.last() {
            Some(&Move::Normal {
                whence,
                whither,
                piece,
            }) if piece.role() == Role::Pawn && (whence.rank() - whither.rank()).abs() == 2 => {
                Some(Square::new((whence.rank() + whither.rank()) / 2, whence.file()))
            }

            _ => None,
        };

        Fen {
            board,
            turn: game.turn,
            castles,
            en_passant,
            halfmoves: game.halfmoves,
            fullmoves: game.fullmoves,
        }
    }
}

impl FromStr for Game {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Fen>()?.into())
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Game {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Game>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{prelude::*, sample::Selector};

        (0..48usize, any::<Selector>())
            .prop_map(|(plies, selector)| {
                let mut game = Game::default();

                for _ in 0..plies {
                    match selector.try_select(game.legal_moves(MoveKind::ANY)) {
                        None => break,
                        Some(m) => game.play(m),
                    }
                }

                game
            })
            .boxed()
    }
}
