use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Game, MoveKind, Square};
use tracing::{info, instrument};

/// Lists the legal moves in a position.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The position in FEN notation.
    game: Game,

    /// Only list the moves of the piece on this square, regardless of whose turn it is.
    square: Option<Square>,
}

impl Moves {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let moves: Vec<_> = match self.square {
            Some(sq) => self.game.moves(sq).into_iter().collect(),
            None => self.game.legal_moves(MoveKind::ANY).collect(),
        };

        for m in &moves {
            println!("{}", m);
        }

        info!(count = moves.len(), turn = %self.game.turn());

        Ok(())
    }
}
