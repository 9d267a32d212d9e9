use anyhow::{bail, Context, Error as Anyhow};
use clap::Parser;
use derive_more::{DebugCustom, Display};
use lib::chess::{Fen, Game, Square};
use std::str::FromStr;
use tracing::{info, instrument};

/// A move in pure coordinate notation, e.g. `e2e4`.
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq)]
#[debug(fmt = "Step(\"{}\")", self)]
#[display(fmt = "{}{}", _0, _1)]
struct Step(Square, Square);

impl FromStr for Step {
    type Err = Anyhow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (Some(whence), Some(whither)) = (s.get(..2), s.get(2..)) else {
            bail!("expected a move such as `e2e4`");
        };

        Ok(Step(
            whence.parse().context("invalid source square")?,
            whither.parse().context("invalid destination square")?,
        ))
    }
}

/// Plays a sequence of moves from a position.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The initial position in FEN notation.
    game: Game,

    /// The moves to play, in pure coordinate notation.
    steps: Vec<Step>,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut game = self.game;

        for (ply, Step(whence, whither)) in self.steps.into_iter().enumerate() {
            let m = game
                .make(whence, whither)
                .with_context(|| format!("failed to play move #{}", ply + 1))?;

            info!(%m, turn = %game.turn());

            if let Some(o) = game.outcome() {
                info!(outcome = %o);
                break;
            }
        }

        println!("{}", Fen::from(&game));

        if let Some(o) = game.outcome() {
            println!("{}", o);
        }

        Ok(())
    }
}
