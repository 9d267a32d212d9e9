use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Game, MoveKind};
use std::time::Instant;
use tracing::{info, instrument};

/// Counts the leaf nodes of the tree of legal moves.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// Print the node count below each legal move of the root position.
    #[clap(short, long)]
    divide: bool,

    /// The position in FEN notation.
    game: Game,

    /// How many plies deep to search.
    depth: usize,
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let timer = Instant::now();

        let nodes = if self.divide && self.depth > 0 {
            let mut total = 0;
            for m in self.game.legal_moves(MoveKind::ANY) {
                let mut next = self.game.clone();
                next.play(m);
                let nodes = next.perft(self.depth - 1);
                println!("{}: {}", m, nodes);
                total += nodes;
            }

            total
        } else {
            self.game.perft(self.depth)
        };

        println!("{}", nodes);
        info!(depth = self.depth, nodes, elapsed = ?timer.elapsed());

        Ok(())
    }
}
