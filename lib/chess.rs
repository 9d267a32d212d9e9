mod attacks;
mod board;
mod castles;
mod color;
mod fen;
mod game;
mod history;
mod legality;
mod r#move;
mod movegen;
mod outcome;
mod piece;
mod role;
mod square;

pub use attacks::*;
pub use board::*;
pub use castles::*;
pub use color::*;
pub use fen::*;
pub use game::*;
pub use history::*;
pub use movegen::*;
pub use outcome::*;
pub use piece::*;
pub use r#move::*;
pub use role::*;
pub use square::*;
