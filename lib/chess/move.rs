use crate::chess::{Color, Piece, Square};
use bitflags::bitflags;
use derive_more::Display;

bitflags! {
    /// Characteristics of a [`Move`].
    #[derive(Default)]
    pub struct MoveKind: u8 {
        const ANY =         0b00000001;
        const CASTLE =      0b00000010;
        const CAPTURE =     0b00000100;
        const EN_PASSANT =  0b00001000;
    }
}

/// A chess move, carrying the [`Piece`]s involved as they were before the move.
///
/// Moves are printed in pure coordinate notation, e.g. `e2e4`.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Move {
    /// A move onto an empty square.
    #[display(fmt = "{}{}", whence, whither)]
    Normal {
        whence: Square,
        whither: Square,
        piece: Piece,
    },

    /// A move onto a square occupied by an opponent's piece, which is captured.
    #[display(fmt = "{}{}", whence, whither)]
    Capture {
        whence: Square,
        whither: Square,
        piece: Piece,
    },

    /// A pawn capture where the captured pawn stands beside the origin, not on the destination.
    #[display(fmt = "{}{}", whence, whither)]
    EnPassant {
        whence: Square,
        whither: Square,
        piece: Piece,
        captured: Square,
    },

    /// The king moves two squares towards a rook, which jumps over to the square the king crossed.
    #[display(fmt = "{}{}", whence, whither)]
    Castle {
        whence: Square,
        whither: Square,
        king: Piece,
        rook_whence: Square,
        rook_whither: Square,
        rook: Piece,
    },
}

impl Move {
    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        match *self {
            Move::Normal { whence, .. }
            | Move::Capture { whence, .. }
            | Move::EnPassant { whence, .. }
            | Move::Castle { whence, .. } => whence,
        }
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        match *self {
            Move::Normal { whither, .. }
            | Move::Capture { whither, .. }
            | Move::EnPassant { whither, .. }
            | Move::Castle { whither, .. } => whither,
        }
    }

    /// The [`Piece`] being moved, which is the king when castling.
    pub fn piece(&self) -> Piece {
        match *self {
            Move::Normal { piece, .. }
            | Move::Capture { piece, .. }
            | Move::EnPassant { piece, .. }
            | Move::Castle { king: piece, .. } => piece,
        }
    }

    /// The side making this move.
    pub fn turn(&self) -> Color {
        self.piece().color()
    }

    /// The [`Square`] of the piece captured, if any.
    pub fn captured_at(&self) -> Option<Square> {
        match *self {
            Move::Capture { whither, .. } => Some(whither),
            Move::EnPassant { captured, .. } => Some(captured),
            Move::Normal { .. } | Move::Castle { .. } => None,
        }
    }

    /// Whether this move captures a piece.
    pub fn is_capture(&self) -> bool {
        self.captured_at().is_some()
    }

    /// Whether this is an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    /// Whether this is a castling move.
    pub fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    /// The [`MoveKind`] of this move.
    pub fn kind(&self) -> MoveKind {
        let mut kind = MoveKind::ANY;

        if self.is_castle() {
            kind |= MoveKind::CASTLE;
        }

        if self.is_capture() {
            kind |= MoveKind::CAPTURE;
        }

        if self.is_en_passant() {
            kind |= MoveKind::EN_PASSANT;
        }

        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Role;
    use test_strategy::proptest;

    #[proptest]
    fn move_is_printed_in_pure_coordinate_notation(whence: Square, whither: Square, p: Piece) {
        let m = Move::Normal {
            whence,
            whither,
            piece: p,
        };

        assert_eq!(m.to_string(), format!("{}{}", whence, whither));
    }

    #[proptest]
    fn turn_is_the_color_of_the_piece_moved(whence: Square, whither: Square, p: Piece) {
        let m = Move::Capture {
            whence,
            whither,
            piece: p,
        };

        assert_eq!(m.turn(), p.color());
    }

    #[proptest]
    fn capture_takes_the_piece_on_the_destination(whence: Square, whither: Square, p: Piece) {
        let m = Move::Capture {
            whence,
            whither,
            piece: p,
        };

        assert_eq!(m.captured_at(), Some(whither));
        assert_eq!(m.kind(), MoveKind::ANY | MoveKind::CAPTURE);
    }

    #[test]
    fn en_passant_takes_the_pawn_beside_the_origin() {
        let m = Move::EnPassant {
            whence: Square::new(3, 1),
            whither: Square::new(2, 2),
            piece: Piece::new(Role::Pawn, Color::White),
            captured: Square::new(3, 2),
        };

        assert_eq!(m.captured_at(), Some(Square::new(3, 2)));
        assert_ne!(m.captured_at(), Some(m.whither()));
        assert!(m.kind().contains(MoveKind::CAPTURE | MoveKind::EN_PASSANT));
    }

    #[test]
    fn castle_moves_the_king_and_captures_nothing() {
        let king = Piece::new(Role::King, Color::Black);
        let m = Move::Castle {
            whence: Square::new(0, 4),
            whither: Square::new(0, 6),
            king,
            rook_whence: Square::new(0, 7),
            rook_whither: Square::new(0, 5),
            rook: Piece::new(Role::Rook, Color::Black),
        };

        assert_eq!(m.piece(), king);
        assert_eq!(m.turn(), Color::Black);
        assert_eq!(m.captured_at(), None);
        assert_eq!(m.kind(), MoveKind::ANY | MoveKind::CASTLE);
        assert_eq!(m.to_string(), "e8g8");
    }
}
