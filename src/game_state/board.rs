//! Plain 8x8 mailbox grid.
//!
//! `Board` knows nothing about legality. It is a `Copy` value so simulations
//! can take an independent snapshot with a single assignment.

use crate::game_state::chess_rules::{back_rank_row, pawn_start_row, BACK_RANK};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            let back = back_rank_row(color) as usize;
            let pawns = pawn_start_row(color) as usize;
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                board.cells[back][col] = Some(Piece::new(kind, color));
                board.cells[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row() as usize][square.col() as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Removes and returns whatever stands on `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize].take()
    }

    /// First square (row-major) holding the given piece.
    pub fn find(&self, kind: PieceKind, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(kind, color))
            .map(|(square, _)| square)
    }

    /// Every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.is(kind, color)).count()
    }
}
