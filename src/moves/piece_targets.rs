//! One dispatch point per piece kind for both move and attack generation.
//!
//! Sliders and knights attack exactly where they move. Pawns attack their
//! two forward diagonals regardless of occupancy, and kings attack their
//! eight neighbours without castling, so attack generation never recurses
//! back into castling checks.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastlingRights, Piece, PieceKind, Position, Square};
use crate::moves::bishop_moves::bishop_targets;
use crate::moves::king_moves::{castling_targets, king_attacks, king_steps};
use crate::moves::knight_moves::knight_targets;
use crate::moves::pawn_moves::{pawn_attacks, pawn_captures, pawn_pushes};
use crate::moves::queen_moves::queen_targets;
use crate::moves::rook_moves::rook_targets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Pseudo-legal destinations, including castling and en passant.
    Move {
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    },
    /// Squares the piece threatens.
    Attack,
}

impl TargetMode {
    #[inline]
    pub fn moves_in(position: &Position) -> Self {
        TargetMode::Move {
            castling_rights: position.castling_rights,
            en_passant_target: position.en_passant_target,
        }
    }
}

pub fn piece_targets(
    board: &Board,
    from: Square,
    piece: Piece,
    mode: TargetMode,
    out: &mut Vec<Square>,
) {
    let color = piece.color;
    match (piece.kind, mode) {
        (
            PieceKind::Pawn,
            TargetMode::Move {
                en_passant_target, ..
            },
        ) => {
            pawn_pushes(board, from, color, out);
            pawn_captures(board, from, color, en_passant_target, out);
        }
        (PieceKind::Pawn, TargetMode::Attack) => pawn_attacks(from, color, out),
        (PieceKind::Rook, _) => rook_targets(board, from, color, out),
        (PieceKind::Knight, _) => knight_targets(board, from, color, out),
        (PieceKind::Bishop, _) => bishop_targets(board, from, color, out),
        (PieceKind::Queen, _) => queen_targets(board, from, color, out),
        (
            PieceKind::King,
            TargetMode::Move {
                castling_rights, ..
            },
        ) => {
            king_steps(board, from, color, out);
            castling_targets(board, castling_rights, from, color, out);
        }
        (PieceKind::King, TargetMode::Attack) => king_attacks(from, out),
    }
}
