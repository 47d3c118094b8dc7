//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal destinations per piece, applies each candidate to
//! an owned copy of the position, and discards the ones that leave the
//! mover's own king attacked.

use crate::game_state::chess_types::{Color, Position, Square};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::piece_targets::{piece_targets, TargetMode};

/// Destinations allowed by the piece's movement rules alone. Empty when the
/// square is empty.
pub fn pseudo_legal_moves(position: &Position, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    if let Some(piece) = position.board.get(from) {
        piece_targets(
            &position.board,
            from,
            piece,
            TargetMode::moves_in(position),
            &mut out,
        );
    }
    out
}

/// Pseudo-legal destinations that keep the mover's king out of check.
pub fn legal_moves(position: &Position, from: Square) -> Vec<Square> {
    let Some(piece) = position.board.get(from) else {
        return Vec::new();
    };

    let mut moves = pseudo_legal_moves(position, from);
    moves.retain(|&to| !leaves_king_in_check(position, from, to, piece.color));
    moves
}

/// Simulates the move on a scratch copy; the live position is never touched.
/// `apply_move` only fails for an empty origin, which `legal_moves` has
/// already ruled out; a failure still counts as unplayable.
fn leaves_king_in_check(position: &Position, from: Square, to: Square, color: Color) -> bool {
    let mut scratch = *position;
    apply_move(&mut scratch, from, to)
        .map_or(true, |_| is_king_in_check(&scratch.board, color))
}

/// Every legal `(from, to)` pair for `color`, in row-major order of origin.
pub fn legal_moves_for_color(position: &Position, color: Color) -> Vec<(Square, Square)> {
    position
        .board
        .pieces_of(color)
        .flat_map(|(from, _)| {
            legal_moves(position, from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Short-circuits on the first piece with a legal move.
pub fn has_any_legal_move(position: &Position, color: Color) -> bool {
    position
        .board
        .pieces_of(color)
        .any(|(from, _)| !legal_moves(position, from).is_empty())
}
