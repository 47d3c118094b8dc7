//! Short algebraic notation for completed moves.
//!
//! Notation is derived from the position *before* the move is made. Check and
//! mate suffixes depend on the position after the move and are appended by
//! the game state, not here. Moves are never disambiguated by origin square
//! apart from the file of a capturing pawn.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{CastleSide, PieceKind, Position, Square};
use crate::move_generation::legal_move_apply::classify_move;

/// Notation for `from -> to` without promotion or check suffixes, e.g.
/// `e4`, `Nf3`, `exd6`, `Qxh7`, `O-O-O`.
pub fn move_to_short_algebraic(
    position: &Position,
    from: Square,
    to: Square,
) -> Result<String, ChessErrors> {
    let effects = classify_move(position, from, to).ok_or(ChessErrors::EmptySquare(from))?;

    if let Some(side) = effects.castle {
        return Ok(castle_notation(side).to_owned());
    }

    let mut out = String::with_capacity(6);
    if let Some(letter) = effects.moved.kind.letter() {
        out.push(letter);
    }
    if effects.is_capture() {
        if effects.moved.kind == PieceKind::Pawn {
            out.push(from.file_char());
        }
        out.push('x');
    }
    out.push(to.file_char());
    out.push(to.rank_char());

    Ok(out)
}

#[inline]
pub fn castle_notation(side: CastleSide) -> &'static str {
    match side {
        CastleSide::Kingside => "O-O",
        CastleSide::Queenside => "O-O-O",
    }
}

/// `=Q`, `=N`, ... for a promotion choice.
#[inline]
pub fn promotion_suffix(kind: PieceKind) -> String {
    kind.letter().map(|letter| format!("={letter}")).unwrap_or_default()
}
