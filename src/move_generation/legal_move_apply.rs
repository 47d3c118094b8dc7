//! Board effects of a single move.
//!
//! `apply_move` is the only routine that relocates pieces. The legality
//! filter runs it on a scratch copy of the position and the game state runs
//! it on the live one, so en passant, castling and rights bookkeeping are
//! identical in both.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{
    castle_rook_target, promotion_row, rook_home, rook_home_side,
};
use crate::game_state::chess_types::{CastleSide, Piece, PieceKind, Position, Square};

/// What happened when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffects {
    pub from: Square,
    pub to: Square,
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub en_passant: bool,
    pub castle: Option<CastleSide>,
    /// The moved pawn now stands on its last row and needs a promotion kind.
    pub reaches_promotion: bool,
}

impl MoveEffects {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Detects the special move kinds from the board before anything changes.
/// A pawn moving diagonally onto the empty en-passant target, beside an
/// enemy pawn, is capturing en passant; a king moving two files is castling.
pub fn classify_move(position: &Position, from: Square, to: Square) -> Option<MoveEffects> {
    let moved = position.board.get(from)?;
    let diagonal = from.col() != to.col();
    let target = position.board.get(to);

    let passed_square = Square::at(from.row(), to.col());
    let en_passant = moved.kind == PieceKind::Pawn
        && diagonal
        && target.is_none()
        && position.en_passant_target == Some(to)
        && position.board.get(passed_square)
            == Some(Piece::new(PieceKind::Pawn, moved.color.opposite()));
    let captured = if en_passant {
        position.board.get(passed_square)
    } else {
        target
    };

    let castle = if moved.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
        Some(if to.col() > from.col() {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        })
    } else {
        None
    };

    Some(MoveEffects {
        from,
        to,
        moved,
        captured,
        en_passant,
        castle,
        reaches_promotion: moved.kind == PieceKind::Pawn && to.row() == promotion_row(moved.color),
    })
}

/// Applies `from -> to` to `position` in place. The caller is responsible
/// for only passing moves drawn from the legal-move set. A promoting pawn is
/// left as a pawn on its last row; the promotion kind is set separately.
pub fn apply_move(position: &mut Position, from: Square, to: Square) -> Result<MoveEffects, ChessErrors> {
    let effects = classify_move(position, from, to).ok_or(ChessErrors::EmptySquare(from))?;
    let color = effects.moved.color;
    let board = &mut position.board;

    if effects.en_passant {
        board.set(Square::at(from.row(), to.col()), None);
    }

    if let Some(side) = effects.castle {
        let rook = board.take(rook_home(color, side));
        board.set(castle_rook_target(color, side), rook);
    }

    board.set(to, Some(effects.moved));
    board.set(from, None);

    position.en_passant_target =
        if effects.moved.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2 {
            Some(Square::at((from.row() + to.row()) / 2, from.col()))
        } else {
            None
        };

    update_castling_rights(position, &effects);

    Ok(effects)
}

fn update_castling_rights(position: &mut Position, effects: &MoveEffects) {
    let rights = &mut position.castling_rights;
    let color = effects.moved.color;

    match effects.moved.kind {
        PieceKind::King => rights.revoke_all(color),
        PieceKind::Rook => {
            if let Some((home_color, side)) = rook_home_side(effects.from) {
                if home_color == color {
                    rights.revoke(color, side);
                }
            }
        }
        _ => {}
    }

    // Capturing on a rook's home square ends that rook's castling right.
    if effects.is_capture() {
        if let Some((home_color, side)) = rook_home_side(effects.to) {
            if home_color != color {
                rights.revoke(home_color, side);
            }
        }
    }
}
