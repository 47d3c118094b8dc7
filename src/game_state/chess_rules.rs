//! Canonical chess-rule constants.
//!
//! Starting setup, rank numbers and the fixed home squares that castling
//! rules are expressed against.

use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank layout from file a to file h.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Pieces a pawn may become, in the order a chooser would offer them.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

pub const KING_HOME_COL: u8 = 4;

#[inline]
pub const fn back_rank_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row on which a pawn of `color` promotes.
#[inline]
pub const fn promotion_row(color: Color) -> u8 {
    back_rank_row(color.opposite())
}

#[inline]
pub const fn king_home(color: Color) -> Square {
    Square::at(back_rank_row(color), KING_HOME_COL)
}

#[inline]
pub const fn rook_home(color: Color, side: CastleSide) -> Square {
    let col = match side {
        CastleSide::Kingside => 7,
        CastleSide::Queenside => 0,
    };
    Square::at(back_rank_row(color), col)
}

/// Where the king lands when castling.
#[inline]
pub const fn castle_king_target(color: Color, side: CastleSide) -> Square {
    let col = match side {
        CastleSide::Kingside => 6,
        CastleSide::Queenside => 2,
    };
    Square::at(back_rank_row(color), col)
}

/// Where the rook lands when castling (the square the king crossed).
#[inline]
pub const fn castle_rook_target(color: Color, side: CastleSide) -> Square {
    let col = match side {
        CastleSide::Kingside => 5,
        CastleSide::Queenside => 3,
    };
    Square::at(back_rank_row(color), col)
}

/// The castling side whose rook starts on `square`, if any.
#[inline]
pub fn rook_home_side(square: Square) -> Option<(Color, CastleSide)> {
    [Color::White, Color::Black]
        .into_iter()
        .flat_map(|color| {
            [CastleSide::Kingside, CastleSide::Queenside]
                .into_iter()
                .map(move |side| (color, side))
        })
        .find(|&(color, side)| rook_home(color, side) == square)
}
