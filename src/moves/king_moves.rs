use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    castle_king_target, castle_rook_target, king_home, rook_home,
};
use crate::game_state::chess_types::{CastleSide, CastlingRights, Color, Piece, PieceKind, Square};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::knight_moves::step_targets;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
pub fn king_steps(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    step_targets(board, from, color, &KING_OFFSETS, out);
}

/// All adjacent squares. Castling never attacks anything.
pub fn king_attacks(from: Square, out: &mut Vec<Square>) {
    out.extend(
        KING_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col)),
    );
}

/// Two-square king moves toward each rook that may still castle.
pub fn castling_targets(
    board: &Board,
    castling_rights: CastlingRights,
    from: Square,
    color: Color,
    out: &mut Vec<Square>,
) {
    if from != king_home(color) {
        return;
    }
    let enemy = color.opposite();

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !castling_rights.has(color, side) {
            continue;
        }

        let rook_square = rook_home(color, side);
        if board.get(rook_square) != Some(Piece::new(PieceKind::Rook, color)) {
            continue;
        }

        let (low, high) = if rook_square.col() < from.col() {
            (rook_square.col() + 1, from.col())
        } else {
            (from.col() + 1, rook_square.col())
        };
        let path_clear = (low..high).all(|col| board.is_empty(Square::at(from.row(), col)));
        if !path_clear {
            continue;
        }

        // The king may not start on, cross, or land on an attacked square.
        let target = castle_king_target(color, side);
        let crossed = castle_rook_target(color, side);
        let path_safe = [from, crossed, target]
            .into_iter()
            .all(|square| !is_square_attacked(board, square, enemy));
        if path_safe {
            out.push(target);
        }
    }
}
